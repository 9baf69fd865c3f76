//! Per-release resource-kind tables.
//!
//! Each module declares the kinds one FHIR release exposes. Field lists are
//! mechanically derived from the FHIR specification for that release; note
//! the per-release divergences (DSTU2 `Encounter.patient` vs later
//! `Encounter.subject`, DSTU2 `MedicationOrder` vs later
//! `MedicationRequest`, `PractitionerRole` and `AdverseEvent` absent from
//! DSTU2).

pub mod dstu2;
pub mod r4;
pub mod stu3;

use crate::kind::ResourceKind;
use crate::release::FhirRelease;

/// Returns the kind table for a release.
#[must_use]
pub fn kinds_for(release: FhirRelease) -> &'static [ResourceKind] {
    match release {
        FhirRelease::Dstu2 => dstu2::KINDS,
        FhirRelease::Stu3 => stu3::KINDS,
        FhirRelease::R4 => r4::KINDS,
    }
}
