//! Schema shape tests: the generated SDL carries the per-release kind
//! tables, their query/mutation surface and the per-field unions.

use std::sync::Arc;

use fhirgraph_graphql::{FhirSchemaBuilder, SchemaBuilderConfig};
use fhirgraph_model::{FhirRelease, ReleaseModel};

async fn sdl_for(release: FhirRelease) -> String {
    let model = Arc::new(ReleaseModel::new(release));
    FhirSchemaBuilder::new(model, SchemaBuilderConfig::default())
        .build()
        .await
        .expect("schema builds")
        .sdl()
}

#[tokio::test]
async fn every_release_builds_and_exposes_all_kinds() {
    for release in FhirRelease::ALL {
        let sdl = sdl_for(release).await;
        let model = ReleaseModel::new(release);

        for kind in model.kinds() {
            assert!(
                sdl.contains(&format!("type {} ", kind.name))
                    || sdl.contains(&format!("type {} {{", kind.name)),
                "{release}: missing object type {}",
                kind.name
            );
            assert!(
                sdl.contains(&format!("{}List(", kind.name)),
                "{release}: missing list query for {}",
                kind.name
            );
            assert!(
                sdl.contains(&format!("{}Create(", kind.name)),
                "{release}: missing create mutation for {}",
                kind.name
            );
            assert!(
                sdl.contains(&format!("{}Update(", kind.name)),
                "{release}: missing update mutation for {}",
                kind.name
            );
            assert!(
                sdl.contains(&format!("{}Delete(", kind.name)),
                "{release}: missing delete mutation for {}",
                kind.name
            );
            assert!(
                sdl.contains(&format!("input {}Input", kind.name)),
                "{release}: missing input type for {}",
                kind.name
            );
        }
    }
}

#[tokio::test]
async fn r4_account_subject_union_lists_all_candidates() {
    let sdl = sdl_for(FhirRelease::R4).await;

    let union_line = sdl
        .lines()
        .find(|line| line.starts_with("union AccountSubjectTarget"))
        .expect("AccountSubjectTarget union in SDL");

    for target in [
        "Patient",
        "Device",
        "Practitioner",
        "PractitionerRole",
        "Location",
        "HealthcareService",
        "Organization",
    ] {
        assert!(
            union_line.contains(target),
            "missing {target} in {union_line}"
        );
    }
}

#[tokio::test]
async fn stu3_account_subject_union_has_no_practitioner_role() {
    let sdl = sdl_for(FhirRelease::Stu3).await;

    let union_line = sdl
        .lines()
        .find(|line| line.starts_with("union AccountSubjectTarget"))
        .expect("AccountSubjectTarget union in SDL");

    assert!(union_line.contains("Practitioner"));
    assert!(!union_line.contains("PractitionerRole"));
}

#[tokio::test]
async fn dstu2_has_no_adverse_event_or_practitioner_role() {
    let sdl = sdl_for(FhirRelease::Dstu2).await;

    assert!(!sdl.contains("type AdverseEvent"));
    assert!(!sdl.contains("type PractitionerRole"));
    assert!(sdl.contains("MedicationOrderList("));

    // DSTU2 encounters reference the patient through `patient`.
    assert!(sdl.contains("union EncounterPatientTarget"));
}

#[tokio::test]
async fn any_resource_union_spans_the_release() {
    for release in FhirRelease::ALL {
        let sdl = sdl_for(release).await;
        let model = ReleaseModel::new(release);

        let union_line = sdl
            .lines()
            .find(|line| line.starts_with("union AnyResource"))
            .expect("AnyResource union in SDL");

        for kind in model.kinds() {
            assert!(
                union_line.contains(kind.name),
                "{release}: {} missing from AnyResource",
                kind.name
            );
        }
    }
}

#[tokio::test]
async fn search_arguments_use_graphql_safe_names() {
    let sdl = sdl_for(FhirRelease::R4).await;

    // `clinical-status` and `vaccine-code` become underscore names.
    assert!(sdl.contains("clinical_status"));
    assert!(sdl.contains("vaccine_code"));
    assert!(!sdl.contains("clinical-status"));
}
