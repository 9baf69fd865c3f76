//! # fhirgraph-model
//!
//! Static FHIR model tables for the fhirgraph server.
//!
//! This crate declares, per FHIR release (1.0.2, 3.0.1, 4.0.0), the set of
//! resource kinds the server exposes together with their polymorphic
//! reference fields and search parameters. The GraphQL layer consumes these
//! tables to generate its schema; the tables are the single source of truth
//! for which kinds exist and which candidate kinds each reference field may
//! resolve to.
//!
//! The tables are plain static data with no behavior of their own.
//! [`ReleaseModel`] provides the lookup API and a consistency check
//! (`validate`) that every declared reference target names a kind that
//! exists in the same release.

pub mod kind;
pub mod model;
pub mod release;
mod releases;

pub use kind::{ReferenceField, ResourceKind, SearchParam, SearchParamType};
pub use model::{ModelError, ReleaseModel};
pub use release::FhirRelease;
