//! Schema generation.
//!
//! - [`polymorphic`] - candidate sets and type resolution (the mechanism
//!   behind every union-typed reference field)
//! - [`registry`] - two-pass shape registry breaking declaration cycles
//! - [`scalars`] - FHIR primitive scalar types
//! - [`builder`] - generates the schema from a release model
//! - [`lazy`] - build-once schema holder

pub mod builder;
pub mod lazy;
pub mod polymorphic;
pub mod registry;
pub mod scalars;

pub use builder::{ANY_RESOURCE_UNION, FhirSchemaBuilder, SchemaBuilderConfig};
pub use lazy::{LazySchema, SchemaState};
pub use scalars::{FHIR_RESOURCE_SCALAR, JSON_SCALAR};
