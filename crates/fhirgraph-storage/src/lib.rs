//! # fhirgraph-storage
//!
//! Storage abstraction for the fhirgraph server.
//!
//! Defines the [`FhirStorage`] trait that all storage backends implement,
//! together with the data types flowing across that boundary. The GraphQL
//! layer depends only on this crate; concrete backends (the in-memory one
//! lives in `fhirgraph-db-memory`) plug in behind [`DynStorage`].

pub mod error;
pub mod traits;
pub mod types;

pub use error::{ErrorCategory, StorageError};
pub use traits::{DynStorage, FhirStorage};
pub use types::{SearchParams, SearchResult, SortKey, StoredResource};
