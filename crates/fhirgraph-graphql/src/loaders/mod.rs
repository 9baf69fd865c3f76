//! Per-request DataLoaders.
//!
//! Loaders batch and cache reference loads within a single GraphQL
//! execution, so a response resolving many references to the same targets
//! does not issue one storage read per reference.

mod reference;

pub use reference::{ParsedReference, ReferenceKey, ReferenceLoader, ResolvedReference};

use std::sync::Arc;

use async_graphql::dataloader::DataLoader;
use fhirgraph_storage::DynStorage;

/// The loaders attached to one request's context.
///
/// Created once per request so batching and caching stay request-scoped.
#[derive(Clone)]
pub struct DataLoaders {
    /// Parses FHIR reference strings and loads their targets.
    pub references: Arc<DataLoader<ReferenceLoader>>,
}

impl DataLoaders {
    /// Creates a fresh set of loaders over the given storage.
    #[must_use]
    pub fn new(storage: DynStorage) -> Self {
        Self {
            references: Arc::new(DataLoader::new(ReferenceLoader::new(storage), tokio::spawn)),
        }
    }
}

impl std::fmt::Debug for DataLoaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataLoaders").finish_non_exhaustive()
    }
}
