//! The storage trait all backends implement.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StorageError;
use crate::types::{SearchParams, SearchResult, StoredResource};

/// Type-erased shared storage handle, as carried in request contexts.
pub type DynStorage = Arc<dyn FhirStorage>;

/// Contract for FHIR resource storage backends.
///
/// Implementations must be thread-safe; the GraphQL layer invokes these
/// methods concurrently from many request contexts.
///
/// # Example
///
/// ```ignore
/// async fn get_patient(storage: &dyn FhirStorage, id: &str) -> Result<StoredResource, StorageError> {
///     storage
///         .read("Patient", id)
///         .await?
///         .ok_or_else(|| StorageError::not_found("Patient", id))
/// }
/// ```
#[async_trait]
pub trait FhirStorage: Send + Sync {
    /// Creates a new resource.
    ///
    /// The resource must carry a `resourceType` field; if it lacks an `id`,
    /// the backend generates one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::AlreadyExists` if a resource with the same
    /// type and ID exists, or `StorageError::InvalidResource` if the payload
    /// is malformed.
    async fn create(&self, resource: &Value) -> Result<StoredResource, StorageError>;

    /// Reads a resource by type and ID.
    ///
    /// Returns `None` for a missing resource; errors are reserved for
    /// infrastructure failures.
    async fn read(
        &self,
        resource_type: &str,
        id: &str,
    ) -> Result<Option<StoredResource>, StorageError>;

    /// Updates an existing resource.
    ///
    /// The resource must carry `resourceType` and `id`. When `if_match` is
    /// given, the update succeeds only if it equals the stored version ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the resource does not exist, or
    /// `StorageError::VersionConflict` on a failed precondition.
    async fn update(
        &self,
        resource: &Value,
        if_match: Option<&str>,
    ) -> Result<StoredResource, StorageError>;

    /// Deletes a resource by type and ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the resource does not exist.
    async fn delete(&self, resource_type: &str, id: &str) -> Result<(), StorageError>;

    /// Searches for resources of a given type.
    ///
    /// # Errors
    ///
    /// Returns an error for infrastructure failures or unusable parameters.
    async fn search(
        &self,
        resource_type: &str,
        params: &SearchParams,
    ) -> Result<SearchResult, StorageError>;

    /// Name of this backend for logging.
    fn backend_name(&self) -> &'static str;
}
