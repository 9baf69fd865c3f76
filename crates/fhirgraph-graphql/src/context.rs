//! GraphQL execution context.
//!
//! One [`GraphQLContext`] is built per request and injected into the
//! async-graphql request data. Resolvers reach it for storage access, the
//! release model, the request's data loaders, and — for instance-level
//! requests — the pinned target resource.

use std::sync::Arc;

use fhirgraph_model::ReleaseModel;
use fhirgraph_storage::DynStorage;

use crate::loaders::DataLoaders;

/// Per-request context available to every resolver.
#[derive(Clone)]
pub struct GraphQLContext {
    /// FHIR resource storage.
    pub storage: DynStorage,

    /// The release model the schema was generated from.
    pub model: Arc<ReleaseModel>,

    /// Request ID for tracing and correlation.
    pub request_id: String,

    /// Target resource type for instance-level requests ("Patient").
    pub target_resource_type: Option<String>,

    /// Target resource ID for instance-level requests ("123").
    pub target_resource_id: Option<String>,

    /// Request-scoped loaders batching reference and resource reads.
    pub loaders: DataLoaders,
}

impl GraphQLContext {
    /// Returns a new builder.
    #[must_use]
    pub fn builder() -> GraphQLContextBuilder {
        GraphQLContextBuilder::default()
    }

    /// Returns true for instance-level requests.
    #[must_use]
    pub fn is_instance_level(&self) -> bool {
        self.target_resource_type.is_some() && self.target_resource_id.is_some()
    }

    /// The pinned target as a relative reference ("Patient/123").
    #[must_use]
    pub fn target_reference(&self) -> Option<String> {
        match (&self.target_resource_type, &self.target_resource_id) {
            (Some(rt), Some(id)) => Some(format!("{rt}/{id}")),
            _ => None,
        }
    }
}

/// Builder for [`GraphQLContext`].
#[derive(Default)]
pub struct GraphQLContextBuilder {
    storage: Option<DynStorage>,
    model: Option<Arc<ReleaseModel>>,
    request_id: Option<String>,
    target_resource_type: Option<String>,
    target_resource_id: Option<String>,
}

impl GraphQLContextBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the storage backend.
    #[must_use]
    pub fn with_storage(mut self, storage: DynStorage) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Sets the release model.
    #[must_use]
    pub fn with_model(mut self, model: Arc<ReleaseModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Sets the request ID.
    #[must_use]
    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    /// Pins the instance-level target.
    #[must_use]
    pub fn with_target_resource(
        mut self,
        resource_type: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        self.target_resource_type = Some(resource_type.into());
        self.target_resource_id = Some(id.into());
        self
    }

    /// Builds the context.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first missing required field.
    pub fn build(self) -> Result<GraphQLContext, ContextBuilderError> {
        let storage = self
            .storage
            .ok_or(ContextBuilderError::MissingField("storage"))?;
        let model = self
            .model
            .ok_or(ContextBuilderError::MissingField("model"))?;
        let request_id = self
            .request_id
            .ok_or(ContextBuilderError::MissingField("request_id"))?;

        // Fresh loaders per request so batching stays request-scoped.
        let loaders = DataLoaders::new(storage.clone());

        Ok(GraphQLContext {
            storage,
            model,
            request_id,
            target_resource_type: self.target_resource_type,
            target_resource_id: self.target_resource_id,
            loaders,
        })
    }
}

/// Errors from building a context.
#[derive(Debug, thiserror::Error)]
pub enum ContextBuilderError {
    /// A required field was not provided.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_missing_storage() {
        let result = GraphQLContextBuilder::new()
            .with_request_id("req-1")
            .build();
        assert!(matches!(
            result,
            Err(ContextBuilderError::MissingField("storage"))
        ));
    }
}
