//! Lazy schema holder.
//!
//! Building the schema walks the whole release model; [`LazySchema`]
//! defers that work until the first request so the server can bind its
//! listener immediately. Concurrent callers during a build receive a
//! retryable `SchemaInitializing` error instead of queueing up.

use std::sync::Arc;

use async_graphql::dynamic::Schema;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use super::builder::FhirSchemaBuilder;
use crate::error::GraphQLError;

/// State of the lazy schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaState {
    /// Schema has not been built yet.
    Uninitialized,
    /// Schema is currently being built.
    Building,
    /// Schema is ready for use.
    Ready,
    /// Schema build failed.
    Failed,
}

/// Thread-safe build-once schema holder.
///
/// The first `get_or_build` triggers the build; later calls return the
/// cached `Arc<Schema>`. `invalidate` drops the cache so the next access
/// rebuilds.
pub struct LazySchema {
    schema: RwLock<Option<Arc<Schema>>>,
    build_lock: Mutex<()>,
    state: RwLock<SchemaState>,
    builder: FhirSchemaBuilder,
    last_error: RwLock<Option<String>>,
}

impl LazySchema {
    /// Creates a lazy schema around a builder.
    #[must_use]
    pub fn new(builder: FhirSchemaBuilder) -> Self {
        Self {
            schema: RwLock::new(None),
            build_lock: Mutex::new(()),
            state: RwLock::new(SchemaState::Uninitialized),
            builder,
            last_error: RwLock::new(None),
        }
    }

    /// Current state of the schema.
    pub async fn state(&self) -> SchemaState {
        *self.state.read().await
    }

    /// Returns the schema, building it on first access.
    ///
    /// # Errors
    ///
    /// Returns `GraphQLError::SchemaInitializing` while another caller's
    /// build is in flight, or `GraphQLError::SchemaBuildFailed` if the
    /// build fails.
    pub async fn get_or_build(&self) -> Result<Arc<Schema>, GraphQLError> {
        if let Some(schema) = self.get().await {
            return Ok(schema);
        }

        let Ok(_guard) = self.build_lock.try_lock() else {
            return Err(GraphQLError::SchemaInitializing);
        };

        // Another caller may have finished while we took the lock.
        if let Some(schema) = self.get().await {
            return Ok(schema);
        }

        self.run_build().await
    }

    /// Returns the schema, waiting for any in-flight build to finish
    /// instead of erroring. Suitable where latency is acceptable, e.g.
    /// warm-up at startup.
    ///
    /// # Errors
    ///
    /// Returns `GraphQLError::SchemaBuildFailed` if the build fails.
    pub async fn get_or_build_wait(&self) -> Result<Arc<Schema>, GraphQLError> {
        if let Some(schema) = self.get().await {
            return Ok(schema);
        }

        let _guard = self.build_lock.lock().await;

        if let Some(schema) = self.get().await {
            return Ok(schema);
        }

        self.run_build().await
    }

    /// Returns the schema if already built, without triggering a build.
    pub async fn get(&self) -> Option<Arc<Schema>> {
        self.schema.read().await.clone()
    }

    /// Drops the cached schema; the next access rebuilds it.
    pub async fn invalidate(&self) {
        let _guard = self.build_lock.lock().await;
        *self.schema.write().await = None;
        *self.state.write().await = SchemaState::Uninitialized;
        *self.last_error.write().await = None;
        info!("GraphQL schema invalidated, will rebuild on next request");
    }

    /// The last build error, if any.
    pub async fn last_error(&self) -> Option<String> {
        self.last_error.read().await.clone()
    }

    /// Returns true once the schema is built.
    pub async fn is_ready(&self) -> bool {
        *self.state.read().await == SchemaState::Ready
    }

    /// Runs one build under the caller-held build lock.
    async fn run_build(&self) -> Result<Arc<Schema>, GraphQLError> {
        *self.state.write().await = SchemaState::Building;
        info!("building GraphQL schema");

        match self.builder.build().await {
            Ok(schema) => {
                let schema = Arc::new(schema);
                *self.schema.write().await = Some(Arc::clone(&schema));
                *self.state.write().await = SchemaState::Ready;
                *self.last_error.write().await = None;
                info!("GraphQL schema built");
                Ok(schema)
            }
            Err(e) => {
                let message = e.to_string();
                warn!(error = %message, "GraphQL schema build failed");
                *self.state.write().await = SchemaState::Failed;
                *self.last_error.write().await = Some(message.clone());
                Err(GraphQLError::SchemaBuildFailed(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::builder::SchemaBuilderConfig;
    use fhirgraph_model::{FhirRelease, ReleaseModel};

    fn lazy_r4() -> LazySchema {
        LazySchema::new(FhirSchemaBuilder::new(
            Arc::new(ReleaseModel::new(FhirRelease::R4)),
            SchemaBuilderConfig::default(),
        ))
    }

    #[tokio::test]
    async fn test_builds_on_first_access() {
        let lazy = lazy_r4();
        assert_eq!(lazy.state().await, SchemaState::Uninitialized);
        assert!(lazy.get().await.is_none());

        let schema = lazy.get_or_build().await.unwrap();
        assert_eq!(lazy.state().await, SchemaState::Ready);
        assert!(lazy.is_ready().await);
        assert!(schema.sdl().contains("type Query"));

        // Second access returns the cached instance.
        let again = lazy.get_or_build().await.unwrap();
        assert!(Arc::ptr_eq(&schema, &again));
    }

    #[tokio::test]
    async fn test_invalidate_resets() {
        let lazy = lazy_r4();
        lazy.get_or_build().await.unwrap();

        lazy.invalidate().await;
        assert_eq!(lazy.state().await, SchemaState::Uninitialized);
        assert!(lazy.get().await.is_none());

        assert!(lazy.get_or_build_wait().await.is_ok());
    }
}
