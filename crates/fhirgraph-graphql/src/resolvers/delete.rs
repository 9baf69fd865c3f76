//! Delete mutation resolver.
//!
//! Handles `{Kind}Delete(id: ID!)` mutations. A successful delete returns
//! an OperationOutcome confirming the deletion.

use async_graphql::dynamic::{FieldFuture, ResolverContext};
use tracing::{debug, warn};

use super::{get_graphql_context, json_to_graphql_value, storage_error_to_graphql};

/// Resolver for resource deletion mutations.
pub struct DeleteResolver;

impl DeleteResolver {
    /// Creates the resolver backing a `{Kind}Delete` mutation field.
    pub fn resolve(
        resource_type: String,
    ) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        move |ctx| {
            let resource_type = resource_type.clone();
            FieldFuture::new(async move {
                let gql_ctx = get_graphql_context(&ctx)?;

                let id = ctx
                    .args
                    .get("id")
                    .and_then(|v| v.string().ok().map(str::to_string))
                    .ok_or_else(|| async_graphql::Error::new("Missing required argument 'id'"))?;

                debug!(resource_type = %resource_type, id = %id, "processing delete mutation");

                gql_ctx
                    .storage
                    .delete(&resource_type, &id)
                    .await
                    .map_err(|e| {
                        warn!(error = %e, resource_type = %resource_type, id = %id, "delete failed");
                        storage_error_to_graphql(e)
                    })?;

                let outcome = serde_json::json!({
                    "resourceType": "OperationOutcome",
                    "issue": [{
                        "severity": "information",
                        "code": "informational",
                        "diagnostics": format!("Deleted {resource_type}/{id}")
                    }]
                });

                Ok(Some(json_to_graphql_value(outcome)))
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_created() {
        let _resolver = DeleteResolver::resolve("Patient".to_string());
    }
}
