//! Single resource read resolver.
//!
//! Backs query fields like `Patient(_id: "123")`. On the instance-level
//! endpoint the `_id` argument may be omitted; the resolver then falls back
//! to the target pinned in the request context, rejecting a kind mismatch
//! between the queried field and the pinned target.

use async_graphql::dynamic::{FieldFuture, ResolverContext};
use tracing::{debug, warn};

use super::{get_graphql_context, json_to_graphql_value, storage_error_to_graphql};

/// Resolver for single resource reads.
pub struct ReadResolver;

impl ReadResolver {
    /// Creates the resolver backing a `{Kind}(_id: ID)` query field.
    pub fn resolve(
        resource_type: String,
    ) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        move |ctx| {
            let resource_type = resource_type.clone();
            FieldFuture::new(async move {
                let gql_ctx = get_graphql_context(&ctx)?;

                let id = match ctx.args.get("_id").and_then(|v| v.string().ok()) {
                    Some(id) => id.to_string(),
                    None => {
                        // Instance-level request: use the pinned target.
                        let (Some(target_type), Some(target_id)) = (
                            gql_ctx.target_resource_type.as_deref(),
                            gql_ctx.target_resource_id.as_deref(),
                        ) else {
                            return Err(async_graphql::Error::new(
                                "Missing required argument '_id'",
                            ));
                        };
                        if target_type != resource_type {
                            return Err(async_graphql::Error::new(format!(
                                "this endpoint serves {target_type}/{target_id}, not {resource_type}"
                            )));
                        }
                        target_id.to_string()
                    }
                };

                debug!(
                    resource_type = %resource_type,
                    id = %id,
                    "resolving single resource read"
                );

                let result = gql_ctx
                    .storage
                    .read(&resource_type, &id)
                    .await
                    .map_err(|e| {
                        warn!(error = %e, "storage error reading resource");
                        storage_error_to_graphql(e)
                    })?;

                match result {
                    Some(stored) => Ok(Some(json_to_graphql_value(stored.resource))),
                    None => {
                        // Nullable field: a missing resource is null, not
                        // an error.
                        debug!(resource_type = %resource_type, id = %id, "resource not found");
                        Ok(None)
                    }
                }
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_created() {
        let _resolver = ReadResolver::resolve("Patient".to_string());
    }
}
