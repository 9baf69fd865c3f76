//! Update mutation resolver.
//!
//! Handles `{Kind}Update(id: ID!, res: {Kind}Input!)` mutations. The `id`
//! argument names the resource being replaced; an `id` inside the payload
//! is overwritten with it.

use async_graphql::dynamic::{FieldFuture, ResolverContext};
use tracing::{debug, warn};

use super::create::extract_resource_from_input;
use super::{get_graphql_context, json_to_graphql_value, storage_error_to_graphql};

/// Resolver for resource update mutations.
pub struct UpdateResolver;

impl UpdateResolver {
    /// Creates the resolver backing a `{Kind}Update` mutation field.
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

                let input = ctx
                    .args
                    .get("res")
                    .ok_or_else(|| async_graphql::Error::new("Missing required argument 'res'"))?;
                let mut resource_json = extract_resource_from_input(&input, &resource_type)?;

                if let serde_json::Value::Object(ref mut map) = resource_json {
                    map.insert("id".to_string(), serde_json::Value::String(id.clone()));
                }

                debug!(resource_type = %resource_type, id = %id, "processing update mutation");

                let result = gql_ctx
                    .storage
                    .update(&resource_json, None)
                    .await
                    .map_err(|e| {
                        warn!(error = %e, resource_type = %resource_type, id = %id, "update failed");
                        storage_error_to_graphql(e)
                    })?;

                debug!(
                    resource_type = %resource_type,
                    id = %id,
                    version_id = %result.version_id,
                    "resource updated"
                );

                Ok(Some(json_to_graphql_value(result.resource)))
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_created() {
        let _resolver = UpdateResolver::resolve("Patient".to_string());
    }
}
