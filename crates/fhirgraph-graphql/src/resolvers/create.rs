//! Create mutation resolver.
//!
//! Handles mutations like:
//!
//! ```graphql
//! mutation {
//!   PatientCreate(res: {resource: {...}}) {
//!     id
//!     json
//!   }
//! }
//! ```

use async_graphql::dynamic::{FieldFuture, ResolverContext, ValueAccessor};
use tracing::{debug, warn};

use super::{get_graphql_context, json_to_graphql_value, storage_error_to_graphql, value_accessor_to_json};

/// Resolver for resource creation mutations.
pub struct CreateResolver;

impl CreateResolver {
    /// Creates the resolver backing a `{Kind}Create(res: {Kind}Input!)`
    /// mutation field.
    pub fn resolve(
        resource_type: String,
    ) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        move |ctx| {
            let resource_type = resource_type.clone();
            FieldFuture::new(async move {
                debug!(resource_type = %resource_type, "processing create mutation");

                let gql_ctx = get_graphql_context(&ctx)?;

                let input = ctx
                    .args
                    .get("res")
                    .ok_or_else(|| async_graphql::Error::new("Missing required argument 'res'"))?;
                let resource_json = extract_resource_from_input(&input, &resource_type)?;

                let result = gql_ctx.storage.create(&resource_json).await.map_err(|e| {
                    warn!(error = %e, resource_type = %resource_type, "create failed");
                    storage_error_to_graphql(e)
                })?;

                debug!(
                    resource_type = %resource_type,
                    id = %result.id,
                    version_id = %result.version_id,
                    "resource created"
                );

                Ok(Some(json_to_graphql_value(result.resource)))
            })
        }
    }
}

/// Extracts the resource JSON from a `{resource: ...}` mutation input and
/// checks its type discriminant against the mutated kind.
pub(crate) fn extract_resource_from_input(
    input: &ValueAccessor<'_>,
    expected_type: &str,
) -> Result<serde_json::Value, async_graphql::Error> {
    let obj = input
        .object()
        .map_err(|_| async_graphql::Error::new("Invalid input: expected object"))?;

    let resource_field = obj
        .get("resource")
        .ok_or_else(|| async_graphql::Error::new("Missing required field 'resource'"))?;

    let mut resource = value_accessor_to_json(&resource_field)?;

    match resource.get("resourceType").and_then(|v| v.as_str()) {
        Some(rt) if rt != expected_type => Err(async_graphql::Error::new(format!(
            "Resource type mismatch: expected {expected_type}, got {rt}"
        ))),
        Some(_) => Ok(resource),
        None => {
            // Tolerate a missing discriminant on input; the mutated field
            // determines the kind.
            if let serde_json::Value::Object(ref mut map) = resource {
                map.insert(
                    "resourceType".to_string(),
                    serde_json::Value::String(expected_type.to_string()),
                );
            }
            Ok(resource)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_created() {
        let _resolver = CreateResolver::resolve("Patient".to_string());
    }
}
