//! List/search resolver.
//!
//! Backs query fields like `PatientList(name: "John", _count: 10)`.
//! GraphQL argument names use underscores where FHIR parameter codes use
//! hyphens; the mapping is reversed here before the search is delegated
//! to storage.

use async_graphql::Value;
use async_graphql::dynamic::{FieldFuture, ResolverContext};
use fhirgraph_storage::SearchParams;
use tracing::{debug, warn};

use super::{get_graphql_context, json_to_graphql_value, storage_error_to_graphql};

/// Resolver for list/search operations.
pub struct ListResolver;

impl ListResolver {
    /// Creates the resolver backing a `{Kind}List(...)` query field.
    pub fn resolve(
        resource_type: String,
    ) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        move |ctx| {
            let resource_type = resource_type.clone();
            FieldFuture::new(async move {
                let gql_ctx = get_graphql_context(&ctx)?;

                let params = build_search_params(&ctx);
                debug!(
                    resource_type = %resource_type,
                    params = ?params,
                    "resolving list query"
                );

                let result = gql_ctx
                    .storage
                    .search(&resource_type, &params)
                    .await
                    .map_err(|e| {
                        warn!(error = %e, "storage error during search");
                        storage_error_to_graphql(e)
                    })?;

                let entries: Vec<Value> = result
                    .entries
                    .into_iter()
                    .map(|stored| json_to_graphql_value(stored.resource))
                    .collect();

                debug!(
                    resource_type = %resource_type,
                    count = entries.len(),
                    "list query completed"
                );

                Ok(Some(Value::List(entries)))
            })
        }
    }
}

/// Builds search parameters from the field's GraphQL arguments.
fn build_search_params(ctx: &ResolverContext<'_>) -> SearchParams {
    let mut params = SearchParams::new();

    for (key, value) in ctx.args.iter() {
        match key.as_str() {
            "_count" => {
                if let Ok(n) = value.i64() {
                    params = params.with_count(n.max(0) as u32);
                }
            }
            "_offset" => {
                if let Ok(n) = value.i64() {
                    params = params.with_offset(n.max(0) as u32);
                }
            }
            "_sort" => {
                if let Ok(s) = value.string() {
                    // "-date,name" sorts by date descending, then name.
                    for sort_key in s.split(',') {
                        let sort_key = sort_key.trim();
                        if sort_key.is_empty() {
                            continue;
                        }
                        match sort_key.strip_prefix('-') {
                            Some(field) => params = params.with_sort(field, true),
                            None => params = params.with_sort(sort_key, false),
                        }
                    }
                }
            }
            _ => {
                // GraphQL names can't carry hyphens; restore the FHIR code
                // (clinical_status -> clinical-status). Leading-underscore
                // control parameters pass through unchanged.
                let code = if key.starts_with('_') {
                    key.to_string()
                } else {
                    key.replace('_', "-")
                };

                if let Ok(s) = value.string() {
                    params = params.with_param(&code, s);
                } else if let Ok(n) = value.i64() {
                    params = params.with_param(&code, n.to_string());
                } else if let Ok(b) = value.boolean() {
                    params = params.with_param(&code, b.to_string());
                } else if let Ok(list) = value.list() {
                    // Repeated values mean OR semantics.
                    for item in list.iter() {
                        if let Ok(s) = item.string() {
                            params = params.with_param(&code, s);
                        }
                    }
                }
            }
        }
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_created() {
        let _resolver = ListResolver::resolve("Patient".to_string());
    }
}
