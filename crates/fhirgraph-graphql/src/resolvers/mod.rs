//! GraphQL resolvers for FHIR resources.
//!
//! - `read`: single resource queries (`Patient(_id: "123")`), doubling as
//!   the instance-level lookup when a target is pinned in the context
//! - `list`: search queries (`PatientList(name: "John")`)
//! - `create` / `update` / `delete`: mutations
//! - `reference`: polymorphic reference and `contained` field resolution

mod create;
mod delete;
mod list;
mod read;
mod reference;
mod update;

pub use create::CreateResolver;
pub use delete::DeleteResolver;
pub use list::ListResolver;
pub use read::ReadResolver;
pub use reference::ReferenceResolver;
pub use update::UpdateResolver;

use async_graphql::dynamic::{ResolverContext, ValueAccessor};
use async_graphql::{Error as GqlError, ErrorExtensions, Value};

use crate::context::GraphQLContext;
use crate::schema::polymorphic::TypeResolutionError;

/// Extracts the per-request context from a resolver context.
pub(crate) fn get_graphql_context<'a>(
    ctx: &'a ResolverContext<'_>,
) -> Result<&'a GraphQLContext, GqlError> {
    ctx.data::<GraphQLContext>()
        .map_err(|_| GqlError::new("GraphQL context not available"))
}

/// Reads a field off the parent object value, if present.
pub(crate) fn parent_field<'a>(ctx: &'a ResolverContext<'_>, name: &str) -> Option<&'a Value> {
    match ctx.parent_value.as_value() {
        Some(Value::Object(obj)) => obj.get(name),
        _ => None,
    }
}

/// Converts a `serde_json::Value` to a GraphQL value.
pub(crate) fn json_to_graphql_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else if let Some(f) = n.as_f64() {
                Value::Number(
                    async_graphql::Number::from_f64(f)
                        .unwrap_or_else(|| async_graphql::Number::from(0)),
                )
            } else {
                Value::Null
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => {
            Value::List(arr.into_iter().map(json_to_graphql_value).collect())
        }
        serde_json::Value::Object(obj) => {
            let map: async_graphql::indexmap::IndexMap<async_graphql::Name, Value> = obj
                .into_iter()
                .map(|(k, v)| (async_graphql::Name::new(k), json_to_graphql_value(v)))
                .collect();
            Value::Object(map)
        }
    }
}

/// Converts a GraphQL input value accessor to `serde_json::Value`.
pub(crate) fn value_accessor_to_json(
    value: &ValueAccessor<'_>,
) -> Result<serde_json::Value, GqlError> {
    if value.is_null() {
        return Ok(serde_json::Value::Null);
    }
    if let Ok(b) = value.boolean() {
        return Ok(serde_json::Value::Bool(b));
    }
    if let Ok(i) = value.i64() {
        return Ok(serde_json::Value::Number(i.into()));
    }
    if let Ok(f) = value.f64() {
        return Ok(serde_json::json!(f));
    }
    if let Ok(s) = value.string() {
        return Ok(serde_json::Value::String(s.to_string()));
    }
    if let Ok(list) = value.list() {
        let items: Result<Vec<serde_json::Value>, GqlError> =
            list.iter().map(|v| value_accessor_to_json(&v)).collect();
        return Ok(serde_json::Value::Array(items?));
    }
    if let Ok(obj) = value.object() {
        let mut map = serde_json::Map::new();
        for (k, v) in obj.iter() {
            map.insert(k.to_string(), value_accessor_to_json(&v)?);
        }
        return Ok(serde_json::Value::Object(map));
    }
    Ok(serde_json::Value::Null)
}

/// Converts a storage error to a GraphQL error carrying an
/// OperationOutcome in its extensions.
pub(crate) fn storage_error_to_graphql(error: fhirgraph_storage::StorageError) -> GqlError {
    use fhirgraph_storage::ErrorCategory;

    let message = error.to_string();
    let (severity, code) = match error.category() {
        ErrorCategory::NotFound => ("error", "not-found"),
        ErrorCategory::Conflict => ("error", "conflict"),
        ErrorCategory::Validation => ("error", "invalid"),
        ErrorCategory::Internal => ("fatal", "exception"),
    };
    let category = error.category().to_string();

    let outcome = serde_json::json!({
        "resourceType": "OperationOutcome",
        "issue": [{
            "severity": severity,
            "code": code,
            "diagnostics": message
        }]
    });

    let outcome_value = json_to_graphql_value(outcome);
    GqlError::new(&message).extend_with(|_, e| {
        e.set("category", category.as_str());
        e.set("operationOutcome", outcome_value.clone());
    })
}

/// Converts a type resolution error to a field-level GraphQL error.
///
/// The error stays local to the polymorphic field being resolved; sibling
/// fields and the rest of the response are unaffected.
pub(crate) fn resolution_error_to_graphql(error: &TypeResolutionError) -> GqlError {
    let code = error.error_code();
    GqlError::new(error.to_string()).extend_with(|_, e| e.set("code", code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_to_graphql_primitives() {
        assert!(matches!(json_to_graphql_value(json!(null)), Value::Null));
        assert!(matches!(
            json_to_graphql_value(json!(true)),
            Value::Boolean(true)
        ));
        assert!(matches!(json_to_graphql_value(json!(42)), Value::Number(_)));
        assert!(matches!(
            json_to_graphql_value(json!("hello")),
            Value::String(s) if s == "hello"
        ));
    }

    #[test]
    fn test_json_to_graphql_structured() {
        let list = json_to_graphql_value(json!([1, 2, 3]));
        assert!(matches!(list, Value::List(items) if items.len() == 3));

        let obj = json_to_graphql_value(json!({"name": "John"}));
        if let Value::Object(map) = obj {
            assert!(map.contains_key("name"));
        } else {
            panic!("expected object");
        }
    }

    #[test]
    fn test_resolution_error_codes() {
        let err = TypeResolutionError::MissingDiscriminant {
            field: "subject".into(),
        };
        let gql = resolution_error_to_graphql(&err);
        assert!(gql.message.contains("subject"));
    }
}
