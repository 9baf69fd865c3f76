//! Polymorphic reference field resolution.
//!
//! Backs every union-typed reference field in the generated schema, plus
//! the `contained` list. The flow is the same everywhere: obtain the
//! candidate value (load the reference target through the request's
//! loaders, or pick the inline entry for `#id` and `contained`), classify
//! it against the field's [`CandidateSet`], and tag the returned value with
//! the resolved concrete type.
//!
//! A dangling reference (target missing from storage, or `#id` naming no
//! contained entry) resolves to null. A loaded value that cannot be
//! classified is a field-level error; sibling fields are unaffected.

use std::sync::Arc;

use async_graphql::Value;
use async_graphql::dynamic::{FieldFuture, FieldValue, ResolverContext};
use tracing::trace;

use crate::context::GraphQLContext;
use crate::loaders::ReferenceKey;
use crate::schema::polymorphic::{CandidateSet, DISCRIMINANT};

use super::{get_graphql_context, json_to_graphql_value, parent_field, resolution_error_to_graphql};

/// Resolver for polymorphic reference fields.
pub struct ReferenceResolver;

impl ReferenceResolver {
    /// Creates the resolver for a single-valued reference field.
    pub fn resolve(
        field_name: String,
        candidates: Arc<CandidateSet>,
    ) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        move |ctx| {
            let field_name = field_name.clone();
            let candidates = Arc::clone(&candidates);
            FieldFuture::new(async move {
                let gql_ctx = get_graphql_context(&ctx)?;
                let parent = ctx.parent_value.as_value();
                let Some(reference) = parent_field(&ctx, &field_name) else {
                    return Ok(None);
                };
                resolve_target(parent, reference, gql_ctx, &candidates).await
            })
        }
    }

    /// Creates the resolver for a list-valued reference field.
    ///
    /// Unresolvable-but-legal entries (dangling references) are omitted
    /// from the list; classification failures error the whole field.
    pub fn resolve_list(
        field_name: String,
        candidates: Arc<CandidateSet>,
    ) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        move |ctx| {
            let field_name = field_name.clone();
            let candidates = Arc::clone(&candidates);
            FieldFuture::new(async move {
                let gql_ctx = get_graphql_context(&ctx)?;
                let parent = ctx.parent_value.as_value();
                let Some(Value::List(references)) = parent_field(&ctx, &field_name) else {
                    return Ok(None);
                };

                let mut resolved = Vec::with_capacity(references.len());
                for reference in references {
                    if let Some(value) =
                        resolve_target(parent, reference, gql_ctx, &candidates).await?
                    {
                        resolved.push(value);
                    }
                }
                Ok(Some(FieldValue::list(resolved)))
            })
        }
    }

    /// Creates the resolver for the `contained` list, whose entries are
    /// inline resources rather than reference elements.
    pub fn resolve_contained(
        candidates: Arc<CandidateSet>,
    ) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        move |ctx| {
            let candidates = Arc::clone(&candidates);
            FieldFuture::new(async move {
                let Some(Value::List(entries)) = parent_field(&ctx, "contained") else {
                    return Ok(None);
                };

                let mut resolved = Vec::with_capacity(entries.len());
                for entry in entries {
                    resolved.push(classify(entry.clone(), &candidates)?);
                }
                Ok(Some(FieldValue::list(resolved)))
            })
        }
    }
}

/// Tags an inline resource value with its resolved concrete type.
fn classify(
    value: Value,
    candidates: &CandidateSet,
) -> Result<FieldValue<'static>, async_graphql::Error> {
    let discriminant = match &value {
        Value::Object(obj) => obj.get(DISCRIMINANT).and_then(|v| match v {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }),
        _ => None,
    };

    let shape = candidates
        .resolve_discriminant(discriminant)
        .map_err(|e| resolution_error_to_graphql(&e))?;
    let type_name = shape.type_name.clone();

    Ok(FieldValue::value(value).with_type(type_name))
}

/// Resolves one reference element to its typed target value.
async fn resolve_target(
    parent: Option<&Value>,
    reference: &Value,
    gql_ctx: &GraphQLContext,
    candidates: &CandidateSet,
) -> Result<Option<FieldValue<'static>>, async_graphql::Error> {
    let Value::Object(reference_obj) = reference else {
        return Ok(None);
    };
    let Some(Value::String(reference_str)) = reference_obj.get("reference") else {
        // Logical (identifier-only) or display-only reference.
        return Ok(None);
    };

    trace!(
        reference = %reference_str,
        field = %candidates.field(),
        "resolving polymorphic reference"
    );

    // Contained references resolve within the parent resource.
    if let Some(contained_id) = reference_str.strip_prefix('#') {
        let Some(entry) = find_contained(parent, contained_id) else {
            return Ok(None);
        };
        return classify(entry.clone(), candidates).map(Some);
    }

    let resolved = gql_ctx
        .loaders
        .references
        .load_one(ReferenceKey::new(reference_str.as_str()))
        .await
        .map_err(|e| async_graphql::Error::new(format!("reference resolution failed: {e}")))?;

    match resolved.and_then(|r| r.resource) {
        Some(resource) => {
            let shape = candidates
                .resolve(&resource)
                .map_err(|e| resolution_error_to_graphql(&e))?;
            let type_name = shape.type_name.clone();
            Ok(Some(
                FieldValue::value(json_to_graphql_value(resource)).with_type(type_name),
            ))
        }
        None => {
            trace!(reference = %reference_str, "reference target not found");
            Ok(None)
        }
    }
}

/// Finds an entry of the parent's `contained` list by ID.
fn find_contained<'a>(parent: Option<&'a Value>, id: &str) -> Option<&'a Value> {
    let Some(Value::Object(parent_obj)) = parent else {
        return None;
    };
    let Some(Value::List(entries)) = parent_obj.get("contained") else {
        return None;
    };
    entries.iter().find(|entry| {
        matches!(entry, Value::Object(obj)
            if matches!(obj.get("id"), Some(Value::String(s)) if s == id))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::Name;

    fn object(pairs: &[(&str, Value)]) -> Value {
        Value::Object(
            pairs
                .iter()
                .map(|(k, v)| (Name::new(k), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn test_classify_tags_concrete_type() {
        let candidates = CandidateSet::new("subject", [("Patient", "Patient")]);
        let value = object(&[("resourceType", Value::String("Patient".into()))]);
        assert!(classify(value, &candidates).is_ok());
    }

    #[test]
    fn test_classify_rejects_unknown() {
        let candidates = CandidateSet::new("subject", [("Patient", "Patient")]);
        let value = object(&[("resourceType", Value::String("Device".into()))]);
        assert!(classify(value, &candidates).is_err());
    }

    #[test]
    fn test_find_contained() {
        let med = object(&[
            ("resourceType", Value::String("Medication".into())),
            ("id", Value::String("m1".into())),
        ]);
        let parent = object(&[("contained", Value::List(vec![med]))]);

        assert!(find_contained(Some(&parent), "m1").is_some());
        assert!(find_contained(Some(&parent), "m2").is_none());
        assert!(find_contained(None, "m1").is_none());
    }
}
