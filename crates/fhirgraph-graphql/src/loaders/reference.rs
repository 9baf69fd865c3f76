//! Reference parsing and the reference DataLoader.

use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::dataloader::Loader;
use fhirgraph_storage::DynStorage;
use tracing::{debug, trace, warn};

use crate::error::GraphQLError;

/// A parsed FHIR reference string.
///
/// Three forms are recognized:
/// - relative: `Patient/123`
/// - absolute: `https://example.org/fhir/Patient/123`
/// - contained: `#med1` (resolved within the parent's `contained` list,
///   so the loader never fetches these from storage)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReference {
    /// Target resource type; empty for contained references.
    pub resource_type: String,
    /// Target resource (or contained entry) ID.
    pub id: String,
    /// True for absolute URL references.
    pub is_absolute: bool,
    /// True for `#id` contained references.
    pub is_contained: bool,
}

impl ParsedReference {
    /// Parses a reference string, returning `None` if no form matches.
    #[must_use]
    pub fn parse(reference: &str) -> Option<Self> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }

        if let Some(contained_id) = reference.strip_prefix('#') {
            if contained_id.is_empty() {
                return None;
            }
            return Some(Self {
                resource_type: String::new(),
                id: contained_id.to_string(),
                is_absolute: false,
                is_contained: true,
            });
        }

        let is_absolute =
            reference.starts_with("http://") || reference.starts_with("https://");

        // The last two path segments are Type/id regardless of base URL.
        let mut segments = reference.rsplit('/');
        let id = segments.next()?;
        let resource_type = segments.next()?;

        if id.is_empty() || resource_type.is_empty() {
            return None;
        }
        // Resource type names are upper camel case.
        if !resource_type.chars().next().is_some_and(char::is_uppercase) {
            return None;
        }

        Some(Self {
            resource_type: resource_type.to_string(),
            id: id.to_string(),
            is_absolute,
            is_contained: false,
        })
    }

    /// The reference in relative form (`Patient/123` or `#id`).
    #[must_use]
    pub fn as_relative(&self) -> String {
        if self.is_contained {
            format!("#{}", self.id)
        } else {
            format!("{}/{}", self.resource_type, self.id)
        }
    }
}

/// Key for the reference loader: the raw reference string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceKey(pub String);

impl ReferenceKey {
    /// Creates a key from a reference string.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }
}

/// A resolved reference: the parse result plus the target, if found.
#[derive(Debug, Clone)]
pub struct ResolvedReference {
    /// How the reference string parsed.
    pub parsed: ParsedReference,
    /// The loaded target resource JSON, if it exists.
    pub resource: Option<serde_json::Value>,
}

/// Batched loader resolving reference strings to resources.
pub struct ReferenceLoader {
    storage: DynStorage,
}

impl ReferenceLoader {
    /// Creates a loader over the given storage.
    #[must_use]
    pub fn new(storage: DynStorage) -> Self {
        Self { storage }
    }
}

impl Loader<ReferenceKey> for ReferenceLoader {
    type Value = ResolvedReference;
    type Error = Arc<GraphQLError>;

    async fn load(
        &self,
        keys: &[ReferenceKey],
    ) -> Result<HashMap<ReferenceKey, Self::Value>, Self::Error> {
        debug!(key_count = keys.len(), "resolving reference batch");

        let mut results = HashMap::with_capacity(keys.len());
        for key in keys {
            let Some(parsed) = ParsedReference::parse(&key.0) else {
                trace!(reference = %key.0, "unparseable reference");
                continue;
            };

            // Contained references need the parent resource; the field
            // resolver handles them without touching storage.
            if parsed.is_contained {
                results.insert(
                    key.clone(),
                    ResolvedReference {
                        parsed,
                        resource: None,
                    },
                );
                continue;
            }

            let resource = match self.storage.read(&parsed.resource_type, &parsed.id).await {
                Ok(found) => found.map(|stored| stored.resource),
                Err(e) => {
                    warn!(reference = %key.0, error = %e, "failed to load reference target");
                    None
                }
            };

            results.insert(key.clone(), ResolvedReference { parsed, resource });
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_relative() {
        let parsed = ParsedReference::parse("Patient/123").unwrap();
        assert_eq!(parsed.resource_type, "Patient");
        assert_eq!(parsed.id, "123");
        assert!(!parsed.is_absolute);
        assert!(!parsed.is_contained);
    }

    #[test]
    fn test_parse_absolute() {
        let parsed = ParsedReference::parse("https://example.org/fhir/Observation/obs-1").unwrap();
        assert_eq!(parsed.resource_type, "Observation");
        assert_eq!(parsed.id, "obs-1");
        assert!(parsed.is_absolute);
    }

    #[test]
    fn test_parse_contained() {
        let parsed = ParsedReference::parse("#med1").unwrap();
        assert!(parsed.is_contained);
        assert_eq!(parsed.id, "med1");
        assert!(parsed.resource_type.is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(ParsedReference::parse("").is_none());
        assert!(ParsedReference::parse("   ").is_none());
        assert!(ParsedReference::parse("#").is_none());
        assert!(ParsedReference::parse("justanid").is_none());
        assert!(ParsedReference::parse("patient/123").is_none()); // lowercase type
        assert!(ParsedReference::parse("/123").is_none());
        assert!(ParsedReference::parse("Patient/").is_none());
    }

    #[test]
    fn test_as_relative() {
        let parsed = ParsedReference::parse("https://example.org/fhir/Patient/123").unwrap();
        assert_eq!(parsed.as_relative(), "Patient/123");

        let contained = ParsedReference::parse("#c1").unwrap();
        assert_eq!(contained.as_relative(), "#c1");
    }
}
