//! Data types crossing the storage boundary.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

/// A FHIR resource as held by a storage backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredResource {
    /// The resource ID.
    pub id: String,
    /// The version ID of this specific version.
    pub version_id: String,
    /// The FHIR resource type ("Patient", "Account", ...).
    pub resource_type: String,
    /// The full resource content as JSON.
    pub resource: Value,
    /// When this version was written.
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated: OffsetDateTime,
    /// When the resource was originally created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl StoredResource {
    /// Creates a new stored resource stamped with the current time.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        version_id: impl Into<String>,
        resource_type: impl Into<String>,
        resource: Value,
    ) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: id.into(),
            version_id: version_id.into(),
            resource_type: resource_type.into(),
            resource,
            last_updated: now,
            created_at: now,
        }
    }

    /// Creates a successor version of this resource with new content.
    #[must_use]
    pub fn new_version(&self, version_id: impl Into<String>, resource: Value) -> Self {
        Self {
            id: self.id.clone(),
            version_id: version_id.into(),
            resource_type: self.resource_type.clone(),
            resource,
            last_updated: OffsetDateTime::now_utc(),
            created_at: self.created_at,
        }
    }
}

/// One sort key of a search, in FHIR `_sort` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    /// The element to sort by.
    pub field: String,
    /// Whether to sort descending.
    pub descending: bool,
}

/// Parameters of a search operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    /// Search parameter (code, value) pairs in the order given. Repeated
    /// codes mean OR semantics.
    pub params: Vec<(String, String)>,
    /// Maximum number of entries to return (`_count`).
    pub count: Option<u32>,
    /// Number of entries to skip (`_offset`).
    pub offset: Option<u32>,
    /// Sort keys in priority order (`_sort`).
    pub sort: Vec<SortKey>,
}

impl SearchParams {
    /// Creates empty search parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a search parameter value.
    #[must_use]
    pub fn with_param(mut self, code: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((code.into(), value.into()));
        self
    }

    /// Sets the page size.
    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Sets the page offset.
    #[must_use]
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Adds a sort key.
    #[must_use]
    pub fn with_sort(mut self, field: impl Into<String>, descending: bool) -> Self {
        self.sort.push(SortKey {
            field: field.into(),
            descending,
        });
        self
    }

    /// Values given for a parameter code, in order.
    pub fn values_of<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.params
            .iter()
            .filter(move |(c, _)| c == code)
            .map(|(_, v)| v.as_str())
    }
}

/// Result of a search operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResult {
    /// The matching resources, in result order.
    pub entries: Vec<StoredResource>,
    /// Total count of matches before pagination, if computed.
    pub total: Option<u32>,
    /// Whether more results exist beyond this page.
    pub has_more: bool,
}

impl SearchResult {
    /// An empty result.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of entries in this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the page is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_version_keeps_identity() {
        let original = StoredResource::new("1", "1", "Patient", json!({"resourceType": "Patient"}));
        let updated = original.new_version("2", json!({"resourceType": "Patient", "active": true}));

        assert_eq!(updated.id, "1");
        assert_eq!(updated.version_id, "2");
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.resource["active"], json!(true));
    }

    #[test]
    fn test_search_params_builder() {
        let params = SearchParams::new()
            .with_param("name", "smith")
            .with_param("name", "jones")
            .with_count(10)
            .with_offset(20)
            .with_sort("birthDate", true);

        assert_eq!(params.values_of("name").collect::<Vec<_>>(), ["smith", "jones"]);
        assert_eq!(params.count, Some(10));
        assert_eq!(params.offset, Some(20));
        assert_eq!(params.sort[0].field, "birthDate");
        assert!(params.sort[0].descending);
    }

    #[test]
    fn test_search_result_empty() {
        let result = SearchResult::empty();
        assert!(result.is_empty());
        assert_eq!(result.len(), 0);
        assert!(!result.has_more);
    }
}
