//! The in-memory `FhirStorage` backend.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use papaya::HashMap as PapayaHashMap;
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, trace};
use uuid::Uuid;

use fhirgraph_storage::{
    FhirStorage, SearchParams, SearchResult, StorageError, StoredResource,
};

use crate::query;

type StorageKey = String; // "ResourceType/id"

fn make_key(resource_type: &str, id: &str) -> StorageKey {
    format!("{resource_type}/{id}")
}

/// In-memory FHIR storage backed by a lock-free concurrent map.
///
/// Versions are generated from a process-wide atomic counter. Deletes are
/// hard deletes; there is no history retention.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    data: PapayaHashMap<StorageKey, StoredResource>,
    version_counter: AtomicU64,
}

impl InMemoryStorage {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: PapayaHashMap::new(),
            version_counter: AtomicU64::new(0),
        }
    }

    /// Number of resources currently stored, across all types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.pin().len()
    }

    /// Returns true if no resources are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.pin().is_empty()
    }

    fn next_version(&self) -> String {
        (self.version_counter.fetch_add(1, Ordering::SeqCst) + 1).to_string()
    }

    fn extract_type(resource: &Value) -> Result<String, StorageError> {
        resource
            .get("resourceType")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| StorageError::invalid_resource("missing resourceType"))
    }
}

/// Writes `id` and `meta.versionId`/`meta.lastUpdated` into the resource
/// JSON so the served representation carries its own metadata.
fn stamp(resource: &mut Value, id: &str, version_id: &str, at: OffsetDateTime) {
    if let Value::Object(map) = resource {
        map.insert("id".to_string(), Value::String(id.to_string()));

        let meta = map
            .entry("meta".to_string())
            .or_insert_with(|| Value::Object(serde_json::Map::new()));
        if let Value::Object(meta_map) = meta {
            meta_map.insert(
                "versionId".to_string(),
                Value::String(version_id.to_string()),
            );
            if let Ok(ts) = at.format(&Rfc3339) {
                meta_map.insert("lastUpdated".to_string(), Value::String(ts));
            }
        }
    }
}

#[async_trait]
impl FhirStorage for InMemoryStorage {
    async fn create(&self, resource: &Value) -> Result<StoredResource, StorageError> {
        let resource_type = Self::extract_type(resource)?;
        let id = resource
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let key = make_key(&resource_type, &id);
        let guard = self.data.pin();
        if guard.contains_key(&key) {
            return Err(StorageError::already_exists(resource_type, id));
        }

        let version_id = self.next_version();
        let mut content = resource.clone();
        let stored = {
            let now = OffsetDateTime::now_utc();
            stamp(&mut content, &id, &version_id, now);
            StoredResource::new(&id, &version_id, &resource_type, content)
        };

        guard.insert(key, stored.clone());
        debug!(resource_type = %resource_type, id = %id, version = %version_id, "created resource");
        Ok(stored)
    }

    async fn read(
        &self,
        resource_type: &str,
        id: &str,
    ) -> Result<Option<StoredResource>, StorageError> {
        let key = make_key(resource_type, id);
        let guard = self.data.pin();
        trace!(key = %key, "reading resource");
        Ok(guard.get(&key).cloned())
    }

    async fn update(
        &self,
        resource: &Value,
        if_match: Option<&str>,
    ) -> Result<StoredResource, StorageError> {
        let resource_type = Self::extract_type(resource)?;
        let id = resource
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| StorageError::invalid_resource("missing id for update"))?
            .to_string();

        let key = make_key(&resource_type, &id);
        let guard = self.data.pin();
        let existing = guard
            .get(&key)
            .ok_or_else(|| StorageError::not_found(&resource_type, &id))?;

        if let Some(expected) = if_match
            && expected != existing.version_id
        {
            return Err(StorageError::version_conflict(
                expected,
                &existing.version_id,
            ));
        }

        let version_id = self.next_version();
        let mut content = resource.clone();
        stamp(&mut content, &id, &version_id, OffsetDateTime::now_utc());
        let updated = existing.new_version(&version_id, content);

        guard.insert(key, updated.clone());
        debug!(resource_type = %resource_type, id = %id, version = %version_id, "updated resource");
        Ok(updated)
    }

    async fn delete(&self, resource_type: &str, id: &str) -> Result<(), StorageError> {
        let key = make_key(resource_type, id);
        let guard = self.data.pin();
        if guard.remove(&key).is_none() {
            return Err(StorageError::not_found(resource_type, id));
        }
        debug!(resource_type = %resource_type, id = %id, "deleted resource");
        Ok(())
    }

    async fn search(
        &self,
        resource_type: &str,
        params: &SearchParams,
    ) -> Result<SearchResult, StorageError> {
        let prefix = format!("{resource_type}/");

        // Values repeated under one code are alternatives (OR); distinct
        // codes must all match (AND).
        let mut by_code: std::collections::HashMap<&str, Vec<&str>> = std::collections::HashMap::new();
        for (code, value) in &params.params {
            by_code.entry(code.as_str()).or_default().push(value.as_str());
        }

        let guard = self.data.pin();
        let mut matched: Vec<StoredResource> = guard
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .map(|(_, stored)| stored.clone())
            .filter(|stored| {
                by_code.iter().all(|(code, values)| {
                    values
                        .iter()
                        .any(|value| query::matches(&stored.resource, code, value))
                })
            })
            .collect();

        // Stable base order so paging is deterministic across calls.
        matched.sort_by(|a, b| a.id.cmp(&b.id));
        for key in params.sort.iter().rev() {
            matched.sort_by(|a, b| {
                let ord = query::compare_by(&a.resource, &b.resource, &key.field);
                if key.descending { ord.reverse() } else { ord }
            });
        }

        let total = matched.len() as u32;
        let offset = params.offset.unwrap_or(0) as usize;
        let entries: Vec<StoredResource> = match params.count {
            Some(count) => matched.into_iter().skip(offset).take(count as usize).collect(),
            None => matched.into_iter().skip(offset).collect(),
        };

        let has_more = offset + entries.len() < total as usize;
        debug!(
            resource_type = %resource_type,
            matched = total,
            returned = entries.len(),
            "search completed"
        );

        Ok(SearchResult {
            entries,
            total: Some(total),
            has_more,
        })
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
