//! Search matching and ordering over raw resource JSON.
//!
//! Matching is deliberately simple: a parameter value matches an element
//! if any string leaf of the element starts with it (case-insensitive),
//! if a scalar stringifies to it, or — for reference elements — if the
//! `reference` string equals it. Parameter codes are matched against
//! element names ignoring case and hyphens, so `clinical-status` finds
//! `clinicalStatus` and `birthdate` finds `birthDate`.

use std::cmp::Ordering;

use serde_json::Value;

/// Returns true if the resource satisfies one search parameter value.
pub(crate) fn matches(resource: &Value, code: &str, value: &str) -> bool {
    if code == "_id" {
        return resource.get("id").and_then(Value::as_str) == Some(value);
    }

    match find_element(resource, code) {
        Some(element) => element_matches(element, value),
        None => false,
    }
}

/// Locates the top-level element a parameter code refers to.
fn find_element<'a>(resource: &'a Value, code: &str) -> Option<&'a Value> {
    let obj = resource.as_object()?;

    if let Some(v) = obj.get(code) {
        return Some(v);
    }

    let wanted = normalize_key(code);
    obj.iter()
        .find(|(k, _)| normalize_key(k) == wanted)
        .map(|(_, v)| v)
}

/// Lowercases and strips hyphens so search codes line up with camelCase
/// element names.
fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn element_matches(element: &Value, value: &str) -> bool {
    match element {
        Value::String(s) => starts_with_fold(s, value),
        Value::Bool(b) => b.to_string() == value,
        Value::Number(n) => n.to_string() == value,
        Value::Array(items) => items.iter().any(|item| element_matches(item, value)),
        Value::Object(obj) => {
            // Reference elements match on the exact reference string.
            if let Some(Value::String(reference)) = obj.get("reference") {
                return reference == value;
            }
            obj.values().any(|v| element_matches(v, value))
        }
        Value::Null => false,
    }
}

fn starts_with_fold(haystack: &str, needle: &str) -> bool {
    haystack.len() >= needle.len()
        && haystack
            .chars()
            .zip(needle.chars())
            .take(needle.chars().count())
            .all(|(h, n)| h.to_ascii_lowercase() == n.to_ascii_lowercase())
}

/// Orders two resources by a sort field. Resources missing the field sort
/// after those that have it.
pub(crate) fn compare_by(a: &Value, b: &Value, field: &str) -> Ordering {
    let left = find_element(a, field);
    let right = find_element(b, field);

    match (left, right) {
        (None, None) => Ordering::Equal,
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (Some(l), Some(r)) => compare_values(l, r),
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(l), Value::Number(r)) => l
            .as_f64()
            .partial_cmp(&r.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(l), Value::String(r)) => l.cmp(r),
        (Value::Bool(l), Value::Bool(r)) => l.cmp(r),
        // Mixed or structured values fall back to their JSON text.
        _ => a.to_string().cmp(&b.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_param() {
        let patient = json!({"resourceType": "Patient", "id": "p1"});
        assert!(matches(&patient, "_id", "p1"));
        assert!(!matches(&patient, "_id", "p2"));
    }

    #[test]
    fn test_string_prefix_case_insensitive() {
        let patient = json!({"gender": "female"});
        assert!(matches(&patient, "gender", "female"));
        assert!(matches(&patient, "gender", "FEM"));
        assert!(!matches(&patient, "gender", "male"));
    }

    #[test]
    fn test_key_normalization() {
        let patient = json!({"birthDate": "1974-12-25"});
        assert!(matches(&patient, "birthdate", "1974"));
        assert!(matches(&patient, "birthdate", "1974-12-25"));
        assert!(!matches(&patient, "birthdate", "1975"));

        let condition = json!({"clinicalStatus": {"coding": [{"code": "active"}]}});
        assert!(matches(&condition, "clinical-status", "active"));
    }

    #[test]
    fn test_human_name_array() {
        let patient = json!({
            "name": [{"family": "Chalmers", "given": ["Peter", "James"]}]
        });
        assert!(matches(&patient, "name", "chalmers"));
        assert!(matches(&patient, "name", "Peter"));
        assert!(!matches(&patient, "name", "Watson"));
    }

    #[test]
    fn test_reference_exact() {
        let observation = json!({"subject": {"reference": "Patient/p1"}});
        assert!(matches(&observation, "subject", "Patient/p1"));
        // Reference matching is exact, not prefix.
        assert!(!matches(&observation, "subject", "Patient/p"));
    }

    #[test]
    fn test_missing_element() {
        let patient = json!({"resourceType": "Patient"});
        assert!(!matches(&patient, "name", "anything"));
    }

    #[test]
    fn test_compare_missing_sorts_last() {
        let with = json!({"birthDate": "1980"});
        let without = json!({});
        assert_eq!(compare_by(&with, &without, "birthDate"), Ordering::Less);
        assert_eq!(compare_by(&without, &with, "birthDate"), Ordering::Greater);
    }

    #[test]
    fn test_compare_strings_and_numbers() {
        let a = json!({"value": 3});
        let b = json!({"value": 10});
        assert_eq!(compare_by(&a, &b, "value"), Ordering::Less);

        let a = json!({"status": "active"});
        let b = json!({"status": "final"});
        assert_eq!(compare_by(&a, &b, "status"), Ordering::Less);
    }
}
