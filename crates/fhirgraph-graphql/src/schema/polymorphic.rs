//! Polymorphic resource type resolution.
//!
//! FHIR reference fields are polymorphic: a field like `Account.subject`
//! may hold any of several resource kinds, and the concrete kind is only
//! known at read time, from the `resourceType` discriminant carried on the
//! value itself. Every such field declares a [`CandidateSet`] once at
//! schema-build time; the same `resolve` routine then classifies every
//! value flowing through the field.
//!
//! Resolution is a pure function: no I/O, no shared state, deterministic
//! for identical inputs. An unresolvable value (missing discriminant, or a
//! discriminant outside the candidate set) is always a typed error, never a
//! silent fallback, so callers can tell "field absent" apart from "field
//! present but unrecognized".

use std::collections::HashMap;

use serde_json::Value;

/// The attribute carrying a resource's concrete kind.
pub const DISCRIMINANT: &str = "resourceType";

/// One candidate of a polymorphic field: the discriminant value it matches
/// and the GraphQL type selected when it does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    /// Kind name compared against the discriminant ("Patient", ...).
    pub kind: String,
    /// GraphQL type name applied to matching values.
    pub type_name: String,
}

/// Errors from classifying a value against a candidate set.
///
/// Both variants are local to the field being resolved; callers surface
/// them as field-level errors and continue with sibling fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeResolutionError {
    /// The value carries no string `resourceType` attribute (including
    /// values that are not objects at all).
    #[error("value under '{field}' carries no 'resourceType' discriminant")]
    MissingDiscriminant {
        /// The polymorphic field being resolved.
        field: String,
    },

    /// The discriminant matched none of the declared candidates.
    #[error("value under '{field}' has resourceType '{found}', expected one of {allowed:?}")]
    UnknownDiscriminant {
        /// The polymorphic field being resolved.
        field: String,
        /// The discriminant value found on the instance.
        found: String,
        /// The candidate kind names, in declaration order.
        allowed: Vec<String>,
    },
}

impl TypeResolutionError {
    /// Machine-readable code for GraphQL error extensions.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingDiscriminant { .. } => "MISSING_DISCRIMINANT",
            Self::UnknownDiscriminant { .. } => "UNKNOWN_DISCRIMINANT",
        }
    }
}

/// The fixed, ordered candidate set of one polymorphic field.
///
/// Built once per field declaration; the lookup table is keyed by
/// discriminant value. If the same kind name is declared twice (a
/// malformed declaration), the first declaration wins.
#[derive(Debug, Clone)]
pub struct CandidateSet {
    field: String,
    ordered: Vec<Shape>,
    by_kind: HashMap<String, usize>,
}

impl CandidateSet {
    /// Builds a candidate set for `field` from `(kind, type_name)` pairs in
    /// declaration order.
    pub fn new<K, T>(
        field: impl Into<String>,
        candidates: impl IntoIterator<Item = (K, T)>,
    ) -> Self
    where
        K: Into<String>,
        T: Into<String>,
    {
        let mut ordered = Vec::new();
        let mut by_kind = HashMap::new();

        for (kind, type_name) in candidates {
            let shape = Shape {
                kind: kind.into(),
                type_name: type_name.into(),
            };
            by_kind.entry(shape.kind.clone()).or_insert(ordered.len());
            ordered.push(shape);
        }

        Self {
            field: field.into(),
            ordered,
            by_kind,
        }
    }

    /// The field this candidate set belongs to.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Number of declared candidates, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Returns true if no candidates were declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Unique candidate kind names in first-declared order.
    pub fn kinds(&self) -> impl Iterator<Item = &str> + '_ {
        self.ordered
            .iter()
            .enumerate()
            .filter(|(i, shape)| self.by_kind[&shape.kind] == *i)
            .map(|(_, shape)| shape.kind.as_str())
    }

    /// Classifies a resource value by its `resourceType` discriminant.
    ///
    /// # Errors
    ///
    /// [`TypeResolutionError::MissingDiscriminant`] if the value has no
    /// string discriminant; [`TypeResolutionError::UnknownDiscriminant`] if
    /// the discriminant matches no candidate.
    pub fn resolve(&self, value: &Value) -> Result<&Shape, TypeResolutionError> {
        self.resolve_discriminant(value.get(DISCRIMINANT).and_then(Value::as_str))
    }

    /// Classifies by an already-extracted discriminant value.
    ///
    /// This is the primitive `resolve` delegates to; callers holding the
    /// value in a non-JSON representation extract the discriminant
    /// themselves and use this directly.
    ///
    /// # Errors
    ///
    /// Same as [`CandidateSet::resolve`].
    pub fn resolve_discriminant(
        &self,
        discriminant: Option<&str>,
    ) -> Result<&Shape, TypeResolutionError> {
        let found = discriminant.ok_or_else(|| TypeResolutionError::MissingDiscriminant {
            field: self.field.clone(),
        })?;

        self.by_kind
            .get(found)
            .map(|&i| &self.ordered[i])
            .ok_or_else(|| TypeResolutionError::UnknownDiscriminant {
                field: self.field.clone(),
                found: found.to_string(),
                allowed: self.kinds().map(str::to_string).collect(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn subject_set() -> CandidateSet {
        CandidateSet::new(
            "subject",
            [("Patient", "Patient"), ("Organization", "Organization")],
        )
    }

    #[test]
    fn test_resolves_matching_kind() {
        let set = subject_set();
        let value = json!({"resourceType": "Organization", "name": "Acme"});
        let shape = set.resolve(&value).unwrap();
        assert_eq!(shape.kind, "Organization");
        assert_eq!(shape.type_name, "Organization");
    }

    #[test]
    fn test_unknown_discriminant_is_error() {
        let set = CandidateSet::new("subject", [("Patient", "Patient")]);
        let value = json!({"resourceType": "Device"});
        let err = set.resolve(&value).unwrap_err();
        assert_eq!(
            err,
            TypeResolutionError::UnknownDiscriminant {
                field: "subject".into(),
                found: "Device".into(),
                allowed: vec!["Patient".into()],
            }
        );
        assert_eq!(err.error_code(), "UNKNOWN_DISCRIMINANT");
    }

    #[test]
    fn test_missing_discriminant_is_error() {
        let set = CandidateSet::new("subject", [("Patient", "Patient")]);

        for value in [json!({}), json!({"resourceType": 7}), json!(null), json!("Patient")] {
            let err = set.resolve(&value).unwrap_err();
            assert!(matches!(err, TypeResolutionError::MissingDiscriminant { .. }));
            assert_eq!(err.error_code(), "MISSING_DISCRIMINANT");
        }
    }

    #[test]
    fn test_exact_case_sensitive_comparison() {
        let set = subject_set();
        let value = json!({"resourceType": "patient"});
        assert!(matches!(
            set.resolve(&value),
            Err(TypeResolutionError::UnknownDiscriminant { .. })
        ));
    }

    #[test]
    fn test_deterministic() {
        let set = subject_set();
        let value = json!({"resourceType": "Patient"});
        let first = set.resolve(&value).unwrap().clone();
        for _ in 0..10 {
            assert_eq!(*set.resolve(&value).unwrap(), first);
        }
    }

    #[test]
    fn test_order_independent_without_duplicates() {
        let forward = subject_set();
        let reversed = CandidateSet::new(
            "subject",
            [("Organization", "Organization"), ("Patient", "Patient")],
        );
        let value = json!({"resourceType": "Patient"});
        assert_eq!(
            forward.resolve(&value).unwrap(),
            reversed.resolve(&value).unwrap()
        );
    }

    #[test]
    fn test_duplicate_kind_first_declaration_wins() {
        let set = CandidateSet::new(
            "subject",
            [("Patient", "PatientA"), ("Patient", "PatientB")],
        );
        let value = json!({"resourceType": "Patient"});
        assert_eq!(set.resolve(&value).unwrap().type_name, "PatientA");

        // Declaration order is retained, uniqueness only in the lookup.
        assert_eq!(set.len(), 2);
        assert_eq!(set.kinds().collect::<Vec<_>>(), ["Patient"]);
    }

    #[test]
    fn test_kinds_in_declaration_order() {
        let set = CandidateSet::new(
            "subject",
            [("B", "B"), ("A", "A"), ("C", "C")],
        );
        assert_eq!(set.kinds().collect::<Vec<_>>(), ["B", "A", "C"]);
    }

    #[test]
    fn test_resolve_discriminant_directly() {
        let set = subject_set();
        assert_eq!(
            set.resolve_discriminant(Some("Patient")).unwrap().kind,
            "Patient"
        );
        assert!(set.resolve_discriminant(None).is_err());
    }
}
