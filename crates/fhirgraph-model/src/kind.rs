//! Resource kind descriptors.
//!
//! A [`ResourceKind`] describes one FHIR resource type as the GraphQL layer
//! needs to see it: its name, the reference fields that resolve
//! polymorphically at read time, and the search parameters exposed as list
//! query arguments.

/// One FHIR resource kind within a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceKind {
    /// Canonical kind name, exactly as it appears in `resourceType`
    /// discriminants ("Patient", "Account", ...). Case-sensitive.
    pub name: &'static str,
    /// Short description used in generated schema documentation.
    pub description: &'static str,
    /// Reference fields that resolve polymorphically at read time.
    pub reference_fields: &'static [ReferenceField],
    /// Search parameters exposed as arguments on the list query.
    pub search_params: &'static [SearchParam],
}

/// A reference-typed field on a resource kind, together with the candidate
/// set of kinds it may resolve to.
///
/// The candidate set is fixed at declaration time and ordered; an empty
/// `targets` slice means the field may reference any kind in the release
/// (FHIR `Reference(Any)`, e.g. `Provenance.target`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceField {
    /// Field name as it appears in resource JSON ("subject", "owner", ...).
    pub name: &'static str,
    /// Whether the field holds a list of references.
    pub many: bool,
    /// Ordered candidate kind names. Empty means any kind in the release.
    pub targets: &'static [&'static str],
    /// Description used in generated schema documentation.
    pub description: &'static str,
}

impl ReferenceField {
    /// Returns true if this field may reference any kind in the release.
    #[must_use]
    pub fn is_any(&self) -> bool {
        self.targets.is_empty()
    }
}

/// The type of a search parameter, which determines how the in-memory
/// backend matches it and how the GraphQL argument is typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchParamType {
    /// Free-text match against a string element.
    String,
    /// Exact match against a coded element.
    Token,
    /// Match against a date element.
    Date,
    /// Numeric match.
    Number,
    /// Match against a reference element ("Patient/123").
    Reference,
}

/// One search parameter exposed on a kind's list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParam {
    /// The FHIR search parameter code ("name", "birthdate", ...).
    pub code: &'static str,
    /// Parameter type.
    pub kind: SearchParamType,
    /// The top-level element of the resource the parameter matches
    /// against ("name", "birthDate", ...).
    pub path: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_field_any() {
        let any = ReferenceField {
            name: "target",
            many: true,
            targets: &[],
            description: "",
        };
        assert!(any.is_any());

        let fixed = ReferenceField {
            name: "owner",
            many: false,
            targets: &["Organization"],
            description: "",
        };
        assert!(!fixed.is_any());
    }
}
