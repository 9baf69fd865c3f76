//! FHIR scalar types for the generated schema.

use async_graphql::dynamic::{Scalar, TypeRef};

use super::registry::{RegisteredType, RegistryError, ShapeRegistry};

/// Name of the scalar carrying whole FHIR resources as JSON.
pub const FHIR_RESOURCE_SCALAR: &str = "FhirResource";

/// Name of the generic JSON input scalar used by mutation inputs.
pub const JSON_SCALAR: &str = "JSON";

/// All custom scalars registered in the schema.
const SCALARS: &[(&str, &str)] = &[
    ("FhirId", "A FHIR resource ID"),
    ("FhirUri", "A FHIR URI"),
    ("FhirUrl", "A FHIR URL (resolvable URI)"),
    ("FhirCanonical", "A FHIR canonical URL reference"),
    ("FhirCode", "A FHIR code (token from a defined set)"),
    ("FhirOid", "A FHIR OID (urn:oid:...)"),
    ("FhirUuid", "A FHIR UUID (urn:uuid:...)"),
    ("FhirInstant", "A FHIR instant (timestamped dateTime with timezone)"),
    ("FhirDateTime", "A FHIR dateTime (partial date/time with optional timezone)"),
    ("FhirDate", "A FHIR date (YYYY, YYYY-MM, or YYYY-MM-DD)"),
    ("FhirTime", "A FHIR time (hh:mm:ss)"),
    ("FhirDecimal", "An arbitrary precision decimal"),
    ("FhirBase64Binary", "Base64-encoded binary data"),
    ("FhirMarkdown", "Markdown-formatted text"),
    ("FhirPositiveInt", "A positive integer (> 0)"),
    ("FhirUnsignedInt", "A non-negative integer (>= 0)"),
    ("FhirXhtml", "XHTML content for narratives"),
    (FHIR_RESOURCE_SCALAR, "A FHIR resource represented as JSON"),
    (JSON_SCALAR, "A JSON value. Accepts any valid JSON."),
];

/// Pass one: declares every scalar name.
pub fn declare_scalars(registry: &mut ShapeRegistry) -> Result<(), RegistryError> {
    for (name, _) in SCALARS {
        registry.declare(*name)?;
    }
    Ok(())
}

/// Pass two: defines every scalar.
pub fn define_scalars(registry: &mut ShapeRegistry) -> Result<(), RegistryError> {
    for (name, description) in SCALARS {
        let scalar = Scalar::new(*name).description(*description);
        registry.define(*name, RegisteredType::Scalar(scalar))?;
    }
    Ok(())
}

/// Maps a FHIR primitive type name to its GraphQL type reference.
#[must_use]
pub fn fhir_type_to_graphql(fhir_type: &str) -> TypeRef {
    match fhir_type {
        "boolean" => TypeRef::named(TypeRef::BOOLEAN),
        "integer" | "integer64" => TypeRef::named(TypeRef::INT),
        "string" => TypeRef::named(TypeRef::STRING),

        "id" => TypeRef::named("FhirId"),
        "uri" => TypeRef::named("FhirUri"),
        "url" => TypeRef::named("FhirUrl"),
        "canonical" => TypeRef::named("FhirCanonical"),
        "code" => TypeRef::named("FhirCode"),
        "oid" => TypeRef::named("FhirOid"),
        "uuid" => TypeRef::named("FhirUuid"),
        "instant" => TypeRef::named("FhirInstant"),
        "dateTime" => TypeRef::named("FhirDateTime"),
        "date" => TypeRef::named("FhirDate"),
        "time" => TypeRef::named("FhirTime"),
        "decimal" => TypeRef::named("FhirDecimal"),
        "base64Binary" => TypeRef::named("FhirBase64Binary"),
        "markdown" => TypeRef::named("FhirMarkdown"),
        "positiveInt" => TypeRef::named("FhirPositiveInt"),
        "unsignedInt" => TypeRef::named("FhirUnsignedInt"),
        "xhtml" => TypeRef::named("FhirXhtml"),

        // Complex types and resources resolve to their own named type.
        other => TypeRef::named(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_and_define_scalars() {
        let mut registry = ShapeRegistry::new();
        declare_scalars(&mut registry).unwrap();
        assert!(registry.is_declared("FhirId"));
        assert!(registry.is_declared(FHIR_RESOURCE_SCALAR));
        assert!(registry.is_declared(JSON_SCALAR));

        define_scalars(&mut registry).unwrap();
    }

    #[test]
    fn test_scalar_names_unique() {
        let mut registry = ShapeRegistry::new();
        declare_scalars(&mut registry).unwrap();
        // A second pass collides on every name.
        assert!(declare_scalars(&mut registry).is_err());
    }

    #[test]
    fn test_type_mapping() {
        // Built-in scalars keep their GraphQL names.
        assert_eq!(fhir_type_to_graphql("boolean").to_string(), "Boolean");
        assert_eq!(fhir_type_to_graphql("string").to_string(), "String");

        // FHIR primitives map to custom scalars.
        assert_eq!(fhir_type_to_graphql("id").to_string(), "FhirId");
        assert_eq!(fhir_type_to_graphql("dateTime").to_string(), "FhirDateTime");

        // Everything else passes through by name.
        assert_eq!(fhir_type_to_graphql("Patient").to_string(), "Patient");
    }
}
