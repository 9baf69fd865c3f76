//! FHIR GraphQL schema builder.
//!
//! Generates the full schema for one release model: scalars, a resource
//! object per kind, a union per polymorphic reference field, input types,
//! and the Query/Mutation roots. Shapes are assembled through the two-pass
//! [`ShapeRegistry`](super::registry::ShapeRegistry): every type name is
//! declared before any field set referring to it is built.

use std::sync::Arc;

use async_graphql::Value;
use async_graphql::dynamic::{
    Field, FieldFuture, InputObject, InputValue, Object, Schema, TypeRef, Union,
};
use fhirgraph_model::{ReferenceField, ReleaseModel, ResourceKind, SearchParamType};
use tracing::{debug, trace};

use crate::error::GraphQLError;
use crate::resolvers::{
    CreateResolver, DeleteResolver, ListResolver, ReadResolver, ReferenceResolver, UpdateResolver,
};

use super::polymorphic::CandidateSet;
use super::registry::{RegisteredType, RegistryError, ShapeRegistry};
use super::scalars::{self, FHIR_RESOURCE_SCALAR, JSON_SCALAR};

/// Name of the union over all kinds in the release, used by `contained`,
/// any-target reference fields, and instance-level resolution.
pub const ANY_RESOURCE_UNION: &str = "AnyResource";

/// Configuration for the schema builder.
#[derive(Debug, Clone)]
pub struct SchemaBuilderConfig {
    /// Maximum query depth allowed.
    pub max_depth: usize,

    /// Maximum query complexity allowed.
    pub max_complexity: usize,

    /// Whether to enable introspection queries.
    pub introspection_enabled: bool,
}

impl Default for SchemaBuilderConfig {
    fn default() -> Self {
        Self {
            max_depth: 15,
            max_complexity: 500,
            introspection_enabled: true,
        }
    }
}

/// Builds the GraphQL schema from a release model.
///
/// # Example
///
/// ```ignore
/// let model = Arc::new(ReleaseModel::new(FhirRelease::R4));
/// let builder = FhirSchemaBuilder::new(model, SchemaBuilderConfig::default());
/// let schema = builder.build().await?;
/// ```
pub struct FhirSchemaBuilder {
    model: Arc<ReleaseModel>,
    config: SchemaBuilderConfig,
}

impl FhirSchemaBuilder {
    /// Creates a new schema builder.
    #[must_use]
    pub fn new(model: Arc<ReleaseModel>, config: SchemaBuilderConfig) -> Self {
        Self { model, config }
    }

    /// Builds the schema.
    ///
    /// # Errors
    ///
    /// Returns `GraphQLError::SchemaBuildFailed` if the model is
    /// inconsistent or schema construction fails.
    pub async fn build(&self) -> Result<Schema, GraphQLError> {
        debug!(release = %self.model.release(), "starting GraphQL schema build");

        self.model
            .validate()
            .map_err(|e| GraphQLError::SchemaBuildFailed(e.to_string()))?;

        let mut registry = ShapeRegistry::new();
        self.declare_shapes(&mut registry).map_err(build_failed)?;
        self.define_shapes(&mut registry).map_err(build_failed)?;

        let mut builder = registry
            .install(Schema::build("Query", Some("Mutation"), None))
            .map_err(build_failed)?;

        builder = builder
            .limit_depth(self.config.max_depth)
            .limit_complexity(self.config.max_complexity);
        if !self.config.introspection_enabled {
            builder = builder.disable_introspection();
        }

        let schema = builder
            .finish()
            .map_err(|e| GraphQLError::SchemaBuildFailed(e.to_string()))?;

        debug!(release = %self.model.release(), "GraphQL schema build complete");
        Ok(schema)
    }

    /// Pass one: declare every shape identifier.
    fn declare_shapes(&self, registry: &mut ShapeRegistry) -> Result<(), RegistryError> {
        scalars::declare_scalars(registry)?;
        registry.declare("Query")?;
        registry.declare("Mutation")?;
        registry.declare(ANY_RESOURCE_UNION)?;

        for kind in self.model.kinds() {
            registry.declare(kind.name)?;
            registry.declare(input_type_name(kind.name))?;
            for field in kind.reference_fields {
                if !field.is_any() {
                    registry.declare(union_type_name(kind.name, field.name))?;
                }
            }
        }
        Ok(())
    }

    /// Pass two: define every declared shape, resolving references by name.
    fn define_shapes(&self, registry: &mut ShapeRegistry) -> Result<(), RegistryError> {
        scalars::define_scalars(registry)?;

        let mut any_resource = Union::new(ANY_RESOURCE_UNION)
            .description("Union of all resource kinds in this release");
        for kind in self.model.kinds() {
            registry.expect_declared(kind.name)?;
            any_resource = any_resource.possible_type(kind.name);
        }
        registry.define(ANY_RESOURCE_UNION, RegisteredType::Union(any_resource))?;

        for kind in self.model.kinds() {
            for field in kind.reference_fields.iter().filter(|f| !f.is_any()) {
                let name = union_type_name(kind.name, field.name);
                let candidates = self.candidate_set(field);
                let mut union = Union::new(&name).description(field.description);
                for target in candidates.kinds() {
                    registry.expect_declared(target)?;
                    union = union.possible_type(target);
                }
                registry.define(name, RegisteredType::Union(union))?;
            }

            registry.define(kind.name, RegisteredType::Object(self.resource_object(kind)))?;
            registry.define(
                input_type_name(kind.name),
                RegisteredType::Input(resource_input(kind)),
            )?;
        }

        registry.define("Query", RegisteredType::Object(self.build_query_type()))?;
        registry.define("Mutation", RegisteredType::Object(self.build_mutation_type()))?;
        Ok(())
    }

    /// Candidate set for a reference field. Any-target fields get the full
    /// kind table as candidates.
    fn candidate_set(&self, field: &ReferenceField) -> CandidateSet {
        if field.is_any() {
            CandidateSet::new(field.name, self.model.resource_types().map(|k| (k, k)))
        } else {
            CandidateSet::new(field.name, field.targets.iter().map(|t| (*t, *t)))
        }
    }

    /// Builds the object type for one resource kind.
    fn resource_object(&self, kind: &'static ResourceKind) -> Object {
        trace!(resource_type = %kind.name, "generating resource object type");

        let mut obj = Object::new(kind.name).description(kind.description);

        obj = obj.field(
            json_field("id", scalars::fhir_type_to_graphql("id"))
                .description("The logical id of the resource, as used in the URL for the resource."),
        );
        obj = obj.field(
            json_field("resourceType", TypeRef::named_nn(TypeRef::STRING))
                .description("Type of resource"),
        );
        obj = obj.field(
            json_field("meta", TypeRef::named(FHIR_RESOURCE_SCALAR))
                .description("Metadata about the resource maintained by the infrastructure."),
        );
        obj = obj.field(
            json_field("implicitRules", scalars::fhir_type_to_graphql("uri")).description(
                "A reference to a set of rules followed when the resource was constructed.",
            ),
        );
        obj = obj.field(
            json_field("language", scalars::fhir_type_to_graphql("code"))
                .description("The base language in which the resource is written."),
        );
        obj = obj.field(
            Field::new("json", TypeRef::named_nn(FHIR_RESOURCE_SCALAR), |ctx| {
                FieldFuture::new(async move { Ok(ctx.parent_value.as_value().cloned()) })
            })
            .description("The full resource as JSON."),
        );

        // Contained resources classify against the all-kinds union.
        let contained_candidates =
            Arc::new(CandidateSet::new(
                "contained",
                self.model.resource_types().map(|k| (k, k)),
            ));
        obj = obj.field(
            Field::new(
                "contained",
                TypeRef::named_list(ANY_RESOURCE_UNION),
                ReferenceResolver::resolve_contained(contained_candidates),
            )
            .description("Resources with no independent existence apart from this one."),
        );

        for field in kind.reference_fields {
            obj = obj.field(self.reference_field(kind, field));
        }

        obj
    }

    /// Builds one union-typed reference field.
    fn reference_field(&self, kind: &'static ResourceKind, field: &'static ReferenceField) -> Field {
        let candidates = Arc::new(self.candidate_set(field));
        let target_type = if field.is_any() {
            ANY_RESOURCE_UNION.to_string()
        } else {
            union_type_name(kind.name, field.name)
        };

        let built = if field.many {
            Field::new(
                field.name,
                TypeRef::named_list(target_type),
                ReferenceResolver::resolve_list(field.name.to_string(), candidates),
            )
        } else {
            Field::new(
                field.name,
                TypeRef::named(target_type),
                ReferenceResolver::resolve(field.name.to_string(), candidates),
            )
        };
        built.description(field.description)
    }

    /// Builds the Query root.
    fn build_query_type(&self) -> Object {
        let mut query = Object::new("Query").description("FHIR GraphQL Query root");

        query = query.field(
            Field::new("_health", TypeRef::named_nn(TypeRef::STRING), |_| {
                FieldFuture::new(async { Ok(Some(Value::String("ok".to_string()))) })
            })
            .description("Health check field"),
        );
        query = query.field(
            Field::new("_version", TypeRef::named_nn(TypeRef::STRING), |_| {
                FieldFuture::new(async {
                    Ok(Some(Value::String(env!("CARGO_PKG_VERSION").to_string())))
                })
            })
            .description("Server version"),
        );

        let release = self.model.release().version();
        query = query.field(
            Field::new("_release", TypeRef::named_nn(TypeRef::STRING), move |_| {
                FieldFuture::new(async move { Ok(Some(Value::String(release.to_string()))) })
            })
            .description("FHIR release served by this schema"),
        );

        for kind in self.model.kinds() {
            query = self.add_resource_query_fields(query, kind);
        }
        query
    }

    /// Adds read and list query fields for one kind.
    fn add_resource_query_fields(&self, mut query: Object, kind: &'static ResourceKind) -> Object {
        // Single read: Patient(_id: ID): Patient
        // `_id` is optional so the instance-level endpoint can omit it.
        let read_field = Field::new(
            kind.name,
            TypeRef::named(kind.name),
            ReadResolver::resolve(kind.name.to_string()),
        )
        .argument(InputValue::new("_id", TypeRef::named(TypeRef::ID)))
        .description(format!("Read a single {} resource by ID", kind.name));
        query = query.field(read_field);

        // List/search: PatientList(...): [Patient!]!
        let mut list_field = Field::new(
            format!("{}List", kind.name),
            TypeRef::named_nn_list_nn(kind.name),
            ListResolver::resolve(kind.name.to_string()),
        )
        .description(format!("Search for {} resources", kind.name));

        for param in kind.search_params {
            // GraphQL argument names can't carry hyphens.
            let argument_name = param.code.replace('-', "_");
            let type_ref = match param.kind {
                SearchParamType::String
                | SearchParamType::Token
                | SearchParamType::Date
                | SearchParamType::Number
                | SearchParamType::Reference => TypeRef::named(TypeRef::STRING),
            };
            list_field = list_field.argument(InputValue::new(argument_name, type_ref));
        }
        list_field = list_field.argument(InputValue::new("_id", TypeRef::named(TypeRef::STRING)));
        list_field = list_field.argument(InputValue::new("_count", TypeRef::named(TypeRef::INT)));
        list_field = list_field.argument(InputValue::new("_offset", TypeRef::named(TypeRef::INT)));
        list_field = list_field.argument(InputValue::new("_sort", TypeRef::named(TypeRef::STRING)));
        query = query.field(list_field);

        trace!(resource_type = %kind.name, "added query fields");
        query
    }

    /// Builds the Mutation root.
    fn build_mutation_type(&self) -> Object {
        let mut mutation = Object::new("Mutation").description("FHIR GraphQL Mutation root");

        for kind in self.model.kinds() {
            let input = input_type_name(kind.name);

            mutation = mutation.field(
                Field::new(
                    format!("{}Create", kind.name),
                    TypeRef::named(kind.name),
                    CreateResolver::resolve(kind.name.to_string()),
                )
                .argument(InputValue::new("res", TypeRef::named_nn(&input)))
                .description(format!("Create a {}", kind.name)),
            );

            mutation = mutation.field(
                Field::new(
                    format!("{}Update", kind.name),
                    TypeRef::named(kind.name),
                    UpdateResolver::resolve(kind.name.to_string()),
                )
                .argument(InputValue::new("id", TypeRef::named_nn(TypeRef::ID)))
                .argument(InputValue::new("res", TypeRef::named_nn(&input)))
                .description(format!("Update a {}", kind.name)),
            );

            mutation = mutation.field(
                Field::new(
                    format!("{}Delete", kind.name),
                    TypeRef::named(FHIR_RESOURCE_SCALAR),
                    DeleteResolver::resolve(kind.name.to_string()),
                )
                .argument(InputValue::new("id", TypeRef::named_nn(TypeRef::ID)))
                .description(format!("Delete a {}", kind.name)),
            );

            trace!(resource_type = %kind.name, "added mutation fields");
        }

        mutation
    }
}

fn build_failed(err: RegistryError) -> GraphQLError {
    GraphQLError::SchemaBuildFailed(err.to_string())
}

/// A field that projects a key out of the parent resource JSON.
fn json_field(name: &'static str, type_ref: TypeRef) -> Field {
    Field::new(name, type_ref, move |ctx| {
        FieldFuture::new(async move { Ok(crate::resolvers::parent_field(&ctx, name).cloned()) })
    })
}

/// GraphQL name of a kind's mutation input type.
fn input_type_name(kind: &str) -> String {
    format!("{kind}Input")
}

/// GraphQL name of the union for one polymorphic field.
fn union_type_name(kind: &str, field: &str) -> String {
    let mut chars = field.chars();
    let pascal: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    format!("{kind}{pascal}Target")
}

/// The mutation input type: `input {Kind}Input { resource: JSON! }`.
///
/// FHIR resources nest deeply, carry extensions and choice types; rather
/// than mirroring the full element tree as input objects, the input takes
/// the resource as JSON and validation happens behind the storage trait.
fn resource_input(kind: &'static ResourceKind) -> InputObject {
    InputObject::new(input_type_name(kind.name))
        .description(format!("Input for creating or updating a {}", kind.name))
        .field(
            InputValue::new("resource", TypeRef::named_nn(JSON_SCALAR))
                .description(format!("The {} resource as JSON", kind.name)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fhirgraph_model::FhirRelease;

    fn r4_builder() -> FhirSchemaBuilder {
        FhirSchemaBuilder::new(
            Arc::new(ReleaseModel::new(FhirRelease::R4)),
            SchemaBuilderConfig::default(),
        )
    }

    #[test]
    fn test_default_config() {
        let config = SchemaBuilderConfig::default();
        assert_eq!(config.max_depth, 15);
        assert_eq!(config.max_complexity, 500);
        assert!(config.introspection_enabled);
    }

    #[test]
    fn test_union_type_name() {
        assert_eq!(union_type_name("Account", "subject"), "AccountSubjectTarget");
        assert_eq!(
            union_type_name("Patient", "generalPractitioner"),
            "PatientGeneralPractitionerTarget"
        );
    }

    #[tokio::test]
    async fn test_builds_valid_schema() {
        let schema = r4_builder().build().await.expect("schema should build");
        let sdl = schema.sdl();

        assert!(sdl.contains("type Query"));
        assert!(sdl.contains("type Mutation"));
        assert!(sdl.contains("scalar FhirId"));
        assert!(sdl.contains("scalar FhirDateTime"));
        assert!(sdl.contains(FHIR_RESOURCE_SCALAR));
    }

    #[tokio::test]
    async fn test_schema_has_resource_fields() {
        let schema = r4_builder().build().await.unwrap();
        let sdl = schema.sdl();

        assert!(sdl.contains("Patient("), "read query field");
        assert!(sdl.contains("PatientList("), "list query field");
        assert!(sdl.contains("PatientCreate("), "create mutation field");
        assert!(sdl.contains("PatientUpdate("), "update mutation field");
        assert!(sdl.contains("PatientDelete("), "delete mutation field");
        assert!(sdl.contains("input PatientInput"), "input type");
    }

    #[tokio::test]
    async fn test_schema_has_polymorphic_unions() {
        let schema = r4_builder().build().await.unwrap();
        let sdl = schema.sdl();

        assert!(sdl.contains("union AccountSubjectTarget"));
        assert!(sdl.contains("union AnyResource"));
    }

    #[tokio::test]
    async fn test_dstu2_schema_differs() {
        let builder = FhirSchemaBuilder::new(
            Arc::new(ReleaseModel::new(FhirRelease::Dstu2)),
            SchemaBuilderConfig::default(),
        );
        let sdl = builder.build().await.unwrap().sdl();

        assert!(sdl.contains("MedicationOrderList("));
        assert!(!sdl.contains("MedicationRequestList("));
        assert!(!sdl.contains("type AdverseEvent "));
    }

    #[tokio::test]
    async fn test_disabled_introspection_builds() {
        let builder = FhirSchemaBuilder::new(
            Arc::new(ReleaseModel::new(FhirRelease::R4)),
            SchemaBuilderConfig {
                introspection_enabled: false,
                ..Default::default()
            },
        );
        assert!(builder.build().await.is_ok());
    }
}
