//! End-to-end execution tests: schema generation, query and mutation
//! resolvers, and polymorphic reference resolution over seeded in-memory
//! storage.

use std::sync::Arc;

use assert_json_diff::assert_json_include;
use async_graphql::Request;
use fhirgraph_db_memory::InMemoryStorage;
use fhirgraph_graphql::{FhirSchemaBuilder, GraphQLContext, SchemaBuilderConfig};
use fhirgraph_model::{FhirRelease, ReleaseModel};
use fhirgraph_storage::{DynStorage, FhirStorage};
use serde_json::{Value, json};

struct Harness {
    storage: DynStorage,
    schema: async_graphql::dynamic::Schema,
    model: Arc<ReleaseModel>,
}

impl Harness {
    async fn new() -> Self {
        let storage: DynStorage = Arc::new(InMemoryStorage::new());
        let model = Arc::new(ReleaseModel::new(FhirRelease::R4));
        let schema = FhirSchemaBuilder::new(model.clone(), SchemaBuilderConfig::default())
            .build()
            .await
            .expect("schema builds");
        Self {
            storage,
            schema,
            model,
        }
    }

    async fn seed(&self, resource: Value) {
        self.storage.create(&resource).await.expect("seed resource");
    }

    fn context(&self) -> GraphQLContext {
        GraphQLContext::builder()
            .with_storage(self.storage.clone())
            .with_model(self.model.clone())
            .with_request_id("test-request")
            .build()
            .expect("context builds")
    }

    fn instance_context(&self, resource_type: &str, id: &str) -> GraphQLContext {
        GraphQLContext::builder()
            .with_storage(self.storage.clone())
            .with_model(self.model.clone())
            .with_request_id("test-request")
            .with_target_resource(resource_type, id)
            .build()
            .expect("context builds")
    }

    async fn execute(&self, query: &str) -> async_graphql::Response {
        self.execute_with(query, self.context()).await
    }

    async fn execute_with(&self, query: &str, context: GraphQLContext) -> async_graphql::Response {
        self.schema
            .execute(Request::new(query).data(context))
            .await
    }
}

fn data(response: &async_graphql::Response) -> Value {
    serde_json::to_value(&response.data).expect("serializable data")
}

#[tokio::test]
async fn health_and_release_fields() {
    let harness = Harness::new().await;
    let response = harness.execute("{ _health _release }").await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_json_include!(
        actual: data(&response),
        expected: json!({"_health": "ok", "_release": "4.0.0"})
    );
}

#[tokio::test]
async fn read_single_resource() {
    let harness = Harness::new().await;
    harness
        .seed(json!({
            "resourceType": "Patient",
            "id": "p1",
            "name": [{"family": "Chalmers"}]
        }))
        .await;

    let response = harness
        .execute(r#"{ Patient(_id: "p1") { id resourceType json } }"#)
        .await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let payload = data(&response);
    assert_eq!(payload["Patient"]["id"], "p1");
    assert_eq!(payload["Patient"]["resourceType"], "Patient");
    assert_eq!(payload["Patient"]["json"]["name"][0]["family"], "Chalmers");
}

#[tokio::test]
async fn read_missing_resource_is_null() {
    let harness = Harness::new().await;
    let response = harness.execute(r#"{ Patient(_id: "nope") { id } }"#).await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_eq!(data(&response)["Patient"], Value::Null);
}

#[tokio::test]
async fn list_with_search_arguments() {
    let harness = Harness::new().await;
    harness
        .seed(json!({"resourceType": "Patient", "id": "p1", "name": [{"family": "Chalmers"}]}))
        .await;
    harness
        .seed(json!({"resourceType": "Patient", "id": "p2", "name": [{"family": "Windsor"}]}))
        .await;

    let response = harness
        .execute(r#"{ PatientList(name: "Chalmers") { id } }"#)
        .await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_eq!(data(&response)["PatientList"], json!([{"id": "p1"}]));

    let all = harness.execute("{ PatientList { id } }").await;
    assert_eq!(
        data(&all)["PatientList"],
        json!([{"id": "p1"}, {"id": "p2"}])
    );
}

#[tokio::test]
async fn polymorphic_reference_resolves_concrete_types() {
    let harness = Harness::new().await;
    harness
        .seed(json!({"resourceType": "Patient", "id": "p1"}))
        .await;
    harness
        .seed(json!({"resourceType": "Organization", "id": "org1"}))
        .await;
    harness
        .seed(json!({
            "resourceType": "Account",
            "id": "a1",
            "subject": [
                {"reference": "Patient/p1"},
                {"reference": "Organization/org1"}
            ]
        }))
        .await;

    let response = harness
        .execute(
            r#"{
                Account(_id: "a1") {
                    id
                    subject {
                        __typename
                        ... on Patient { id }
                        ... on Organization { id }
                    }
                }
            }"#,
        )
        .await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_eq!(
        data(&response)["Account"]["subject"],
        json!([
            {"__typename": "Patient", "id": "p1"},
            {"__typename": "Organization", "id": "org1"}
        ])
    );
}

#[tokio::test]
async fn unknown_discriminant_errors_locally() {
    let harness = Harness::new().await;
    // Account.owner only admits Organization; point it at a Device.
    harness
        .seed(json!({"resourceType": "Device", "id": "d1"}))
        .await;
    harness
        .seed(json!({
            "resourceType": "Account",
            "id": "a1",
            "owner": {"reference": "Device/d1"}
        }))
        .await;

    let response = harness
        .execute(
            r#"{
                Account(_id: "a1") {
                    id
                    owner { __typename }
                }
            }"#,
        )
        .await;

    // The failure is local: the sibling field survives, the owner field
    // is null, and a typed error is reported.
    let payload = data(&response);
    assert_eq!(payload["Account"]["id"], "a1");
    assert_eq!(payload["Account"]["owner"], Value::Null);

    assert_eq!(response.errors.len(), 1);
    let error = &response.errors[0];
    assert!(error.message.contains("Device"), "{}", error.message);
    let extensions = serde_json::to_value(error.extensions.as_ref().unwrap()).unwrap();
    assert_eq!(extensions["code"], "UNKNOWN_DISCRIMINANT");
}

#[tokio::test]
async fn dangling_reference_is_null_without_error() {
    let harness = Harness::new().await;
    harness
        .seed(json!({
            "resourceType": "Account",
            "id": "a1",
            "owner": {"reference": "Organization/ghost"}
        }))
        .await;

    let response = harness
        .execute(r#"{ Account(_id: "a1") { id owner { __typename } } }"#)
        .await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_eq!(data(&response)["Account"]["owner"], Value::Null);
}

#[tokio::test]
async fn contained_reference_resolves_inline() {
    let harness = Harness::new().await;
    harness
        .seed(json!({
            "resourceType": "Account",
            "id": "a1",
            "contained": [
                {"resourceType": "Organization", "id": "co1", "name": "Inline Org"}
            ],
            "owner": {"reference": "#co1"}
        }))
        .await;

    let response = harness
        .execute(
            r#"{
                Account(_id: "a1") {
                    owner { __typename ... on Organization { id } }
                    contained { __typename }
                }
            }"#,
        )
        .await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let payload = data(&response);
    assert_eq!(
        payload["Account"]["owner"],
        json!({"__typename": "Organization", "id": "co1"})
    );
    assert_eq!(
        payload["Account"]["contained"],
        json!([{"__typename": "Organization"}])
    );
}

#[tokio::test]
async fn any_target_reference_uses_all_kinds() {
    let harness = Harness::new().await;
    harness
        .seed(json!({"resourceType": "Immunization", "id": "imm1"}))
        .await;
    harness
        .seed(json!({
            "resourceType": "Provenance",
            "id": "prov1",
            "target": [{"reference": "Immunization/imm1"}]
        }))
        .await;

    let response = harness
        .execute(
            r#"{
                Provenance(_id: "prov1") {
                    target { __typename ... on Immunization { id } }
                }
            }"#,
        )
        .await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_eq!(
        data(&response)["Provenance"]["target"],
        json!([{"__typename": "Immunization", "id": "imm1"}])
    );
}

#[tokio::test]
async fn create_update_delete_round_trip() {
    let harness = Harness::new().await;

    let response = harness
        .execute(
            r#"mutation {
                PatientCreate(res: {resource: {id: "p9", gender: "female"}}) {
                    id
                    resourceType
                }
            }"#,
        )
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_json_include!(
        actual: data(&response),
        expected: json!({"PatientCreate": {"id": "p9", "resourceType": "Patient"}})
    );

    let response = harness
        .execute(
            r#"mutation {
                PatientUpdate(id: "p9", res: {resource: {gender: "male"}}) {
                    id
                    json
                }
            }"#,
        )
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_eq!(data(&response)["PatientUpdate"]["json"]["gender"], "male");

    let response = harness
        .execute(r#"mutation { PatientDelete(id: "p9") }"#)
        .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_eq!(
        data(&response)["PatientDelete"]["resourceType"],
        "OperationOutcome"
    );

    assert!(
        harness
            .storage
            .read("Patient", "p9")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn create_rejects_type_mismatch() {
    let harness = Harness::new().await;
    let response = harness
        .execute(
            r#"mutation {
                PatientCreate(res: {resource: {resourceType: "Device"}}) { id }
            }"#,
        )
        .await;
    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].message.contains("mismatch"));
}

#[tokio::test]
async fn delete_missing_resource_reports_outcome() {
    let harness = Harness::new().await;
    let response = harness
        .execute(r#"mutation { PatientDelete(id: "ghost") }"#)
        .await;
    assert_eq!(response.errors.len(), 1);
    let extensions = serde_json::to_value(response.errors[0].extensions.as_ref().unwrap()).unwrap();
    assert_eq!(extensions["category"], "not_found");
    assert_eq!(
        extensions["operationOutcome"]["issue"][0]["code"],
        "not-found"
    );
}

#[tokio::test]
async fn instance_level_query_uses_pinned_target() {
    let harness = Harness::new().await;
    harness
        .seed(json!({"resourceType": "Patient", "id": "p1", "gender": "female"}))
        .await;

    let response = harness
        .execute_with(
            "{ Patient { id json } }",
            harness.instance_context("Patient", "p1"),
        )
        .await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let payload = data(&response);
    assert_eq!(payload["Patient"]["id"], "p1");
    assert_eq!(payload["Patient"]["json"]["gender"], "female");
}

#[tokio::test]
async fn instance_level_query_rejects_kind_mismatch() {
    let harness = Harness::new().await;
    harness
        .seed(json!({"resourceType": "Patient", "id": "p1"}))
        .await;

    let response = harness
        .execute_with(
            "{ Observation { id } }",
            harness.instance_context("Patient", "p1"),
        )
        .await;

    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].message.contains("Patient/p1"));
}

#[tokio::test]
async fn read_without_id_outside_instance_context_errors() {
    let harness = Harness::new().await;
    let response = harness.execute("{ Patient { id } }").await;
    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].message.contains("_id"));
}
