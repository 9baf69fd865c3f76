//! Axum HTTP handlers for the GraphQL endpoints.
//!
//! - `POST /$graphql` - system-level endpoint
//! - `GET /$graphql` - system-level endpoint, query via URL params
//! - `POST /{type}/{id}/$graphql` - instance-level endpoint; the path
//!   target is pinned into the execution context and serves querying the
//!   focused resource without an `_id` argument
//!
//! GraphQL execution errors come back with HTTP 200 and an `errors` array
//! (standard GraphQL transport); transport-level failures (schema not
//! ready, bad request shape) map to HTTP status codes with a FHIR
//! OperationOutcome in the error extensions.

use std::sync::Arc;

use async_graphql::{Request, Response, Variables};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::IntoResponse;
use fhirgraph_model::ReleaseModel;
use fhirgraph_storage::DynStorage;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::context::GraphQLContext;
use crate::error::GraphQLError;
use crate::schema::LazySchema;

/// State shared across GraphQL handlers.
#[derive(Clone)]
pub struct GraphQLState {
    /// Lazily built GraphQL schema.
    pub lazy_schema: Arc<LazySchema>,

    /// Storage backend handed to request contexts.
    pub storage: DynStorage,

    /// The release model the schema serves.
    pub model: Arc<ReleaseModel>,
}

/// GraphQL request body.
#[derive(Debug, Deserialize)]
pub struct GraphQLRequest {
    /// The GraphQL query string.
    pub query: String,

    /// Operation name for multi-operation documents.
    #[serde(rename = "operationName")]
    pub operation_name: Option<String>,

    /// Variables for the query.
    pub variables: Option<serde_json::Value>,
}

/// Query parameters accepted by the GET transport.
#[derive(Debug, Deserialize)]
pub struct GraphQLQueryParams {
    /// The GraphQL query string.
    pub query: Option<String>,

    /// Operation name.
    #[serde(rename = "operationName")]
    pub operation_name: Option<String>,

    /// Variables as a JSON-encoded string.
    pub variables: Option<String>,
}

/// Serialized GraphQL response.
#[derive(Debug, Serialize)]
pub struct GraphQLResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<serde_json::Value>,
}

impl From<Response> for GraphQLResponse {
    fn from(resp: Response) -> Self {
        let data_json = serde_json::to_value(&resp.data).unwrap_or(serde_json::Value::Null);
        let data = (!data_json.is_null()).then_some(data_json);

        let errors = resp
            .errors
            .into_iter()
            .map(|e| {
                let mut error_obj = serde_json::json!({
                    "message": e.message.clone(),
                    "extensions": {
                        "resource": {
                            "resourceType": "OperationOutcome",
                            "issue": [{
                                "severity": "error",
                                "code": "processing",
                                "diagnostics": e.message
                            }]
                        }
                    }
                });

                if let Some(extensions) = e.extensions
                    && let Ok(ext_json) = serde_json::to_value(&extensions)
                    && let Some(ext_obj) = ext_json.as_object()
                {
                    for (key, value) in ext_obj {
                        error_obj["extensions"][key] = value.clone();
                    }
                }
                if !e.locations.is_empty()
                    && let Ok(locations) = serde_json::to_value(&e.locations)
                {
                    error_obj["locations"] = locations;
                }
                if !e.path.is_empty()
                    && let Ok(path) = serde_json::to_value(&e.path)
                {
                    error_obj["path"] = path;
                }

                error_obj
            })
            .collect();

        Self { data, errors }
    }
}

/// Handles `POST /$graphql`.
pub async fn graphql_handler(
    State(state): State<GraphQLState>,
    Json(request): Json<GraphQLRequest>,
) -> impl IntoResponse {
    execute_graphql(state, request, None).await
}

/// Handles `GET /$graphql`.
pub async fn graphql_handler_get(
    State(state): State<GraphQLState>,
    Query(params): Query<GraphQLQueryParams>,
) -> impl IntoResponse {
    let request = match params_to_request(params) {
        Ok(request) => request,
        Err(e) => return error_response(&e),
    };
    execute_graphql(state, request, None).await
}

/// Handles `POST /{type}/{id}/$graphql`.
pub async fn instance_graphql_handler(
    State(state): State<GraphQLState>,
    Path((resource_type, id)): Path<(String, String)>,
    Json(request): Json<GraphQLRequest>,
) -> impl IntoResponse {
    execute_graphql(state, request, Some((resource_type, id))).await
}

/// Runs one GraphQL request against the (possibly just-built) schema.
async fn execute_graphql(
    state: GraphQLState,
    request: GraphQLRequest,
    target: Option<(String, String)>,
) -> axum::response::Response {
    let schema = match state.lazy_schema.get_or_build().await {
        Ok(schema) => schema,
        Err(e) => return error_response(&e),
    };

    if let Some((resource_type, _)) = &target
        && !state.model.contains(resource_type)
    {
        return error_response(&GraphQLError::InvalidQuery(format!(
            "unknown resource type '{resource_type}'"
        )));
    }

    let request_id = Uuid::new_v4().to_string();
    debug!(
        request_id = %request_id,
        instance_target = ?target,
        "executing GraphQL request"
    );

    let mut context_builder = GraphQLContext::builder()
        .with_storage(state.storage.clone())
        .with_model(state.model.clone())
        .with_request_id(&request_id);
    if let Some((resource_type, id)) = target {
        context_builder = context_builder.with_target_resource(resource_type, id);
    }
    let context = match context_builder.build() {
        Ok(context) => context,
        Err(e) => return error_response(&GraphQLError::Internal(e.to_string())),
    };

    let mut gql_request = Request::new(request.query).data(context);
    if let Some(operation_name) = request.operation_name {
        gql_request = gql_request.operation_name(operation_name);
    }
    if let Some(variables) = request.variables {
        gql_request = gql_request.variables(Variables::from_json(variables));
    }

    let response = schema.execute(gql_request).await;
    (StatusCode::OK, Json(GraphQLResponse::from(response))).into_response()
}

/// Converts GET parameters into a request.
fn params_to_request(params: GraphQLQueryParams) -> Result<GraphQLRequest, GraphQLError> {
    let query = params
        .query
        .ok_or_else(|| GraphQLError::InvalidQuery("missing 'query' parameter".to_string()))?;

    let variables = params
        .variables
        .map(|raw| {
            serde_json::from_str(&raw)
                .map_err(|e| GraphQLError::InvalidQuery(format!("invalid 'variables' JSON: {e}")))
        })
        .transpose()?;

    Ok(GraphQLRequest {
        query,
        operation_name: params.operation_name,
        variables,
    })
}

/// Renders a transport-level error.
fn error_response(err: &GraphQLError) -> axum::response::Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = serde_json::json!({
        "errors": [{
            "message": err.to_string(),
            "extensions": {
                "code": err.error_code(),
                "resource": err.to_operation_outcome()
            }
        }]
    });

    let mut response = (status, Json(body)).into_response();
    if let Some(seconds) = err.retry_after()
        && let Ok(value) = HeaderValue::from_str(&seconds.to_string())
    {
        response.headers_mut().insert(header::RETRY_AFTER, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_to_request_requires_query() {
        let params = GraphQLQueryParams {
            query: None,
            operation_name: None,
            variables: None,
        };
        assert!(matches!(
            params_to_request(params),
            Err(GraphQLError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_params_to_request_parses_variables() {
        let params = GraphQLQueryParams {
            query: Some("{ _health }".to_string()),
            operation_name: None,
            variables: Some(r#"{"id": "123"}"#.to_string()),
        };
        let request = params_to_request(params).unwrap();
        assert_eq!(request.variables.unwrap()["id"], "123");

        let params = GraphQLQueryParams {
            query: Some("{ _health }".to_string()),
            operation_name: None,
            variables: Some("not-json".to_string()),
        };
        assert!(params_to_request(params).is_err());
    }
}
