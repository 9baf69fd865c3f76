//! Router assembly.

use axum::routing::{get, post};
use axum::{Json, Router};
use fhirgraph_graphql::{
    GraphQLState, graphql_handler, graphql_handler_get, instance_graphql_handler,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the application router over shared GraphQL state.
pub fn build_router(state: GraphQLState) -> Router {
    let release = state.model.release();

    Router::new()
        .route("/health", get(move || async move {
            Json(serde_json::json!({
                "status": "ok",
                "fhirVersion": release.version()
            }))
        }))
        .route("/$graphql", post(graphql_handler).get(graphql_handler_get))
        .route(
            "/{resource_type}/{id}/$graphql",
            post(instance_graphql_handler),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
