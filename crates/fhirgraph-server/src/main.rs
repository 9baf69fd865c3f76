//! fhirgraph-server: a GraphQL facade over a FHIR data model.

mod app;
mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fhirgraph_db_memory::InMemoryStorage;
use fhirgraph_graphql::{FhirSchemaBuilder, GraphQLState, LazySchema};
use fhirgraph_model::{FhirRelease, ReleaseModel};
use fhirgraph_storage::DynStorage;

use crate::config::ServerConfig;

#[derive(Debug, Parser)]
#[command(name = "fhirgraph-server", about = "GraphQL facade over a FHIR data model")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, env = "FHIRGRAPH_CONFIG", default_value = "fhirgraph.toml")]
    config: PathBuf,

    /// Override the bind host.
    #[arg(long, env = "FHIRGRAPH_HOST")]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long, env = "FHIRGRAPH_PORT")]
    port: Option<u16>,

    /// Override the FHIR release (1.0.2, 3.0.1, 4.0.0).
    #[arg(long, env = "FHIRGRAPH_RELEASE")]
    release: Option<FhirRelease>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = ServerConfig::load(&cli.config)?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(release) = cli.release {
        config.fhir.release = release;
    }
    config.validate()?;

    let model = Arc::new(ReleaseModel::new(config.fhir.release));
    model
        .validate()
        .context("release model failed consistency check")?;
    info!(
        release = %model.release(),
        kinds = model.kinds().len(),
        "loaded release model"
    );

    let storage: DynStorage = Arc::new(InMemoryStorage::new());
    info!(backend = storage.backend_name(), "storage initialized");

    let lazy_schema = Arc::new(LazySchema::new(FhirSchemaBuilder::new(
        model.clone(),
        config.graphql.to_schema_builder_config(),
    )));

    // Warm the schema so the first request doesn't pay the build; failure
    // here is not fatal, requests will retry the build and report it.
    if let Err(e) = lazy_schema.get_or_build_wait().await {
        warn!(error = %e, "schema warm-up failed");
    }

    let state = GraphQLState {
        lazy_schema,
        storage,
        model,
    };
    let router = app::build_router(state);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(addr = %addr, "fhirgraph server listening");

    axum::serve(listener, router).await.context("server error")
}
