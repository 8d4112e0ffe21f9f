//! Standalone admin server for the content type builder.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cpt_builder::config::Config;
use cpt_builder::host::{AllowAll, JsonFileStorage, RecordingRegistry};
use cpt_builder::registry::register_all;
use cpt_builder::routes;
use cpt_builder::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    info!("Starting content type builder");

    let config = Config::from_env().context("failed to load configuration")?;
    info!(port = config.port, data_file = %config.data_file.display(), "Configuration loaded");

    let storage = Arc::new(JsonFileStorage::new(config.data_file.clone()));
    let registry = Arc::new(RecordingRegistry::new());

    // Standalone runs have no login surface; an embedding host supplies a
    // real AccessControl such as SessionAccessControl.
    let access = Arc::new(AllowAll);
    tracing::warn!("admin access is open; embed behind host authentication");

    let state =
        AppState::new(storage, access).context("failed to initialize application state")?;

    // Replay stored definitions into the host registry before serving any
    // content-type-dependent request.
    register_all(state.definitions(), registry.as_ref())
        .await
        .context("registration pass failed")?;
    info!(
        declared = registry.declarations().len(),
        "registration pass complete"
    );

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_same_site(config.same_site())
        .with_secure(false);

    let app = Router::new()
        .merge(routes::router())
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, "Listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind listener")?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
