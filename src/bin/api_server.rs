// src/bin/api_server.rs

use freenethub_backend::transport;
use freenethub_backend::{AppConfig, DocumentStore};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    freenethub_backend::infra::telemetry::init();
    let config = AppConfig::from_env();

    // --- Document store ---
    let store = Arc::new(DocumentStore::new(&config.db_path));
    let doc = store.init().await?;
    info!(
        path = %store.path().display(),
        users = doc.users.len(),
        subscriptions = doc.subscriptions.len(),
        "document store ready"
    );

    // --- Landing page ---
    if let Err(e) = transport::http::write_landing_page(Path::new(&config.public_dir)).await {
        warn!(dir = %config.public_dir, error = %e, "could not write landing page");
    }

    // --- API server ---
    let app_state = transport::http::AppState::new(store, &config.jwt_secret, &config.public_dir);
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(port = config.port, "FreeNetHub-backend v3 listening");

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    Ok(())
}
