pub mod handlers;
mod page;
pub mod types;

use crate::{
    Result, assistant::MedicalAssistant, config::Config, storage::UploadSidecar,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub fn router(state: AppState) -> Router {
    let max_upload_bytes = state.max_upload_bytes;
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/ask", post(handlers::ask))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let assistant = MedicalAssistant::from_config(&config.gemini)?;

    // The sidecar is only wired in when the operator asks for archiving.
    let sidecar = match &config.storage {
        Some(storage) if storage.archive_uploads => {
            let sidecar = UploadSidecar::from_config(storage)?;
            info!("Archiving uploads to {}", sidecar.destination());
            Some(Arc::new(sidecar))
        }
        _ => None,
    };

    let app_state = AppState {
        assistant: Arc::new(assistant),
        sidecar,
        max_upload_bytes: config.server.max_upload_bytes,
    };

    let app = router(app_state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
