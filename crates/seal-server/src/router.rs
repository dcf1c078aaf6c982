//! Route table for the document seal API.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use seal_engine::DocSeal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handler;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: DocSeal,
}

/// Build the application router.
///
/// `max_upload_bytes` caps the signing endpoint's request body; axum
/// answers oversize uploads with 413 on its own.
pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health))
        .route("/v1/info", get(handler::info))
        .route(
            "/v1/documents",
            get(handler::list_documents).post(handler::sign_document),
        )
        .route("/v1/documents/:id", get(handler::show_document))
        .route("/v1/documents/:id/verify", get(handler::verify_by_id))
        .route("/v1/documents/:id/content", get(handler::download_content))
        .route("/v1/refs/:stored_ref/verify", get(handler::verify_by_ref))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
