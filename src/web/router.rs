//! Router configuration for the Web API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    delete_file, download_file, get_file_metadata, list_files, login, logout, signup, upload_file,
    validate, AppState,
};
use super::middleware::create_cors_layer;

/// Transport-level request body cap.
///
/// Above the 5 MiB upload policy to leave room for multipart framing; the
/// size policy itself is enforced in the upload handler so oversized files
/// get a 400, not a connection-level rejection.
const REQUEST_BODY_LIMIT: usize = 16 * 1024 * 1024;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    // Auth routes (validate is guarded by the CurrentUser extractor)
    let auth_routes = Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/validate", get(validate));

    // File routes (all guarded by the CurrentUser extractor)
    let file_routes = Router::new()
        .route("/files", post(upload_file).get(list_files))
        .route("/files/:id", get(download_file).delete(delete_file))
        .route("/files/:id/metadata", get(get_file_metadata));

    Router::new()
        .merge(auth_routes)
        .merge(file_routes)
        .layer(DefaultBodyLimit::max(REQUEST_BODY_LIMIT))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
