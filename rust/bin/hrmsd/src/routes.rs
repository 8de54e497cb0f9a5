//! Route registration: collects all module routes + system endpoints.

use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use hrms_core::{Module, ServiceError};
use tracing::info;

/// Build the complete router with all routes.
pub fn build_router(modules: &[&dyn Module]) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/version", get(version));

    // Module routes carry absolute paths and their own state.
    for module in modules {
        info!("Mounting {} module routes", module.name());
        app = app.merge(module.routes());
    }

    app.fallback(not_found)
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "hrmsd",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn not_found() -> ServiceError {
    ServiceError::NotFound("route not found".into())
}
