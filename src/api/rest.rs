//! Router assembly for the model file server.

use std::sync::Arc;

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api::handlers::{get_model_handler, list_models_handler, ApiState};
use crate::config::ApiConfig;
use crate::store::ModelStore;

/// Create the HTTP router.
///
/// Endpoints:
/// - GET /list-models       - List available model files
/// - GET /models/{filename} - Download a model file
/// - GET /health            - Liveness probe
/// - GET /                  - Service info
pub fn create_router(store: ModelStore, config: &ApiConfig) -> Router {
    let state = Arc::new(ApiState::new(store));

    let router = Router::new()
        .route("/list-models", get(list_models_handler))
        .route("/models/{filename}", get(get_model_handler))
        .route("/health", get(health_handler))
        .route("/", get(root_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    // Add CORS if enabled
    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
            .allow_origin(Any);

        router.layer(cors)
    } else {
        router
    }
}

/// Health check endpoint.
async fn health_handler() -> &'static str {
    "OK"
}

/// Root handler with basic info.
async fn root_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "orrery",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "HTTPS asset server for 3D model files",
        "endpoints": {
            "list_models": "/list-models",
            "get_model": "/models/{filename}",
            "health": "/health"
        }
    }))
}
