//! HTTP request handlers.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::io::ReaderStream;
use tracing::{debug, error};

use crate::store::{ModelStore, Resolved};

/// Application state shared across handlers.
pub struct ApiState {
    /// Store the handlers read model files from.
    pub store: ModelStore,
}

impl ApiState {
    /// Create new API state.
    pub fn new(store: ModelStore) -> Self {
        Self { store }
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Listing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListModelsResponse {
    pub models: Vec<String>,
}

/// Error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

// ============================================================================
// Handler Functions
// ============================================================================

/// GET /list-models - List model files available for download.
///
/// The directory is re-scanned on every request; an empty directory is a
/// successful empty listing, not an error.
pub async fn list_models_handler(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    match state.store.list() {
        Ok(models) => (StatusCode::OK, Json(ListModelsResponse { models })).into_response(),
        Err(e) => {
            error!("Failed to list models: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to read model directory".to_string(),
                    code: "list_failed".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /models/{filename} - Download a model file as an attachment.
pub async fn get_model_handler(
    State(state): State<Arc<ApiState>>,
    Path(filename): Path<String>,
) -> Response {
    let path = match state.store.resolve(&filename) {
        Resolved::Found(path) => path,
        Resolved::NotFound => {
            debug!(%filename, "Model not found");
            return (StatusCode::NOT_FOUND, "Model not found").into_response();
        }
    };

    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(e) => {
            error!("Failed to open {}: {}", path.display(), e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to read model file".to_string(),
                    code: "read_failed".to_string(),
                }),
            )
                .into_response();
        }
    };

    let mime_type = mime_guess::from_path(&path).first_or_octet_stream();
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime_type.as_ref())
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(Body::from_stream(ReaderStream::new(file)))
        .unwrap()
}
