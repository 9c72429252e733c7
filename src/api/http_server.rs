use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};

use crate::api::errors::VectorizeError;
use crate::api::vectorize::vectorize_handler;
use crate::embeddings::ImageEncoder;
use crate::vision::ImageFetcher;

/// Shared state injected into every request handler
///
/// The encoder is constructed once before the server starts accepting
/// requests and is never reconstructed or mutated afterward.
#[derive(Clone)]
pub struct AppState {
    pub encoder: Arc<dyn ImageEncoder>,
    pub fetcher: Arc<ImageFetcher>,
}

impl AppState {
    pub fn new(encoder: Arc<dyn ImageEncoder>) -> Self {
        Self {
            encoder,
            fetcher: Arc::new(ImageFetcher::new()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub dimension: usize,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Vectorize endpoint
        .route("/vectorize", post(vectorize_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn start_server(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.encoder.model_name().to_string(),
        dimension: state.encoder.dimension(),
    })
}

// Error response wrapper
pub struct ApiErrorResponse(pub VectorizeError);

impl From<VectorizeError> for ApiErrorResponse {
    fn from(err: VectorizeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        // Every failure is logged before the response leaves the server
        tracing::warn!("vectorize request failed: {}", self.0);

        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self.0.to_response())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_wrapper_maps_invalid_input_to_400() {
        let response =
            ApiErrorResponse(VectorizeError::InvalidInput("no image source".to_string()))
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_wrapper_maps_inference_to_500() {
        let response =
            ApiErrorResponse(VectorizeError::Inference("session failed".to_string()))
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
