// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vectorize endpoint handler

use axum::{extract::State, Json};
use tracing::debug;

use super::request::{ImageSource, VectorizeRequest};
use super::response::VectorizeResponse;
use crate::api::errors::VectorizeError;
use crate::api::http_server::{ApiErrorResponse, AppState};
use crate::vision::{decode_base64_payload, normalize_image};

/// POST /vectorize - Embed an image into a fixed-length vector
///
/// Accepts a remote URL or an inline base64 payload and returns the CLIP
/// embedding of the normalized image.
///
/// Pipeline: Validate -> Acquire -> Normalize -> Infer -> Respond. A failure
/// at any stage short-circuits to the error response; no stage is retried.
///
/// # Request
/// - `image_url`: Remote image location (optional)
/// - `image_base64`: Inline base64 data, data-URI header allowed (optional)
///
/// Exactly one source must be supplied; the inline payload wins when both
/// are present.
///
/// # Errors
/// - 400 Bad Request: Neither source supplied
/// - 500 Internal Server Error: Decode, fetch, or inference failure
pub async fn vectorize_handler(
    State(state): State<AppState>,
    Json(request): Json<VectorizeRequest>,
) -> Result<Json<VectorizeResponse>, ApiErrorResponse> {
    // 1. Validate: resolve the two optional fields into a single source
    let source = request.into_source()?;

    // 2. Acquire raw RGB pixels
    let raw = match source {
        ImageSource::FromBase64(payload) => {
            decode_base64_payload(&payload).map_err(VectorizeError::from)?
        }
        ImageSource::FromUrl(url) => state
            .fetcher
            .fetch_image(&url)
            .await
            .map_err(VectorizeError::from)?,
    };
    debug!("Acquired image: {}x{}", raw.width(), raw.height());

    // 3. Normalize to the fixed encoder shape
    let normalized = normalize_image(&raw);

    // 4. Infer. CPU-bound; runs to completion within this request.
    let embedding = state
        .encoder
        .encode(&normalized)
        .map_err(|e| VectorizeError::Inference(e.to_string()))?;
    debug!("Encoded image into {}-dimensional vector", embedding.len());

    // 5. Respond
    Ok(Json(VectorizeResponse { embedding }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_exists() {
        // Just verify the handler compiles
        let _ = vectorize_handler;
    }
}
