// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vision::{FetchError, ImageError};

/// Wire-format error body: `{"detail": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Failure taxonomy for the vectorize pipeline
///
/// `InvalidInput` is detected before any processing begins; the remaining
/// kinds originate in the acquire and infer stages and all surface as 500.
#[derive(Debug, Error)]
pub enum VectorizeError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("failed to decode image payload: {0}")]
    Decode(#[from] ImageError),

    #[error("failed to fetch image: {0}")]
    Fetch(#[from] FetchError),

    #[error("inference failed: {0}")]
    Inference(String),
}

impl VectorizeError {
    /// Exhaustive kind-to-status mapping
    pub fn status_code(&self) -> u16 {
        match self {
            VectorizeError::InvalidInput(_) => 400,
            VectorizeError::Decode(_)
            | VectorizeError::Fetch(_)
            | VectorizeError::Inference(_) => 500,
        }
    }

    /// The raw error message becomes the response detail text
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            detail: self.to_string(),
        }
    }
}
