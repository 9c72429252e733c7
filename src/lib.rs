// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod embeddings;
pub mod vision;

// Re-export main types
pub use api::{
    create_app, start_server, AppState, ErrorResponse, HealthResponse, ImageSource,
    VectorizeError, VectorizeRequest, VectorizeResponse,
};
pub use config::ServerConfig;
pub use embeddings::{ensure_model, ClipVisionModel, ImageEncoder};
pub use vision::{ImageFetcher, FetchError, ImageError};
