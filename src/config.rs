// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service configuration, resolved once at startup

use std::env;

/// Default listen port
pub const DEFAULT_PORT: u16 = 8000;

/// Default on-disk location of the ONNX vision encoder
pub const DEFAULT_MODEL_PATH: &str = "./models/clip-vit-b-32-vision/model.onnx";

/// Runtime configuration
///
/// Built from environment variables exactly once in `main`; request handlers
/// only ever see the values captured here.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen port (API_PORT)
    pub port: u16,
    /// ONNX model location (CLIP_MODEL_PATH); downloaded on first run when
    /// the file does not exist
    pub model_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            model_path: DEFAULT_MODEL_PATH.to_string(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the environment
    pub fn from_env() -> Self {
        let port = env::var("API_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let model_path =
            env::var("CLIP_MODEL_PATH").unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string());

        Self { port, model_path }
    }
}
