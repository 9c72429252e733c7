// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! One-time model acquisition from the Hugging Face Hub

use anyhow::{Context, Result};
use hf_hub::api::tokio::Api;
use std::path::{Path, PathBuf};
use tracing::info;

/// Hub repository holding the ONNX export of the CLIP vision encoder
pub const CLIP_MODEL_REPO: &str = "Qdrant/clip-ViT-B-32-vision";

/// ONNX file within the repository
pub const CLIP_MODEL_FILE: &str = "model.onnx";

/// Resolve the on-disk model location
///
/// Uses the configured path when the file exists; otherwise downloads the
/// encoder from the Hugging Face Hub into the local cache and returns the
/// cached path. Runs once at startup, before the service accepts requests.
pub async fn ensure_model(model_path: &str) -> Result<PathBuf> {
    let path = Path::new(model_path);
    if path.exists() {
        return Ok(path.to_path_buf());
    }

    info!(
        "Model not found at {}, downloading {} from the Hugging Face Hub",
        model_path, CLIP_MODEL_REPO
    );

    let api = Api::new().context("Failed to initialize Hugging Face Hub client")?;
    let downloaded = api
        .model(CLIP_MODEL_REPO.to_string())
        .get(CLIP_MODEL_FILE)
        .await
        .context(format!(
            "Failed to download {} from {}",
            CLIP_MODEL_FILE, CLIP_MODEL_REPO
        ))?;

    info!("✅ Model downloaded to {}", downloaded.display());

    Ok(downloaded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ensure_model_uses_existing_path() {
        // Any file that exists short-circuits the download
        let path = ensure_model("Cargo.toml").await.unwrap();
        assert_eq!(path, PathBuf::from("Cargo.toml"));
    }
}
