// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Embedding module wrapping the pretrained CLIP vision encoder
//!
//! The encoder is loaded exactly once at startup, pinned to CPU execution,
//! and shared read-only for the lifetime of the process.

pub mod clip_model;
pub mod model_fetcher;

pub use clip_model::{ClipVisionModel, CLIP_MODEL_NAME};
pub use model_fetcher::{ensure_model, CLIP_MODEL_FILE, CLIP_MODEL_REPO};

use anyhow::Result;
use image::RgbImage;

/// Capability exposed by the embedding engine
///
/// Implementations must be deterministic: identical pixel input yields a
/// bit-identical output vector.
pub trait ImageEncoder: Send + Sync {
    /// Encode a normalized 224x224 RGB image into a fixed-length vector
    fn encode(&self, image: &RgbImage) -> Result<Vec<f32>>;

    /// Output vector length, fixed by the loaded model
    fn dimension(&self) -> usize;

    /// Name of the underlying model
    fn model_name(&self) -> &str;
}
