// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ONNX CLIP Vision Model Wrapper
//!
//! This module provides a wrapper around ONNX Runtime for running the
//! clip-ViT-B-32 vision encoder.
//!
//! Features:
//! - ONNX model loading from disk, CPU execution only
//! - Batch-of-one inference (single image wrapped as a one-element batch)
//! - Fixed-dimension output vectors, validated at load time

use anyhow::{Context, Result};
use image::RgbImage;
use ndarray::{Array4, Axis};
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

use crate::embeddings::ImageEncoder;
use crate::vision::preprocessing::{to_clip_tensor, CLIP_INPUT_SIZE};

/// Name of the wrapped model
pub const CLIP_MODEL_NAME: &str = "clip-ViT-B-32";

/// ONNX-based CLIP vision encoder (clip-ViT-B-32)
///
/// Maps a normalized 224x224 RGB image to a 512-dimensional embedding.
/// ONNX Runtime performs inference only: no gradient state is retained and
/// the weights are never mutated after loading.
///
/// # Determinism
/// The encoder performs no randomized operations; identical pixel input
/// yields a bit-identical vector.
///
/// # Thread Safety
/// The session is wrapped in `Arc<Mutex>` for thread-safe shared access;
/// cloning the wrapper shares the underlying session.
#[derive(Clone)]
pub struct ClipVisionModel {
    /// ONNX Runtime session (wrapped in Arc<Mutex> for thread-safe shared access)
    session: Arc<Mutex<Session>>,

    /// Name of the model's pixel input, read from the session metadata
    input_name: String,

    /// Output dimension (512 for clip-ViT-B-32)
    dimension: usize,
}

impl std::fmt::Debug for ClipVisionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipVisionModel")
            .field("input_name", &self.input_name)
            .field("dimension", &self.dimension)
            .finish_non_exhaustive()
    }
}

impl ClipVisionModel {
    /// Creates a new CLIP vision model from an ONNX file on disk
    ///
    /// # Arguments
    /// - `model_path`: Path to the ONNX vision encoder (model.onnx)
    ///
    /// # Errors
    /// Returns error if:
    /// - Model file not found or invalid
    /// - ONNX Runtime initialization fails
    /// - The model does not output a `[1, dim]` batch
    ///
    /// # Example
    /// ```ignore
    /// let model = ClipVisionModel::new("./models/clip-vit-b-32-vision/model.onnx").await?;
    /// assert_eq!(model.dimension(), 512);
    /// ```
    pub async fn new<P: AsRef<Path>>(model_path: P) -> Result<Self> {
        let model_path = model_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("ONNX model file not found: {}", model_path.display());
        }

        // Inference is pinned to CPU so serving never depends on GPU state
        let mut session = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(4)
            .context("Failed to set intra threads")?
            .commit_from_file(model_path)
            .context(format!(
                "Failed to load ONNX model from {}",
                model_path.display()
            ))?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "pixel_values".to_string());

        // Validate the output contract by running a test inference on a zero
        // image, and record the embedding dimension.
        // Wrap in a block to ensure outputs are dropped before moving session
        let dimension = {
            let size = CLIP_INPUT_SIZE as usize;
            let pixel_values = Array4::<f32>::zeros((1, 3, size, size));

            let outputs = session.run(ort::inputs![
                input_name.as_str() => Value::from_array(pixel_values)?
            ])?;

            let output = outputs[0]
                .try_extract_array::<f32>()
                .context("Failed to extract output tensor")?;
            let shape = output.shape();

            if shape.len() != 2 || shape[0] != 1 {
                anyhow::bail!(
                    "Model outputs unexpected dimensions: {:?} (expected [1, dim])",
                    shape
                );
            }

            shape[1]
        }; // outputs dropped here

        info!(
            "✅ CLIP vision model loaded: {} ({} dimensions)",
            CLIP_MODEL_NAME, dimension
        );

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            input_name,
            dimension,
        })
    }
}

impl ImageEncoder for ClipVisionModel {
    /// Generates the embedding for a single normalized image
    ///
    /// The image is wrapped as a one-element batch before invoking the model
    /// and the single resulting vector is unwrapped afterward; the batched
    /// model interface is never called with an unbatched tensor.
    fn encode(&self, image: &RgbImage) -> Result<Vec<f32>> {
        let (width, height) = image.dimensions();
        if width != CLIP_INPUT_SIZE || height != CLIP_INPUT_SIZE {
            anyhow::bail!(
                "encoder requires a {}x{} RGB image, got {}x{}",
                CLIP_INPUT_SIZE,
                CLIP_INPUT_SIZE,
                width,
                height
            );
        }

        let pixel_values = to_clip_tensor(image);

        // Lock session for thread-safe access
        let mut session_guard = self.session.lock().unwrap();
        let outputs = session_guard.run(ort::inputs![
            self.input_name.as_str() => Value::from_array(pixel_values)?
        ])?;

        let output = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract output tensor")?;
        let shape = output.shape();

        if shape.len() != 2 || shape[0] != 1 || shape[1] != self.dimension {
            anyhow::bail!(
                "Unexpected embedding shape: {:?} (expected [1, {}])",
                shape,
                self.dimension
            );
        }

        // Raw model output: no unit scaling is applied
        let embedding: Vec<f32> = output.index_axis(Axis(0), 0).iter().copied().collect();

        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        CLIP_MODEL_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const MODEL_PATH: &str = "./models/clip-vit-b-32-vision/model.onnx";

    #[tokio::test]
    #[ignore] // Only run if model files are downloaded
    async fn test_model_creation() {
        let model = ClipVisionModel::new(MODEL_PATH).await.unwrap();
        assert_eq!(model.dimension(), 512);
        assert_eq!(model.model_name(), "clip-ViT-B-32");
    }

    #[tokio::test]
    #[ignore] // Only run if model files are downloaded
    async fn test_encode_basic() {
        let model = ClipVisionModel::new(MODEL_PATH).await.unwrap();
        let image = RgbImage::from_pixel(224, 224, Rgb([255, 0, 0]));
        let embedding = model.encode(&image).unwrap();
        assert_eq!(embedding.len(), model.dimension());
    }

    #[tokio::test]
    #[ignore] // Only run if model files are downloaded
    async fn test_encode_deterministic() {
        let model = ClipVisionModel::new(MODEL_PATH).await.unwrap();
        let image = RgbImage::from_pixel(224, 224, Rgb([10, 120, 230]));

        let first = model.encode(&image).unwrap();
        let second = model.encode(&image).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    #[ignore] // Only run if model files are downloaded
    async fn test_encode_rejects_wrong_shape() {
        let model = ClipVisionModel::new(MODEL_PATH).await.unwrap();
        let image = RgbImage::new(100, 100);
        assert!(model.encode(&image).is_err());
    }
}
