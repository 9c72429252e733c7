// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Geometric normalization and tensor conversion for the CLIP vision encoder

use image::{imageops::FilterType, DynamicImage, GenericImageView, RgbImage};
use ndarray::Array4;

/// Target size for the CLIP ViT-B/32 vision encoder
pub const CLIP_INPUT_SIZE: u32 = 224;

/// Fraction of each dimension retained by the center crop
pub const CROP_FRACTION: f64 = 0.70;

/// CLIP normalization mean values
pub const CLIP_MEAN: [f32; 3] = [0.48145466, 0.4578275, 0.40821073];

/// CLIP normalization std values
pub const CLIP_STD: [f32; 3] = [0.26862954, 0.26130258, 0.27577711];

/// Compute the centered crop box for an image of the given dimensions
///
/// The box retains [`CROP_FRACTION`] of each dimension, centered. Box
/// coordinates are truncated to whole pixels at crop time; a degenerate
/// truncated box (possible below 4 pixels per side) is widened to one pixel
/// so the output is never empty.
///
/// Returns `(x, y, width, height)`.
pub fn crop_box(width: u32, height: u32) -> (u32, u32, u32, u32) {
    let crop_w = CROP_FRACTION * width as f64;
    let crop_h = CROP_FRACTION * height as f64;

    let left = (width as f64 - crop_w) / 2.0;
    let top = (height as f64 - crop_h) / 2.0;
    let right = left + crop_w;
    let bottom = top + crop_h;

    let x = left as u32;
    let y = top as u32;
    let w = ((right as u32).saturating_sub(x)).max(1);
    let h = ((bottom as u32).saturating_sub(y)).max(1);

    (x, y, w, h)
}

/// Apply the 70% center crop
pub fn center_crop(image: &DynamicImage) -> DynamicImage {
    let (width, height) = image.dimensions();
    let (x, y, w, h) = crop_box(width, height);
    image.crop_imm(x, y, w, h)
}

/// Normalize an image to the fixed encoder shape
///
/// Steps:
/// 1. Center-crop to [`CROP_FRACTION`] of each dimension
/// 2. Resize to CLIP_INPUT_SIZE x CLIP_INPUT_SIZE with Lanczos3, regardless
///    of the crop box's aspect ratio
///
/// The output is always exactly 224x224 RGB for any input of at least one
/// pixel per side; the encoder requires a uniform tensor shape across all
/// inputs.
pub fn normalize_image(image: &DynamicImage) -> RgbImage {
    center_crop(image)
        .resize_exact(CLIP_INPUT_SIZE, CLIP_INPUT_SIZE, FilterType::Lanczos3)
        .to_rgb8()
}

/// Convert a normalized image into a batch-of-one NCHW tensor
///
/// Pixel values are scaled with the CLIP mean/std: `(pixel/255 - mean) / std`.
/// Output shape is `[1, 3, 224, 224]`.
pub fn to_clip_tensor(image: &RgbImage) -> Array4<f32> {
    let size = CLIP_INPUT_SIZE as usize;
    let mut tensor = Array4::zeros((1, 3, size, size));

    for y in 0..size {
        for x in 0..size {
            let pixel = image.get_pixel(x as u32, y as u32);

            for c in 0..3 {
                let normalized = (pixel[c] as f32 / 255.0 - CLIP_MEAN[c]) / CLIP_STD[c];
                tensor[[0, c, y, x]] = normalized;
            }
        }
    }

    tensor
}
