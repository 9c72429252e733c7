// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image decoding utilities for inline base64 payloads

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::DynamicImage;
use thiserror::Error;

/// Maximum image size (10MB)
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Custom error types for image decoding
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image data is too large: {0} bytes (max: {1} bytes)")]
    TooLarge(usize, usize),

    #[error("invalid base64 encoding: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("image data is empty")]
    EmptyData,
}

/// Strip an optional data-URI header from an encoded payload
///
/// Payloads may arrive either as raw base64 or in data-URI form
/// (`data:image/png;base64,<bytes>`). Everything up to and including the
/// first comma is metadata and is discarded.
pub fn strip_data_uri_header(payload: &str) -> &str {
    match payload.split_once(',') {
        Some((_, encoded)) => encoded,
        None => payload,
    }
}

/// Decode a base64-encoded image payload
///
/// # Arguments
/// * `payload` - Base64 image data, with or without a data-URI header
///
/// # Returns
/// * `Ok(DynamicImage)` - The decoded image, coerced to RGB
/// * `Err(ImageError)` - If base64 or image decoding fails
///
/// # Example
/// ```ignore
/// let image = decode_base64_payload("data:image/png;base64,iVBORw0KGgo...")?;
/// println!("Image size: {}x{}", image.width(), image.height());
/// ```
pub fn decode_base64_payload(payload: &str) -> Result<DynamicImage, ImageError> {
    if payload.is_empty() {
        return Err(ImageError::EmptyData);
    }

    let encoded = strip_data_uri_header(payload);
    let bytes = STANDARD.decode(encoded)?;

    decode_image_bytes(&bytes)
}

/// Decode raw image bytes (base64 payloads and URL fetches both end here)
///
/// # Arguments
/// * `bytes` - Raw image bytes
///
/// # Returns
/// * `Ok(DynamicImage)` - The decoded image, coerced to RGB
/// * `Err(ImageError)` - If decoding fails
pub fn decode_image_bytes(bytes: &[u8]) -> Result<DynamicImage, ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::EmptyData);
    }

    if bytes.len() > MAX_IMAGE_SIZE {
        return Err(ImageError::TooLarge(bytes.len(), MAX_IMAGE_SIZE));
    }

    let img =
        image::load_from_memory(bytes).map_err(|e| ImageError::DecodeFailed(e.to_string()))?;

    // Alpha channels and palettes are dropped here; every downstream stage
    // assumes three channels.
    Ok(DynamicImage::ImageRgb8(img.to_rgb8()))
}
