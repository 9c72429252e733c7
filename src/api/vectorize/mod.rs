// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Vectorize API Module
//!
//! This module provides the POST /vectorize endpoint for embedding a single
//! image via the CLIP vision encoder.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::vectorize_handler;
pub use request::{ImageSource, VectorizeRequest};
pub use response::VectorizeResponse;
