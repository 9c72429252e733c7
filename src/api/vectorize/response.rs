// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vectorize response type

use serde::{Deserialize, Serialize};

/// Response body for POST /vectorize
///
/// # Example
/// ```json
/// { "embedding": [0.12, -0.08, 0.33, ...] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizeResponse {
    /// Fixed-length embedding vector, raw model output
    pub embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization() {
        let response = VectorizeResponse {
            embedding: vec![0.5, -0.25],
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"embedding":[0.5,-0.25]}"#);
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let response = VectorizeResponse {
            embedding: vec![3.0, 1.0, 2.0],
        };
        let json = serde_json::to_string(&response).unwrap();
        let parsed: VectorizeResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.embedding, vec![3.0, 1.0, 2.0]);
    }
}
