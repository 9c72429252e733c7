// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vectorize request types and input-source resolution

use serde::{Deserialize, Serialize};

use crate::api::errors::VectorizeError;

/// Request body for POST /vectorize
///
/// Exactly one of the two fields must be present and non-empty. When both
/// are supplied, the inline payload wins; see [`VectorizeRequest::into_source`].
///
/// # Example
/// ```json
/// { "image_url": "https://example.com/cat.png" }
/// ```
/// ```json
/// { "image_base64": "data:image/png;base64,iVBORw0KGgo..." }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizeRequest {
    /// Remote image location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Inline base64 image data, with or without a data-URI header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
}

/// Resolved image source
///
/// Constructed at the validation boundary so that source precedence is
/// decided exactly once; downstream stages never see both fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    FromBase64(String),
    FromUrl(String),
}

impl VectorizeRequest {
    /// Resolve the optional fields into a single source
    ///
    /// Precedence: a non-empty base64 payload is used regardless of whether
    /// a URL is also present; otherwise a non-empty URL is used; otherwise
    /// the request is invalid. Empty strings count as absent.
    pub fn into_source(self) -> Result<ImageSource, VectorizeError> {
        if let Some(payload) = self.image_base64.filter(|s| !s.is_empty()) {
            return Ok(ImageSource::FromBase64(payload));
        }

        if let Some(url) = self.image_url.filter(|s| !s.is_empty()) {
            return Ok(ImageSource::FromUrl(url));
        }

        Err(VectorizeError::InvalidInput(
            "no image source provided: supply image_url or image_base64".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_only() {
        let request = VectorizeRequest {
            image_url: None,
            image_base64: Some("aGVsbG8=".to_string()),
        };
        assert_eq!(
            request.into_source().unwrap(),
            ImageSource::FromBase64("aGVsbG8=".to_string())
        );
    }

    #[test]
    fn test_url_only() {
        let request = VectorizeRequest {
            image_url: Some("https://example.com/cat.png".to_string()),
            image_base64: None,
        };
        assert_eq!(
            request.into_source().unwrap(),
            ImageSource::FromUrl("https://example.com/cat.png".to_string())
        );
    }

    #[test]
    fn test_base64_wins_when_both_present() {
        let request = VectorizeRequest {
            image_url: Some("https://example.com/cat.png".to_string()),
            image_base64: Some("aGVsbG8=".to_string()),
        };
        assert_eq!(
            request.into_source().unwrap(),
            ImageSource::FromBase64("aGVsbG8=".to_string())
        );
    }

    #[test]
    fn test_neither_present_is_invalid_input() {
        let request = VectorizeRequest {
            image_url: None,
            image_base64: None,
        };
        let err = request.into_source().unwrap_err();
        assert!(matches!(err, VectorizeError::InvalidInput(_)));
        assert!(err.to_string().contains("no image source provided"));
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        let request = VectorizeRequest {
            image_url: Some(String::new()),
            image_base64: Some(String::new()),
        };
        assert!(request.into_source().is_err());
    }

    #[test]
    fn test_empty_base64_falls_back_to_url() {
        let request = VectorizeRequest {
            image_url: Some("https://example.com/cat.png".to_string()),
            image_base64: Some(String::new()),
        };
        assert_eq!(
            request.into_source().unwrap(),
            ImageSource::FromUrl("https://example.com/cat.png".to_string())
        );
    }

    #[test]
    fn test_deserialization_empty_body() {
        let request: VectorizeRequest = serde_json::from_str("{}").unwrap();
        assert!(request.image_url.is_none());
        assert!(request.image_base64.is_none());
    }

    #[test]
    fn test_deserialization_both_fields() {
        let json = r#"{
            "image_url": "https://example.com/cat.png",
            "image_base64": "aGVsbG8="
        }"#;
        let request: VectorizeRequest = serde_json::from_str(json).unwrap();
        assert!(request.image_url.is_some());
        assert!(request.image_base64.is_some());
    }
}
