//! HTTP image fetching with a bounded timeout
//!
//! Resolves `image_url` request fields into decoded pixel data.

use image::DynamicImage;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::image_utils::{decode_image_bytes, MAX_IMAGE_SIZE};

/// Upper bound on a single image download
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Image fetch error types
#[derive(Debug, Clone)]
pub enum FetchError {
    /// Request timed out
    Timeout(String),
    /// URL failed to parse
    InvalidUrl(String),
    /// HTTP request error
    HttpError(String),
    /// HTTP non-success status
    HttpStatus(u16, String),
    /// Response body exceeded the size limit
    TooLarge(usize, String),
    /// Response body was not a decodable image
    NotAnImage(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout(url) => write!(f, "Timeout fetching: {}", url),
            Self::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            Self::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            Self::HttpStatus(code, url) => write!(f, "HTTP {} for: {}", code, url),
            Self::TooLarge(bytes, url) => {
                write!(f, "Response too large ({} bytes) from: {}", bytes, url)
            }
            Self::NotAnImage(msg) => write!(f, "Response is not an image: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

/// Image fetcher with a shared HTTP client
pub struct ImageFetcher {
    client: Client,
}

impl ImageFetcher {
    /// Create a new image fetcher
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent("Mozilla/5.0 (compatible; FabstirBot/1.0; +https://fabstir.com)")
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Fetch and decode an image from a URL
    ///
    /// Issues a GET bounded by [`FETCH_TIMEOUT`]; any network failure,
    /// timeout, non-success status, or undecodable body is a [`FetchError`].
    /// The decoded image is coerced to RGB.
    pub async fn fetch_image(&self, url: &str) -> Result<DynamicImage, FetchError> {
        let url = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))?;

        debug!("Fetching image from: {}", url);

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(url.to_string())
            } else {
                FetchError::HttpError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16(), url.to_string()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::HttpError(e.to_string()))?;

        if bytes.len() > MAX_IMAGE_SIZE {
            return Err(FetchError::TooLarge(bytes.len(), url.to_string()));
        }

        decode_image_bytes(&bytes).map_err(|e| FetchError::NotAnImage(e.to_string()))
    }
}

impl Default for ImageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::Timeout("http://example.com/a.png".to_string());
        assert!(err.to_string().contains("Timeout"));

        let err = FetchError::HttpStatus(404, "http://example.com/a.png".to_string());
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_fetch_invalid_url() {
        let fetcher = ImageFetcher::new();
        let result = fetcher.fetch_image("not a url").await;
        assert!(matches!(result.unwrap_err(), FetchError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host() {
        let fetcher = ImageFetcher::new();
        // Port 1 is reserved and refuses connections on any sane host
        let result = fetcher.fetch_image("http://127.0.0.1:1/missing.png").await;
        assert!(matches!(
            result.unwrap_err(),
            FetchError::HttpError(_) | FetchError::Timeout(_)
        ));
    }
}
