//! HTTP image fetching.

use promocast_common::models::Bitmap;
use promocast_common::services::{BoxFuture, BoxedError, ImageFetcher};
use promocast_common::{create_client, Context, PromocastError};
use reqwest::{header, Client};
use tracing::debug;

/// Loads notification images over HTTP(S).
///
/// The request timeout is a transport setting; when it elapses the fetch is
/// reported as failed like any other error. Bodies larger than `max_bytes`
/// are rejected, whether announced by `Content-Length` or found while
/// reading.
pub struct HttpImageFetcher {
    client: Client,
    max_bytes: u64,
}

impl HttpImageFetcher {
    pub fn new(timeout_secs: u64, max_bytes: u64) -> Result<Self, PromocastError> {
        let client = create_client(timeout_secs, true).context("building image HTTP client")?;
        Ok(Self { client, max_bytes })
    }

    async fn load(&self, url: &str) -> Result<Bitmap, BoxedError> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| BoxedError(Box::new(e)))?;

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if !content_type.starts_with("image/") {
            return Err(format!("{} is not an image (content type '{}')", url, content_type).into());
        }

        if let Some(length) = response.content_length() {
            if length > self.max_bytes {
                return Err(self.too_large(url).into());
            }
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| BoxedError(Box::new(e)))? {
            if (bytes.len() + chunk.len()) as u64 > self.max_bytes {
                return Err(self.too_large(url).into());
            }
            bytes.extend_from_slice(&chunk);
        }
        if bytes.is_empty() {
            return Err(format!("{} returned an empty body", url).into());
        }

        debug!("Loaded {} bytes of {} from {}", bytes.len(), content_type, url);
        Ok(Bitmap::new(bytes, content_type))
    }

    fn too_large(&self, url: &str) -> String {
        format!("{} is larger than {} bytes", url, self.max_bytes)
    }
}

impl ImageFetcher for HttpImageFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Bitmap, BoxedError> {
        Box::pin(self.load(url))
    }
}
