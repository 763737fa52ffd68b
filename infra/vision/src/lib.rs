//! # Vision
//!
//! Port and HTTP adapter for the external object-detection service.
//!
//! The service receives an image as `multipart/form-data` (a `threshold` text field
//! and an `img` file part) and answers with `{"objects": ["wood", "nail", ...]}`.
//! Labels come back as the service produced them; normalization happens in the
//! matching layer.

mod error;
mod http;

pub use error::{VisionError, VisionErrorExt};
pub use http::HttpDetector;

use async_trait::async_trait;
use bytes::Bytes;
use std::fmt::Debug;

/// An uploaded photo forwarded to the detector.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl ImageUpload {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self { filename: filename.into(), content_type: None, bytes: bytes.into() }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Object detection over a single image.
#[async_trait]
pub trait Detector: Debug + Send + Sync {
    /// Returns the labels recognized in `image`, possibly with duplicates.
    async fn detect(&self, image: ImageUpload) -> Result<Vec<String>, VisionError>;
}
