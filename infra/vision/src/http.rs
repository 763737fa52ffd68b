use crate::{Detector, ImageUpload, VisionError, VisionErrorExt};
use async_trait::async_trait;
use chub_domain::config::VisionConfig;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Upper bound for the error body echoed into [`VisionError::Status`].
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Deserialize)]
struct DetectionResponse {
    objects: Vec<String>,
}

/// [`Detector`] backed by the HTTP detection service.
///
/// One request per call, no retries.
#[derive(Debug, Clone)]
pub struct HttpDetector {
    client: Client,
    url: Url,
    threshold: f32,
}

impl HttpDetector {
    /// Builds a detector from the `vision` configuration section.
    ///
    /// # Errors
    /// [`VisionError::Configuration`] for an unparsable URL, a threshold outside
    /// `0.0..=1.0`, or when the HTTP client cannot be built.
    pub fn from_config(config: &VisionConfig) -> Result<Self, VisionError> {
        let url = Url::parse(&config.url).map_err(|e| VisionError::Configuration {
            message: e.to_string().into(),
            context: Some(format!("Invalid vision URL '{}'", config.url).into()),
        })?;

        if !(0.0..=1.0).contains(&config.threshold) {
            return Err(VisionError::Configuration {
                message: format!("threshold must be within 0.0..=1.0, got {}", config.threshold)
                    .into(),
                context: None,
            });
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VisionError::Configuration {
                message: e.to_string().into(),
                context: Some("Building HTTP client".into()),
            })?;

        Ok(Self { client, url, threshold: config.threshold })
    }

    fn form(&self, image: ImageUpload) -> Result<Form, VisionError> {
        let length = image.bytes.len() as u64;
        let mut part =
            Part::stream_with_length(Body::from(image.bytes), length).file_name(image.filename);
        if let Some(content_type) = image.content_type.as_deref() {
            part = part.mime_str(content_type).map_err(|e| VisionError::Internal {
                message: e.to_string().into(),
                context: Some(format!("Invalid image content type '{content_type}'").into()),
            })?;
        }

        Ok(Form::new().text("threshold", self.threshold.to_string()).part("img", part))
    }
}

#[async_trait]
impl Detector for HttpDetector {
    #[instrument(skip_all, fields(url = %self.url, filename = %image.filename, size = image.bytes.len()))]
    async fn detect(&self, image: ImageUpload) -> Result<Vec<String>, VisionError> {
        let form = self.form(image)?;

        let response = self
            .client
            .post(self.url.clone())
            .multipart(form)
            .send()
            .await
            .context("Sending image to detector")?;

        let status = response.status();
        let body = response.bytes().await.context("Reading detector response")?;

        if !status.is_success() {
            let snippet = String::from_utf8_lossy(&body[..body.len().min(MAX_ERROR_BODY)]).into_owned();
            warn!(%status, "Detector rejected image");
            return Err(VisionError::Status { status: status.as_u16(), body: snippet, context: None });
        }

        let DetectionResponse { objects } =
            serde_json::from_slice(&body).context("Parsing detector response")?;
        debug!(count = objects.len(), "Detector returned labels");

        Ok(objects)
    }
}
