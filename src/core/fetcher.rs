use crate::core::{BreedImageResponse, BreedName, ConfigProvider, ImageSource, ImageUrl};
use crate::utils::error::{PipelineError, Result};
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://dog.ceo/api";

/// Builds `{api_base}/breed/{breed}/images/random`. The breed is encoded as
/// one path segment, so `/`, `?` and `#` cannot change the request target.
pub fn build_image_url(api_base: &str, breed: &BreedName) -> Result<Url> {
    let mut url = Url::parse(api_base)?;
    url.path_segments_mut()
        .map_err(|_| PipelineError::InvalidConfigValueError {
            field: "api_base".to_string(),
            value: api_base.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        })?
        .pop_if_empty()
        .extend(["breed", breed.as_str(), "images", "random"]);
    Ok(url)
}

#[derive(Debug, Clone)]
pub struct DogApiClient {
    client: Client,
    api_base: String,
    timeout: Option<Duration>,
}

impl DogApiClient {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into(),
            timeout: None,
        }
    }

    /// Base URL and request timeout taken from the resolved configuration.
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        let client = Self::new(config.api_base());
        match config.request_timeout() {
            Some(timeout) => client.with_timeout(timeout),
            None => client,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Default for DogApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

#[async_trait::async_trait]
impl ImageSource for DogApiClient {
    async fn random_image(&self, breed: &BreedName) -> Result<ImageUrl> {
        let url = build_image_url(&self.api_base, breed)?;

        tracing::debug!(url = %url, "Requesting random image");
        let mut request = self.client.get(url.clone());
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(status = %status, "API response received");

        let body = response.text().await?;

        if !status.is_success() {
            // dog.ceo reports errors as {"status":"error","message":"...","code":404}
            let message = serde_json::from_str::<BreedImageResponse>(&body)
                .ok()
                .and_then(|b| b.message_str().map(str::to_string))
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown status")
                        .to_string()
                });
            return Err(PipelineError::HttpStatusError {
                status: status.as_u16(),
                url: url.to_string(),
                message,
            });
        }

        let parsed: BreedImageResponse =
            serde_json::from_str(&body).map_err(|e| PipelineError::ResponseFormatError {
                message: format!("body is not a JSON object: {}", e),
            })?;

        if let Some(api_status) = parsed.status.as_deref() {
            if api_status != "success" {
                tracing::warn!(status = api_status, "API reported a non-success status");
            }
        }

        parsed
            .message_str()
            .map(ImageUrl::new)
            .ok_or_else(|| PipelineError::ResponseFormatError {
                message: "response has no string 'message' field".to_string(),
            })
    }
}
