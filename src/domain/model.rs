use crate::utils::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Breed key used as a single path segment of the image endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BreedName(String);

impl BreedName {
    /// Trims surrounding whitespace; the remaining text is kept verbatim and
    /// percent-encoded when the request URL is built.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PipelineError::ValidationError {
                message: "breed name is empty".to_string(),
            });
        }
        // Dot segments would be dropped from the request path.
        if trimmed == "." || trimmed == ".." {
            return Err(PipelineError::ValidationError {
                message: format!("'{}' is not a breed name", trimmed),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BreedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrl(String);

impl ImageUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ImageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageBatch {
    pub images: Vec<ImageUrl>,
}

impl ImageBatch {
    pub fn single(image: ImageUrl) -> Self {
        Self {
            images: vec![image],
        }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// One URL per line, no trailing newline.
    pub fn render(&self) -> String {
        self.images
            .iter()
            .map(ImageUrl::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Body of `/breed/{breed}/images/random`. Error bodies use the same shape
/// with `status = "error"` and a numeric `code`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreedImageResponse {
    pub message: Option<serde_json::Value>,
    pub status: Option<String>,
    pub code: Option<u16>,
}

impl BreedImageResponse {
    pub fn message_str(&self) -> Option<&str> {
        self.message.as_ref().and_then(|m| m.as_str())
    }
}
