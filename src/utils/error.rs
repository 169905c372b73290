use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Storage error at '{path}': {source}")]
    StorageError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned HTTP {status} for {url}: {message}")]
    HttpStatusError {
        status: u16,
        url: String,
        message: String,
    },

    #[error("Unexpected API response: {message}")]
    ResponseFormatError { message: String },

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Batch fetch failed on request {failed} of {total}: {source}")]
    BatchError {
        failed: usize,
        total: usize,
        #[source]
        source: Box<PipelineError>,
    },

    #[error("Unexpected error: {message}")]
    UnexpectedError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Network,
    Configuration,
    Validation,
    Unexpected,
}

impl PipelineError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PipelineError::StorageError { .. } => ErrorCategory::Io,
            PipelineError::ApiError(_)
            | PipelineError::HttpStatusError { .. }
            | PipelineError::ResponseFormatError { .. } => ErrorCategory::Network,
            PipelineError::UrlError(_)
            | PipelineError::ConfigError { .. }
            | PipelineError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            PipelineError::ValidationError { .. } => ErrorCategory::Validation,
            PipelineError::BatchError { source, .. } => source.category(),
            PipelineError::UnexpectedError { .. } => ErrorCategory::Unexpected,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PipelineError::StorageError { path, source } => match source.kind() {
                std::io::ErrorKind::NotFound => format!("Create '{}' containing a breed name", path),
                std::io::ErrorKind::PermissionDenied => {
                    format!("Check the permissions on '{}'", path)
                }
                std::io::ErrorKind::InvalidData => format!("Save '{}' as UTF-8 text", path),
                _ => format!("Check that '{}' is accessible and the disk is not full", path),
            },
            PipelineError::ApiError(e) if e.is_timeout() => {
                "The API did not answer in time; raise --timeout or try again later".to_string()
            }
            PipelineError::ApiError(_) => {
                "Check your network connection and the --api-base setting".to_string()
            }
            PipelineError::HttpStatusError { status: 404, .. } => {
                "Check the breed name; see https://dog.ceo/dog-api/breeds-list".to_string()
            }
            PipelineError::HttpStatusError { status, .. } if *status >= 500 => {
                "The API is having trouble; try again later".to_string()
            }
            PipelineError::HttpStatusError { .. } => {
                "Check the request settings and the breed name".to_string()
            }
            PipelineError::ResponseFormatError { .. } => {
                "Check that --api-base points at a dog.ceo compatible API".to_string()
            }
            PipelineError::UrlError(_) => "Use an absolute http(s) URL for --api-base".to_string(),
            PipelineError::ConfigError { .. } => "Check the configuration file syntax".to_string(),
            PipelineError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of {}", field)
            }
            PipelineError::ValidationError { .. } => "Check the input values".to_string(),
            PipelineError::BatchError { source, .. } => source.recovery_suggestion(),
            PipelineError::UnexpectedError { .. } => {
                "Run again with --verbose and report the log".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not read or write a file: {}", self),
            ErrorCategory::Network => format!("Could not fetch an image: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Validation => format!("Invalid input: {}", self),
            ErrorCategory::Unexpected => format!("Something went wrong: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
