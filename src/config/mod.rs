pub mod cli;
pub mod toml_config;

use crate::core::fetcher::DEFAULT_API_BASE;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_api_base, validate_distinct_paths, validate_path, validate_range, validate_timeout,
    Validate,
};
use std::time::Duration;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "cli")]
use std::path::PathBuf;

pub const DEFAULT_INPUT_PATH: &str = "dog.txt";
pub const DEFAULT_OUTPUT_PATH: &str = "dog-img.txt";
pub const DEFAULT_CONCURRENCY: usize = 3;
pub const MAX_BATCH_SIZE: usize = 50;
pub const MAX_CONCURRENCY: usize = 16;

/// Resolved configuration: CLI flags over the TOML file over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base: String,
    pub input_path: String,
    pub output_path: String,
    pub batch_size: usize,
    pub concurrency: usize,
    pub request_timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            input_path: DEFAULT_INPUT_PATH.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            batch_size: 1,
            concurrency: DEFAULT_CONCURRENCY,
            request_timeout: None,
        }
    }
}

impl Settings {
    pub fn apply_toml(mut self, file: &TomlConfig) -> Self {
        if let Some(api_base) = &file.source.api_base {
            self.api_base = api_base.clone();
        }
        if let Some(secs) = file.source.timeout_seconds {
            self.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(input) = &file.files.input {
            self.input_path = input.clone();
        }
        if let Some(output) = &file.files.output {
            self.output_path = output.clone();
        }
        if let Some(count) = file.batch.count {
            self.batch_size = count;
        }
        if let Some(concurrency) = file.batch.concurrency {
            self.concurrency = concurrency;
        }
        self
    }
}

impl ConfigProvider for Settings {
    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn concurrency(&self) -> usize {
        self.concurrency
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_api_base("api_base", &self.api_base)?;
        validate_path("input", &self.input_path)?;
        validate_path("output", &self.output_path)?;
        validate_distinct_paths(&self.input_path, &self.output_path)?;
        validate_range("count", self.batch_size, 1, MAX_BATCH_SIZE)?;
        validate_range("concurrency", self.concurrency, 1, MAX_CONCURRENCY)?;
        validate_timeout("timeout", self.request_timeout)
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "breed-fetch", version)]
#[command(about = "Fetch a random dog image URL for the breed named in a file")]
pub struct CliConfig {
    /// File holding the breed name [default: dog.txt]
    #[arg(short, long)]
    pub input: Option<String>,

    /// File the image URL is written to, replacing its content [default: dog-img.txt]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Base URL of the dog API [default: https://dog.ceo/api]
    #[arg(long)]
    pub api_base: Option<String>,

    /// Number of images to fetch concurrently; all must succeed [default: 1]
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Maximum requests in flight for a batch [default: 3]
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Request timeout in seconds [default: none]
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::default();
        if let Some(path) = &self.config {
            tracing::debug!(path = %path.display(), "Loading configuration file");
            settings = settings.apply_toml(&TomlConfig::from_file(path)?);
        }
        Ok(self.apply_overrides(settings))
    }

    fn apply_overrides(&self, mut settings: Settings) -> Settings {
        if let Some(api_base) = &self.api_base {
            settings.api_base = api_base.clone();
        }
        if let Some(input) = &self.input {
            settings.input_path = input.clone();
        }
        if let Some(output) = &self.output {
            settings.output_path = output.clone();
        }
        if let Some(count) = self.count {
            settings.batch_size = count;
        }
        if let Some(concurrency) = self.concurrency {
            settings.concurrency = concurrency;
        }
        if let Some(secs) = self.timeout {
            settings.request_timeout = Some(Duration::from_secs(secs));
        }
        settings
    }
}
