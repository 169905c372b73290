pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, LogFormat};

pub use config::{cli::LocalStorage, toml_config::TomlConfig, Settings};
pub use core::{
    batch::fetch_batch,
    engine::{PipelineEngine, RunSummary},
    fetcher::DogApiClient,
    pipeline::BreedImagePipeline,
};
pub use domain::model::{BreedName, ImageBatch, ImageUrl};
pub use utils::error::{PipelineError, Result};
