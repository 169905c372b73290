pub mod batch;
pub mod engine;
pub mod fetcher;
pub mod pipeline;

pub use crate::domain::model::{BreedImageResponse, BreedName, ImageBatch, ImageUrl};
pub use crate::domain::ports::{ConfigProvider, ImageSource, Pipeline, Storage};
pub use crate::utils::error::Result;
