use crate::core::batch::fetch_batch;
use crate::core::{BreedName, ConfigProvider, ImageBatch, ImageSource, Pipeline, Storage};
use crate::utils::error::{PipelineError, Result};

/// Reads a breed from `input_path`, fetches image URLs for it and writes them
/// to `output_path`.
pub struct BreedImagePipeline<S: Storage, F: ImageSource, C: ConfigProvider> {
    storage: S,
    source: F,
    config: C,
}

impl<S: Storage, F: ImageSource, C: ConfigProvider> BreedImagePipeline<S, F, C> {
    pub fn new(storage: S, source: F, config: C) -> Self {
        Self {
            storage,
            source,
            config,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

#[async_trait::async_trait]
impl<S: Storage, F: ImageSource, C: ConfigProvider> Pipeline for BreedImagePipeline<S, F, C> {
    async fn extract(&self) -> Result<BreedName> {
        let path = self.config.input_path();
        tracing::debug!(path, "Reading breed name");

        let raw = self.storage.read_file(path).await?;
        let text = String::from_utf8(raw).map_err(|e| PipelineError::StorageError {
            path: path.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;

        BreedName::parse(&text)
    }

    async fn transform(&self, breed: BreedName) -> Result<ImageBatch> {
        let count = self.config.batch_size();
        if count == 1 {
            let image = self.source.random_image(&breed).await?;
            return Ok(ImageBatch::single(image));
        }

        fetch_batch(&self.source, &breed, count, self.config.concurrency()).await
    }

    async fn load(&self, batch: ImageBatch) -> Result<String> {
        let path = self.config.output_path();
        let content = batch.render();

        tracing::debug!(path, bytes = content.len(), "Writing image URLs");
        self.storage.write_file(path, content.as_bytes()).await?;

        Ok(path.to_string())
    }
}
