use crate::core::{BreedName, Pipeline};
use crate::utils::error::Result;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub breed: BreedName,
    pub images: usize,
    pub output_path: String,
    pub elapsed: Duration,
}

/// Runs read, fetch and write strictly in order. The first failing stage
/// ends the run; nothing after it is attempted.
pub struct PipelineEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> PipelineEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let started = Instant::now();
        tracing::info!("Starting breed image pipeline");

        let breed = self.pipeline.extract().await?;
        tracing::info!(breed = %breed, "Read breed name");

        let batch = self.pipeline.transform(breed.clone()).await?;
        tracing::info!(breed = %breed, images = batch.len(), "Fetched image URLs");

        let images = batch.len();
        let output_path = self.pipeline.load(batch).await?;
        tracing::info!(path = %output_path, "Wrote image URLs");

        let elapsed = started.elapsed();
        tracing::info!(elapsed = ?elapsed, "Pipeline finished");

        Ok(RunSummary {
            breed,
            images,
            output_path,
            elapsed,
        })
    }
}
