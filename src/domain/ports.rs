use crate::domain::model::{BreedName, ImageBatch, ImageUrl};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    /// Replaces any existing content at `path`.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn random_image(&self, breed: &BreedName) -> Result<ImageUrl>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base(&self) -> &str;
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn batch_size(&self) -> usize;
    fn concurrency(&self) -> usize;
    fn request_timeout(&self) -> Option<Duration>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<BreedName>;
    async fn transform(&self, breed: BreedName) -> Result<ImageBatch>;
    async fn load(&self, batch: ImageBatch) -> Result<String>;
}
