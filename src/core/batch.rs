use crate::core::{BreedName, ImageBatch, ImageSource};
use crate::utils::error::{PipelineError, Result};
use futures::stream::{self, StreamExt, TryStreamExt};

/// Fetches `count` images for one breed with at most `concurrency` requests in
/// flight. Results keep request order. The first failure cancels the requests
/// still running and fails the whole batch.
pub async fn fetch_batch<F>(
    source: &F,
    breed: &BreedName,
    count: usize,
    concurrency: usize,
) -> Result<ImageBatch>
where
    F: ImageSource + ?Sized,
{
    if count == 0 {
        return Err(PipelineError::ValidationError {
            message: "batch size must be at least 1".to_string(),
        });
    }

    let limit = concurrency.clamp(1, count);
    tracing::debug!(count, concurrency = limit, breed = %breed, "Fetching image batch");

    let images = stream::iter(0..count)
        .map(move |index| async move {
            source
                .random_image(breed)
                .await
                .map_err(|e| PipelineError::BatchError {
                    failed: index + 1,
                    total: count,
                    source: Box::new(e),
                })
        })
        .buffered(limit)
        .try_collect::<Vec<_>>()
        .await?;

    Ok(ImageBatch { images })
}
