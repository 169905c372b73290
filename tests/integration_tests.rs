use anyhow::Result;
use breed_fetch::core::ImageSource;
use breed_fetch::{
    BreedImagePipeline, BreedName, DogApiClient, ImageUrl, LocalStorage, PipelineEngine,
    PipelineError, Settings,
};
use httpmock::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;

/// Numbers each request; later requests answer sooner.
struct NumberedSource {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl ImageSource for NumberedSource {
    async fn random_image(&self, breed: &BreedName) -> breed_fetch::Result<ImageUrl> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(Duration::from_millis(60 / call as u64)).await;
        Ok(ImageUrl::new(format!("https://images.dog.ceo/{}/{}.jpg", breed, call)))
    }
}

fn settings_for(server: &MockServer) -> Settings {
    Settings {
        api_base: server.url("/api"),
        ..Settings::default()
    }
}

fn engine_for(
    dir: &TempDir,
    settings: Settings,
) -> PipelineEngine<BreedImagePipeline<LocalStorage, DogApiClient, Settings>> {
    let client = DogApiClient::from_config(&settings);
    let storage = LocalStorage::new(dir.path());
    PipelineEngine::new(BreedImagePipeline::new(storage, client, settings))
}

#[tokio::test]
async fn test_end_to_end_writes_exact_message() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("dog.txt"), "hound")?;

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/breed/hound/images/random");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "message": "https://images.dog.ceo/x.jpg",
                "status": "success"
            }));
    });

    let summary = engine_for(&dir, settings_for(&server)).run().await?;

    api_mock.assert();
    assert_eq!(summary.breed.as_str(), "hound");
    assert_eq!(summary.images, 1);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("dog-img.txt"))?,
        "https://images.dog.ceo/x.jpg"
    );
    Ok(())
}

#[tokio::test]
async fn test_missing_input_never_calls_api_or_writes() -> Result<()> {
    let dir = TempDir::new()?;

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET);
        then.status(200)
            .json_body(serde_json::json!({"message": "unused", "status": "success"}));
    });

    let err = engine_for(&dir, settings_for(&server))
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::StorageError { .. }));
    api_mock.assert_hits(0);
    assert!(!dir.path().join("dog-img.txt").exists());
    Ok(())
}

#[tokio::test]
async fn test_api_error_leaves_output_untouched() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("dog.txt"), "unicorn\n")?;
    std::fs::write(dir.path().join("dog-img.txt"), "previous")?;

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/breed/unicorn/images/random");
        then.status(404).json_body(serde_json::json!({
            "status": "error",
            "message": "Breed not found (main breed does not exist)",
            "code": 404
        }));
    });

    let err = engine_for(&dir, settings_for(&server))
        .run()
        .await
        .unwrap_err();

    api_mock.assert();
    assert!(matches!(
        err,
        PipelineError::HttpStatusError { status: 404, .. }
    ));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("dog-img.txt"))?,
        "previous"
    );
    Ok(())
}

#[tokio::test]
async fn test_missing_message_field_is_not_written() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("dog.txt"), "hound")?;

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/breed/hound/images/random");
        then.status(200).json_body(serde_json::json!({"status": "success"}));
    });

    let err = engine_for(&dir, settings_for(&server))
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::ResponseFormatError { .. }));
    assert!(!dir.path().join("dog-img.txt").exists());
    Ok(())
}

#[tokio::test]
async fn test_second_run_overwrites_instead_of_appending() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("dog.txt"), "hound")?;

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/breed/hound/images/random");
        then.status(200)
            .json_body(serde_json::json!({"message": "https://images.dog.ceo/x.jpg", "status": "success"}));
    });

    let engine = engine_for(&dir, settings_for(&server));
    engine.run().await?;
    let first = std::fs::read_to_string(dir.path().join("dog-img.txt"))?;
    engine.run().await?;
    let second = std::fs::read_to_string(dir.path().join("dog-img.txt"))?;

    api_mock.assert_hits(2);
    assert_eq!(first, "https://images.dog.ceo/x.jpg");
    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn test_batch_writes_one_url_per_line() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("dog.txt"), "pug")?;

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/breed/pug/images/random");
        then.status(200)
            .json_body(serde_json::json!({"message": "https://images.dog.ceo/pug.jpg", "status": "success"}));
    });

    let settings = Settings {
        batch_size: 3,
        concurrency: 3,
        ..settings_for(&server)
    };
    let summary = engine_for(&dir, settings).run().await?;

    api_mock.assert_hits(3);
    assert_eq!(summary.images, 3);
    let content = std::fs::read_to_string(dir.path().join("dog-img.txt"))?;
    assert_eq!(content.lines().count(), 3);
    assert!(content
        .lines()
        .all(|line| line == "https://images.dog.ceo/pug.jpg"));
    Ok(())
}

#[tokio::test]
async fn test_batch_failure_writes_nothing() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("dog.txt"), "pug")?;

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/breed/pug/images/random");
        then.status(500);
    });

    let settings = Settings {
        batch_size: 3,
        ..settings_for(&server)
    };
    let err = engine_for(&dir, settings).run().await.unwrap_err();

    assert!(matches!(err, PipelineError::BatchError { total: 3, .. }));
    assert!(!dir.path().join("dog-img.txt").exists());
    Ok(())
}

#[tokio::test]
async fn test_batch_output_lines_follow_request_order() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("dog.txt"), "pug\n")?;

    let settings = Settings {
        batch_size: 4,
        concurrency: 4,
        ..Settings::default()
    };
    let source = NumberedSource {
        calls: AtomicUsize::new(0),
    };
    let engine = PipelineEngine::new(BreedImagePipeline::new(
        LocalStorage::new(dir.path()),
        source,
        settings,
    ));

    engine.run().await?;

    let content = std::fs::read_to_string(dir.path().join("dog-img.txt"))?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            "https://images.dog.ceo/pug/1.jpg",
            "https://images.dog.ceo/pug/2.jpg",
            "https://images.dog.ceo/pug/3.jpg",
            "https://images.dog.ceo/pug/4.jpg",
        ]
    );
    Ok(())
}
