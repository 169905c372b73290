use breed_fetch::utils::{logger, validation::Validate};
use breed_fetch::{
    BreedImagePipeline, CliConfig, DogApiClient, LocalStorage, LogFormat, PipelineEngine,
    PipelineError,
};
use clap::Parser;

fn report(e: &PipelineError) {
    tracing::error!(category = ?e.category(), "❌ {}", e);
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }
    tracing::debug!("CLI config: {:?}", cli);

    let settings = match cli.settings().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            report(&e);
            std::process::exit(1);
        }
    };

    // Composition root: every dependency of the pipeline is built here.
    let client = DogApiClient::from_config(&settings);
    let storage = LocalStorage::default();
    let pipeline = BreedImagePipeline::new(storage, client, settings);
    let engine = PipelineEngine::new(pipeline);

    // A panic inside a stage surfaces as a JoinError; report it like any other failure.
    let outcome = tokio::spawn(async move { engine.run().await })
        .await
        .unwrap_or_else(|e| {
            Err(PipelineError::UnexpectedError {
                message: format!("pipeline task failed: {}", e),
            })
        });

    match outcome {
        Ok(summary) => {
            tracing::info!(
                "✅ Saved {} image URL(s) for '{}' to {}",
                summary.images,
                summary.breed,
                summary.output_path
            );
            println!("✅ Random dog image saved to {}", summary.output_path);
            Ok(())
        }
        Err(e) => {
            report(&e);
            std::process::exit(1);
        }
    }
}
