// Application layer: wires the adapters to the engine for one command line run.

use crate::config::cli::CliConfig;
use crate::utils::validation::Validate;
use crate::{ElectionPipeline, EtlEngine, ExportOutcome, HttpFetcher, LocalStorage, RunSummary};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// Resolve, validate and run the scrape described by `cli`, returning the
/// process exit status.
pub async fn run(cli: &CliConfig) -> i32 {
    tracing::info!("Downloading data from: {}", cli.index_url);
    tracing::info!("Output file: {}", cli.output_path);

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load settings: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            return EXIT_FAILURE;
        }
    };
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        return EXIT_FAILURE;
    }

    let pipeline = ElectionPipeline::new(HttpFetcher::new(), LocalStorage::default(), config);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(summary) => {
            report(&summary);
            EXIT_SUCCESS
        }
        Err(e) => {
            tracing::error!("❌ Scrape failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            EXIT_FAILURE
        }
    }
}

fn report(summary: &RunSummary) {
    match &summary.export {
        ExportOutcome::Written {
            path,
            rows,
            party_columns,
        } => {
            tracing::info!(
                "✅ Saved {} municipalities and {} parties to {}",
                rows,
                party_columns,
                path
            );
        }
        ExportOutcome::NoData => {
            tracing::info!("Nothing was written, no municipality results were collected");
        }
    }

    if summary.skipped() > 0 {
        tracing::warn!("{} municipalities could not be downloaded", summary.skipped());
    }
}
