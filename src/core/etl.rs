use crate::core::{Pipeline, RunSummary};
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        // Discover
        let records = self.pipeline.discover().await?;
        let discovered = records.len();
        tracing::info!("Found {} municipalities", discovered);

        // Aggregate
        let processed = self.pipeline.aggregate(records).await?;
        tracing::info!(
            "Processed {} municipalities ({} skipped)",
            processed.len(),
            discovered - processed.len()
        );

        // Export
        let processed_count = processed.len();
        let export = self.pipeline.export(processed).await?;

        Ok(RunSummary {
            discovered,
            processed: processed_count,
            export,
        })
    }
}
