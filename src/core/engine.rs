use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

pub struct ImportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ImportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<P::Report> {
        tracing::info!("Starting lead import...");

        // Extract
        let rows = self.pipeline.extract().await?;
        tracing::info!("Read {} rows", rows.len());

        // Transform
        let records = self.pipeline.transform(rows).await?;
        tracing::info!("Normalized {} leads", records.len());

        // Load
        let report = self.pipeline.load(records).await?;
        tracing::info!("Import finished");

        Ok(report)
    }
}
