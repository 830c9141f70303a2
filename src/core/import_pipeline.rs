use crate::core::normalize::normalize_lead;
use crate::core::source::CsvLeadSource;
use crate::domain::model::{CsvRow, ImportReport, Lead};
use crate::domain::ports::{LeadStore, Pipeline, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;

/// CSV rows → normalized leads → one bulk insert.
pub struct ImportPipeline<S: Storage, L: LeadStore> {
    source: CsvLeadSource<S>,
    store: L,
    csv_path: String,
}

impl<S: Storage, L: LeadStore> ImportPipeline<S, L> {
    pub fn new(storage: S, store: L, csv_path: impl Into<String>) -> Self {
        Self {
            source: CsvLeadSource::new(storage),
            store,
            csv_path: csv_path.into(),
        }
    }
}

#[async_trait]
impl<S: Storage, L: LeadStore> Pipeline for ImportPipeline<S, L> {
    type Row = CsvRow;
    type Record = Lead;
    type Report = ImportReport;

    async fn extract(&self) -> Result<Vec<CsvRow>> {
        self.source.read_rows(&self.csv_path).await
    }

    async fn transform(&self, rows: Vec<CsvRow>) -> Result<Vec<Lead>> {
        Ok(rows.iter().map(normalize_lead).collect())
    }

    async fn load(&self, leads: Vec<Lead>) -> Result<ImportReport> {
        if leads.is_empty() {
            tracing::info!("No rows to insert");
            return Ok(ImportReport::NothingToInsert);
        }

        // 單次批量寫入，失敗直接回傳
        let inserted = self.store.insert(&leads).await?;
        Ok(ImportReport::Inserted(inserted))
    }
}
