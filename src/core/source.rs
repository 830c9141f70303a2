use crate::domain::model::CsvRow;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use csv::{ReaderBuilder, Trim};

/// Reads CSV files with a header row through a `Storage` backend. Every call
/// re-reads the file, so a source can be iterated again from the start.
#[derive(Debug, Clone)]
pub struct CsvLeadSource<S: Storage> {
    storage: S,
}

impl<S: Storage> CsvLeadSource<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub async fn read_rows(&self, path: &str) -> Result<Vec<CsvRow>> {
        let data = self.storage.read_file(path).await?;
        let rows = parse_rows(&data)?;
        tracing::debug!("Read {} rows from {}", rows.len(), path);
        Ok(rows)
    }
}

/// Parses CSV bytes into rows keyed by header name. Short rows leave the
/// trailing columns absent; cells and headers are trimmed.
pub fn parse_rows(data: &[u8]) -> Result<Vec<CsvRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record?;
        let row: CsvRow = headers.iter().zip(record.iter()).collect();
        rows.push(row);
    }

    Ok(rows)
}
