use crate::domain::model::{Lead, OutreachMessage};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

/// The remote `leads` table.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Bulk insert; returns the number of records sent.
    async fn insert(&self, leads: &[Lead]) -> Result<usize>;

    /// Insert-or-update keyed on `email`.
    async fn upsert(&self, leads: &[Lead]) -> Result<()>;
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &OutreachMessage) -> Result<()>;
}

/// Suspends the run between rows.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, delay: Duration);
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    type Row: Send;
    type Record: Send;
    type Report: Send;

    async fn extract(&self) -> Result<Vec<Self::Row>>;
    async fn transform(&self, rows: Vec<Self::Row>) -> Result<Vec<Self::Record>>;
    async fn load(&self, records: Vec<Self::Record>) -> Result<Self::Report>;
}
