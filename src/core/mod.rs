pub mod engine;
pub mod import_pipeline;
pub mod normalize;
pub mod outreach_pipeline;
pub mod source;
pub mod template;

pub use crate::domain::model::{CsvRow, ImportReport, Lead, RowOutcome, RowReport, RunSummary};
pub use crate::domain::ports::{LeadStore, Mailer, Pacer, Pipeline, Storage};
pub use crate::utils::error::Result;
