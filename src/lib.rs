pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::{LocalStorage, SmtpMailer, SupabaseLeadStore, TokioPacer};
pub use config::{MailConfig, OutreachConfig, StoreConfig};
pub use core::{
    engine::ImportEngine, import_pipeline::ImportPipeline, outreach_pipeline::OutreachPipeline,
    template::MessageTemplate,
};
pub use utils::error::{LeadError, Result};
