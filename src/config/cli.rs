use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;

pub const DEFAULT_CSV_PATH: &str = "leads.csv";

/// Options shared by `import_leads` and `send_emails`. Both run with no
/// arguments against `leads.csv` in the working directory.
#[derive(Debug, Clone, Parser)]
pub struct CliArgs {
    /// CSV file with a header row
    #[arg(long, default_value = DEFAULT_CSV_PATH)]
    pub csv_path: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

impl Validate for CliArgs {
    fn validate(&self) -> Result<()> {
        validate_path("csv_path", &self.csv_path)
    }
}
