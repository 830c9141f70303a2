use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeadError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing required configuration: {}", .fields.join(", "))]
    MissingConfigError { fields: Vec<String> },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Lead store rejected the request (HTTP {status}): {body}")]
    StoreError { status: u16, body: String },

    #[error("Mail error: {message}")]
    MailError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

impl LeadError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            LeadError::MissingConfigError { .. }
                | LeadError::InvalidConfigValueError { .. }
                | LeadError::ConfigError { .. }
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LeadError::MissingConfigError { .. } => {
                "Set the listed variables in .env or the process environment"
            }
            LeadError::InvalidConfigValueError { .. } | LeadError::ConfigError { .. } => {
                "Fix the configuration value and run again"
            }
            LeadError::IoError(_) | LeadError::CsvError(_) => {
                "Check that the CSV file exists and has a header row"
            }
            LeadError::ApiError(_) | LeadError::StoreError { .. } => {
                "Check NEXT_PUBLIC_SUPABASE_URL, SUPABASE_SERVICE_KEY and the leads table schema"
            }
            LeadError::MailError { .. } => "Check SEND_EMAIL_FROM, APP_PASSWORD and the SMTP relay",
            LeadError::SerializationError(_) | LeadError::ValidationError { .. } => {
                "Inspect the input data"
            }
        }
    }

    /// Every fatal error ends the process with status 1.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

impl From<lettre::transport::smtp::Error> for LeadError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        LeadError::MailError {
            message: err.to_string(),
        }
    }
}

impl From<lettre::error::Error> for LeadError {
    fn from(err: lettre::error::Error) -> Self {
        LeadError::MailError {
            message: err.to_string(),
        }
    }
}

impl From<lettre::address::AddressError> for LeadError {
    fn from(err: lettre::address::AddressError) -> Self {
        LeadError::MailError {
            message: format!("invalid address: {}", err),
        }
    }
}

pub type Result<T> = std::result::Result<T, LeadError>;
