#[cfg(feature = "cli")]
pub mod cli;

use crate::utils::error::{LeadError, Result};
use crate::utils::validation::{
    validate_email, validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use std::time::Duration;

pub const SUPABASE_URL_VAR: &str = "NEXT_PUBLIC_SUPABASE_URL";
pub const SUPABASE_KEY_VAR: &str = "SUPABASE_SERVICE_KEY";
pub const SENDER_VAR: &str = "SEND_EMAIL_FROM";
pub const APP_PASSWORD_VAR: &str = "APP_PASSWORD";
pub const DELAY_SECONDS_VAR: &str = "DELAY_SECONDS";
pub const PUBLIC_APP_URL_VAR: &str = "PUBLIC_APP_URL";
pub const SMTP_HOST_VAR: &str = "SMTP_HOST";
pub const SMTP_PORT_VAR: &str = "SMTP_PORT";
pub const SENDER_NAME_VAR: &str = "SENDER_NAME";

pub const DEFAULT_DELAY_SECONDS: u64 = 60;
pub const DEFAULT_PUBLIC_APP_URL: &str = "http://localhost:3000";
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 465;
pub const DEFAULT_SENDER_NAME: &str = "Peter";

/// Reads configuration values by name. Empty values count as unset.
struct Lookup<F> {
    lookup: F,
    missing: Vec<String>,
}

impl<F: Fn(&str) -> Option<String>> Lookup<F> {
    fn new(lookup: F) -> Self {
        Self {
            lookup,
            missing: Vec::new(),
        }
    }

    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn required(&mut self, key: &str) -> String {
        match self.optional(key) {
            Some(value) => value,
            None => {
                self.missing.push(key.to_string());
                String::new()
            }
        }
    }

    fn parsed<T: std::str::FromStr>(&self, key: &str, default: T) -> Result<T>
    where
        T::Err: std::fmt::Display,
    {
        match self.optional(key) {
            None => Ok(default),
            Some(raw) => raw
                .parse::<T>()
                .map_err(|e| LeadError::InvalidConfigValueError {
                    field: key.to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                }),
        }
    }

    fn finish(self) -> Result<()> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(LeadError::MissingConfigError {
                fields: self.missing,
            })
        }
    }
}

/// Connection settings for the hosted `leads` table.
#[derive(Clone)]
pub struct StoreConfig {
    pub supabase_url: String,
    pub service_key: String,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("supabase_url", &self.supabase_url)
            .field("service_key", &"<redacted>")
            .finish()
    }
}

impl StoreConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut vars = Lookup::new(lookup);
        let supabase_url = vars.required(SUPABASE_URL_VAR);
        let service_key = vars.required(SUPABASE_KEY_VAR);
        vars.finish()?;

        let config = Self {
            supabase_url,
            service_key,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Validate for StoreConfig {
    fn validate(&self) -> Result<()> {
        validate_url(SUPABASE_URL_VAR, &self.supabase_url)?;
        validate_non_empty_string(SUPABASE_KEY_VAR, &self.service_key)?;
        Ok(())
    }
}

/// SMTP relay credentials and sender identity.
#[derive(Clone)]
pub struct MailConfig {
    pub sender: String,
    pub app_password: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub sender_name: String,
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("sender", &self.sender)
            .field("app_password", &"<redacted>")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("sender_name", &self.sender_name)
            .finish()
    }
}

impl Validate for MailConfig {
    fn validate(&self) -> Result<()> {
        validate_email(&self.sender).map_err(|e| LeadError::InvalidConfigValueError {
            field: SENDER_VAR.to_string(),
            value: self.sender.clone(),
            reason: e.to_string(),
        })?;
        validate_non_empty_string(SMTP_HOST_VAR, &self.smtp_host)?;
        validate_positive_number(SMTP_PORT_VAR, self.smtp_port as usize, 1)?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct OutreachConfig {
    pub store: StoreConfig,
    pub mail: MailConfig,
    pub delay: Duration,
    pub public_app_url: String,
}

impl OutreachConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut vars = Lookup::new(lookup);
        let sender = vars.required(SENDER_VAR);
        let app_password = vars.required(APP_PASSWORD_VAR);
        let supabase_url = vars.required(SUPABASE_URL_VAR);
        let service_key = vars.required(SUPABASE_KEY_VAR);

        let delay_seconds = vars.parsed(DELAY_SECONDS_VAR, DEFAULT_DELAY_SECONDS);
        let smtp_port = vars.parsed(SMTP_PORT_VAR, DEFAULT_SMTP_PORT);
        let public_app_url = vars
            .optional(PUBLIC_APP_URL_VAR)
            .unwrap_or_else(|| DEFAULT_PUBLIC_APP_URL.to_string());
        let smtp_host = vars
            .optional(SMTP_HOST_VAR)
            .unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string());
        let sender_name = vars
            .optional(SENDER_NAME_VAR)
            .unwrap_or_else(|| DEFAULT_SENDER_NAME.to_string());
        // missing values are reported before malformed ones
        vars.finish()?;
        let delay_seconds = delay_seconds?;
        let smtp_port = smtp_port?;

        let config = Self {
            store: StoreConfig {
                supabase_url,
                service_key,
            },
            mail: MailConfig {
                sender,
                app_password,
                smtp_host,
                smtp_port,
                sender_name,
            },
            delay: Duration::from_secs(delay_seconds),
            public_app_url: public_app_url.trim_end_matches('/').to_string(),
        };
        config.validate()?;
        Ok(config)
    }
}

impl Validate for OutreachConfig {
    fn validate(&self) -> Result<()> {
        self.store.validate()?;
        self.mail.validate()?;
        validate_url(PUBLIC_APP_URL_VAR, &self.public_app_url)?;
        Ok(())
    }
}
