use crate::utils::error::{LeadError, Result};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

/// Upper bound on an address length accepted for sending.
pub const MAX_EMAIL_LENGTH: usize = 254;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)+$",
        )
        .expect("email pattern is a valid regex")
    })
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(LeadError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(LeadError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(LeadError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(LeadError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(LeadError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(LeadError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LeadError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Checks that `raw` is a syntactically deliverable address and returns it
/// trimmed. Case is kept: the address doubles as the store key.
pub fn validate_email(raw: &str) -> Result<String> {
    let email = raw.trim();

    if email.is_empty() {
        return Err(LeadError::ValidationError {
            message: "Email is required".to_string(),
        });
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(LeadError::ValidationError {
            message: format!("Email too long (max {} characters)", MAX_EMAIL_LENGTH),
        });
    }

    if !email_pattern().is_match(&email.to_lowercase()) {
        return Err(LeadError::ValidationError {
            message: format!("Invalid email format: {}", email),
        });
    }

    Ok(email.to_string())
}

/// Escapes text for interpolation into an HTML body.
pub fn sanitize_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '/' => escaped.push_str("&#x2F;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("PUBLIC_APP_URL", "https://example.com").is_ok());
        assert!(validate_url("PUBLIC_APP_URL", "http://localhost:3000").is_ok());
        assert!(validate_url("PUBLIC_APP_URL", "").is_err());
        assert!(validate_url("PUBLIC_APP_URL", "invalid-url").is_err());
        assert!(validate_url("PUBLIC_APP_URL", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("SMTP_PORT", 465, 1).is_ok());
        assert!(validate_positive_number("SMTP_PORT", 0, 1).is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("csv_path", "leads.csv").is_ok());
        assert!(validate_path("csv_path", "").is_err());
        assert!(validate_path("csv_path", "lea\0ds.csv").is_err());
    }

    #[test]
    fn test_validate_email_trims_but_keeps_case() {
        assert_eq!(
            validate_email("  Acme@Example.COM ").unwrap(),
            "Acme@Example.COM"
        );
        assert_eq!(
            validate_email("first.last+tag@sub.example.co.uk").unwrap(),
            "first.last+tag@sub.example.co.uk"
        );
    }

    #[test]
    fn test_validate_email_rejects_malformed() {
        assert!(validate_email("").is_err());
        assert!(validate_email("   ").is_err());
        assert!(validate_email("no-at-sign.example.com").is_err());
        assert!(validate_email("user@localhost").is_err());
        assert!(validate_email("user@@example.com").is_err());
        assert!(validate_email("user name@example.com").is_err());

        let long = format!("{}@example.com", "a".repeat(250));
        assert!(validate_email(&long).is_err());
    }

    #[test]
    fn test_sanitize_html() {
        assert_eq!(
            sanitize_html(r#"<b>"Tom & Jerry's"</b>"#),
            "&lt;b&gt;&quot;Tom &amp; Jerry&#x27;s&quot;&lt;&#x2F;b&gt;"
        );
        assert_eq!(sanitize_html("Springfield"), "Springfield");
    }
}
