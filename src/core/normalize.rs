use crate::domain::model::{CsvRow, Lead};
use crate::utils::error::{LeadError, Result};

pub const NAME_COLUMN: &str = "name";
/// Columns tried, in order, for a lead's display name.
pub const NAME_COLUMNS: [&str; 2] = [NAME_COLUMN, "business_name"];
pub const EMAIL_COLUMN: &str = "email";
pub const LOCATION_COLUMN: &str = "location";

/// `name`, then `business_name`, then `""`.
pub fn display_name(row: &CsvRow) -> &str {
    row.first_non_empty(&NAME_COLUMNS)
}

/// Maps a row onto the canonical lead shape. Only the `name` column feeds
/// `business_name`. Absent columns become empty strings; nothing is
/// filtered out.
pub fn normalize_lead(row: &CsvRow) -> Lead {
    Lead {
        business_name: Some(row.get(NAME_COLUMN).to_string()),
        email: row.get(EMAIL_COLUMN).trim().to_string(),
        location: Some(row.get(LOCATION_COLUMN).to_string()),
        last_contacted: None,
    }
}

/// A row ready to be mailed. `email` is the cell as written, so the send and
/// the upsert use the same key the import stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub email: String,
    pub name: String,
    pub location: String,
}

impl Recipient {
    pub fn from_row(row: &CsvRow) -> Result<Self> {
        let email = row.get(EMAIL_COLUMN).trim();
        if email.is_empty() {
            return Err(LeadError::ValidationError {
                message: "Email is required".to_string(),
            });
        }
        Ok(Self {
            email: email.to_string(),
            name: display_name(row).to_string(),
            location: row.get(LOCATION_COLUMN).to_string(),
        })
    }
}
