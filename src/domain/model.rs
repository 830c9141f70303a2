use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A prospective business contact, keyed by `email` in the remote table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub business_name: Option<String>,
    pub email: String,
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contacted: Option<DateTime<Utc>>,
}

impl Lead {
    /// The record written after a successful send.
    pub fn contacted(
        email: impl Into<String>,
        business_name: impl Into<String>,
        location: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            business_name: Some(business_name.into()),
            email: email.into(),
            location: Some(location.into()),
            last_contacted: Some(at),
        }
    }
}

/// One data row of a CSV file, column name to cell value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvRow {
    pub fields: HashMap<String, String>,
}

impl CsvRow {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    /// Cell value, or `""` when the column is absent.
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }

    /// First non-empty value among `columns`, or `""`.
    pub fn first_non_empty(&self, columns: &[&str]) -> &str {
        columns
            .iter()
            .map(|column| self.get(column))
            .find(|value| !value.is_empty())
            .unwrap_or("")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CsvRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutreachMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// Accepted by the mail sender and recorded in the store.
    Sent,
    /// Accepted by the mail sender, but the store upsert failed.
    Unrecorded(String),
    /// The mail sender returned an error; nothing was recorded.
    Failed(String),
    /// Blank address; nothing was sent.
    Skipped(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowReport {
    pub email: String,
    pub outcome: RowOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub sent: usize,
    pub unrecorded: usize,
    pub failed: usize,
    pub skipped: usize,
    pub rows: Vec<RowReport>,
}

impl RunSummary {
    pub fn record(&mut self, report: RowReport) {
        match report.outcome {
            RowOutcome::Sent => self.sent += 1,
            RowOutcome::Unrecorded(_) => self.unrecorded += 1,
            RowOutcome::Failed(_) => self.failed += 1,
            RowOutcome::Skipped(_) => self.skipped += 1,
        }
        self.rows.push(report);
    }

    pub fn total(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportReport {
    NothingToInsert,
    Inserted(usize),
}
