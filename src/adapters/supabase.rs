use crate::config::StoreConfig;
use crate::domain::model::Lead;
use crate::domain::ports::LeadStore;
use crate::utils::error::{LeadError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};

pub const LEADS_TABLE: &str = "leads";
pub const CONFLICT_KEY: &str = "email";

/// `LeadStore` backed by the Supabase REST endpoint (PostgREST) of one table.
///
/// Every request carries the service key both as `apikey` and as a bearer
/// token. Inserts are plain `POST`s; upserts add `on_conflict=email` and ask
/// PostgREST to merge duplicates, so repeated runs refresh rows instead of
/// adding new ones.
#[derive(Debug, Clone)]
pub struct SupabaseLeadStore {
    client: Client,
    base_url: String,
    service_key: String,
    table: String,
}

impl SupabaseLeadStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self::with_table(config, LEADS_TABLE)
    }

    pub fn with_table(config: &StoreConfig, table: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            service_key: config.service_key.clone(),
            table: table.to_string(),
        }
    }

    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn post(&self, prefer: &str) -> RequestBuilder {
        self.client
            .post(self.table_url())
            .header("apikey", &self.service_key)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", self.service_key),
            )
            .header("Prefer", prefer)
    }

    async fn check(response: Response) -> Result<()> {
        let status = response.status();
        tracing::debug!("Lead store response status: {}", status);

        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(LeadError::StoreError {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl LeadStore for SupabaseLeadStore {
    async fn insert(&self, leads: &[Lead]) -> Result<usize> {
        tracing::debug!("Inserting {} leads into {}", leads.len(), self.table);
        let response = self.post("return=minimal").json(leads).send().await?;
        Self::check(response).await?;
        Ok(leads.len())
    }

    async fn upsert(&self, leads: &[Lead]) -> Result<()> {
        tracing::debug!("Upserting {} leads into {}", leads.len(), self.table);
        let response = self
            .post("resolution=merge-duplicates,return=minimal")
            .query(&[("on_conflict", CONFLICT_KEY)])
            .json(leads)
            .send()
            .await?;
        Self::check(response).await
    }
}
