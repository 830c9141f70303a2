use async_trait::async_trait;
use httpmock::prelude::*;
use lead_outreach::core::{Lead, LeadStore, Mailer, Pacer, RowOutcome};
use lead_outreach::domain::model::OutreachMessage;
use lead_outreach::{
    ImportEngine, ImportPipeline, LeadError, LocalStorage, MessageTemplate, OutreachConfig,
    OutreachPipeline, Result, SupabaseLeadStore, TokioPacer,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
struct FakeMailer {
    sent: Arc<Mutex<Vec<OutreachMessage>>>,
    reject: Option<String>,
}

#[async_trait]
impl Mailer for FakeMailer {
    async fn send(&self, message: &OutreachMessage) -> Result<()> {
        if self.reject.as_deref() == Some(message.to.as_str()) {
            return Err(LeadError::MailError {
                message: "550 5.1.1 user unknown".to_string(),
            });
        }
        self.sent.lock().await.push(message.clone());
        Ok(())
    }
}

#[derive(Clone, Default)]
struct CountingPacer {
    pauses: Arc<Mutex<Vec<Duration>>>,
}

#[async_trait]
impl Pacer for CountingPacer {
    async fn pause(&self, delay: Duration) {
        self.pauses.lock().await.push(delay);
    }
}

/// One row per exact email string, like the unique `email` column.
#[derive(Clone, Default)]
struct KeyedTable {
    rows: Arc<Mutex<HashMap<String, Lead>>>,
}

#[async_trait]
impl LeadStore for KeyedTable {
    async fn insert(&self, leads: &[Lead]) -> Result<usize> {
        let mut rows = self.rows.lock().await;
        for lead in leads {
            if rows.contains_key(&lead.email) {
                return Err(LeadError::StoreError {
                    status: 409,
                    body: format!("duplicate key {}", lead.email),
                });
            }
            rows.insert(lead.email.clone(), lead.clone());
        }
        Ok(leads.len())
    }

    async fn upsert(&self, leads: &[Lead]) -> Result<()> {
        let mut rows = self.rows.lock().await;
        for lead in leads {
            rows.insert(lead.email.clone(), lead.clone());
        }
        Ok(())
    }
}

fn config_for(server: &MockServer) -> OutreachConfig {
    let vars: HashMap<&str, String> = [
        ("NEXT_PUBLIC_SUPABASE_URL", server.base_url()),
        ("SUPABASE_SERVICE_KEY", "service-key".to_string()),
        ("SEND_EMAIL_FROM", "peter@example.com".to_string()),
        ("APP_PASSWORD", "app-password".to_string()),
        ("DELAY_SECONDS", "0".to_string()),
        ("PUBLIC_APP_URL", "https://leads.example.com".to_string()),
    ]
    .into_iter()
    .collect();
    OutreachConfig::from_lookup(|key: &str| vars.get(key).cloned()).unwrap()
}

fn acme_dir() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("leads.csv"),
        "name,email,location\nAcme Co,acme@example.com,Springfield\n",
    )
    .unwrap();
    temp_dir
}

#[tokio::test]
async fn test_outreach_sends_and_records_contact() -> anyhow::Result<()> {
    let temp_dir = acme_dir();
    let server = MockServer::start();
    let upsert_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/rest/v1/leads")
            .query_param("on_conflict", "email")
            .body_contains(r#""email":"acme@example.com""#)
            .body_contains(r#""business_name":"Acme Co""#)
            .body_contains(r#""last_contacted":"#);
        then.status(201);
    });

    let config = config_for(&server);
    let mailer = FakeMailer::default();
    let pacer = CountingPacer::default();
    let pipeline = OutreachPipeline::new(
        LocalStorage::new(temp_dir.path()),
        SupabaseLeadStore::new(&config.store),
        mailer.clone(),
        pacer.clone(),
        MessageTemplate::new(&config.public_app_url, &config.mail.sender_name),
        config.delay,
    );

    let summary = pipeline.run("leads.csv").await?;

    upsert_mock.assert_hits(1);
    assert_eq!(summary.sent, 1);

    let sent = mailer.sent.lock().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "acme@example.com");
    assert!(sent[0]
        .html
        .contains("https://leads.example.com/api/track?email=acme%40example.com"));

    assert_eq!(*pacer.pauses.lock().await, vec![Duration::ZERO]);
    Ok(())
}

#[tokio::test]
async fn test_outreach_failed_send_skips_upsert() -> anyhow::Result<()> {
    let temp_dir = acme_dir();
    let server = MockServer::start();
    let upsert_mock = server.mock(|when, then| {
        when.method(POST).path("/rest/v1/leads");
        then.status(201);
    });

    let config = config_for(&server);
    let mailer = FakeMailer {
        reject: Some("acme@example.com".to_string()),
        ..Default::default()
    };
    let pipeline = OutreachPipeline::new(
        LocalStorage::new(temp_dir.path()),
        SupabaseLeadStore::new(&config.store),
        mailer,
        TokioPacer,
        MessageTemplate::new(&config.public_app_url, &config.mail.sender_name),
        config.delay,
    );

    // a failed row still ends the run successfully
    let summary = pipeline.run("leads.csv").await?;

    upsert_mock.assert_hits(0);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.rows[0].email, "acme@example.com");
    assert!(matches!(&summary.rows[0].outcome, RowOutcome::Failed(reason) if reason.contains("550")));
    Ok(())
}

#[tokio::test]
async fn test_outreach_store_outage_marks_row_unrecorded() -> anyhow::Result<()> {
    let temp_dir = acme_dir();
    let server = MockServer::start();
    let upsert_mock = server.mock(|when, then| {
        when.method(POST).path("/rest/v1/leads");
        then.status(503).body("upstream unavailable");
    });

    let config = config_for(&server);
    let mailer = FakeMailer::default();
    let pipeline = OutreachPipeline::new(
        LocalStorage::new(temp_dir.path()),
        SupabaseLeadStore::new(&config.store),
        mailer.clone(),
        TokioPacer,
        MessageTemplate::new(&config.public_app_url, &config.mail.sender_name),
        config.delay,
    );

    let summary = pipeline.run("leads.csv").await?;

    upsert_mock.assert_hits(1);
    assert_eq!(mailer.sent.lock().await.len(), 1);
    assert_eq!(summary.unrecorded, 1);
    Ok(())
}

#[tokio::test]
async fn test_import_then_outreach_share_one_row_per_email() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join("leads.csv"),
        "name,email,location\nAcme Co, Acme@Example.com ,Springfield\n",
    )?;
    let table = KeyedTable::default();

    ImportEngine::new(ImportPipeline::new(
        LocalStorage::new(temp_dir.path()),
        table.clone(),
        "leads.csv",
    ))
    .run()
    .await?;

    let mailer = FakeMailer::default();
    let summary = OutreachPipeline::new(
        LocalStorage::new(temp_dir.path()),
        table.clone(),
        mailer.clone(),
        CountingPacer::default(),
        MessageTemplate::new("https://leads.example.com", "Peter"),
        Duration::ZERO,
    )
    .run("leads.csv")
    .await?;

    assert_eq!(summary.sent, 1);
    assert_eq!(mailer.sent.lock().await[0].to, "Acme@Example.com");

    let rows = table.rows.lock().await;
    assert_eq!(rows.len(), 1);
    let lead = &rows["Acme@Example.com"];
    assert_eq!(lead.business_name.as_deref(), Some("Acme Co"));
    assert!(lead.last_contacted.is_some());
    Ok(())
}
