use crate::core::normalize::{Recipient, EMAIL_COLUMN};
use crate::core::source::CsvLeadSource;
use crate::core::template::MessageTemplate;
use crate::domain::model::{CsvRow, Lead, RowOutcome, RowReport, RunSummary};
use crate::domain::ports::{LeadStore, Mailer, Pacer, Storage};
use crate::utils::error::Result;
use chrono::Utc;
use std::time::Duration;

/// Mails every lead of a CSV file, one row at a time.
///
/// For each row the pipeline renders the template, hands it to the `Mailer`,
/// and on acceptance upserts the lead with a fresh `last_contacted`. A row
/// whose send fails is reported and left out of the store. Rows with a blank
/// address are skipped without a send; any other address goes to the
/// `Mailer`, which decides whether it is deliverable. Every row is followed by
/// `delay` on the `Pacer`, so the relay sees at most one message per delay
/// window.
///
/// Nothing is retried. Stopping the process mid-run leaves no checkpoint;
/// running again resends every row and refreshes `last_contacted`.
pub struct OutreachPipeline<S: Storage, L: LeadStore, M: Mailer, P: Pacer> {
    source: CsvLeadSource<S>,
    store: L,
    mailer: M,
    pacer: P,
    template: MessageTemplate,
    delay: Duration,
}

impl<S, L, M, P> OutreachPipeline<S, L, M, P>
where
    S: Storage,
    L: LeadStore,
    M: Mailer,
    P: Pacer,
{
    pub fn new(
        storage: S,
        store: L,
        mailer: M,
        pacer: P,
        template: MessageTemplate,
        delay: Duration,
    ) -> Self {
        Self {
            source: CsvLeadSource::new(storage),
            store,
            mailer,
            pacer,
            template,
            delay,
        }
    }

    pub async fn run(&self, csv_path: &str) -> Result<RunSummary> {
        let rows = self.source.read_rows(csv_path).await?;
        let mut summary = RunSummary::default();

        if rows.is_empty() {
            tracing::info!("No leads in {}", csv_path);
            return Ok(summary);
        }

        tracing::info!("Sending to {} leads from {}", rows.len(), csv_path);

        for row in &rows {
            let report = self.process_row(row).await;
            self.pacer.pause(self.delay).await;
            summary.record(report);
        }

        tracing::info!(
            "Outreach finished: {} sent, {} unrecorded, {} failed, {} skipped",
            summary.sent,
            summary.unrecorded,
            summary.failed,
            summary.skipped
        );

        Ok(summary)
    }

    pub async fn process_row(&self, row: &CsvRow) -> RowReport {
        let recipient = match Recipient::from_row(row) {
            Ok(recipient) => recipient,
            Err(e) => {
                let email = row.get(EMAIL_COLUMN).to_string();
                tracing::warn!("Skipping row with email '{}': {}", email, e);
                return RowReport {
                    email,
                    outcome: RowOutcome::Skipped(e.to_string()),
                };
            }
        };

        let message = self.template.render(&recipient);

        tracing::info!("Sending to {}", recipient.email);
        if let Err(e) = self.mailer.send(&message).await {
            tracing::error!("Error sending to {}: {}", recipient.email, e);
            return RowReport {
                email: recipient.email,
                outcome: RowOutcome::Failed(e.to_string()),
            };
        }

        // 已寄出即記錄，不等待投遞確認
        let lead = Lead::contacted(
            recipient.email.clone(),
            recipient.name,
            recipient.location,
            Utc::now(),
        );
        let outcome = match self.store.upsert(std::slice::from_ref(&lead)).await {
            Ok(()) => RowOutcome::Sent,
            Err(e) => {
                tracing::error!("Sent to {} but could not record it: {}", lead.email, e);
                RowOutcome::Unrecorded(e.to_string())
            }
        };

        RowReport {
            email: lead.email,
            outcome,
        }
    }
}
