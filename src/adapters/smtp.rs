use crate::config::MailConfig;
use crate::domain::model::OutreachMessage;
use crate::domain::ports::Mailer;
use crate::utils::error::{LeadError, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

/// Sends through an authenticated SMTP relay over implicit TLS.
///
/// The transport is built once and pools its connection for every message of
/// the run.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self> {
        let address: Address = config.sender.parse()?;
        let from = Mailbox::new(Some(config.sender_name.clone()), address);

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.sender.clone(),
                config.app_password.clone(),
            ))
            .build();

        Ok(Self { transport, from })
    }

    /// Opens a session and authenticates, so bad credentials fail the run
    /// before the first row.
    pub async fn connect(config: &MailConfig) -> Result<Self> {
        let mailer = Self::new(config)?;
        tracing::debug!(
            "Connecting to SMTP relay {}:{}",
            config.smtp_host,
            config.smtp_port
        );
        if !mailer.transport.test_connection().await? {
            return Err(LeadError::MailError {
                message: format!("SMTP relay {} refused the session", config.smtp_host),
            });
        }
        Ok(mailer)
    }

    pub fn build_message(&self, message: &OutreachMessage) -> Result<Message> {
        let to: Mailbox = message.to.parse()?;
        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(message.html.clone())?;
        Ok(email)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &OutreachMessage) -> Result<()> {
        let email = self.build_message(message)?;
        let response = self.transport.send(email).await?;
        tracing::debug!("SMTP relay accepted message: {:?}", response.code());
        Ok(())
    }
}
