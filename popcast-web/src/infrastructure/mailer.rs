use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MessageBuilder};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::warn;

use crate::infrastructure::settings::SmtpSettings;

#[derive(Debug, Error)]
pub(crate) enum MailError {
    #[error("mail transport is not configured")]
    NotConfigured,

    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("mail could not be built: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("smtp delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OutgoingMail {
    /// Display name put in front of the configured sender address.
    pub(crate) from_name: String,
    pub(crate) to: Vec<String>,
    pub(crate) reply_to: Option<String>,
    pub(crate) subject: String,
    pub(crate) html: String,
}

#[async_trait]
pub(crate) trait MailTransport: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError>;
}

/// Builds the SMTP mailer, or a stub that rejects every send when no credentials are set.
pub(crate) fn build_mailer(settings: &SmtpSettings) -> Result<Box<dyn MailTransport>, MailError> {
    match settings.credentials() {
        Some((user, password)) => Ok(Box::new(SmtpMailer::new(
            &settings.host,
            settings.port,
            user,
            password,
        )?)),
        None => {
            warn!("EMAIL_USER/EMAIL_PASSWORD are not set, contact form mails will fail");
            Ok(Box::new(UnconfiguredMailer))
        }
    }
}

/// SMTPS (implicit TLS) relay.
pub(crate) struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Address,
}

impl SmtpMailer {
    pub(crate) fn new(host: &str, port: u16, user: &str, password: &str) -> Result<Self, MailError> {
        let sender: Address = user.parse()?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
            .port(port)
            .credentials(Credentials::new(user.to_string(), password.to_string()))
            .build();

        Ok(Self { transport, sender })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        let message = compose(&self.sender, mail)?;
        self.transport.send(message).await?;
        Ok(())
    }
}

struct UnconfiguredMailer;

#[async_trait]
impl MailTransport for UnconfiguredMailer {
    async fn send(&self, _mail: OutgoingMail) -> Result<(), MailError> {
        Err(MailError::NotConfigured)
    }
}

fn compose(sender: &Address, mail: OutgoingMail) -> Result<Message, MailError> {
    let mut builder: MessageBuilder = Message::builder()
        .from(Mailbox::new(Some(mail.from_name), sender.clone()))
        .subject(mail.subject)
        .header(ContentType::TEXT_HTML);

    for recipient in &mail.to {
        builder = builder.to(recipient.parse::<Mailbox>()?);
    }
    if let Some(reply_to) = &mail.reply_to {
        builder = builder.reply_to(reply_to.parse::<Mailbox>()?);
    }

    Ok(builder.body(mail.html)?)
}
