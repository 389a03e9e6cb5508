use std::sync::Arc;

use askama::Template;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::domain::contact::ContactMessage;
use crate::domain::error::FormErrors;
use crate::infrastructure::mailer::{MailError, MailTransport, OutgoingMail};

const INBOX_SENDER_NAME: &str = "PopCast Contact Form";
const CONFIRMATION_SENDER_NAME: &str = "PopCast";
const CONFIRMATION_SUBJECT: &str = "شكراً لتواصلك معنا - PopCast";

#[derive(Debug, Error)]
pub(crate) enum ContactError {
    #[error("invalid contact message: {0}")]
    Invalid(FormErrors),

    #[error("contact mail could not be rendered: {0}")]
    Render(#[from] askama::Error),

    #[error(transparent)]
    Delivery(#[from] MailError),
}

#[derive(Template)]
#[template(path = "mail/contact_inbox.html")]
struct InboxMail<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
    sent_at: String,
}

#[derive(Template)]
#[template(path = "mail/contact_confirmation.html")]
struct ConfirmationMail<'a> {
    name: &'a str,
    subject: &'a str,
    message: &'a str,
}

pub(crate) struct ContactService {
    mailer: Arc<dyn MailTransport>,
    inboxes: Vec<String>,
}

impl ContactService {
    pub(crate) fn new(mailer: Arc<dyn MailTransport>, inboxes: Vec<String>) -> Self {
        Self { mailer, inboxes }
    }

    /// Relays the message to the site inboxes, then confirms receipt to the sender.
    pub(crate) async fn send(
        &self,
        message: ContactMessage,
        now: DateTime<Utc>,
    ) -> Result<(), ContactError> {
        let message = message.validate().map_err(|errors| {
            debug!(%errors, "contact message rejected");
            ContactError::Invalid(errors)
        })?;

        let inbox_html = InboxMail {
            name: &message.name,
            email: &message.email,
            subject: &message.subject,
            message: &message.message,
            sent_at: now.format("%d/%m/%Y %H:%M UTC").to_string(),
        }
        .render()?;
        let confirmation_html = ConfirmationMail {
            name: &message.name,
            subject: &message.subject,
            message: &message.message,
        }
        .render()?;

        self.mailer
            .send(OutgoingMail {
                from_name: INBOX_SENDER_NAME.to_string(),
                to: self.inboxes.clone(),
                reply_to: Some(message.email.clone()),
                subject: format!("رسالة جديدة: {}", message.subject),
                html: inbox_html,
            })
            .await
            .inspect_err(|err| error!(error = %err, "failed to relay contact message"))?;

        self.mailer
            .send(OutgoingMail {
                from_name: CONFIRMATION_SENDER_NAME.to_string(),
                to: vec![message.email.clone()],
                reply_to: None,
                subject: CONFIRMATION_SUBJECT.to_string(),
                html: confirmation_html,
            })
            .await
            .inspect_err(|err| error!(error = %err, "failed to send contact confirmation"))?;

        info!(subject = %message.subject, "contact message relayed");
        Ok(())
    }
}
