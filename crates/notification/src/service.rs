//! Email notification service using lettre

use async_trait::async_trait;
use lettre::{
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{Email, MailError, Mailer};

/// Port on which SMTP servers expect TLS from the first byte.
pub const IMPLICIT_TLS_PORT: u16 = 465;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_address: String,
    pub contact_address: String,
}

impl EmailConfig {
    pub fn implicit_tls(&self) -> bool {
        self.smtp_port == IMPLICIT_TLS_PORT
    }
}

/// SMTP delivery backed by a pooled lettre transport
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailService {
    /// Create a new email service from configuration
    ///
    /// Sender and recipient are not required to be addresses here (an SMTP
    /// username such as `apikey` is a common default for both); each send
    /// fails with [`MailError::InvalidAddress`] instead.
    pub fn new(config: &EmailConfig) -> Result<Self, MailError> {
        for address in [&config.from_address, &config.contact_address] {
            if address.parse::<Address>().is_err() {
                tracing::warn!(
                    address = %address,
                    "Configured sender or recipient is not an email address, sends will fail"
                );
            }
        }

        let builder = if config.implicit_tls() {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
        };

        let creds = Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());
        let mailer = builder
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        tracing::info!(
            smtp_host = %config.smtp_host,
            smtp_port = config.smtp_port,
            implicit_tls = config.implicit_tls(),
            from = %config.from_address,
            to = %config.contact_address,
            "Email service initialized"
        );

        Ok(Self { mailer })
    }
}

#[async_trait]
impl Mailer for EmailService {
    #[tracing::instrument(skip_all, fields(to = %email.to, subject = %email.subject))]
    async fn send(&self, email: &Email) -> Result<String, MailError> {
        let message_id = message_id(&email.from);
        let message = build_message(email, &message_id)?;

        tracing::info!("Sending email");

        self.mailer.send(message).await?;

        Ok(message_id)
    }

    async fn verify(&self) -> Result<(), MailError> {
        if self.mailer.test_connection().await? {
            Ok(())
        } else {
            Err(MailError::Unreachable)
        }
    }
}

/// Generate a `Message-ID` scoped to the sender's domain.
pub fn message_id(from: &str) -> String {
    let domain = from
        .rsplit_once('@')
        .map(|(_, domain)| domain)
        .filter(|domain| !domain.is_empty())
        .unwrap_or("localhost");

    format!("<{}@{}>", Uuid::new_v4(), domain)
}

/// Turn an [`Email`] into a multipart/alternative lettre message.
///
/// Sender and recipient must be valid addresses. An unparsable reply-to is
/// dropped with a warning since the submitter's address is never validated.
pub fn build_message(email: &Email, message_id: &str) -> Result<Message, MailError> {
    let from_address = email
        .from
        .parse::<Address>()
        .map_err(|_| MailError::InvalidAddress(email.from.clone()))?;
    let from = Mailbox::new(email.from_name.clone(), from_address);

    let to = email
        .to
        .parse::<Mailbox>()
        .map_err(|_| MailError::InvalidAddress(email.to.clone()))?;

    let mut builder = Message::builder()
        .message_id(Some(message_id.to_owned()))
        .from(from)
        .to(to)
        .subject(email.subject.clone());

    if let Some(reply_to) = &email.reply_to {
        match reply_to.parse::<Mailbox>() {
            Ok(mailbox) => builder = builder.reply_to(mailbox),
            Err(e) => tracing::warn!(
                reply_to = %reply_to,
                error = %e,
                "Reply-To is not a valid mailbox, omitting header"
            ),
        }
    }

    Ok(builder.multipart(MultiPart::alternative_plain_html(
        email.plain.clone(),
        email.html.clone(),
    ))?)
}
