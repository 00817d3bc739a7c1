use std::sync::Arc;

use portfolio_contact::ContactSubmission;
use portfolio_notification::{EmailConfig, EmailService, MailError, Mailer, contact::contact_email};

use crate::error::AppError;

pub const SENT_MESSAGE: &str = "Email sent successfully!";
pub const SKIPPED_MESSAGE: &str = "Form received (email not sent, SMTP not configured).";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    Delivered { message_id: String },
    Skipped,
}

impl RelayOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            RelayOutcome::Delivered { .. } => SENT_MESSAGE,
            RelayOutcome::Skipped => SKIPPED_MESSAGE,
        }
    }
}

struct Transport {
    mailer: Arc<dyn Mailer>,
    from_address: String,
    contact_address: String,
}

/// Bridges validated submissions to the mail transport.
///
/// Built once at startup and shared read-only between requests. Without a
/// transport every valid submission is logged and accepted.
#[derive(Clone)]
pub struct ContactRelay {
    transport: Option<Arc<Transport>>,
}

impl ContactRelay {
    pub fn new(
        mailer: Arc<dyn Mailer>,
        from_address: impl Into<String>,
        contact_address: impl Into<String>,
    ) -> Self {
        Self {
            transport: Some(Arc::new(Transport {
                mailer,
                from_address: from_address.into(),
                contact_address: contact_address.into(),
            })),
        }
    }

    pub fn without_transport() -> Self {
        Self { transport: None }
    }

    pub fn from_config(config: Option<&EmailConfig>) -> Result<Self, MailError> {
        let Some(config) = config else {
            tracing::warn!("SMTP not configured, contact submissions will only be logged");
            return Ok(Self::without_transport());
        };

        let service = EmailService::new(config)?;

        Ok(Self::new(
            Arc::new(service),
            &config.from_address,
            &config.contact_address,
        ))
    }

    pub fn is_configured(&self) -> bool {
        self.transport.is_some()
    }

    /// Check the transport once and log the result; never fails.
    pub async fn verify(&self) {
        let Some(transport) = &self.transport else {
            return;
        };

        match transport.mailer.verify().await {
            Ok(()) => tracing::info!("SMTP server is ready to send emails"),
            Err(e) => tracing::error!(error = %e, "SMTP connection failed"),
        }
    }

    /// Validate, then deliver or skip. A failed delivery is not retried.
    #[tracing::instrument(skip_all, fields(subject = %submission.subject))]
    pub async fn relay(&self, submission: &ContactSubmission) -> Result<RelayOutcome, AppError> {
        submission.check()?;

        let Some(transport) = &self.transport else {
            tracing::info!(
                name = %submission.name,
                email = %submission.email,
                subject = %submission.subject,
                message = %submission.message,
                "Contact form data (no SMTP)"
            );
            return Ok(RelayOutcome::Skipped);
        };

        let email = contact_email(
            submission,
            &transport.from_address,
            &transport.contact_address,
        )?;
        let message_id = transport.mailer.send(&email).await?;

        tracing::info!(message_id = %message_id, "Email sent");

        Ok(RelayOutcome::Delivered { message_id })
    }
}
