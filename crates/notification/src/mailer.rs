use async_trait::async_trait;

/// A composed message, independent of any transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub from_name: Option<String>,
    pub from: String,
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub plain: String,
    pub html: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("failed to render template: {0}")]
    Template(#[from] askama::Error),

    #[error("smtp: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("smtp server refused the connection")]
    Unreachable,
}

/// Delivery seam between the relay and whatever actually moves mail.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Deliver `email` and return the identifier the transport assigned to it.
    async fn send(&self, email: &Email) -> Result<String, MailError>;

    /// Check that the transport is reachable.
    async fn verify(&self) -> Result<(), MailError> {
        Ok(())
    }
}
