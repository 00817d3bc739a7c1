//! Client side of the contact flow: validate, post once, map the outcome to a status line.

use std::{fmt, time::Duration};

use portfolio_contact::{ContactResponse, ContactSubmission, Field};

pub const INCOMPLETE_MESSAGE: &str = "Please complete all fields.";
pub const SENDING_MESSAGE: &str = "Sending…";
pub const DEFAULT_SENT_MESSAGE: &str = "Message sent successfully!";
pub const DEFAULT_REJECTED_MESSAGE: &str = "Unable to send message.";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error, please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStatus {
    /// A field was blank; nothing was sent.
    Incomplete,
    Sending,
    /// The relay accepted the submission.
    Sent(String),
    /// The relay answered with an error status or `success: false`.
    Rejected(String),
    /// No response came back at all.
    NetworkError,
}

impl SubmitStatus {
    pub fn is_sent(&self) -> bool {
        matches!(self, SubmitStatus::Sent(_))
    }
}

impl fmt::Display for SubmitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitStatus::Incomplete => f.write_str(INCOMPLETE_MESSAGE),
            SubmitStatus::Sending => f.write_str(SENDING_MESSAGE),
            SubmitStatus::Sent(message) | SubmitStatus::Rejected(message) => f.write_str(message),
            SubmitStatus::NetworkError => f.write_str(NETWORK_ERROR_MESSAGE),
        }
    }
}

/// Field values plus the status line shown under the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub fields: ContactSubmission,
    pub status: Option<SubmitStatus>,
}

impl ContactForm {
    pub fn new(fields: ContactSubmission) -> Self {
        Self {
            fields,
            status: None,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.fields.get_mut(field) = value.into();
    }

    /// Clear every field, keeping the status line.
    pub fn reset(&mut self) {
        self.fields = ContactSubmission::default();
    }
}

pub struct ContactClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl ContactClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit `form` once.
    ///
    /// `report` sees `Sending` before the request goes out and the final
    /// status after. The form is cleared only when the relay accepted it.
    /// Holding `&mut form` for the whole call rules out a second overlapping
    /// submission of the same form.
    pub async fn submit(
        &self,
        form: &mut ContactForm,
        mut report: impl FnMut(&SubmitStatus),
    ) -> SubmitStatus {
        let status = if form.fields.is_complete() {
            form.status = Some(SubmitStatus::Sending);
            report(&SubmitStatus::Sending);

            let status = self.post(&form.fields).await;
            if status.is_sent() {
                form.reset();
            }
            status
        } else {
            SubmitStatus::Incomplete
        };

        form.status = Some(status.clone());
        report(&status);

        status
    }

    async fn post(&self, submission: &ContactSubmission) -> SubmitStatus {
        let response = match self
            .http_client
            .post(&self.endpoint)
            .json(submission)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, endpoint = %self.endpoint, "Network error");
                return SubmitStatus::NetworkError;
            }
        };

        let ok = response.status().is_success();
        let status_code = response.status();

        let body = match response.json::<ContactResponse>().await {
            Ok(body) => Some(body),
            Err(e) if e.is_decode() => {
                tracing::warn!(error = %e, status = %status_code, "Unreadable relay response");
                None
            }
            Err(e) => {
                tracing::error!(error = %e, endpoint = %self.endpoint, "Network error");
                return SubmitStatus::NetworkError;
            }
        };

        match body {
            Some(body) if ok && body.success => SubmitStatus::Sent(
                body.message().unwrap_or(DEFAULT_SENT_MESSAGE).to_owned(),
            ),
            body => SubmitStatus::Rejected(
                body.as_ref()
                    .and_then(ContactResponse::message)
                    .unwrap_or(DEFAULT_REJECTED_MESSAGE)
                    .to_owned(),
            ),
        }
    }
}
