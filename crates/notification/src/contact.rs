use askama::Template;
use portfolio_contact::ContactSubmission;

use crate::{Email, MailError};

/// Prepended to the submitter's subject so the owner can filter on it.
pub const SUBJECT_PREFIX: &str = "[Website Contact]";

#[derive(Template)]
#[template(path = "contact.html")]
struct ContactHtmlTemplate<'a> {
    name: &'a str,
    email: &'a str,
    lines: Vec<&'a str>,
}

#[derive(Template)]
#[template(path = "contact.txt", escape = "none")]
struct ContactPlainTemplate<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

/// Compose the notification sent to the site owner for one submission.
///
/// The plain part carries every value verbatim. The html part escapes them
/// and renders message line breaks as `<br/>`.
pub fn contact_email(
    submission: &ContactSubmission,
    from: &str,
    to: &str,
) -> Result<Email, MailError> {
    let html = ContactHtmlTemplate {
        name: &submission.name,
        email: &submission.email,
        lines: submission.message.split('\n').collect(),
    }
    .render()?;

    let plain = ContactPlainTemplate {
        name: &submission.name,
        email: &submission.email,
        message: &submission.message,
    }
    .render()?;

    Ok(Email {
        from_name: Some(submission.name.clone()),
        from: from.to_owned(),
        to: to.to_owned(),
        reply_to: Some(submission.email.clone()),
        subject: format!("{SUBJECT_PREFIX} {}", submission.subject),
        plain,
        html,
    })
}
