use std::time::Duration;

use anyhow::Result;

use crate::{
    cli::SendArgs,
    client::{ContactClient, ContactForm},
};

pub async fn send(config: crate::config::Config, args: SendArgs) -> Result<()> {
    let endpoint = args.endpoint.clone().unwrap_or(config.client.endpoint);
    let client = ContactClient::new(endpoint, Duration::from_secs(config.client.timeout_secs))?;
    let mut form = ContactForm::new(args.submission());

    tracing::debug!(endpoint = client.endpoint(), "Submitting contact form");

    let status = client
        .submit(&mut form, |status| println!("{status}"))
        .await;

    if !status.is_sent() {
        anyhow::bail!("contact message was not sent: {status}");
    }

    Ok(())
}
