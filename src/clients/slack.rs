use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use reqwest::Client;
use tracing::{debug, info};

use crate::{
    config::Config,
    models::{slack::SlackPayload, validation::validate_webhook_path},
};

pub const SLACK_BASE_URL: &str = "https://hooks.slack.com";

pub struct SlackClient {
    http_client: Client,
    webhook_url: String,
}

impl SlackClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        Self::with_base_url(SLACK_BASE_URL, &config.slack_webhook_path)
    }

    pub fn with_base_url(base_url: &str, webhook_path: &str) -> Result<Self, Error> {
        validate_webhook_path(webhook_path)?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|_| anyhow!("Failed to create HTTP client"))?;

        info!(base_url = %base_url, "Slack webhook client initialized");

        Ok(Self {
            http_client,
            webhook_url: format!("{}{}", base_url, webhook_path),
        })
    }

    // One attempt per delivery; failures are returned to the caller, never retried.
    pub async fn post_message(&self, payload: &SlackPayload) -> Result<(), Error> {
        debug!(username = %payload.username, "Posting message to webhook");

        let response = self
            .http_client
            .post(&self.webhook_url)
            .json(payload)
            .send()
            .await?;

        if response.status().is_success() {
            info!("Webhook message delivered");
            Ok(())
        } else {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            Err(anyhow!(
                "Webhook request failed with status {}: {}",
                status,
                error_text
            ))
        }
    }
}
