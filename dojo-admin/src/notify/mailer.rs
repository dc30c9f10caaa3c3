//! HTTP mail relay client

use crate::notify::templates::Message;
use dojo_common::config::MailConfig;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Mail relay errors
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Relay returned status {0}")]
    Status(u16),
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// Mail relay API client
#[derive(Clone)]
pub struct Mailer {
    http_client: reqwest::Client,
    relay_url: String,
    api_key: String,
    from_address: String,
}

impl Mailer {
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| MailError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            relay_url: config.relay_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            from_address: config.from_address.clone(),
        })
    }

    /// Deliver one message through the relay.
    pub async fn send(&self, to: &str, message: &Message) -> Result<(), MailError> {
        let request = SendRequest {
            from: &self.from_address,
            to,
            subject: &message.subject,
            text: &message.body,
        };

        let response = self
            .http_client
            .post(format!("{}/send", self.relay_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| MailError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MailError::Status(response.status().as_u16()));
        }

        Ok(())
    }
}
