use super::models::PushMessage;
use super::PushSender;
use crate::config::Config;
use crate::error::{messaging_error, AppResult};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::info;

/// Request timeout for push sends, in seconds
const SEND_TIMEOUT_SECS: u64 = 30;

/// Client for the managed push-delivery API
pub struct FcmClient {
    endpoint: String,
    api_key: String,
    client: Client,
}

impl FcmClient {
    /// Create a new client from the loaded configuration
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(SEND_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            endpoint: config.fcm_endpoint.clone(),
            api_key: config.fcm_api_key.clone(),
            client,
        }
    }
}

#[async_trait]
impl PushSender for FcmClient {
    async fn send(&self, message: &PushMessage) -> AppResult<String> {
        let token_preview: String = message.token.chars().take(12).collect();
        info!("Sending push notification to token {}...", token_preview);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("key={}", self.api_key))
            .json(message)
            .send()
            .await
            .map_err(|e| messaging_error(&format!("Failed to send push message: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| messaging_error(&format!("Failed to read push response: {}", e)))?;

        if !status.is_success() {
            return Err(messaging_error(&format!(
                "Push API returned HTTP {} - {}",
                status, body
            )));
        }

        Ok(delivery_receipt(&body))
    }
}

/// Pull a message id out of the API response, falling back to the raw body
fn delivery_receipt(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|response| {
            response
                .get("name")
                .and_then(|name| name.as_str())
                .map(|s| s.to_string())
                .or_else(|| {
                    response
                        .get("results")
                        .and_then(|results| results.get(0))
                        .and_then(|result| result.get("message_id"))
                        .and_then(|id| id.as_str())
                        .map(|s| s.to_string())
                })
        })
        .unwrap_or_else(|| body.trim().to_string())
}
