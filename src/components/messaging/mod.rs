mod client;
pub mod models;

pub use client::FcmClient;
pub use models::{PushMessage, PushNotification};

use crate::error::AppResult;
use async_trait::async_trait;

/// Submit messages to the managed push-delivery API
#[async_trait]
pub trait PushSender: Send + Sync {
    /// Send one message, returning the opaque delivery receipt
    async fn send(&self, message: &PushMessage) -> AppResult<String>;
}
