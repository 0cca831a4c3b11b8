pub mod models;

pub use models::{LocalNotification, NotificationContent, PushPayload};

use crate::error::AppResult;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};

/// Title shown when the payload carries none
pub const DEFAULT_TITLE: &str = "Notificación Agenda";

/// Icon shown when the payload carries none
pub const DEFAULT_ICON: &str = "/fondopantalla1.png";

/// Materialize a delivered payload as a local notification
pub fn render(payload: &PushPayload) -> LocalNotification {
    let notification = payload.notification.clone().unwrap_or_default();

    LocalNotification {
        title: notification
            .title
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        body: notification.body.unwrap_or_default(),
        icon: notification
            .icon
            .unwrap_or_else(|| DEFAULT_ICON.to_string()),
        data: payload.data.clone().unwrap_or_default(),
    }
}

/// Sink for rendered notifications
#[async_trait]
pub trait NotificationDisplay: Send + Sync {
    async fn show(&self, notification: LocalNotification) -> AppResult<()>;
}

/// Display that writes notifications to the log
#[derive(Debug, Default)]
pub struct TracingDisplay;

#[async_trait]
impl NotificationDisplay for TracingDisplay {
    async fn show(&self, notification: LocalNotification) -> AppResult<()> {
        info!(
            "Notification: {} - {} ({})",
            notification.title, notification.body, notification.icon
        );
        Ok(())
    }
}

/// Background task rendering push payloads while the app is not in the foreground
pub struct BackgroundRenderer {
    payload_rx: mpsc::Receiver<PushPayload>,
    display: Arc<dyn NotificationDisplay>,
}

impl BackgroundRenderer {
    /// Create a renderer and the sender the transport delivers payloads to
    pub fn new(display: Arc<dyn NotificationDisplay>) -> (Self, mpsc::Sender<PushPayload>) {
        let (payload_tx, payload_rx) = mpsc::channel(32);

        let renderer = Self {
            payload_rx,
            display,
        };

        (renderer, payload_tx)
    }

    /// Consume payloads until the transport side is dropped
    pub async fn run(mut self) {
        info!("Background renderer started");

        while let Some(payload) = self.payload_rx.recv().await {
            let notification = render(&payload);
            if let Err(e) = self.display.show(notification).await {
                // Display failures are logged, never propagated
                error!("Failed to display notification: {}", e);
            }
        }

        info!("Background renderer shut down");
    }
}
