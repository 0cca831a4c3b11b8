mod notifier;
mod watcher;

pub use notifier::{
    build_event_message, event_body, notify_event_created, report_outcome, NotifyOutcome,
    NEW_EVENT_TITLE, UNDATED_EVENT, UNTITLED_EVENT,
};
pub use watcher::EventWatcher;

use crate::components::firestore::FirestoreActorHandle;
use crate::components::messaging::PushSender;
use crate::config::Config;
use crate::error::AppResult;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

/// Component reacting to newly created calendar events
#[derive(Default)]
pub struct EventWatch {
    cancel: RwLock<Option<CancellationToken>>,
}

impl EventWatch {
    /// Create a new event watch component
    pub fn new() -> Self {
        Self {
            cancel: RwLock::new(None),
        }
    }
}

#[async_trait]
impl super::Component for EventWatch {
    fn name(&self) -> &'static str {
        "event_watch"
    }

    async fn init(
        &self,
        config: Arc<RwLock<Config>>,
        store: FirestoreActorHandle,
        push: Arc<dyn PushSender>,
    ) -> AppResult<()> {
        // Start the watcher task if one isn't running
        let mut cancel_lock = self.cancel.write().await;
        if cancel_lock.is_none() {
            let watcher = EventWatcher::new(config, store, push);
            *cancel_lock = Some(watcher.spawn());
        }

        Ok(())
    }

    async fn shutdown(&self) -> AppResult<()> {
        let cancel_lock = self.cancel.read().await;
        if let Some(cancel) = &*cancel_lock {
            cancel.cancel();
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
