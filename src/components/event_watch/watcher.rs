use super::notifier::{notify_event_created, report_outcome};
use crate::components::firestore::{CalendarEvent, FirestoreActorHandle};
use crate::components::messaging::PushSender;
use crate::config::Config;
use crate::error::AppResult;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{sleep, Duration as TokioDuration};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Polls the events collection and notifies owners of newly created events
pub struct EventWatcher {
    config: Arc<RwLock<Config>>,
    store: FirestoreActorHandle,
    push: Arc<dyn PushSender>,
    seen: HashSet<String>,
    primed: bool,
    started_at: DateTime<Utc>,
}

impl EventWatcher {
    pub fn new(
        config: Arc<RwLock<Config>>,
        store: FirestoreActorHandle,
        push: Arc<dyn PushSender>,
    ) -> Self {
        Self {
            config,
            store,
            push,
            seen: HashSet::new(),
            primed: false,
            started_at: Utc::now(),
        }
    }

    /// Spawn the polling loop; the returned token stops it
    pub fn spawn(mut self) -> CancellationToken {
        let token = CancellationToken::new();
        let cancel = token.clone();

        tokio::spawn(async move {
            info!("Event watcher started");

            // Events existing at startup never notify
            if let Err(e) = self.prime().await {
                error!("Failed to prime event watcher: {}", e);
            }

            loop {
                let interval = {
                    let config_read = self.config.read().await;
                    config_read.poll_interval_secs
                };

                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = sleep(TokioDuration::from_secs(interval)) => {
                        if let Err(e) = self.poll_once().await {
                            error!("Failed to check for new calendar events: {}", e);
                        }
                    }
                }
            }

            info!("Event watcher shut down");
        });

        token
    }

    /// Record the current collection contents without notifying
    async fn prime(&mut self) -> AppResult<()> {
        let events = self.store.list_events().await?;
        self.seen.extend(events.into_iter().map(|e| e.id));
        self.primed = true;
        Ok(())
    }

    /// One polling round: list the collection and notify unseen events
    async fn poll_once(&mut self) -> AppResult<()> {
        if !self.primed {
            return self.prime().await;
        }

        let events = self.store.list_events().await?;
        let app_base_url = {
            let config_read = self.config.read().await;
            config_read.app_base_url.clone()
        };

        for event in events {
            if !self.seen.insert(event.id.clone()) {
                continue;
            }
            if !self.created_since_start(&event) {
                continue;
            }

            let outcome =
                notify_event_created(&self.store, self.push.as_ref(), &event, &app_base_url).await;
            report_outcome(&event.id, &outcome);
        }

        Ok(())
    }

    /// Documents that predate this process are not "newly created"
    fn created_since_start(&self, event: &CalendarEvent) -> bool {
        match event.created_at() {
            Some(created) => created >= self.started_at,
            None => true,
        }
    }
}
