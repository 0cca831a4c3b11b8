use super::models::{event_from_document, user_from_document, CalendarEvent, UserRecord};
use crate::config::Config;
use crate::error::{firestore_error, AppResult};
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::info;
use url::Url;

/// Page size for event collection listings
const LIST_PAGE_SIZE: &str = "300";

/// The Firestore actor that processes document reads
pub struct FirestoreActor {
    config: Arc<RwLock<Config>>,
    client: Client,
    command_rx: mpsc::Receiver<FirestoreCommand>,
}

/// Commands that can be sent to the Firestore actor
pub enum FirestoreCommand {
    GetUser(String, mpsc::Sender<AppResult<Option<UserRecord>>>),
    ListEvents(mpsc::Sender<AppResult<Vec<CalendarEvent>>>),
    Shutdown,
}

/// Handle for communicating with the Firestore actor
#[derive(Clone)]
pub struct FirestoreActorHandle {
    command_tx: mpsc::Sender<FirestoreCommand>,
}

impl FirestoreActorHandle {
    /// Create a new empty handle for initialization purposes
    pub fn empty() -> Self {
        let (command_tx, _) = mpsc::channel(32);
        Self { command_tx }
    }

    /// Get a user record by id
    pub async fn get_user(&self, user_id: &str) -> AppResult<Option<UserRecord>> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(FirestoreCommand::GetUser(user_id.to_string(), response_tx))
            .await
            .map_err(|e| firestore_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| firestore_error("Response channel closed"))?
    }

    /// List documents in the calendar events collection
    pub async fn list_events(&self) -> AppResult<Vec<CalendarEvent>> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(FirestoreCommand::ListEvents(response_tx))
            .await
            .map_err(|e| firestore_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| firestore_error("Response channel closed"))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> AppResult<()> {
        let _ = self.command_tx.send(FirestoreCommand::Shutdown).await;
        Ok(())
    }
}

impl FirestoreActor {
    /// Create a new actor and return its handle
    pub fn new(config: Arc<RwLock<Config>>) -> (Self, FirestoreActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            config,
            client: Client::new(),
            command_rx,
        };

        let handle = FirestoreActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Firestore actor started");

        // Process commands
        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                FirestoreCommand::GetUser(user_id, response_tx) => {
                    let result = self.fetch_user(&user_id).await;
                    let _ = response_tx.send(result).await;
                }
                FirestoreCommand::ListEvents(response_tx) => {
                    let result = self.fetch_events().await;
                    let _ = response_tx.send(result).await;
                }
                FirestoreCommand::Shutdown => {
                    info!("Firestore actor shutting down");
                    break;
                }
            }
        }

        info!("Firestore actor shut down");
    }

    /// Build the document URL for a collection, with an optional document id
    async fn document_url(&self, collection: &str, document_id: Option<&str>) -> AppResult<Url> {
        let (base_url, project_id, api_key) = {
            let config_read = self.config.read().await;
            (
                config_read.firestore_base_url.clone(),
                config_read.firestore_project_id.clone(),
                config_read.firestore_api_key.clone(),
            )
        };

        let mut url_str = format!(
            "{}/projects/{}/databases/(default)/documents/{}",
            base_url, project_id, collection
        );
        if let Some(id) = document_id {
            url_str.push('/');
            url_str.push_str(id);
        }

        let mut url = Url::parse(&url_str)
            .map_err(|e| firestore_error(&format!("Failed to parse URL: {}", e)))?;
        url.query_pairs_mut().append_pair("key", &api_key);

        Ok(url)
    }

    /// Fetch a user document; an absent document is not an error
    async fn fetch_user(&self, user_id: &str) -> AppResult<Option<UserRecord>> {
        let collection = {
            let config_read = self.config.read().await;
            config_read.users_collection.clone()
        };

        let url = self.document_url(&collection, Some(user_id)).await?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| firestore_error(&format!("Failed to fetch user document: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(firestore_error(&format!(
                "Failed to fetch user document: HTTP {} - {}",
                status, error_body
            )));
        }

        let document: Value = response
            .json()
            .await
            .map_err(|e| firestore_error(&format!("Failed to parse user document: {}", e)))?;

        Ok(Some(user_from_document(user_id, &document)))
    }

    /// List documents in the calendar events collection
    async fn fetch_events(&self) -> AppResult<Vec<CalendarEvent>> {
        let collection = {
            let config_read = self.config.read().await;
            config_read.events_collection.clone()
        };

        let mut url = self.document_url(&collection, None).await?;
        url.query_pairs_mut().append_pair("pageSize", LIST_PAGE_SIZE);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| firestore_error(&format!("Failed to list events: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(firestore_error(&format!(
                "Failed to list events: HTTP {} - {}",
                status, error_body
            )));
        }

        let response_data: Value = response
            .json()
            .await
            .map_err(|e| firestore_error(&format!("Failed to parse events response: {}", e)))?;

        // An empty collection has no "documents" key
        let events = response_data
            .get("documents")
            .and_then(|d| d.as_array())
            .map(|documents| documents.iter().map(event_from_document).collect())
            .unwrap_or_default();

        Ok(events)
    }
}
