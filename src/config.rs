use crate::error::{env_error, AppResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use toml;

/// Default Firestore REST endpoint
pub const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Default push-delivery endpoint
pub const DEFAULT_FCM_ENDPOINT: &str = "https://fcm.googleapis.com/fcm/send";

/// Default collection holding user records
pub const DEFAULT_USERS_COLLECTION: &str = "users";

/// Default collection holding calendar event records
pub const DEFAULT_EVENTS_COLLECTION: &str = "eventosCalendario";

/// Main configuration structure for the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// FCM server key used to authorize push sends
    pub fcm_api_key: String,
    /// Push-delivery endpoint
    pub fcm_endpoint: String,
    /// Firestore project identifier
    pub firestore_project_id: String,
    /// Firestore REST API key
    pub firestore_api_key: String,
    /// Firestore REST base URL (points at the emulator in development)
    pub firestore_base_url: String,
    /// Collection holding user records
    pub users_collection: String,
    /// Collection holding calendar event records
    pub events_collection: String,
    /// Public base URL of the agenda web app, used for click-through links
    pub app_base_url: String,
    /// Port for the HTTP API
    pub http_port: u16,
    /// Interval between checks for new calendar events, in seconds
    pub poll_interval_secs: u64,
    /// Process-wide ceiling on concurrent HTTP handler invocations
    pub max_concurrency: usize,
    /// Map of component names to their enabled status
    pub components: HashMap<String, bool>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // Required environment variables
        let fcm_api_key = env::var("FCM_API_KEY").map_err(|_| env_error("FCM_API_KEY"))?;
        let firestore_project_id =
            env::var("FIRESTORE_PROJECT_ID").map_err(|_| env_error("FIRESTORE_PROJECT_ID"))?;
        let firestore_api_key =
            env::var("FIRESTORE_API_KEY").map_err(|_| env_error("FIRESTORE_API_KEY"))?;
        let app_base_url = env::var("APP_BASE_URL")
            .map_err(|_| env_error("APP_BASE_URL"))?
            .trim_end_matches('/')
            .to_string();

        // Optional endpoint overrides
        let fcm_endpoint =
            env::var("FCM_ENDPOINT").unwrap_or_else(|_| String::from(DEFAULT_FCM_ENDPOINT));
        let firestore_base_url = env::var("FIRESTORE_BASE_URL")
            .unwrap_or_else(|_| String::from(DEFAULT_FIRESTORE_BASE_URL));
        let users_collection = env::var("USERS_COLLECTION")
            .unwrap_or_else(|_| String::from(DEFAULT_USERS_COLLECTION));
        let events_collection = env::var("EVENTS_COLLECTION")
            .unwrap_or_else(|_| String::from(DEFAULT_EVENTS_COLLECTION));

        // Parse numeric values
        let http_port = match env::var("HTTP_PORT") {
            Ok(port) => port
                .parse::<u16>()
                .map_err(|_| env_error("Invalid HTTP_PORT format"))?,
            Err(_) => 3000,
        };

        let poll_interval_secs = match env::var("EVENTS_CHECK_INTERVAL") {
            Ok(interval) => interval
                .parse::<u64>()
                .map_err(|_| env_error("Invalid EVENTS_CHECK_INTERVAL format"))?,
            Err(_) => 300,
        };

        let max_concurrency = match env::var("MAX_CONCURRENCY") {
            Ok(limit) => limit
                .parse::<usize>()
                .map_err(|_| env_error("Invalid MAX_CONCURRENCY format"))?,
            Err(_) => 10,
        };

        // Initialize default components
        let mut components = HashMap::new();
        components.insert("event_watch".to_string(), true);

        // Load components configuration from file if it exists
        if let Ok(content) = fs::read_to_string("config/components.toml") {
            if let Ok(file_components) = toml::from_str::<HashMap<String, bool>>(&content) {
                // Merge with defaults
                for (key, value) in file_components {
                    components.insert(key, value);
                }
            }
        }

        Ok(Config {
            fcm_api_key,
            fcm_endpoint,
            firestore_project_id,
            firestore_api_key,
            firestore_base_url,
            users_collection,
            events_collection,
            app_base_url,
            http_port,
            poll_interval_secs,
            max_concurrency,
            components,
        })
    }

    /// Check if a component is enabled
    pub fn is_component_enabled(&self, name: &str) -> bool {
        *self.components.get(name).unwrap_or(&false)
    }

    /// Update component enabled status
    #[allow(dead_code)]
    pub fn set_component_enabled(&mut self, name: &str, enabled: bool) -> AppResult<()> {
        self.components.insert(name.to_string(), enabled);
        self.save_components()
    }

    /// Save component configuration to file
    #[allow(dead_code)]
    fn save_components(&self) -> AppResult<()> {
        // Create config directory if it doesn't exist
        if !Path::new("config").exists() {
            fs::create_dir("config")?;
        }

        let toml_str = toml::to_string(&self.components)?;
        fs::write("config/components.toml", toml_str)?;

        Ok(())
    }
}
