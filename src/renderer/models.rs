use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Push payload delivered by the messaging transport
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PushPayload {
    pub notification: Option<NotificationContent>,
    pub data: Option<HashMap<String, String>>,
}

/// Notification part of a delivered payload; every field is optional
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NotificationContent {
    pub title: Option<String>,
    pub body: Option<String>,
    pub icon: Option<String>,
}

/// Notification as materialized for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalNotification {
    pub title: String,
    pub body: String,
    pub icon: String,
    /// Data mapping attached for retrieval when the user interacts
    pub data: HashMap<String, String>,
}
