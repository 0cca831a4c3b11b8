use serde::Serialize;
use std::collections::HashMap;

/// Message envelope accepted by the push-delivery API
#[derive(Debug, Clone, Serialize)]
pub struct PushMessage {
    pub notification: PushNotification,
    pub data: HashMap<String, String>,
    pub token: String,
}

/// User-visible part of a push message
#[derive(Debug, Clone, Serialize)]
pub struct PushNotification {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}
