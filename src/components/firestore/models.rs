use chrono::{DateTime, Utc};
use serde_json::Value;

/// User record from the users collection
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
pub struct UserRecord {
    pub id: String,
    pub fcm_token: Option<String>,
}

/// Calendar event document
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
pub struct CalendarEvent {
    pub id: String,
    pub user_id: Option<String>,
    pub title: Option<String>,
    pub date: Option<String>,
    pub create_time: Option<String>,
}

impl CalendarEvent {
    /// Parse the document's server-side creation timestamp
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.create_time
            .as_deref()
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
            .map(|t| t.with_timezone(&Utc))
    }
}

/// Extract a string field from a Firestore typed-field mapping
pub fn string_field(fields: &Value, name: &str) -> Option<String> {
    fields
        .get(name)
        .and_then(|field| field.get("stringValue"))
        .and_then(|value| value.as_str())
        .map(|s| s.to_string())
}

/// Document id is the last segment of the resource name
pub fn document_id(resource_name: &str) -> String {
    resource_name
        .rsplit('/')
        .next()
        .unwrap_or(resource_name)
        .to_string()
}

/// Build a user record from a Firestore document
pub fn user_from_document(user_id: &str, document: &Value) -> UserRecord {
    let fcm_token = document
        .get("fields")
        .and_then(|fields| string_field(fields, "fcmToken"));

    UserRecord {
        id: user_id.to_string(),
        fcm_token,
    }
}

/// Build a calendar event from a Firestore document
pub fn event_from_document(document: &Value) -> CalendarEvent {
    let id = document
        .get("name")
        .and_then(|name| name.as_str())
        .map(document_id)
        .unwrap_or_default();

    let create_time = document
        .get("createTime")
        .and_then(|t| t.as_str())
        .map(|t| t.to_string());

    let (user_id, title, date) = match document.get("fields") {
        Some(fields) => (
            string_field(fields, "userId"),
            string_field(fields, "title"),
            string_field(fields, "date"),
        ),
        None => (None, None, None),
    };

    CalendarEvent {
        id,
        user_id,
        title,
        date,
        create_time,
    }
}
