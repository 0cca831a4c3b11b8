use crate::components::firestore::{CalendarEvent, UserTokenStore};
use crate::components::messaging::{PushMessage, PushNotification, PushSender};
use crate::error::Error;
use std::collections::HashMap;
use tracing::{error, info, warn};

/// Title for event-created notifications
pub const NEW_EVENT_TITLE: &str = "🗓️ ¡Nuevo evento en tu agenda!";

/// Body fallback when the event has no title
pub const UNTITLED_EVENT: &str = "Evento sin título";

/// Body fallback when the event has no date
pub const UNDATED_EVENT: &str = "fecha desconocida";

/// Outcome of one event-created notification attempt
#[derive(Debug)]
pub enum NotifyOutcome {
    /// Message submitted; carries the delivery receipt
    Sent(String),
    /// Event had no owning user id
    SkippedNoRecipient,
    /// Owning user has no delivery token
    SkippedNoToken { user_id: String },
    /// Lookup or send failed
    Failed(Error),
}

/// Body interpolating the event's title and date
pub fn event_body(event: &CalendarEvent) -> String {
    format!(
        "\"{}\" el {}.",
        event.title.as_deref().unwrap_or(UNTITLED_EVENT),
        event.date.as_deref().unwrap_or(UNDATED_EVENT)
    )
}

/// Build the push message announcing a newly created event
pub fn build_event_message(event: &CalendarEvent, token: &str, app_base_url: &str) -> PushMessage {
    let mut data = HashMap::new();
    data.insert("eventType".to_string(), "calendar_event".to_string());
    data.insert("eventId".to_string(), event.id.clone());
    data.insert(
        "click_action".to_string(),
        format!("{}/eventos/{}", app_base_url, event.id),
    );

    PushMessage {
        notification: PushNotification {
            title: NEW_EVENT_TITLE.to_string(),
            body: event_body(event),
            icon: Some(format!("{}/favicon.ico", app_base_url)),
        },
        data,
        token: token.to_string(),
    }
}

/// Notify the owning user about a newly created calendar event.
///
/// Returns an explicit outcome instead of an error; the caller decides
/// whether to report or suppress.
pub async fn notify_event_created(
    users: &dyn UserTokenStore,
    push: &dyn PushSender,
    event: &CalendarEvent,
    app_base_url: &str,
) -> NotifyOutcome {
    let Some(user_id) = event.user_id.as_deref() else {
        warn!(
            "No 'userId' found in new event {}. Skipping notification.",
            event.id
        );
        return NotifyOutcome::SkippedNoRecipient;
    };

    let token = match users.get_user(user_id).await {
        Ok(user) => user.and_then(|u| u.fcm_token),
        Err(e) => return NotifyOutcome::Failed(e),
    };

    let Some(token) = token else {
        info!("No FCM token found for user {}.", user_id);
        return NotifyOutcome::SkippedNoToken {
            user_id: user_id.to_string(),
        };
    };

    let message = build_event_message(event, &token, app_base_url);
    match push.send(&message).await {
        Ok(receipt) => {
            info!(
                "Notification sent to {} for new event {}: {}",
                user_id, event.id, receipt
            );
            NotifyOutcome::Sent(receipt)
        }
        Err(e) => NotifyOutcome::Failed(e),
    }
}

/// Log one outcome; failures are reported here and swallowed
pub fn report_outcome(event_id: &str, outcome: &NotifyOutcome) {
    match outcome {
        NotifyOutcome::Sent(receipt) => {
            info!("New event {} notified: {}", event_id, receipt);
        }
        NotifyOutcome::SkippedNoRecipient => {
            info!("New event {} skipped: no recipient", event_id);
        }
        NotifyOutcome::SkippedNoToken { user_id } => {
            info!("New event {} skipped: no token for user {}", event_id, user_id);
        }
        NotifyOutcome::Failed(e) => {
            error!(
                "Error sending notification for new calendar event {}: {}",
                event_id, e
            );
        }
    }
}
