use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{error, info, warn};

use super::AppState;
use crate::components::messaging::{PushMessage, PushNotification};

/// Default title for test notifications
pub const DEFAULT_TEST_TITLE: &str = "¡Hola desde tu agenda!";

/// Default body for test notifications
pub const DEFAULT_TEST_BODY: &str = "Esta es una notificación de prueba desde tu agenda.";

/// Query parameters for the test notification endpoint
#[derive(Debug, Deserialize)]
pub struct TestNotificationParams {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Handler for the liveness endpoint
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Handler for sending an ad hoc test notification to a named user
pub async fn send_test_notification(
    State(state): State<AppState>,
    Query(params): Query<TestNotificationParams>,
) -> (StatusCode, String) {
    let Some(user_id) = params.user_id.filter(|id| !id.is_empty()) else {
        warn!("send_test_notification: Missing 'userId' query parameter.");
        return (
            StatusCode::BAD_REQUEST,
            "Se requiere el parámetro 'userId'.".to_string(),
        );
    };

    let title = params
        .title
        .unwrap_or_else(|| DEFAULT_TEST_TITLE.to_string());
    let body = params.body.unwrap_or_else(|| DEFAULT_TEST_BODY.to_string());

    let token = match state.users.get_user(&user_id).await {
        Ok(user) => user.and_then(|u| u.fcm_token),
        Err(e) => {
            error!("Error sending test notification: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error al enviar la notificación de prueba: {}", e),
            );
        }
    };

    let Some(token) = token else {
        info!(
            "send_test_notification: No FCM token found for user: {}",
            user_id
        );
        return (
            StatusCode::NOT_FOUND,
            format!("No se encontró token FCM para el usuario {}.", user_id),
        );
    };

    let app_base_url = {
        let config_read = state.config.read().await;
        config_read.app_base_url.clone()
    };

    let mut data = HashMap::new();
    data.insert("context".to_string(), "test_notification".to_string());
    data.insert("targetUserId".to_string(), user_id.clone());
    data.insert("click_action".to_string(), format!("{}/", app_base_url));

    let message = PushMessage {
        notification: PushNotification {
            title,
            body,
            icon: None,
        },
        data,
        token,
    };

    match state.push.send(&message).await {
        Ok(receipt) => {
            info!("Test notification sent to {}: {}", user_id, receipt);
            (
                StatusCode::OK,
                "Notificación de prueba enviada con éxito!".to_string(),
            )
        }
        Err(e) => {
            error!("Error sending test notification: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error al enviar la notificación de prueba: {}", e),
            )
        }
    }
}
