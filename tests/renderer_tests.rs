use async_trait::async_trait;
use notificador::error::AppResult;
use notificador::renderer::{
    render, BackgroundRenderer, LocalNotification, NotificationContent, NotificationDisplay,
    PushPayload, DEFAULT_ICON, DEFAULT_TITLE,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Display recording every shown notification
#[derive(Default)]
struct RecordingDisplay {
    shown: Mutex<Vec<LocalNotification>>,
}

#[async_trait]
impl NotificationDisplay for RecordingDisplay {
    async fn show(&self, notification: LocalNotification) -> AppResult<()> {
        self.shown.lock().await.push(notification);
        Ok(())
    }
}

/// An empty payload renders entirely from the fixed defaults
#[test]
fn test_render_defaults() {
    let notification = render(&PushPayload::default());

    assert_eq!(notification.title, DEFAULT_TITLE);
    assert_eq!(notification.body, "");
    assert_eq!(notification.icon, DEFAULT_ICON);
    assert!(notification.data.is_empty());
}

/// A full payload passes through untouched
#[test]
fn test_render_full_payload() {
    let mut data = HashMap::new();
    data.insert("eventId".to_string(), "ev1".to_string());

    let payload = PushPayload {
        notification: Some(NotificationContent {
            title: Some("Cita médica".to_string()),
            body: Some("Mañana a las 10".to_string()),
            icon: Some("/icono.png".to_string()),
        }),
        data: Some(data.clone()),
    };

    let notification = render(&payload);

    assert_eq!(notification.title, "Cita médica");
    assert_eq!(notification.body, "Mañana a las 10");
    assert_eq!(notification.icon, "/icono.png");
    assert_eq!(notification.data, data);
}

/// Partial notification content mixes given fields with defaults
#[test]
fn test_render_partial_payload() {
    let payload = PushPayload {
        notification: Some(NotificationContent {
            title: None,
            body: Some("Solo cuerpo".to_string()),
            icon: None,
        }),
        data: None,
    };

    let notification = render(&payload);

    assert_eq!(notification.title, DEFAULT_TITLE);
    assert_eq!(notification.body, "Solo cuerpo");
    assert_eq!(notification.icon, DEFAULT_ICON);
}

/// The background listener renders and displays each delivered payload
#[tokio::test]
async fn test_background_renderer() {
    let display = Arc::new(RecordingDisplay::default());
    let (renderer, payload_tx) =
        BackgroundRenderer::new(Arc::clone(&display) as Arc<dyn NotificationDisplay>);

    let task = tokio::spawn(renderer.run());

    payload_tx
        .send(PushPayload {
            notification: Some(NotificationContent {
                title: Some("Recordatorio".to_string()),
                body: Some("Reunión en 5 minutos".to_string()),
                icon: None,
            }),
            data: None,
        })
        .await
        .unwrap();
    payload_tx.send(PushPayload::default()).await.unwrap();

    // Closing the transport side ends the listener
    drop(payload_tx);
    task.await.unwrap();

    let shown = display.shown.lock().await;
    assert_eq!(shown.len(), 2);
    assert_eq!(shown[0].title, "Recordatorio");
    assert_eq!(shown[0].icon, DEFAULT_ICON);
    assert_eq!(shown[1].title, DEFAULT_TITLE);
}
