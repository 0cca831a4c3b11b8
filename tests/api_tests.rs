use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use notificador::api::{router, AppState, DEFAULT_TEST_BODY, DEFAULT_TEST_TITLE};
use notificador::components::firestore::{UserRecord, UserTokenStore};
use notificador::components::messaging::{PushMessage, PushSender};
use notificador::config::Config;
use notificador::error::{messaging_error, AppResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tower::ServiceExt;

fn test_config() -> Arc<RwLock<Config>> {
    Arc::new(RwLock::new(Config {
        fcm_api_key: "test_key".to_string(),
        fcm_endpoint: "https://fcm.googleapis.com/fcm/send".to_string(),
        firestore_project_id: "agenda-test".to_string(),
        firestore_api_key: "test_api_key".to_string(),
        firestore_base_url: "https://firestore.googleapis.com/v1".to_string(),
        users_collection: "users".to_string(),
        events_collection: "eventosCalendario".to_string(),
        app_base_url: "https://agenda.example.app".to_string(),
        http_port: 3000,
        poll_interval_secs: 300,
        max_concurrency: 10,
        components: HashMap::new(),
    }))
}

/// Store mock counting lookups
#[derive(Default)]
struct MockStore {
    users: HashMap<String, UserRecord>,
    lookups: AtomicUsize,
}

impl MockStore {
    fn with_user(user_id: &str, fcm_token: Option<&str>) -> Self {
        let mut users = HashMap::new();
        users.insert(
            user_id.to_string(),
            UserRecord {
                id: user_id.to_string(),
                fcm_token: fcm_token.map(|t| t.to_string()),
            },
        );
        Self {
            users,
            lookups: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl UserTokenStore for MockStore {
    async fn get_user(&self, user_id: &str) -> AppResult<Option<UserRecord>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.get(user_id).cloned())
    }
}

/// Sender mock recording every message
#[derive(Default)]
struct RecordingSender {
    sent: Mutex<Vec<PushMessage>>,
    fail: bool,
}

#[async_trait]
impl PushSender for RecordingSender {
    async fn send(&self, message: &PushMessage) -> AppResult<String> {
        if self.fail {
            return Err(messaging_error("connection reset"));
        }
        self.sent.lock().await.push(message.clone());
        Ok("projects/agenda/messages/1".to_string())
    }
}

fn test_router(store: Arc<MockStore>, sender: Arc<RecordingSender>) -> Router {
    let state = AppState {
        config: test_config(),
        users: store,
        push: sender,
    };
    router(state, 10)
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&bytes).to_string())
}

/// The liveness endpoint responds
#[tokio::test]
async fn test_health() {
    let app = test_router(
        Arc::new(MockStore::default()),
        Arc::new(RecordingSender::default()),
    );

    let (status, _) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
}

/// A request without userId is rejected before any lookup or send
#[tokio::test]
async fn test_missing_user_id_returns_400() {
    let store = Arc::new(MockStore::default());
    let sender = Arc::new(RecordingSender::default());
    let app = test_router(Arc::clone(&store), Arc::clone(&sender));

    let (status, body) = get(app, "/notifications/test").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Se requiere el parámetro 'userId'.");
    assert_eq!(store.lookups.load(Ordering::SeqCst), 0);
    assert!(sender.sent.lock().await.is_empty());
}

/// A user without a delivery token yields 404 and no send
#[tokio::test]
async fn test_user_without_token_returns_404() {
    let store = Arc::new(MockStore::with_user("u1", None));
    let sender = Arc::new(RecordingSender::default());
    let app = test_router(Arc::clone(&store), Arc::clone(&sender));

    let (status, body) = get(app, "/notifications/test?userId=u1").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("No se encontró token FCM para el usuario u1"));
    assert!(sender.sent.lock().await.is_empty());
}

/// An unknown user also yields 404
#[tokio::test]
async fn test_unknown_user_returns_404() {
    let store = Arc::new(MockStore::default());
    let sender = Arc::new(RecordingSender::default());
    let app = test_router(Arc::clone(&store), Arc::clone(&sender));

    let (status, _) = get(app, "/notifications/test?userId=nadie").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(sender.sent.lock().await.is_empty());
}

/// A user with a token receives exactly one message with the supplied strings
#[tokio::test]
async fn test_user_with_token_sends_once() {
    let store = Arc::new(MockStore::with_user("u2", Some("T9")));
    let sender = Arc::new(RecordingSender::default());
    let app = test_router(Arc::clone(&store), Arc::clone(&sender));

    let (status, body) = get(
        app,
        "/notifications/test?userId=u2&title=Hola&body=Prueba",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Notificación de prueba enviada con éxito!");

    let sent = sender.sent.lock().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].token, "T9");
    assert_eq!(sent[0].notification.title, "Hola");
    assert_eq!(sent[0].notification.body, "Prueba");
}

/// Absent title and body fall back to the fixed Spanish strings
#[tokio::test]
async fn test_default_title_and_body() {
    let store = Arc::new(MockStore::with_user("u2", Some("T9")));
    let sender = Arc::new(RecordingSender::default());
    let app = test_router(Arc::clone(&store), Arc::clone(&sender));

    let (status, _) = get(app, "/notifications/test?userId=u2").await;
    assert_eq!(status, StatusCode::OK);

    let sent = sender.sent.lock().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].notification.title, DEFAULT_TEST_TITLE);
    assert_eq!(sent[0].notification.body, DEFAULT_TEST_BODY);
    assert_eq!(
        sent[0].data.get("context").map(String::as_str),
        Some("test_notification")
    );
    assert_eq!(
        sent[0].data.get("targetUserId").map(String::as_str),
        Some("u2")
    );
    assert_eq!(
        sent[0].data.get("click_action").map(String::as_str),
        Some("https://agenda.example.app/")
    );
}

/// A failing send surfaces as 500 with the error message
#[tokio::test]
async fn test_send_failure_returns_500() {
    let store = Arc::new(MockStore::with_user("u2", Some("T9")));
    let sender = Arc::new(RecordingSender {
        fail: true,
        ..Default::default()
    });
    let app = test_router(Arc::clone(&store), Arc::clone(&sender));

    let (status, body) = get(app, "/notifications/test?userId=u2").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Error al enviar la notificación de prueba"));
}
