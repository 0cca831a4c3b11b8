pub mod handlers;

pub use handlers::{DEFAULT_TEST_BODY, DEFAULT_TEST_TITLE};

use crate::components::firestore::UserTokenStore;
use crate::components::messaging::PushSender;
use crate::config::Config;
use crate::error::AppResult;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use handlers::{health_handler, send_test_notification};

/// Shared state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Process-wide configuration
    pub config: Arc<RwLock<Config>>,
    /// Store holding user records and delivery tokens
    pub users: Arc<dyn UserTokenStore>,
    /// Push-delivery client
    pub push: Arc<dyn PushSender>,
}

/// Build the router
pub fn router(state: AppState, max_concurrency: usize) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/notifications/test", get(send_test_notification))
        // One ceiling shared by all handlers
        .layer(GlobalConcurrencyLimitLayer::new(max_concurrency))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve the HTTP API
pub async fn serve(state: AppState) -> AppResult<()> {
    let (port, max_concurrency) = {
        let config_read = state.config.read().await;
        (config_read.http_port, config_read.max_concurrency)
    };

    let app = router(state, max_concurrency);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
