use crate::api::{self, AppState};
use crate::components::firestore::{FirestoreActor, UserTokenStore};
use crate::components::messaging::{FcmClient, PushSender};
use crate::components::{ComponentManager, EventWatch};
use crate::config::Config;
use crate::error::Error;
use crate::shutdown;
use std::sync::Arc;
use tokio::sync::{oneshot, RwLock};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub async fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Initialize and start the notification service
pub async fn start_service(config: Arc<RwLock<Config>>) -> miette::Result<()> {
    // Initialize the Firestore actor
    let (mut store_actor, store_handle) = FirestoreActor::new(Arc::clone(&config));

    // Spawn Firestore actor task
    tokio::spawn(async move {
        store_actor.run().await;
    });

    // Push-delivery client
    let push: Arc<dyn PushSender> = {
        let config_read = config.read().await;
        Arc::new(FcmClient::new(&config_read))
    };

    // Initialize component manager
    let mut component_manager = ComponentManager::new(Arc::clone(&config));

    // Register the event watch component
    component_manager.register(EventWatch::new());

    // Create a shared component manager
    let component_manager = Arc::new(component_manager);

    if let Err(e) = component_manager
        .init_all(
            Arc::clone(&config),
            store_handle.clone(),
            Arc::clone(&push),
        )
        .await
    {
        error!("Failed to initialize components: {:?}", e);
    }

    // Create shutdown channel
    let (shutdown_send, shutdown_recv) = oneshot::channel();

    // Clone store handle for shutdown handler
    let shutdown_store = store_handle.clone();

    // Clone component manager for shutdown handler
    let shutdown_components = Arc::clone(&component_manager);

    // Spawn signal handler task
    tokio::spawn(async move {
        shutdown::handle_signals(shutdown_send, shutdown_components, shutdown_store).await;
    });

    // Shared state for HTTP handlers
    let state = AppState {
        config: Arc::clone(&config),
        users: Arc::new(store_handle) as Arc<dyn UserTokenStore>,
        push,
    };

    // Start the HTTP server
    info!("Starting HTTP server...");
    let server_handle = tokio::spawn(async move { api::serve(state).await });

    // Wait for either the server to end or a shutdown signal
    tokio::select! {
        result = server_handle => {
            info!("HTTP server ended");
            match result {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e.into()),
                Err(e) => {
                    error!("Server task error: {:?}", e);
                    Err(Error::Other(format!("Server task error: {}", e)).into())
                }
            }
        }
        _ = shutdown_recv => {
            info!("Received shutdown signal, shutting down service...");
            Ok(())
        }
    }
}
