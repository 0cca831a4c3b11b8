use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    notificador::startup::init_logging()?;

    info!("Starting notificador");

    // Load configuration
    let config = notificador::startup::load_config().await?;

    // Start the service
    notificador::startup::start_service(config).await
}
