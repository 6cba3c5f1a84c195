use terminbote::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting terminbote");

    // Load configuration
    let config = startup::load_config().await?;

    // Build and send this week's digest
    startup::run_digest(config).await
}
