use crate::config::Config;
use crate::digest::{build_digest, classify_all, classify_all_pickups, WeekWindow};
use crate::error::Error;
use crate::google_calendar::CalendarClient;
use crate::mailer::Mailer;
use std::sync::Arc;
use tokio::sync::RwLock;
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

/// Run the digest pipeline once: compute the week window, fetch both
/// calendars, classify, assemble the digest and mail it.
pub async fn run_digest(config: Arc<RwLock<Config>>) -> miette::Result<()> {
    let (tz, locale, planning_id, garbage_id) = {
        let config_read = config.read().await;
        (
            config_read.tz()?,
            config_read.display_locale()?,
            config_read.planning_calendar_id.clone(),
            config_read.garbage_calendar_id.clone(),
        )
    };

    let window = WeekWindow::current(tz)?;
    info!("Building digest for {}", window.label());

    let client = CalendarClient::new(Arc::clone(&config));
    let planning_raw = client.get_events(&planning_id, &window).await?;
    let garbage_raw = client.get_events(&garbage_id, &window).await?;
    info!(
        planning = planning_raw.len(),
        garbage = garbage_raw.len(),
        "Fetched events"
    );

    // Unclassifiable events are logged and skipped inside classify_all;
    // one malformed event must not suppress the rest of the week
    let planning = classify_all(&planning_raw, tz);
    let garbage = classify_all_pickups(&garbage_raw, tz);

    let body = build_digest(&window, &planning, &garbage, locale);

    let mailer = Mailer::new(config);
    mailer.send(&window.subject(), &body).await?;

    Ok(())
}
