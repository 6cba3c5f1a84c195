use std::sync::Arc;
use terminbote::config::Config;
use terminbote::error::BotResult;
use terminbote::google_calendar::CalendarClient;
use tokio::sync::RwLock;

/// Prints the calendar IDs this credential has access to, for picking the
/// PLANNING_CALENDAR_ID and GARBAGE_CALENDAR_ID values.
#[tokio::main]
async fn main() -> BotResult<()> {
    let config = Arc::new(RwLock::new(Config::load()?));

    let client = CalendarClient::new(config);
    let calendars = client.list_calendars().await?;

    let sep = "  ";
    let mut len_id = "ID".len();
    let mut len_summary = "Summary".len();
    for cal in &calendars {
        len_id = len_id.max(cal.id.len());
        len_summary = len_summary.max(cal.summary.len());
    }
    let total = len_id + sep.len() + len_summary;

    println!("{:^total$}", ">>> Calendars <<<");
    println!("{}", "-".repeat(total));
    println!("{:<len_id$}{}{:<len_summary$}", "ID", sep, "Summary");
    println!("{}", "=".repeat(total));
    for cal in &calendars {
        println!("{:<len_id$}{}{:<len_summary$}", cal.id, sep, cal.summary);
    }
    println!("{}", "-".repeat(total));

    Ok(())
}
