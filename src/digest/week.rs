use crate::error::{other_error, BotResult};
use chrono::{DateTime, Datelike, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// The Monday-to-Sunday boundary of one ISO week in a fixed timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    /// Monday 00:00:00 local time
    pub start: DateTime<Tz>,
    /// Sunday 23:59:59 local time
    pub end: DateTime<Tz>,
}

impl WeekWindow {
    /// Window of the current week
    pub fn current(tz: Tz) -> BotResult<Self> {
        Self::containing(Utc::now().with_timezone(&tz))
    }

    /// Window of the week containing the given instant
    pub fn containing(now: DateTime<Tz>) -> BotResult<Self> {
        let tz = now.timezone();

        // Walk back to Monday of the current week, then forward to Sunday
        let monday = now.date_naive()
            - Duration::days(i64::from(now.weekday().num_days_from_monday()));
        let sunday = monday + Duration::days(6);

        let start = monday
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| other_error("Failed to create week start datetime"))?;
        let end = sunday
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| other_error("Failed to create week end datetime"))?;

        Ok(Self {
            start: resolve_local(&tz, &start)?,
            end: resolve_local(&tz, &end)?,
        })
    }

    /// Lower query bound as an RFC3339 timestamp with offset
    pub fn time_min(&self) -> String {
        self.start.to_rfc3339()
    }

    /// Upper query bound as an RFC3339 timestamp with offset
    pub fn time_max(&self) -> String {
        self.end.to_rfc3339()
    }

    /// Week label, e.g. "KW 35 (25.08. bis 31.08.)"
    pub fn label(&self) -> String {
        format!(
            "KW {} ({} bis {})",
            self.start.format("%V"),
            self.start.format("%d.%m."),
            self.end.format("%d.%m.")
        )
    }

    /// Mail subject line for this week's digest
    pub fn subject(&self) -> String {
        format!("Termine für {}", self.label())
    }
}

/// Resolve a naive local datetime in the given timezone
fn resolve_local(tz: &Tz, naive: &NaiveDateTime) -> BotResult<DateTime<Tz>> {
    match tz.from_local_datetime(naive) {
        chrono::LocalResult::Single(dt) => Ok(dt),
        chrono::LocalResult::Ambiguous(_, _) => Err(other_error("Ambiguous local time")),
        chrono::LocalResult::None => Err(other_error("Invalid local time")),
    }
}
