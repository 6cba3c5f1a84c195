use crate::error::{classification_error, BotResult};
use crate::google_calendar::CalendarEvent;
use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use tracing::warn;

/// A raw calendar event resolved to exactly one temporal shape.
///
/// Timed variants come from `dateTime` fields, the all-day variants from
/// whole-day `date` fields. `DateOnly` is the shape of garbage collection
/// entries and carries no description even when one is present upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedEvent {
    TimedRange {
        start: DateTime<Tz>,
        end: DateTime<Tz>,
        summary: String,
        description: Option<String>,
    },
    TimedStart {
        start: DateTime<Tz>,
        summary: String,
        description: Option<String>,
    },
    DateRange {
        start_day: NaiveDate,
        end_day: NaiveDate,
        summary: String,
        description: Option<String>,
    },
    DateOnly {
        day: NaiveDate,
        summary: String,
    },
}

/// Classify a raw event by which of its time fields are present.
///
/// `dateTime` fields take precedence over `date` fields; an event without
/// any recognizable start field (or without a summary) is rejected.
pub fn classify(event: &CalendarEvent, tz: Tz) -> BotResult<ClassifiedEvent> {
    let summary = event
        .summary
        .clone()
        .ok_or_else(|| classification_error(&format!("Event {} has no summary", event.id)))?;
    let description = event.description.clone();

    let start_date_time = parse_date_time(event.start_date_time.as_deref(), &event.id, tz)?;
    let end_date_time = parse_date_time(event.end_date_time.as_deref(), &event.id, tz)?;
    let start_date = parse_date(event.start_date.as_deref(), &event.id)?;
    let end_date = parse_date(event.end_date.as_deref(), &event.id)?;

    match (start_date_time, end_date_time, start_date, end_date) {
        (Some(start), Some(end), _, _) => Ok(ClassifiedEvent::TimedRange {
            start,
            end,
            summary,
            description,
        }),
        (Some(start), None, _, _) => Ok(ClassifiedEvent::TimedStart {
            start,
            summary,
            description,
        }),
        (None, None, Some(start_day), Some(end_day)) => Ok(ClassifiedEvent::DateRange {
            start_day,
            end_day,
            summary,
            description,
        }),
        (None, None, Some(day), None) => Ok(ClassifiedEvent::DateOnly { day, summary }),
        (None, Some(_), _, _) => Err(classification_error(&format!(
            "Event {} has an end dateTime but no start dateTime",
            event.id
        ))),
        (None, None, None, _) => Err(classification_error(&format!(
            "Event {} has neither a start dateTime nor a start date",
            event.id
        ))),
    }
}

/// Classify a garbage collection entry.
///
/// Pickups are whole-day, single-day items, but the Calendar API returns
/// them with an exclusive all-day end date, which would classify as
/// `DateRange`. Coerce every shape down to `DateOnly` on the start day so
/// each pickup renders as one line, end date and description dropped.
pub fn classify_pickup(event: &CalendarEvent, tz: Tz) -> BotResult<ClassifiedEvent> {
    let (day, summary) = match classify(event, tz)? {
        ClassifiedEvent::DateOnly { day, summary } => (day, summary),
        ClassifiedEvent::DateRange {
            start_day, summary, ..
        } => (start_day, summary),
        ClassifiedEvent::TimedRange { start, summary, .. }
        | ClassifiedEvent::TimedStart { start, summary, .. } => (start.date_naive(), summary),
    };

    Ok(ClassifiedEvent::DateOnly { day, summary })
}

/// Classify a batch of events, logging and skipping the unclassifiable ones
pub fn classify_all(events: &[CalendarEvent], tz: Tz) -> Vec<ClassifiedEvent> {
    skip_failures(events, |event| classify(event, tz))
}

/// Classify a batch of garbage collection entries, logging and skipping the
/// unclassifiable ones
pub fn classify_all_pickups(events: &[CalendarEvent], tz: Tz) -> Vec<ClassifiedEvent> {
    skip_failures(events, |event| classify_pickup(event, tz))
}

fn skip_failures(
    events: &[CalendarEvent],
    classify_one: impl Fn(&CalendarEvent) -> BotResult<ClassifiedEvent>,
) -> Vec<ClassifiedEvent> {
    events
        .iter()
        .filter_map(|event| match classify_one(event) {
            Ok(classified) => Some(classified),
            Err(e) => {
                warn!(event_id = %event.id, "Skipping event: {}", e);
                None
            }
        })
        .collect()
}

fn parse_date_time(value: Option<&str>, id: &str, tz: Tz) -> BotResult<Option<DateTime<Tz>>> {
    value
        .map(|s| {
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&tz))
                .map_err(|e| {
                    classification_error(&format!("Event {} has a bad dateTime '{}': {}", id, s, e))
                })
        })
        .transpose()
}

fn parse_date(value: Option<&str>, id: &str) -> BotResult<Option<NaiveDate>> {
    value
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
                classification_error(&format!("Event {} has a bad date '{}': {}", id, s, e))
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Berlin;

    fn raw(
        start_date_time: Option<&str>,
        end_date_time: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> CalendarEvent {
        CalendarEvent {
            id: "event1".to_string(),
            summary: Some("Test Event".to_string()),
            description: Some("Details".to_string()),
            start_date_time: start_date_time.map(str::to_string),
            end_date_time: end_date_time.map(str::to_string),
            start_date: start_date.map(str::to_string),
            end_date: end_date.map(str::to_string),
        }
    }

    #[test]
    fn test_timed_range() {
        let event = raw(
            Some("2023-01-02T09:00:00+01:00"),
            Some("2023-01-02T09:30:00+01:00"),
            None,
            None,
        );
        let classified = classify(&event, Berlin).unwrap();
        assert_eq!(
            classified,
            ClassifiedEvent::TimedRange {
                start: Berlin.with_ymd_and_hms(2023, 1, 2, 9, 0, 0).unwrap(),
                end: Berlin.with_ymd_and_hms(2023, 1, 2, 9, 30, 0).unwrap(),
                summary: "Test Event".to_string(),
                description: Some("Details".to_string()),
            }
        );
    }

    #[test]
    fn test_timed_start_without_end() {
        let event = raw(Some("2023-01-02T09:00:00+01:00"), None, None, None);
        assert!(matches!(
            classify(&event, Berlin).unwrap(),
            ClassifiedEvent::TimedStart { .. }
        ));
    }

    #[test]
    fn test_date_range() {
        let event = raw(None, None, Some("2023-01-02"), Some("2023-01-05"));
        assert!(matches!(
            classify(&event, Berlin).unwrap(),
            ClassifiedEvent::DateRange { .. }
        ));
    }

    #[test]
    fn test_date_only_drops_description() {
        let event = raw(None, None, Some("2023-01-05"), None);
        let classified = classify(&event, Berlin).unwrap();
        assert_eq!(
            classified,
            ClassifiedEvent::DateOnly {
                day: NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
                summary: "Test Event".to_string(),
            }
        );
    }

    #[test]
    fn test_date_time_wins_over_date() {
        // Both representations present: the timed one is more specific
        let event = raw(
            Some("2023-01-02T09:00:00+01:00"),
            Some("2023-01-02T09:30:00+01:00"),
            Some("2023-01-02"),
            Some("2023-01-03"),
        );
        assert!(matches!(
            classify(&event, Berlin).unwrap(),
            ClassifiedEvent::TimedRange { .. }
        ));
    }

    #[test]
    fn test_no_start_field_is_rejected() {
        let event = raw(None, None, None, None);
        let err = classify(&event, Berlin).unwrap_err();
        assert!(matches!(err, crate::error::Error::Classification(_)));
        assert!(err.to_string().contains("event1"));
    }

    #[test]
    fn test_missing_summary_is_rejected() {
        let mut event = raw(Some("2023-01-02T09:00:00+01:00"), None, None, None);
        event.summary = None;
        assert!(classify(&event, Berlin).is_err());
    }

    #[test]
    fn test_pickup_with_exclusive_end_date_becomes_date_only() {
        // The API returns all-day pickups with an exclusive end date one day
        // after the start; the garbage path must not treat that as a range
        let event = raw(None, None, Some("2023-01-05"), Some("2023-01-06"));
        let classified = classify_pickup(&event, Berlin).unwrap();
        assert_eq!(
            classified,
            ClassifiedEvent::DateOnly {
                day: NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
                summary: "Test Event".to_string(),
            }
        );
    }

    #[test]
    fn test_pickup_with_timed_start_keeps_only_the_day() {
        let event = raw(
            Some("2023-01-05T07:00:00+01:00"),
            Some("2023-01-05T08:00:00+01:00"),
            None,
            None,
        );
        assert_eq!(
            classify_pickup(&event, Berlin).unwrap(),
            ClassifiedEvent::DateOnly {
                day: NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
                summary: "Test Event".to_string(),
            }
        );
    }

    #[test]
    fn test_pickup_without_start_field_is_rejected() {
        let event = raw(None, None, None, None);
        assert!(classify_pickup(&event, Berlin).is_err());
    }

    #[test]
    fn test_classify_all_skips_bad_events() {
        let events = vec![
            raw(Some("2023-01-02T09:00:00+01:00"), None, None, None),
            raw(None, None, None, None),
            raw(None, None, Some("2023-01-05"), None),
        ];
        let classified = classify_all(&events, Berlin);
        assert_eq!(classified.len(), 2);
    }
}
