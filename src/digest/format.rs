use super::classify::ClassifiedEvent;
use chrono::{DateTime, Duration, Locale, NaiveDate};
use chrono_tz::Tz;

/// Full format for timed events: weekday, localized date, time of day
const FULL_DATETIME: &str = "%A, %x %H:%M";
/// Short format for the end of a same-day timed range
const SHORT_TIME: &str = "%H:%M";
/// Full format for all-day events: weekday, localized date
const FULL_DATE: &str = "%A, %x";

/// Render one classified event as a block of newline-joined lines.
///
/// Timed and date-range shapes get a date line, the summary line and an
/// optional description line. `DateOnly` renders as a single
/// "weekday, date summary" line.
pub fn format_event(event: &ClassifiedEvent, locale: Locale) -> String {
    let mut out = Vec::new();

    match event {
        ClassifiedEvent::TimedRange {
            start,
            end,
            summary,
            description,
        } => {
            out.push(span_date_times(start, end, locale));
            out.push(summary.clone());
            if let Some(description) = description {
                out.push(description.clone());
            }
        }
        ClassifiedEvent::TimedStart {
            start,
            summary,
            description,
        } => {
            out.push(start.format_localized(FULL_DATETIME, locale).to_string());
            out.push(summary.clone());
            if let Some(description) = description {
                out.push(description.clone());
            }
        }
        ClassifiedEvent::DateRange {
            start_day,
            end_day,
            summary,
            description,
        } => {
            out.push(span_dates(*start_day, *end_day, locale));
            out.push(summary.clone());
            if let Some(description) = description {
                out.push(description.clone());
            }
        }
        ClassifiedEvent::DateOnly { day, summary } => {
            out.push(format!(
                "{} {}",
                day.format_localized(FULL_DATE, locale),
                summary
            ));
        }
    }

    out.join("\n")
}

/// Day-spanning rule for timed ranges: a range of at least one full day
/// collapses to its start, a shorter one renders as "start – end-time"
fn span_date_times(start: &DateTime<Tz>, end: &DateTime<Tz>, locale: Locale) -> String {
    if *end - *start >= Duration::days(1) {
        start.format_localized(FULL_DATETIME, locale).to_string()
    } else {
        format!(
            "{} – {}",
            start.format_localized(FULL_DATETIME, locale),
            end.format_localized(SHORT_TIME, locale)
        )
    }
}

/// Day-spanning rule for all-day ranges, same policy on whole days.
/// Note the all-day end date from the Calendar API is exclusive, so even a
/// single-day "range" spans one day and collapses to its start.
fn span_dates(start_day: NaiveDate, end_day: NaiveDate, locale: Locale) -> String {
    if end_day - start_day >= Duration::days(1) {
        start_day.format_localized(FULL_DATE, locale).to_string()
    } else {
        format!(
            "{} – {}",
            start_day.format_localized(FULL_DATE, locale),
            end_day.format_localized(FULL_DATE, locale)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Berlin;

    fn timed_range(end_h: u32, end_d: u32) -> ClassifiedEvent {
        ClassifiedEvent::TimedRange {
            start: Berlin.with_ymd_and_hms(2023, 1, 2, 9, 0, 0).unwrap(),
            end: Berlin.with_ymd_and_hms(2023, 1, end_d, end_h, 30, 0).unwrap(),
            summary: "Standup".to_string(),
            description: None,
        }
    }

    #[test]
    fn test_timed_range_same_day() {
        let block = format_event(&timed_range(9, 2), Locale::de_DE);
        assert_eq!(block, "Montag, 02.01.2023 09:00 – 09:30\nStandup");
    }

    #[test]
    fn test_timed_range_spanning_a_day_collapses_to_start() {
        // The end of a multi-day meeting is discarded entirely, matching the
        // observed behavior of the deployed bot
        let block = format_event(&timed_range(9, 4), Locale::de_DE);
        assert_eq!(block, "Montag, 02.01.2023 09:00\nStandup");
        assert!(!block.contains('–'));
    }

    #[test]
    fn test_timed_range_just_under_one_day_keeps_the_end() {
        let event = ClassifiedEvent::TimedRange {
            start: Berlin.with_ymd_and_hms(2023, 1, 2, 9, 0, 0).unwrap(),
            end: Berlin.with_ymd_and_hms(2023, 1, 3, 8, 59, 0).unwrap(),
            summary: "Lan-Party".to_string(),
            description: None,
        };
        let block = format_event(&event, Locale::de_DE);
        assert_eq!(block, "Montag, 02.01.2023 09:00 – 08:59\nLan-Party");
    }

    #[test]
    fn test_timed_start_with_description() {
        let event = ClassifiedEvent::TimedStart {
            start: Berlin.with_ymd_and_hms(2023, 1, 2, 19, 0, 0).unwrap(),
            summary: "Vereinsabend".to_string(),
            description: Some("Offener Abend".to_string()),
        };
        let block = format_event(&event, Locale::de_DE);
        assert_eq!(
            block,
            "Montag, 02.01.2023 19:00\nVereinsabend\nOffener Abend"
        );
    }

    #[test]
    fn test_date_range_spanning_days_collapses_to_start() {
        let event = ClassifiedEvent::DateRange {
            start_day: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
            end_day: NaiveDate::from_ymd_opt(2023, 1, 4).unwrap(),
            summary: "Conference".to_string(),
            description: None,
        };
        let block = format_event(&event, Locale::de_DE);
        assert_eq!(block, "Montag, 02.01.2023\nConference");
    }

    #[test]
    fn test_date_range_same_day_keeps_both_sides() {
        let event = ClassifiedEvent::DateRange {
            start_day: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
            end_day: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
            summary: "Inventur".to_string(),
            description: None,
        };
        let block = format_event(&event, Locale::de_DE);
        assert_eq!(
            block,
            "Montag, 02.01.2023 – Montag, 02.01.2023\nInventur"
        );
    }

    #[test]
    fn test_date_only_is_a_single_line() {
        let event = ClassifiedEvent::DateOnly {
            day: NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
            summary: "Papier".to_string(),
        };
        let block = format_event(&event, Locale::de_DE);
        assert_eq!(block, "Donnerstag, 05.01.2023 Papier");
        assert!(!block.contains('\n'));
    }

    #[test]
    fn test_locale_is_threaded_through() {
        let de = format_event(&timed_range(9, 2), Locale::de_DE);
        let en = format_event(&timed_range(9, 2), Locale::en_US);
        assert!(de.starts_with("Montag"));
        assert!(en.starts_with("Monday"));
    }
}
