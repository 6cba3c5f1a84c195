use super::classify::ClassifiedEvent;
use super::format::format_event;
use super::week::WeekWindow;
use chrono::Locale;

/// Width of section separators and the event divider
const LINE_WIDTH: usize = 72;

const PLANNING_INTRO: &str =
    "Hier sind die Termine aus dem internen Planungskalender für diese Woche:";
const PLANNING_EMPTY: &str = "Keine Termine in dieser Woche.";
const GARBAGE_INTRO: &str = "Abfuhrtermine diese Woche:";
const GARBAGE_EMPTY: &str = "Keine Abfuhrtermine in dieser Woche.";

/// Assemble the digest body from the classified events of both calendars.
///
/// The result is CRLF-joined for the mail transport. Pure text assembly,
/// no I/O.
pub fn build_digest(
    window: &WeekWindow,
    planning: &[ClassifiedEvent],
    garbage: &[ClassifiedEvent],
    locale: Locale,
) -> String {
    let mut out: Vec<String> = Vec::new();

    out.push(window.label());
    out.push(String::new());

    out.push(PLANNING_INTRO.to_string());
    out.push("-".repeat(LINE_WIDTH));
    out.push(String::new());

    if planning.is_empty() {
        out.push(PLANNING_EMPTY.to_string());
    } else {
        for event in planning {
            push_block(&mut out, &format_event(event, locale));
            out.push(String::new());
            out.push(format!("{:^width$}", "***", width = LINE_WIDTH));
            out.push(String::new());
        }
    }

    out.push(String::new());
    out.push(String::new());

    out.push(GARBAGE_INTRO.to_string());
    out.push("-".repeat(LINE_WIDTH));

    if garbage.is_empty() {
        out.push(GARBAGE_EMPTY.to_string());
    } else {
        for event in garbage {
            push_block(&mut out, &format_event(event, locale));
        }
    }

    out.join("\r\n")
}

// Event blocks are newline-joined internally; split them so the final body
// uses CRLF throughout
fn push_block(out: &mut Vec<String>, block: &str) {
    out.extend(block.split('\n').map(str::to_string));
}
