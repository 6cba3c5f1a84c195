mod build;
mod classify;
mod format;
mod week;

pub use build::build_digest;
pub use classify::{classify, classify_all, classify_all_pickups, classify_pickup, ClassifiedEvent};
pub use format::format_event;
pub use week::WeekWindow;
