pub mod config;
pub mod digest;
pub mod error;
pub mod google_calendar;
pub mod mailer;
pub mod startup;
