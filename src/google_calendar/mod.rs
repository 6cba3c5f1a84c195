mod client;
pub mod models;
pub mod token;

pub use client::CalendarClient;
pub use models::{CalendarEvent, CalendarListEntry};
pub use token::TokenManager;
