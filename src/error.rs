use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(terminbote::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(terminbote::config))]
    Config(String),

    #[error("Google Calendar API error: {0}")]
    #[diagnostic(code(terminbote::google_calendar))]
    GoogleCalendar(String),

    #[error("Unclassifiable event: {0}")]
    #[diagnostic(code(terminbote::classification))]
    Classification(String),

    #[error("Failed to connect to the mail server: {0}")]
    #[diagnostic(
        code(terminbote::mail_connect),
        help("Check SMTP_SERVER and SMTP_PORT")
    )]
    MailConnect(String),

    #[error("Mail server rejected the credentials: {0}")]
    #[diagnostic(
        code(terminbote::mail_auth),
        help("Check SMTP_LOGIN and SMTP_PASSWORD")
    )]
    MailAuth(String),

    #[error("SMTP error: {0}")]
    #[diagnostic(code(terminbote::mail_protocol))]
    MailProtocol(String),

    #[error(transparent)]
    #[diagnostic(code(terminbote::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(terminbote::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(terminbote::other))]
    Other(String),
}

// Implement From for JSON serialization errors (token file handling)
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type BotResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create Google Calendar errors
pub fn google_calendar_error(message: &str) -> Error {
    Error::GoogleCalendar(message.to_string())
}

/// Helper to create classification errors
pub fn classification_error(message: &str) -> Error {
    Error::Classification(message.to_string())
}

/// Helper to create other errors
#[allow(dead_code)]
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
