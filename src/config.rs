use crate::error::{config_error, env_error, BotResult};
use chrono::Locale;
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;

/// Default timezone for the digest
pub const DEFAULT_TIMEZONE: &str = "Europe/Berlin";

/// Default display locale for weekday and date tokens
pub const DEFAULT_LOCALE: &str = "de_DE";

/// Default path of the persisted OAuth token
pub const DEFAULT_TOKEN_FILE: &str = "token.json";

/// Main configuration structure for the digest bot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Google Calendar API client ID
    pub google_client_id: String,
    /// Google Calendar API client secret
    pub google_client_secret: String,
    /// Calendar ID of the internal planning calendar
    pub planning_calendar_id: String,
    /// Calendar ID of the garbage collection schedule
    pub garbage_calendar_id: String,
    /// Timezone the week window is computed in
    pub timezone: String,
    /// Display locale for weekday and date tokens
    pub locale: String,
    /// Path of the persisted OAuth token file
    pub token_file: String,
    /// SMTP server hostname
    pub smtp_server: String,
    /// SMTP server port (STARTTLS)
    pub smtp_port: u16,
    /// SMTP login, also used as the From address
    pub smtp_login: String,
    /// SMTP password
    pub smtp_password: String,
    /// Recipient addresses
    pub mail_to: Vec<String>,
    /// Reply-To address
    pub mail_reply_to: String,
}

impl Config {
    /// Load configuration from the environment
    pub fn load() -> BotResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // Required environment variables
        let google_client_id =
            env::var("GOOGLE_CLIENT_ID").map_err(|_| env_error("GOOGLE_CLIENT_ID"))?;
        let google_client_secret =
            env::var("GOOGLE_CLIENT_SECRET").map_err(|_| env_error("GOOGLE_CLIENT_SECRET"))?;
        let planning_calendar_id =
            env::var("PLANNING_CALENDAR_ID").map_err(|_| env_error("PLANNING_CALENDAR_ID"))?;
        let garbage_calendar_id =
            env::var("GARBAGE_CALENDAR_ID").map_err(|_| env_error("GARBAGE_CALENDAR_ID"))?;

        let smtp_server = env::var("SMTP_SERVER").map_err(|_| env_error("SMTP_SERVER"))?;
        let smtp_port = env::var("SMTP_PORT")
            .map_err(|_| env_error("SMTP_PORT"))?
            .parse::<u16>()
            .map_err(|_| config_error("Invalid SMTP_PORT format"))?;
        let smtp_login = env::var("SMTP_LOGIN").map_err(|_| env_error("SMTP_LOGIN"))?;
        let smtp_password = env::var("SMTP_PASSWORD").map_err(|_| env_error("SMTP_PASSWORD"))?;

        let mail_to: Vec<String> = env::var("MAIL_TO")
            .map_err(|_| env_error("MAIL_TO"))?
            .split(',')
            .map(|addr| addr.trim().to_string())
            .filter(|addr| !addr.is_empty())
            .collect();
        if mail_to.is_empty() {
            return Err(config_error("MAIL_TO contains no addresses"));
        }
        let mail_reply_to = env::var("MAIL_REPLY_TO").map_err(|_| env_error("MAIL_REPLY_TO"))?;

        // Optional variables with defaults
        let timezone = env::var("TIMEZONE").unwrap_or_else(|_| String::from(DEFAULT_TIMEZONE));
        let locale = env::var("LOCALE").unwrap_or_else(|_| String::from(DEFAULT_LOCALE));
        let token_file =
            env::var("TOKEN_FILE").unwrap_or_else(|_| String::from(DEFAULT_TOKEN_FILE));

        Ok(Config {
            google_client_id,
            google_client_secret,
            planning_calendar_id,
            garbage_calendar_id,
            timezone,
            locale,
            token_file,
            smtp_server,
            smtp_port,
            smtp_login,
            smtp_password,
            mail_to,
            mail_reply_to,
        })
    }

    /// Parse the configured timezone
    pub fn tz(&self) -> BotResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| config_error(&format!("Unknown timezone: {}", self.timezone)))
    }

    /// Parse the configured display locale
    pub fn display_locale(&self) -> BotResult<Locale> {
        Locale::try_from(self.locale.as_str())
            .map_err(|_| config_error(&format!("Unknown locale: {}", self.locale)))
    }
}
