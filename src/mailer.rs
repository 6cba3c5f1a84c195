use crate::config::Config;
use crate::error::{config_error, BotResult, Error};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::Error as SmtpError;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Sends the digest as a plain-text mail over authenticated STARTTLS
pub struct Mailer {
    config: Arc<RwLock<Config>>,
}

impl Mailer {
    pub fn new(config: Arc<RwLock<Config>>) -> Self {
        Self { config }
    }

    /// Send one mail to the configured recipients. A failure aborts the
    /// run; there is no retry.
    pub async fn send(&self, subject: &str, body: &str) -> BotResult<()> {
        let (server, port, login, password, mail_to, reply_to) = {
            let config_read = self.config.read().await;
            (
                config_read.smtp_server.clone(),
                config_read.smtp_port,
                config_read.smtp_login.clone(),
                config_read.smtp_password.clone(),
                config_read.mail_to.clone(),
                config_read.mail_reply_to.clone(),
            )
        };

        let mut builder = Message::builder()
            .from(parse_mailbox(&login)?)
            .reply_to(parse_mailbox(&reply_to)?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN);
        for addr in &mail_to {
            builder = builder.to(parse_mailbox(addr)?);
        }
        let message = builder
            .body(body.to_string())
            .map_err(|e| Error::MailProtocol(format!("Failed to build message: {}", e)))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&server)
            .map_err(classify_smtp_error)?
            .port(port)
            .credentials(Credentials::new(login, password))
            .build();

        transport.send(message).await.map_err(classify_smtp_error)?;

        info!(recipients = mail_to.len(), "Digest mail sent");
        Ok(())
    }
}

fn parse_mailbox(addr: &str) -> BotResult<Mailbox> {
    addr.parse()
        .map_err(|e| config_error(&format!("Invalid mail address '{}': {}", addr, e)))
}

/// Map an SMTP transport error onto the operator-facing taxonomy:
/// connectivity, credentials, or protocol.
fn classify_smtp_error(e: SmtpError) -> Error {
    match e.status() {
        // The 53x reply family covers rejected or missing authentication
        Some(code) if code.to_string().starts_with("53") => Error::MailAuth(e.to_string()),
        Some(_) => Error::MailProtocol(e.to_string()),
        None if e.is_client() => Error::MailProtocol(e.to_string()),
        // No server reply at all: we never got through
        None => Error::MailConnect(e.to_string()),
    }
}
