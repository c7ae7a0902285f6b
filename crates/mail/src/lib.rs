//! Transactional email over SMTP.
//!
//! [`Mailer`] wraps the `lettre` async SMTP transport. Configuration is
//! loaded from environment variables; if `SMTP_HOST` is not set,
//! [`EmailConfig::from_env`] returns `None` and no mailer should be built.

use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Port that speaks TLS from the first byte instead of upgrading.
const IMPLICIT_TLS_PORT: u16 = 465;

/// Default sender display name when `SMTP_FROM_NAME` is not set.
const DEFAULT_FROM_NAME: &str = "Safety Vitals";

/// Configuration for the SMTP relay.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// Optional SMTP username. Also the default sender address.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
    /// Sender display name.
    pub from_name: String,
    /// Sender address used when a request does not supply one.
    pub from_address: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured.
    ///
    /// # Panics
    ///
    /// Panics if `SMTP_PORT` is set but is not a valid port number.
    ///
    /// | Variable         | Required | Default          |
    /// |------------------|----------|------------------|
    /// | `SMTP_HOST`      | yes      |                  |
    /// | `SMTP_PORT`      | no       | `587`            |
    /// | `SMTP_USER`      | no       |                  |
    /// | `SMTP_PASSWORD`  | no       |                  |
    /// | `SMTP_FROM_NAME` | no       | `Safety Vitals`  |
    /// | `SMTP_FROM`      | no       | `SMTP_USER`      |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        let smtp_user = std::env::var("SMTP_USER").ok();
        Some(Self {
            smtp_host,
            smtp_port: parse_port(std::env::var("SMTP_PORT").ok().as_deref()),
            from_address: std::env::var("SMTP_FROM").ok().or_else(|| smtp_user.clone()),
            smtp_user,
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            from_name: std::env::var("SMTP_FROM_NAME")
                .unwrap_or_else(|_| DEFAULT_FROM_NAME.to_string()),
        })
    }
}

fn parse_port(raw: Option<&str>) -> u16 {
    raw.map(|p| p.trim().parse().expect("SMTP_PORT must be a valid u16"))
        .unwrap_or(DEFAULT_SMTP_PORT)
}

// ---------------------------------------------------------------------------
// OutgoingEmail
// ---------------------------------------------------------------------------

/// A message to send. At least one of `html` or `text` must be present.
#[derive(Debug, Clone, Default)]
pub struct OutgoingEmail {
    /// One address, or several separated by commas.
    pub to: String,
    pub subject: String,
    pub html: Option<String>,
    pub text: Option<String>,
    /// Overrides [`EmailConfig::from_name`].
    pub from_name: Option<String>,
    /// Overrides [`EmailConfig::from_address`].
    pub from_email: Option<String>,
}

// ---------------------------------------------------------------------------
// Mailer
// ---------------------------------------------------------------------------

/// Sends transactional email through the configured relay.
///
/// The transport keeps a connection pool, so build one `Mailer` at startup
/// and share it.
pub struct Mailer {
    config: EmailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl Mailer {
    /// Create a mailer for the given relay configuration.
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        let builder = if config.smtp_port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
        };
        let mut builder = builder.port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            config,
        })
    }

    /// Send a message.
    pub async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
        let message = build_message(&self.config, email)?;
        self.transport.send(message).await?;
        tracing::info!(to = %email.to, subject = %email.subject, "Email sent");
        Ok(())
    }
}

/// Assemble the MIME message for `email` using `config` for sender defaults.
///
/// With both bodies present the message is `multipart/alternative`.
pub fn build_message(config: &EmailConfig, email: &OutgoingEmail) -> Result<Message, EmailError> {
    let from_address = email
        .from_email
        .as_deref()
        .or(config.from_address.as_deref())
        .ok_or_else(|| EmailError::Build("No sender address configured".to_string()))?;
    let from_name = email
        .from_name
        .clone()
        .unwrap_or_else(|| config.from_name.clone());
    let from = Mailbox::new(Some(from_name), from_address.parse()?);

    let mut builder = Message::builder().from(from).subject(email.subject.clone());
    for recipient in email.to.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        builder = builder.to(Mailbox::new(None, recipient.parse()?));
    }

    let result = match (&email.html, &email.text) {
        (Some(html), Some(text)) => {
            builder.multipart(MultiPart::alternative_plain_html(text.clone(), html.clone()))
        }
        (Some(html), None) => builder.singlepart(
            SinglePart::builder()
                .header(ContentType::TEXT_HTML)
                .body(html.clone()),
        ),
        (None, Some(text)) => builder.singlepart(
            SinglePart::builder()
                .header(ContentType::TEXT_PLAIN)
                .body(text.clone()),
        ),
        (None, None) => return Err(EmailError::Build("Email has no body".to_string())),
    };

    result.map_err(|e| EmailError::Build(e.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
