use anyhow::{bail, Context, Result};
use lettre::message::Mailbox;
use std::fmt;

const DEFAULT_PORT: u16 = 10000;
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_ZEPTOMAIL_API_URL: &str = "https://api.zeptomail.com/v1.1/email";

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub sender: String,
    pub recipient: String,
    pub relay: RelaySettings,
}

/// Which relay delivers booking mail, and how to log in to it.
#[derive(Clone)]
pub enum RelaySettings {
    Smtp {
        host: String,
        port: u16,
        username: String,
        credential: String,
    },
    ZeptoMail {
        api_url: String,
        credential: String,
    },
}

impl fmt::Debug for RelaySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelaySettings::Smtp {
                host,
                port,
                username,
                ..
            } => f
                .debug_struct("Smtp")
                .field("host", host)
                .field("port", port)
                .field("username", username)
                .field("credential", &"[redacted]")
                .finish(),
            RelaySettings::ZeptoMail { api_url, .. } => f
                .debug_struct("ZeptoMail")
                .field("api_url", api_url)
                .field("credential", &"[redacted]")
                .finish(),
        }
    }
}

impl Config {
    /// Load from the process environment, after pulling in a `.env` file if one exists.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Treat blank values the same as unset ones
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match var("PORT") {
            Some(value) => value.parse().context("Invalid PORT")?,
            None => DEFAULT_PORT,
        };

        let credential =
            var("MAIL_RELAY_CREDENTIAL").context("MAIL_RELAY_CREDENTIAL is required")?;
        let recipient = var("MAIL_RECIPIENT").context("MAIL_RECIPIENT is required")?;
        let username = var("MAIL_RELAY_USER");

        let relay_kind = var("MAIL_RELAY").unwrap_or_else(|| "smtp".to_string());
        let relay = match relay_kind.to_lowercase().as_str() {
            "smtp" => RelaySettings::Smtp {
                host: var("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
                port: match var("SMTP_PORT") {
                    Some(value) => value.parse().context("Invalid SMTP_PORT")?,
                    None => DEFAULT_SMTP_PORT,
                },
                username: username
                    .clone()
                    .context("MAIL_RELAY_USER is required for the smtp relay")?,
                credential,
            },
            "zeptomail" => RelaySettings::ZeptoMail {
                api_url: var("ZEPTOMAIL_API_URL")
                    .unwrap_or_else(|| DEFAULT_ZEPTOMAIL_API_URL.to_string()),
                credential,
            },
            other => bail!(
                "{} is not a supported mail relay. Use either `smtp` or `zeptomail`.",
                other
            ),
        };

        // The relay login doubles as the sender unless told otherwise
        let sender = var("MAIL_SENDER")
            .or(username)
            .context("MAIL_SENDER is required when MAIL_RELAY_USER is not set")?;

        check_mailbox("MAIL_SENDER", &sender)?;
        check_mailbox("MAIL_RECIPIENT", &recipient)?;

        Ok(Self {
            port,
            sender,
            recipient,
            relay,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// Reject addresses the relay could never deliver to, so a typo stops startup.
fn check_mailbox(key: &str, address: &str) -> Result<()> {
    address
        .parse::<Mailbox>()
        .map(|_| ())
        .with_context(|| format!("Invalid {} address: {}", key, address))
}
