use async_trait::async_trait;
use thiserror::Error;

use crate::models::OutboundMail;

/// Everything that can go wrong while handing a message to the relay.
#[derive(Error, Debug)]
pub enum MailError {
    #[error("Invalid {field} address: {reason}")]
    InvalidAddress { field: &'static str, reason: String },

    #[error("Failed to build email: {0}")]
    Build(String),

    #[error("SMTP send error: {0}")]
    Transport(String),

    #[error("Mail API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Mail API request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// An outbound mail relay. One call is one delivery attempt.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailRelay: Send + Sync {
    async fn send(&self, mail: &OutboundMail) -> Result<(), MailError>;

    /// Short name used in logs.
    fn kind(&self) -> &'static str;
}
