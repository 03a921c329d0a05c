pub mod relay;
pub mod smtp;
pub mod zeptomail;

use std::sync::Arc;

use crate::config::RelaySettings;

pub use relay::{MailError, MailRelay};
pub use smtp::SmtpRelay;
pub use zeptomail::ZeptoMailRelay;

#[cfg(test)]
pub use relay::MockMailRelay;

/// Build the relay named by the configuration. Called once at startup.
pub fn relay_from_settings(settings: &RelaySettings) -> Result<Arc<dyn MailRelay>, MailError> {
    let relay: Arc<dyn MailRelay> = match settings {
        RelaySettings::Smtp {
            host,
            port,
            username,
            credential,
        } => Arc::new(SmtpRelay::new(host, *port, username, credential)?),
        RelaySettings::ZeptoMail {
            api_url,
            credential,
        } => Arc::new(ZeptoMailRelay::new(api_url.clone(), credential.clone())),
    };
    Ok(relay)
}
