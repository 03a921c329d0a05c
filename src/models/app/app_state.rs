use std::sync::Arc;

use crate::utils::mail::MailRelay;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub mail_relay: Arc<dyn MailRelay>,
    pub sender: String,
    pub recipient: String,
}
