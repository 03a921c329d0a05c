use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::relay::{MailError, MailRelay};
use crate::models::OutboundMail;

/// Relay that submits mail to an SMTP server over STARTTLS.
pub struct SmtpRelay {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpRelay {
    pub fn new(host: &str, port: u16, username: &str, password: &str) -> Result<Self, MailError> {
        let creds = Credentials::new(username.to_string(), password.to_string());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| MailError::Transport(format!("SMTP relay error: {}", e)))?
            .port(port)
            .credentials(creds)
            .build();

        Ok(Self { transport })
    }
}

fn parse_mailbox(field: &'static str, address: &str) -> Result<Mailbox, MailError> {
    address.parse().map_err(|e| MailError::InvalidAddress {
        field,
        reason: format!("{}", e),
    })
}

/// Turn an outbound mail into a single-part HTML message.
pub fn build_message(mail: &OutboundMail) -> Result<Message, MailError> {
    Message::builder()
        .from(parse_mailbox("from", &mail.from)?)
        .to(parse_mailbox("to", &mail.to)?)
        .subject(mail.subject.as_str())
        .header(ContentType::TEXT_HTML)
        .body(mail.html_body.clone())
        .map_err(|e| MailError::Build(e.to_string()))
}

#[async_trait]
impl MailRelay for SmtpRelay {
    async fn send(&self, mail: &OutboundMail) -> Result<(), MailError> {
        let email = build_message(mail)?;

        let response = self
            .transport
            .send(email)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        tracing::debug!(code = %response.code(), "SMTP relay accepted message");
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "smtp"
    }
}
