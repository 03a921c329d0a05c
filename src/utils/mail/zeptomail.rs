use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::relay::{MailError, MailRelay};
use crate::models::OutboundMail;

#[derive(Serialize)]
pub struct EmailAddress {
    pub address: String,
    pub name: String,
}

#[derive(Serialize)]
pub struct From {
    pub address: String,
}

#[derive(Serialize)]
pub struct To {
    pub email_address: EmailAddress,
}

#[derive(Serialize)]
pub struct EmailRequest {
    pub from: From,
    pub to: Vec<To>,
    pub subject: String,
    pub htmlbody: String,
}

impl EmailRequest {
    pub fn from_mail(mail: &OutboundMail) -> Self {
        Self {
            from: From {
                address: mail.from.clone(),
            },
            to: vec![To {
                email_address: EmailAddress {
                    address: mail.to.clone(),
                    name: mail.to.clone(),
                },
            }],
            subject: mail.subject.clone(),
            htmlbody: mail.html_body.clone(),
        }
    }
}

/// Relay that submits mail through the ZeptoMail HTTP API.
pub struct ZeptoMailRelay {
    client: Client,
    api_url: String,
    api_token: String,
}

impl ZeptoMailRelay {
    pub fn new(api_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            api_token: api_token.into(),
        }
    }
}

#[async_trait]
impl MailRelay for ZeptoMailRelay {
    async fn send(&self, mail: &OutboundMail) -> Result<(), MailError> {
        let email_request = EmailRequest::from_mail(mail);

        let response = self
            .client
            .post(&self.api_url)
            .header("Accept", "application/json")
            .header("Authorization", &self.api_token)
            .json(&email_request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Api {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(status = status.as_u16(), "ZeptoMail accepted message");
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "zeptomail"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_mail() -> OutboundMail {
        OutboundMail {
            from: "noreply@example.com".to_string(),
            to: "clinic@example.com".to_string(),
            subject: "New Appointment Request: Jane Doe".to_string(),
            html_body: "<h2>New Booking Details</h2>".to_string(),
        }
    }

    #[tokio::test]
    async fn posts_message_with_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1.1/email"))
            .and(header("Authorization", "Zoho-enczapikey test-token"))
            .and(body_json(serde_json::json!({
                "from": { "address": "noreply@example.com" },
                "to": [{
                    "email_address": {
                        "address": "clinic@example.com",
                        "name": "clinic@example.com"
                    }
                }],
                "subject": "New Appointment Request: Jane Doe",
                "htmlbody": "<h2>New Booking Details</h2>"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "message": "OK"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let relay = ZeptoMailRelay::new(
            format!("{}/v1.1/email", mock_server.uri()),
            "Zoho-enczapikey test-token",
        );

        relay.send(&sample_mail()).await.unwrap();
    }

    #[tokio::test]
    async fn rejected_request_is_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api token"))
            .mount(&mock_server)
            .await;

        let relay = ZeptoMailRelay::new(mock_server.uri(), "bad-token");

        match relay.send(&sample_mail()).await {
            Err(MailError::Api { status, body }) => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid api token");
            }
            other => panic!("expected api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unreachable_api_is_an_error() {
        // Nothing listens on the discard port
        let relay = ZeptoMailRelay::new("http://127.0.0.1:9/v1.1/email", "token");

        let result = relay.send(&sample_mail()).await;
        assert!(matches!(result, Err(MailError::Http(_))));
    }
}
