use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{AppState, AppointmentRequest, OutboundMail};
use crate::utils::html_escape;

pub const CONFIRMATION_HTML: &str =
    "<h1>Booking Successful!</h1><p>Dr. Usman's team will contact you soon.</p>";
pub const FAILURE_TEXT: &str = "Error sending request. Please try again.";

/// Subject line for the clinic inbox. Mail subjects are plain text, so the name goes in as-is.
pub fn booking_subject(request: &AppointmentRequest) -> String {
    format!("New Appointment Request: {}", request.name)
}

pub fn booking_html_body(request: &AppointmentRequest) -> String {
    format!(
        "<h2>New Booking Details</h2>\n\
         <p><strong>Patient Name:</strong> {}</p>\n\
         <p><strong>Phone:</strong> {}</p>\n\
         <p><strong>Service:</strong> {}</p>\n\
         <p><strong>Preferred Date:</strong> {}</p>\n\
         <p><strong>Time Slot:</strong> {}</p>\n\
         <p><strong>Message:</strong> {}</p>\n",
        html_escape(&request.name),
        html_escape(&request.phone),
        html_escape(&request.service),
        html_escape(&request.date),
        html_escape(&request.time),
        html_escape(&request.message),
    )
}

pub fn compose_booking_mail(
    sender: &str,
    recipient: &str,
    request: &AppointmentRequest,
) -> OutboundMail {
    OutboundMail {
        from: sender.to_string(),
        to: recipient.to_string(),
        subject: booking_subject(request),
        html_body: booking_html_body(request),
    }
}

/// `POST /book-appointment`: relay the booking form to the clinic inbox.
#[tracing::instrument(
    name = "Booking appointment",
    skip(state, form),
    fields(
        request_id = %Uuid::new_v4(),
        service = %form.service,
    )
)]
pub async fn book_appointment_handler(
    state: State<Arc<AppState>>,
    form: Form<AppointmentRequest>,
) -> impl IntoResponse {
    let mail = compose_booking_mail(&state.sender, &state.recipient, &form);

    match state.mail_relay.send(&mail).await {
        Ok(()) => {
            tracing::info!(relay = state.mail_relay.kind(), "Booking email sent");
            (StatusCode::OK, Html(CONFIRMATION_HTML)).into_response()
        }
        Err(e) => {
            tracing::error!(
                relay = state.mail_relay.kind(),
                error = ?e,
                "Failed to send booking email"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, FAILURE_TEXT).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> AppointmentRequest {
        AppointmentRequest {
            name: "Jane Doe".to_string(),
            phone: "555-1234".to_string(),
            service: "Checkup".to_string(),
            date: "2024-05-01".to_string(),
            time: "10:00".to_string(),
            message: "None".to_string(),
        }
    }

    #[test]
    fn subject_carries_name_verbatim() {
        let mut request = jane();
        assert_eq!(booking_subject(&request), "New Appointment Request: Jane Doe");

        request.name = "O'Brien <Sr.>".to_string();
        assert_eq!(
            booking_subject(&request),
            "New Appointment Request: O'Brien <Sr.>"
        );
    }

    #[test]
    fn body_contains_every_field() {
        let body = booking_html_body(&jane());

        assert!(body.starts_with("<h2>New Booking Details</h2>"));
        assert!(body.contains("<p><strong>Patient Name:</strong> Jane Doe</p>"));
        assert!(body.contains("<p><strong>Phone:</strong> 555-1234</p>"));
        assert!(body.contains("<p><strong>Service:</strong> Checkup</p>"));
        assert!(body.contains("<p><strong>Preferred Date:</strong> 2024-05-01</p>"));
        assert!(body.contains("<p><strong>Time Slot:</strong> 10:00</p>"));
        assert!(body.contains("<p><strong>Message:</strong> None</p>"));
    }

    #[test]
    fn long_values_are_not_truncated() {
        let mut request = jane();
        request.message = "please call after five ".repeat(200);

        let body = booking_html_body(&request);
        assert!(body.contains(&request.message));
    }

    #[test]
    fn body_escapes_markup() {
        let mut request = jane();
        request.message = "<img src=x onerror=\"alert(1)\">".to_string();

        let body = booking_html_body(&request);
        assert!(!body.contains("<img"));
        assert!(body.contains("&lt;img src=x onerror=&quot;alert(1)&quot;&gt;"));
    }

    #[test]
    fn empty_request_renders_blank_fields() {
        let body = booking_html_body(&AppointmentRequest::default());

        assert!(body.contains("<p><strong>Patient Name:</strong> </p>"));
        assert!(body.contains("<p><strong>Message:</strong> </p>"));
        assert_eq!(
            booking_subject(&AppointmentRequest::default()),
            "New Appointment Request: "
        );
    }

    #[test]
    fn mail_is_addressed_from_configuration() {
        let mail = compose_booking_mail("frontdesk@example.com", "clinic@example.com", &jane());

        assert_eq!(mail.from, "frontdesk@example.com");
        assert_eq!(mail.to, "clinic@example.com");
        assert_eq!(mail.subject, "New Appointment Request: Jane Doe");
    }
}
