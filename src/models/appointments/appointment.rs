use serde::Deserialize;

/// A booking submitted through the clinic's web form.
///
/// Every field is optional on the wire; anything the form leaves out
/// deserializes to an empty string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppointmentRequest {
    pub name: String,
    pub phone: String,
    pub service: String,
    pub date: String,
    pub time: String,
    pub message: String,
}
