// src/models/mod.rs

pub mod app;
pub mod appointments;
pub mod mail;

pub use app::AppState;
pub use appointments::AppointmentRequest;
pub use mail::OutboundMail;
