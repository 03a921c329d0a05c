pub mod appointment;

pub use appointment::AppointmentRequest;
