pub mod book;

pub use book::book_appointment_handler;
