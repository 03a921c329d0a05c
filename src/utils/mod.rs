pub mod html_utils;
pub mod mail;

pub use html_utils::html_escape;
