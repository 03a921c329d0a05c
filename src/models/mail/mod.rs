pub mod outbound;

pub use outbound::OutboundMail;
