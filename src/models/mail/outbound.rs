/// A fully composed message, ready to hand to a mail relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}
