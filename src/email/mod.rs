//! Outbound email delivery for contact-form submissions.

mod mailer;
pub mod providers;

pub use mailer::*;

use serde::Serialize;

/// A single outbound email, in the shape transactional providers expect
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
    pub reply_to: String,
}
