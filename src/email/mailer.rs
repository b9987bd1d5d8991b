use crate::constants::CONTACT_SUBJECT_PREFIX;
use crate::core::ContactSubmission;
use crate::email::providers::EmailProvider;
use crate::email::EmailMessage;
use crate::errors::Error;
use std::sync::Arc;
use tracing::info;

/// Forwards contact-form submissions to a fixed recipient.
#[derive(Debug, Clone)]
pub struct ContactMailer {
    provider: Arc<dyn EmailProvider>,
    from: String,
    to: String,
}

impl ContactMailer {
    pub fn new(provider: Arc<dyn EmailProvider>, from: String, to: String) -> Self {
        ContactMailer { provider, from, to }
    }

    /// Builds the outbound email for a submission; the submitter becomes the reply-to address.
    pub fn compose(&self, submission: &ContactSubmission) -> EmailMessage {
        EmailMessage {
            from: self.from.clone(),
            to: vec![self.to.clone()],
            subject: format!("{}{}", CONTACT_SUBJECT_PREFIX, submission.subject),
            text: format!(
                "Name: {}\nEmail: {}\n\n{}",
                submission.name, submission.email, submission.message
            ),
            reply_to: submission.email.clone(),
        }
    }

    /// Sends exactly one email for the submission.
    pub async fn send(&self, submission: &ContactSubmission) -> Result<(), Error> {
        let email = self.compose(submission);
        self.provider.send_email(email).await?;
        info!("Contact email from {} forwarded", submission.email);
        Ok(())
    }
}
