use crate::email::EmailMessage;
use crate::errors::Error;
use async_trait::async_trait;
use std::fmt::Debug;

pub mod resend;

#[async_trait]
pub trait EmailProvider: Debug + Send + Sync {
    async fn send_email(&self, email: EmailMessage) -> Result<(), Error>;
}
