use super::EmailProvider;
use crate::email::EmailMessage;
use crate::errors::Error;
use crate::utils::join_endpoint;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Provider implementation for Resend's email API
#[derive(Debug)]
pub struct ResendProvider {
    /// Resend API key
    api_key: String,
    /// Fully resolved `emails` endpoint
    endpoint: Url,
    client: Client,
}

impl ResendProvider {
    /// Creates a new Resend provider instance
    ///
    /// # Arguments
    /// * `api_key` - Resend API key
    /// * `base_url` - Base URL of the API, e.g. `https://api.resend.com/`
    /// * `timeout` - Upper bound on a single send
    pub fn new(api_key: String, base_url: &Url, timeout: Duration) -> Result<Self, Error> {
        let endpoint = join_endpoint(base_url, "emails")
            .map_err(|e| Error::Config(format!("invalid Resend base URL: {}", e)))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(ResendProvider {
            api_key,
            endpoint,
            client,
        })
    }
}

#[async_trait]
impl EmailProvider for ResendProvider {
    async fn send_email(&self, email: EmailMessage) -> Result<(), Error> {
        let res = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&email)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await?;
            return Err(Error::Provider(format!(
                "Resend API error ({}): {}",
                status, text
            )));
        }

        // The email is accepted at this point; the body only carries the message id.
        match res.text().await {
            Ok(text) => debug!("Resend accepted email: {}", text),
            Err(e) => debug!("Resend accepted email, body unreadable: {}", e),
        }
        Ok(())
    }
}
