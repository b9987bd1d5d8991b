use crate::config::RelayConfig;
use crate::core::RateLimiter;
use crate::email::providers::resend::ResendProvider;
use crate::email::ContactMailer;
use crate::errors::Error;
use crate::llm::providers::openai::OpenAiProvider;
use crate::llm::LlmClient;
use std::sync::Arc;

/// Shared state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// `None` when the email integration is not configured
    pub mailer: Option<ContactMailer>,
    pub rate_limiter: Arc<RateLimiter>,
    /// Number of trusted reverse-proxy hops
    pub trust_proxy: usize,
}

impl AppState {
    /// Wires the production providers from the resolved configuration
    pub fn from_config(config: &RelayConfig) -> Result<Self, Error> {
        let provider = OpenAiProvider::new(
            config.openai.api_key.clone(),
            &config.openai.base_url,
            config.provider_timeout,
        )?;
        let llm = LlmClient::new(Arc::new(provider), &config.prompt);

        let mailer = match &config.email {
            Some(email) => {
                let provider = ResendProvider::new(
                    email.api_key.clone(),
                    &email.base_url,
                    config.provider_timeout,
                )?;
                Some(ContactMailer::new(
                    Arc::new(provider),
                    email.from.clone(),
                    email.to.clone(),
                ))
            }
            None => None,
        };

        Ok(AppState {
            llm,
            mailer,
            rate_limiter: Arc::new(RateLimiter::new(
                config.rate_limit.window,
                config.rate_limit.max_requests,
            )),
            trust_proxy: config.trust_proxy,
        })
    }
}
