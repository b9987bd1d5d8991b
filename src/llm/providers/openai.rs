use super::{CompletionOptions, LlmProvider};
use crate::errors::Error;
use crate::llm::ChatMessage;
use crate::utils::join_endpoint;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Provider implementation for OpenAI's chat completions API
#[derive(Debug)]
pub struct OpenAiProvider {
    /// OpenAI API key, if configured
    api_key: Option<String>,
    /// Fully resolved `chat/completions` endpoint
    endpoint: Url,
    client: Client,
}

impl OpenAiProvider {
    /// Creates a new OpenAI provider instance
    ///
    /// # Arguments
    /// * `api_key` - API key; calls fail with a provider error while it is missing
    /// * `base_url` - Base URL of the API, e.g. `https://api.openai.com/v1/`
    /// * `timeout` - Upper bound on a single completion call
    ///
    /// # Returns
    /// * `Result<Self, Error>` - Provider instance or error if the HTTP client or URL is invalid
    pub fn new(api_key: Option<String>, base_url: &Url, timeout: Duration) -> Result<Self, Error> {
        let endpoint = join_endpoint(base_url, "chat/completions")
            .map_err(|e| Error::Config(format!("invalid OpenAI base URL: {}", e)))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(OpenAiProvider {
            api_key,
            endpoint,
            client,
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    /// Calls OpenAI's chat completions API
    ///
    /// # Arguments
    /// * `messages` - Ordered prompt, system message first
    /// * `options` - Model and sampling settings
    ///
    /// # Returns
    /// * `Result<String, Error>` - Generated response text or error
    async fn call_llm_api(
        &self,
        messages: Vec<ChatMessage>,
        options: &CompletionOptions,
    ) -> Result<String, Error> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Provider("OpenAI API key is not configured".to_string()))?;

        let request_body = json!({
          "model": options.model,
          "messages": messages,
          "temperature": options.temperature,
          "max_tokens": options.max_tokens
        });

        let res = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await?;
            return Err(Error::Provider(format!(
                "OpenAI API error ({}): {}",
                status,
                extract_error_message(&text)
            )));
        }

        let json_resp: serde_json::Value = res.json().await?;
        match json_resp["choices"][0]["message"]["content"].as_str() {
            Some(content) if !content.trim().is_empty() => {
                debug!("OpenAI response: {}", content);
                Ok(content.trim().to_string())
            }
            _ => Err(Error::Provider(
                "No content in OpenAI LLM response".to_string(),
            )),
        }
    }
}

/// Pulls `error.message` out of an OpenAI error body, falling back to the raw text
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(String::from))
        .unwrap_or_else(|| body.to_string())
}
