use crate::config::PromptConfig;
use crate::errors::Error;
use crate::llm::providers::{CompletionOptions, LlmProvider};
use crate::llm::{ChatRequest, PromptAssembler};
use std::sync::Arc;
use tracing::debug;

/// LLM client that assembles the prompt and delegates the call to a provider.
#[derive(Debug, Clone)]
pub struct LlmClient {
    provider: Arc<dyn LlmProvider>,
    assembler: PromptAssembler,
    options: CompletionOptions,
}

impl LlmClient {
    /// Creates a new LLM client.
    ///
    /// # Arguments
    /// * `provider` - Completion provider that performs the outbound call
    /// * `prompt` - Persona text and completion settings
    pub fn new(provider: Arc<dyn LlmProvider>, prompt: &PromptConfig) -> Self {
        LlmClient {
            provider,
            assembler: PromptAssembler::new(prompt.system_prompt.clone()),
            options: CompletionOptions {
                model: prompt.model.clone(),
                temperature: prompt.temperature,
                max_tokens: prompt.max_tokens,
            },
        }
    }

    /// Answers a validated chat request with a single provider call.
    ///
    /// # Returns
    /// * `Result<String, Error>` - Generated answer or the provider's error
    pub async fn answer(&self, request: &ChatRequest) -> Result<String, Error> {
        let messages = self
            .assembler
            .assemble(&request.messages, &request.question);
        debug!(
            "Calling {} with {} prompt messages",
            self.options.model,
            messages.len()
        );
        self.provider.call_llm_api(messages, &self.options).await
    }
}
