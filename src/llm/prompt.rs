use crate::llm::{ChatMessage, Role};

/// Builds the ordered message list submitted to the completion provider.
///
/// The persona text is owned data loaded from configuration; assembling never
/// touches the caller's history.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    system_prompt: String,
}

impl PromptAssembler {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        PromptAssembler {
            system_prompt: system_prompt.into(),
        }
    }

    /// Returns `[system, ...history (user/assistant only), user question]`.
    pub fn assemble(&self, history: &[ChatMessage], question: &str) -> Vec<ChatMessage> {
        let mut prompt = Vec::with_capacity(history.len() + 2);
        prompt.push(ChatMessage::new(Role::System, &self.system_prompt));
        prompt.extend(
            history
                .iter()
                .filter(|msg| msg.role.is_conversational())
                .cloned(),
        );
        prompt.push(ChatMessage::new(Role::User, question));
        prompt
    }
}
