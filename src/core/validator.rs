//! Shape and bounds checks for incoming request bodies.
//!
//! Bodies are inspected as raw JSON so that every malformed shape maps to one
//! of the fixed client-facing messages below, checked in order.

use crate::constants::{MAX_HISTORY_MESSAGES, MAX_QUESTION_CHARS};
use crate::llm::{ChatMessage, ChatRequest, Role};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Messages array is required")]
    MissingMessages,
    #[error("Question is required and must be a string")]
    MissingQuestion,
    #[error("Question is too long. Maximum 500 characters.")]
    QuestionTooLong,
    #[error("Too many messages in conversation history.")]
    TooManyMessages,
    #[error("Invalid message format")]
    InvalidMessageFormat,
    #[error("Invalid message role")]
    InvalidMessageRole,
    #[error("Message content must be a string")]
    NonStringContent,
    #[error("All fields are required")]
    MissingContactFields,
}

/// A contact-form submission with all four fields present
#[derive(Debug, Clone, PartialEq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// JSON truthiness: absent, null, false, 0 and "" count as missing.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Validates a raw `/ask` body into a [`ChatRequest`].
pub fn validate_chat_request(body: &Value) -> Result<ChatRequest, ValidationError> {
    let raw_messages = body
        .get("messages")
        .and_then(Value::as_array)
        .ok_or(ValidationError::MissingMessages)?;

    let question = match body.get("question") {
        Some(Value::String(q)) if !q.is_empty() => q,
        _ => return Err(ValidationError::MissingQuestion),
    };

    if question.chars().count() > MAX_QUESTION_CHARS {
        return Err(ValidationError::QuestionTooLong);
    }

    if raw_messages.len() > MAX_HISTORY_MESSAGES {
        return Err(ValidationError::TooManyMessages);
    }

    let messages = raw_messages
        .iter()
        .map(validate_history_entry)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ChatRequest {
        messages,
        question: question.clone(),
    })
}

fn validate_history_entry(entry: &Value) -> Result<ChatMessage, ValidationError> {
    let role = entry.get("role");
    let content = entry.get("content");

    if !is_present(role) || !is_present(content) {
        return Err(ValidationError::InvalidMessageFormat);
    }

    let role = role
        .and_then(Value::as_str)
        .and_then(Role::from_history)
        .ok_or(ValidationError::InvalidMessageRole)?;

    let content = content
        .and_then(Value::as_str)
        .ok_or(ValidationError::NonStringContent)?;

    Ok(ChatMessage::new(role, content))
}

/// Validates a raw `/contact` body; every field must be a non-empty string.
pub fn validate_contact(body: &Value) -> Result<ContactSubmission, ValidationError> {
    let field = |name: &str| -> Result<String, ValidationError> {
        match body.get(name) {
            Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
            _ => Err(ValidationError::MissingContactFields),
        }
    };

    Ok(ContactSubmission {
        name: field("name")?,
        email: field("email")?,
        subject: field("subject")?,
        message: field("message")?,
    })
}
