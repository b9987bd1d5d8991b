use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::constants::{CONTACT_FAILURE_MESSAGE, CONTACT_SUCCESS_MESSAGE, LIVENESS_MESSAGE};
use crate::core::{validate_chat_request, validate_contact};
use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

/// Response payload of a successful chat completion
#[derive(Serialize)]
pub struct AskResponse {
    pub answer: String,
}

/// Response payload of a forwarded contact message
#[derive(Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

/// Bodies are parsed leniently; anything that is not JSON validates as an empty body.
fn parse_body(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}

/// Liveness check
pub async fn health() -> &'static str {
    LIVENESS_MESSAGE
}

/// Answers a chat question with the persona prompt and prior conversation
///
/// # Arguments
/// * `state` - Shared application state
/// * `body` - Raw `{messages, question}` JSON body
///
/// # Returns
/// * `Result<Json<AskResponse>, ApiError>` - Generated answer or error
#[axum::debug_handler]
pub async fn ask(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AskResponse>, ApiError> {
    let request = validate_chat_request(&parse_body(&body)).map_err(|e| {
        warn!("/ask rejected: {}", e);
        ApiError::from(e)
    })?;

    let answer = state.llm.answer(&request).await.map_err(|e| {
        error!("/ask provider call failed: {}", e);
        ApiError::Upstream(e.to_string())
    })?;

    info!("AI response generated");
    Ok(Json(AskResponse { answer }))
}

/// Forwards a contact-form submission by email
///
/// # Arguments
/// * `state` - Shared application state
/// * `body` - Raw `{name, email, subject, message}` JSON body
///
/// # Returns
/// * `Result<Json<ContactResponse>, ApiError>` - Acknowledgement or error
#[axum::debug_handler]
pub async fn contact(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ContactResponse>, ApiError> {
    let submission = validate_contact(&parse_body(&body)).map_err(|e| {
        warn!("/contact rejected: {}", e);
        ApiError::from(e)
    })?;

    let mailer = state.mailer.as_ref().ok_or_else(|| {
        error!("/contact called but the email service is not configured");
        ApiError::Misconfigured("Email service is not configured".to_string())
    })?;

    mailer.send(&submission).await.map_err(|e| {
        error!("/contact failed to send email: {}", e);
        ApiError::Upstream(CONTACT_FAILURE_MESSAGE.to_string())
    })?;

    Ok(Json(ContactResponse {
        success: true,
        message: CONTACT_SUCCESS_MESSAGE.to_string(),
    }))
}
