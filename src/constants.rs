/// Maximum number of characters accepted in a chat question
pub const MAX_QUESTION_CHARS: usize = 500;

/// Maximum number of history entries accepted in a chat request
pub const MAX_HISTORY_MESSAGES: usize = 50;

/// Default model used for chat completions
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default sampling temperature for chat completions
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default completion length cap, in tokens
pub const DEFAULT_MAX_TOKENS: u32 = 200;

/// Sender identity used when RESEND_FROM_EMAIL is not set
pub const DEFAULT_FROM_EMAIL: &str = "Portfolio Contact <onboarding@resend.dev>";

/// Prefix prepended to the subject of every forwarded contact message
pub const CONTACT_SUBJECT_PREFIX: &str = "Portfolio Contact: ";

/// Plain-text body served by the liveness route
pub const LIVENESS_MESSAGE: &str = "Backend is running fine";

pub const RATE_LIMIT_MESSAGE: &str = "Too many requests from this IP, please try again later.";

pub const CONTACT_SUCCESS_MESSAGE: &str = "Message sent successfully";

/// User-facing message for email provider failures; provider details stay in the logs
pub const CONTACT_FAILURE_MESSAGE: &str = "Failed to send message. Please try again later.";
