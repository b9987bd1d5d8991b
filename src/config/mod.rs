mod parser;
use crate::cli::Cli;
use crate::constants::{DEFAULT_FROM_EMAIL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;
use url::Url;

pub use parser::load_prompt_config;

/// Persona and completion settings, loaded from the persona YAML file
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PromptConfig {
    /// System prompt sent as the first message of every completion
    pub system_prompt: String,
    /// Model identifier used for completions
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum number of tokens in a generated answer
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

/// Origins allowed by the CORS layer
#[derive(Debug, Clone, PartialEq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

impl AllowedOrigins {
    /// Parses "*" or a comma separated list of origins
    pub fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            AllowedOrigins::Any
        } else {
            AllowedOrigins::List(origins)
        }
    }
}

/// Chat endpoint rate limiting settings
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub window: Duration,
    pub max_requests: u32,
}

/// Settings for the OpenAI-compatible completion provider
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: Url,
}

/// Settings for the transactional email provider
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_key: String,
    pub base_url: Url,
    pub from: String,
    pub to: String,
}

/// Fully resolved runtime configuration of the relay
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub port: u16,
    pub allowed_origins: AllowedOrigins,
    pub trust_proxy: usize,
    pub rate_limit: RateLimitConfig,
    pub provider_timeout: Duration,
    pub openai: OpenAiConfig,
    /// `None` when the email integration is not configured
    pub email: Option<EmailConfig>,
    pub prompt: PromptConfig,
}

impl RelayConfig {
    /// Builds the runtime configuration from parsed CLI arguments and the persona file
    pub fn from_cli(cli: Cli, prompt: PromptConfig) -> Result<Self, crate::errors::Error> {
        if cli.rate_limit_max == 0 {
            return Err(crate::errors::Error::Config(
                "rate limit max must be at least 1".to_string(),
            ));
        }
        if cli.rate_limit_window.is_zero() {
            return Err(crate::errors::Error::Config(
                "rate limit window must not be zero".to_string(),
            ));
        }

        let openai_api_key = cli.openai_api_key.filter(|k| !k.trim().is_empty());
        if openai_api_key.is_none() {
            warn!("OPENAI_API_KEY is not set; /ask will fail until it is configured");
        }

        let email = match (
            cli.resend_api_key.filter(|k| !k.trim().is_empty()),
            cli.contact_target_email.filter(|t| !t.trim().is_empty()),
        ) {
            (Some(api_key), Some(to)) => Some(EmailConfig {
                api_key,
                base_url: cli.resend_base_url,
                from: cli
                    .from_email
                    .unwrap_or_else(|| DEFAULT_FROM_EMAIL.to_string()),
                to,
            }),
            (None, _) => {
                warn!("RESEND_API_KEY is not set; /contact is disabled");
                None
            }
            (Some(_), None) => {
                warn!("CONTACT_TARGET_EMAIL is not set; /contact is disabled");
                None
            }
        };

        Ok(RelayConfig {
            port: cli.port,
            allowed_origins: AllowedOrigins::parse(&cli.allowed_origin),
            trust_proxy: cli.trust_proxy,
            rate_limit: RateLimitConfig {
                window: cli.rate_limit_window,
                max_requests: cli.rate_limit_max,
            },
            provider_timeout: cli.provider_timeout,
            openai: OpenAiConfig {
                api_key: openai_api_key,
                base_url: cli.openai_base_url,
            },
            email,
            prompt,
        })
    }
}
