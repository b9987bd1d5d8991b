use clap::Parser;
use std::time::Duration;
use url::Url;

/// Command line interface for the relay.
///
/// Every option can also be supplied through the environment (or a `.env` file).
#[derive(Parser, Debug)]
#[command(name = "portfolio-relay", version, about)]
pub struct Cli {
    /// Port the HTTP server listens on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Sets the logging verbosity level for the application
    /// Possible values: "error", "warn", "info", "debug", "trace"
    /// Default: "info"
    #[arg(long, env = "LOG_LEVEL", default_value_t = String::from("info"))]
    pub logging_level: String,

    /// Also write logs to a daily rotating file under ./logs
    #[arg(long, env = "LOG_TO_FILE")]
    pub log_to_file: bool,

    /// Path to the YAML file holding the assistant persona and completion settings
    #[arg(long, env = "PERSONA_CONFIG", default_value = "persona.yaml")]
    pub persona_config: String,

    /// Allowed CORS origin(s), comma separated, or "*" for any
    #[arg(long, env = "ALLOWED_ORIGIN", default_value = "*")]
    pub allowed_origin: String,

    /// Number of trusted reverse-proxy hops in front of the server
    #[arg(long, env = "TRUST_PROXY", default_value_t = 0)]
    pub trust_proxy: usize,

    /// Length of the chat rate-limit window (e.g. "15m", "1h")
    #[arg(long, env = "RATE_LIMIT_WINDOW", default_value = "15m", value_parser = humantime::parse_duration)]
    pub rate_limit_window: Duration,

    /// Maximum chat requests per client within one window
    #[arg(long, env = "RATE_LIMIT_MAX", default_value_t = 10)]
    pub rate_limit_max: u32,

    /// Timeout applied to every outbound provider call (e.g. "30s")
    #[arg(long, env = "PROVIDER_TIMEOUT", default_value = "30s", value_parser = humantime::parse_duration)]
    pub provider_timeout: Duration,

    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com/v1/")]
    pub openai_base_url: Url,

    /// Resend API key; the contact endpoint is disabled without it
    #[arg(long, env = "RESEND_API_KEY", hide_env_values = true)]
    pub resend_api_key: Option<String>,

    /// Base URL of the Resend API
    #[arg(long, env = "RESEND_BASE_URL", default_value = "https://api.resend.com/")]
    pub resend_base_url: Url,

    /// Sender identity for contact emails
    #[arg(long, env = "RESEND_FROM_EMAIL")]
    pub from_email: Option<String>,

    /// Recipient of contact emails
    #[arg(long, env = "CONTACT_TARGET_EMAIL")]
    pub contact_target_email: Option<String>,
}
