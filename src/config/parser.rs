use super::PromptConfig;
use crate::errors::Error;
use std::fs;

use tracing::info;

/// Loads and parses the persona configuration from a YAML file
///
/// # Arguments
///
/// * `file_path` - Path to the YAML persona file
///
/// # Returns
///
/// * `Result<PromptConfig, Error>` - The parsed PromptConfig on success, or an error if loading/parsing fails
///
/// # Errors
///
/// Returns an error if:
/// * The file cannot be read
/// * The YAML content cannot be parsed into a PromptConfig
/// * The system prompt is blank
pub fn load_prompt_config(file_path: &str) -> Result<PromptConfig, Error> {
    let yaml_str = fs::read_to_string(file_path)?;
    let prompt_config = parse_prompt_config(&yaml_str)?;
    info!(
        "Loaded persona from {} (model: {})",
        file_path, prompt_config.model
    );
    Ok(prompt_config)
}

fn parse_prompt_config(yaml_str: &str) -> Result<PromptConfig, Error> {
    let prompt_config: PromptConfig = serde_yaml::from_str(yaml_str)?;
    if prompt_config.system_prompt.trim().is_empty() {
        return Err(Error::Config("system_prompt must not be empty".to_string()));
    }
    Ok(prompt_config)
}
