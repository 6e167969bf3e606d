//! Configuration commands
//!
//! - `config show`: Display current configuration
//! - `config get`: Print a single value
//! - `config set`: Set a configuration value

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::cli::OutputOptions;
use crate::config::{Config, VALID_KEYS};
use crate::error::{BackofficeError, Result};

const SECRET_KEYS: &[&str] = &["remote.api_key"];

/// Mask a sensitive value by showing only the first 2 and last 2 characters
pub fn mask_sensitive_value(value: &str) -> String {
    let char_count = value.chars().count();
    if char_count > 4 {
        let first: String = value.chars().take(2).collect();
        let last: String = value.chars().skip(char_count - 2).collect();
        format!("{first}...{last}")
    } else {
        "****".to_string()
    }
}

fn display_value(key: &str, value: &str) -> String {
    if SECRET_KEYS.contains(&key) {
        mask_sensitive_value(value)
    } else {
        value.to_string()
    }
}

/// Show current configuration
pub fn cmd_config_show(output: OutputOptions) -> Result<()> {
    let config = Config::load()?;

    let mut values = serde_json::Map::new();
    let mut text_output = format!("{}\n\n", "Configuration:".cyan().bold());

    for key in VALID_KEYS {
        let value = config.get(key)?;
        match &value {
            Some(v) => {
                let shown = display_value(key, v);
                text_output.push_str(&format!("  {}: {shown}\n", key.cyan()));
                values.insert((*key).to_string(), json!(shown));
            }
            None => {
                text_output.push_str(&format!("  {}: {}\n", key.cyan(), "not configured".dimmed()));
                values.insert((*key).to_string(), serde_json::Value::Null);
            }
        }
    }

    text_output.push('\n');
    text_output.push_str(&format!(
        "{}",
        format!("Config file: {}", Config::config_path().display()).dimmed()
    ));

    let json_output = json!({
        "values": values,
        "config_file": Config::config_path().to_string_lossy(),
    });

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(output)
}

/// Get a specific configuration value
pub fn cmd_config_get(key: &str, output: OutputOptions) -> Result<()> {
    let config = Config::load()?;

    let Some(value) = config.get(key)? else {
        return Err(BackofficeError::Config(format!("{key} not set")));
    };

    let masked = SECRET_KEYS.contains(&key);
    let shown = display_value(key, &value);
    let text = if masked {
        format!("{shown} (masked - showing first 2 and last 2 characters)")
    } else {
        shown.clone()
    };

    CommandOutput::new(json!({
        "key": key,
        "value": shown,
        "configured": true,
        "masked": masked,
    }))
    .with_text(text)
    .print(output)
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str, output: OutputOptions) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;
    tracing::debug!(key, "config updated");

    let shown = display_value(key, value);
    CommandOutput::new(json!({
        "action": "config_set",
        "key": key,
        "value": shown,
        "success": true,
    }))
    .with_text(format!("Set {} to {shown}", key.cyan()))
    .print(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_sensitive_value_ascii() {
        assert_eq!(mask_sensitive_value("abcdef"), "ab...ef");
        assert_eq!(mask_sensitive_value("sk-live-1234"), "sk...34");
    }

    #[test]
    fn test_mask_sensitive_value_short() {
        assert_eq!(mask_sensitive_value("abcd"), "****");
        assert_eq!(mask_sensitive_value(""), "****");
    }

    #[test]
    fn test_mask_sensitive_value_multibyte_utf8() {
        assert_eq!(mask_sensitive_value("🔑🔒🔓🔐🗝"), "🔑🔒...🔐🗝");
        assert_eq!(mask_sensitive_value("éàöü"), "****");
    }

    #[test]
    fn test_only_secrets_are_masked() {
        assert_eq!(display_value("remote.api_key", "secret-key"), "se...ey");
        assert_eq!(
            display_value("remote.endpoint", "https://example.co"),
            "https://example.co"
        );
    }
}
