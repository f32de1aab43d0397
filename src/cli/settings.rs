//! `set` / `unset` key handling.

use std::fmt;

use crate::core::config::Config;

#[derive(Debug, PartialEq, Eq)]
pub enum SettingError {
    /// The provided setting key is not recognized.
    UnknownKey(String),
    /// The value could not be used for the key.
    InvalidValue { key: &'static str, input: String },
    /// Required arguments are missing.
    MissingArgs {
        hint: &'static str,
        example: &'static str,
    },
}

impl SettingError {
    pub fn print(&self) {
        match self {
            SettingError::UnknownKey(key) => {
                eprintln!("❌ Unknown config key: {key}");
                eprintln!("   Known keys: base-url, request-timeout");
            }
            SettingError::InvalidValue { key, input } => {
                eprintln!("❌ Invalid value for {key}: {input}");
            }
            SettingError::MissingArgs { hint, example } => {
                eprintln!("⚠️  {hint}");
                eprintln!("Example: {example}");
            }
        }
    }
}

impl fmt::Display for SettingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingError::UnknownKey(key) => write!(f, "Unknown config key: {key}"),
            SettingError::InvalidValue { key, input } => {
                write!(f, "Invalid value for {key}: {input}")
            }
            SettingError::MissingArgs { hint, .. } => write!(f, "{hint}"),
        }
    }
}

impl std::error::Error for SettingError {}

/// Applies `verdict set <key> <value>` to `config` and returns the
/// confirmation line.
pub fn set_value(config: &mut Config, key: &str, value: &[String]) -> Result<String, SettingError> {
    let value = value.join(" ");
    let value = value.trim();
    match key {
        "base-url" => {
            if value.is_empty() {
                return Err(SettingError::MissingArgs {
                    hint: "Specify the backend URL",
                    example: "verdict set base-url http://127.0.0.1:8000",
                });
            }
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(SettingError::InvalidValue {
                    key: "base-url",
                    input: value.to_string(),
                });
            }
            config.base_url = Some(value.to_string());
            Ok(format!("✅ Set base-url to: {value}"))
        }
        "request-timeout" => {
            if value.is_empty() {
                return Err(SettingError::MissingArgs {
                    hint: "Specify the timeout in seconds (0 disables it)",
                    example: "verdict set request-timeout 60",
                });
            }
            let secs = value
                .trim_end_matches('s')
                .parse::<u64>()
                .map_err(|_| SettingError::InvalidValue {
                    key: "request-timeout",
                    input: value.to_string(),
                })?;
            config.request_timeout_secs = Some(secs);
            Ok(format!("✅ Set request-timeout to: {secs}s"))
        }
        _ => Err(SettingError::UnknownKey(key.to_string())),
    }
}

pub fn unset_value(config: &mut Config, key: &str) -> Result<String, SettingError> {
    match key {
        "base-url" => config.base_url = None,
        "request-timeout" => config.request_timeout_secs = None,
        _ => return Err(SettingError::UnknownKey(key.to_string())),
    }
    Ok(format!("✅ Unset {key}"))
}
