//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types
//! after validation.

mod backend;
mod repl;
mod session;

pub use backend::FileBackendConfig;
pub use repl::FileReplConfig;
pub use session::FileSessionConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("backend.base_url '{url}' is not a valid URL: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("backend.base_url '{0}' must use http or https")]
    UnsupportedScheme(String),

    #[error("session.default_model cannot be empty")]
    EmptyModelName,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Chat backend connection
    pub backend: FileBackendConfig,
    /// Session defaults
    pub session: FileSessionConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.backend.parse_base_url()?;
        if self.session.default_model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        Ok(())
    }

    /// Render as TOML (for `--show-config`)
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[backend]
base_url = "http://chat.internal:8080"
request_timeout_seconds = 30

[session]
default_model = "llama3"
new_thread_name = "Untitled"
discovered_thread_prefix = "Thread"

[repl]
show_progress = false
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend.base_url, "http://chat.internal:8080");
        assert_eq!(config.backend.request_timeout_seconds, Some(30));
        assert_eq!(config.session.default_model, "llama3");
        assert_eq!(config.session.new_thread_name, "Untitled");
        assert!(!config.repl.show_progress);
        assert!(!config.repl.color);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[session]
default_model = "mistral"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.session.default_model, "mistral");
        // Defaults should apply
        assert_eq!(config.backend.base_url, "http://127.0.0.1:3000");
        assert_eq!(config.session.new_thread_name, "New Chat");
        assert!(config.repl.show_progress);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(FileConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_model() {
        let mut config = FileConfig::default();
        config.session.default_model = "  ".to_string();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyModelName));
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = FileConfig::default();
        config.backend.base_url = "localhost:3000/api".to_string();
        assert!(config.validate().is_err());

        config.backend.base_url = "ftp://example.com".to_string();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::UnsupportedScheme(
                "ftp://example.com".to_string()
            ))
        );
    }

    #[test]
    fn test_to_toml_round_trips_values() {
        let mut config = FileConfig::default();
        config.session.default_model = "llama3".to_string();

        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("[backend]"));
        assert!(rendered.contains("default_model = \"llama3\""));

        let parsed: FileConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
