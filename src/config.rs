//! Application configuration management.
//!
//! Configuration comes from environment variables (a `.env` file next to
//! the binary is honored), mapping each logical button and the feedback
//! LED to a physical BCM pin number. Everything is validated eagerly at
//! startup; a missing or malformed variable aborts the process before any
//! button handler is registered.

use std::path::PathBuf;

use thiserror::Error;

/// Default directory for the rolling log file.
/// The process runs headless at boot, so logs go to disk rather than a tty.
const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid pin number in {var}: {value:?}")]
    InvalidPin { var: &'static str, value: String },
}

/// Typed pin and path configuration, populated once at startup and passed
/// by reference thereafter.
#[derive(Debug, Clone)]
pub struct Config {
    pub toggle_button_pin: u8,
    pub up_button_pin: u8,
    pub down_button_pin: u8,
    pub lock_button_pin: u8,
    pub lock_led_pin: u8,
    pub credentials_path: PathBuf,
    /// Override for the vendor API base URL, mainly for testing against
    /// a local endpoint. `None` means the built-in production URL.
    pub api_base_url: Option<String>,
    pub log_dir: PathBuf,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a key-lookup closure. Unit tests use
    /// this directly so they never mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |var: &'static str| lookup(var).ok_or(ConfigError::MissingVar(var));

        let pin = |var: &'static str| -> Result<u8, ConfigError> {
            let value = require(var)?;
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPin { var, value })
        };

        Ok(Self {
            toggle_button_pin: pin("TOGGLE_BUTTON_GPIO_PIN")?,
            up_button_pin: pin("UP_BUTTON_GPIO_PIN")?,
            down_button_pin: pin("DOWN_BUTTON_GPIO_PIN")?,
            lock_button_pin: pin("LOCK_BUTTON_GPIO_PIN")?,
            lock_led_pin: pin("LOCK_LED_GPIO_PIN")?,
            credentials_path: PathBuf::from(require("CREDENTIAL_FILENAME")?),
            api_base_url: lookup("API_BASE_URL"),
            log_dir: lookup("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("TOGGLE_BUTTON_GPIO_PIN", "17"),
            ("UP_BUTTON_GPIO_PIN", "27"),
            ("DOWN_BUTTON_GPIO_PIN", "22"),
            ("LOCK_BUTTON_GPIO_PIN", "23"),
            ("LOCK_LED_GPIO_PIN", "24"),
            ("CREDENTIAL_FILENAME", "credentials.json"),
        ])
    }

    #[test]
    fn test_load_complete_config() {
        let env = full_env();
        let config = Config::from_lookup(|k| env.get(k).map(|v| v.to_string()))
            .expect("complete env should parse");

        assert_eq!(config.toggle_button_pin, 17);
        assert_eq!(config.up_button_pin, 27);
        assert_eq!(config.down_button_pin, 22);
        assert_eq!(config.lock_button_pin, 23);
        assert_eq!(config.lock_led_pin, 24);
        assert_eq!(config.credentials_path, PathBuf::from("credentials.json"));
        assert!(config.api_base_url.is_none());
        assert_eq!(config.log_dir, PathBuf::from(DEFAULT_LOG_DIR));
    }

    #[test]
    fn test_missing_pin_is_fatal() {
        let mut env = full_env();
        env.remove("DOWN_BUTTON_GPIO_PIN");

        let err = Config::from_lookup(|k| env.get(k).map(|v| v.to_string()))
            .expect_err("missing pin var must fail");
        assert!(matches!(
            err,
            ConfigError::MissingVar("DOWN_BUTTON_GPIO_PIN")
        ));
    }

    #[test]
    fn test_malformed_pin_is_fatal() {
        let mut env = full_env();
        env.insert("LOCK_LED_GPIO_PIN", "not-a-pin");

        let err = Config::from_lookup(|k| env.get(k).map(|v| v.to_string()))
            .expect_err("non-numeric pin must fail");
        assert!(matches!(
            err,
            ConfigError::InvalidPin {
                var: "LOCK_LED_GPIO_PIN",
                ..
            }
        ));
    }

    #[test]
    fn test_optional_overrides() {
        let mut env = full_env();
        env.insert("API_BASE_URL", "http://127.0.0.1:8080");
        env.insert("LOG_DIR", "/var/log/bassinet-buttons");

        let config =
            Config::from_lookup(|k| env.get(k).map(|v| v.to_string())).expect("should parse");
        assert_eq!(
            config.api_base_url.as_deref(),
            Some("http://127.0.0.1:8080")
        );
        assert_eq!(config.log_dir, PathBuf::from("/var/log/bassinet-buttons"));
    }
}
