//! Configuration management for the SMS admin server.
//!
//! Configuration comes from environment variables, optionally seeded from a
//! `.env` file. Nothing here writes to stdout, which MCP uses for communication.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::path::PathBuf;

/// Default location of the stored login token.
pub const DEFAULT_CREDENTIALS_PATH: &str = ".sms-admin-token.json";

/// Configuration for the SMS admin server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend API base URL
    pub api_base_url: String,

    /// Where the login token is persisted
    pub credentials_path: PathBuf,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Operator username used to log in at startup when no token is stored
    pub username: Option<String>,

    /// Operator password paired with `username`
    pub password: Option<String>,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `SMS_ADMIN_API_BASE_URL`: Base URL for the backend API
    ///
    /// Optional environment variables:
    /// - `SMS_ADMIN_CREDENTIALS_PATH`: token file (default: `.sms-admin-token.json`)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `SMS_ADMIN_USERNAME` / `SMS_ADMIN_PASSWORD`: startup login
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let api_base_url = env::var("SMS_ADMIN_API_BASE_URL")
            .map_err(|_| ConfigError::MissingVar("SMS_ADMIN_API_BASE_URL".to_string()))?;

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "SMS_ADMIN_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let credentials_path = env::var("SMS_ADMIN_CREDENTIALS_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CREDENTIALS_PATH.to_string())
            .into();

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be at least 1 second".to_string(),
            });
        }

        let username = Self::optional_var("SMS_ADMIN_USERNAME");
        let password = Self::optional_var("SMS_ADMIN_PASSWORD");
        if username.is_some() != password.is_some() {
            return Err(ConfigError::Other(
                "SMS_ADMIN_USERNAME and SMS_ADMIN_PASSWORD must be set together".to_string(),
            ));
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            api_base_url,
            credentials_path,
            request_timeout,
            username,
            password,
            log_level,
        })
    }

    /// Startup login credentials, when both halves are configured.
    pub fn startup_login(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some((user.as_str(), pass.as_str())),
            _ => None,
        }
    }

    fn optional_var(var_name: &str) -> Option<String> {
        env::var(var_name).ok().filter(|v| !v.trim().is_empty())
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: String::new(),
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_PATH),
            request_timeout: 10,
            username: None,
            password: None,
            log_level: "error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    // Helper to set and unset env vars for testing
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }

        fn unset(&mut self, key: &str) {
            env::remove_var(key);
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.request_timeout, 10);
        assert_eq!(
            config.credentials_path,
            PathBuf::from(DEFAULT_CREDENTIALS_PATH)
        );
        assert!(config.startup_login().is_none());
    }

    #[test]
    #[serial]
    fn test_config_from_env_invalid_url() {
        let mut guard = EnvGuard::new();
        guard.set("SMS_ADMIN_API_BASE_URL", "not-a-url");

        let result = Config::from_env();
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => {
                assert_eq!(var, "SMS_ADMIN_API_BASE_URL")
            }
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("SMS_ADMIN_API_BASE_URL", "https://sms.example.com/api");
        guard.set("SMS_ADMIN_CREDENTIALS_PATH", "/tmp/sms-token.json");
        guard.set("REQUEST_TIMEOUT", "30");
        guard.unset("SMS_ADMIN_USERNAME");
        guard.unset("SMS_ADMIN_PASSWORD");

        let config = Config::from_env().expect("config should load");
        assert_eq!(config.api_base_url, "https://sms.example.com/api");
        assert_eq!(config.credentials_path, PathBuf::from("/tmp/sms-token.json"));
        assert_eq!(config.request_timeout, 30);
        assert!(config.startup_login().is_none());
    }

    #[test]
    #[serial]
    fn test_config_startup_login_pair() {
        let mut guard = EnvGuard::new();
        guard.set("SMS_ADMIN_API_BASE_URL", "https://sms.example.com/api");
        guard.set("SMS_ADMIN_USERNAME", "admin");
        guard.set("SMS_ADMIN_PASSWORD", "hunter2");

        let config = Config::from_env().unwrap();
        assert_eq!(config.startup_login(), Some(("admin", "hunter2")));
    }

    #[test]
    #[serial]
    fn test_config_rejects_half_login_pair() {
        let mut guard = EnvGuard::new();
        guard.set("SMS_ADMIN_API_BASE_URL", "https://sms.example.com/api");
        guard.set("SMS_ADMIN_USERNAME", "admin");
        guard.unset("SMS_ADMIN_PASSWORD");

        assert!(matches!(Config::from_env(), Err(ConfigError::Other(_))));
    }

    #[test]
    #[serial]
    fn test_parse_env_u64_invalid() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_U64_INVALID", "not-a-number");

        let result = Config::parse_env_u64("TEST_U64_INVALID", 10);
        assert!(result.is_err());

        let result = Config::parse_env_u64("NONEXISTENT_U64", 10);
        assert_eq!(result.unwrap(), 10);
    }
}
