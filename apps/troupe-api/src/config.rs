//! Application configuration loaded from environment variables.
//!
//! This module provides fail-fast configuration loading with validation.
//! Required variables must be present and valid, or the application will
//! exit with a clear error message.

use std::env;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    /// An environment variable has an unparseable value.
    #[error("Invalid value for {name}: {value}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string.
    pub database_url: String,

    /// HMAC secret for signing JWT access tokens.
    pub jwt_secret: String,

    /// Access token lifetime in seconds.
    pub jwt_expiry_seconds: i64,

    /// Refresh token lifetime in seconds.
    pub refresh_token_expiry_seconds: i64,

    /// Refresh token length (plaintext characters and hash bytes).
    pub refresh_token_length: usize,

    /// PBKDF2 rounds for refresh token storage hashes.
    pub refresh_token_rounds: u32,

    /// Argon2 memory cost in KiB.
    pub password_hash_memory_kib: u32,

    /// Argon2 iteration count.
    pub password_hash_iterations: u32,

    /// Argon2 parallelism degree.
    pub password_hash_parallelism: u32,

    /// Base URL of the web app (for building verification links).
    pub web_app_url: String,

    /// Port the API listens on.
    pub port: u16,

    /// Log filter directive.
    pub rust_log: String,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_expiry_seconds: parsed("JWT_EXPIRY_SECONDS", 900)?,
            refresh_token_expiry_seconds: parsed("REFRESH_TOKEN_EXPIRY_SECONDS", 604_800)?,
            refresh_token_length: parsed("REFRESH_TOKEN_LENGTH", 64)?,
            refresh_token_rounds: parsed("REFRESH_TOKEN_ROUNDS", 1000)?,
            password_hash_memory_kib: parsed("PASSWORD_HASH_MEMORY_KIB", 19_456)?,
            password_hash_iterations: parsed("PASSWORD_HASH_ITERATIONS", 2)?,
            password_hash_parallelism: parsed("PASSWORD_HASH_PARALLELISM", 1)?,
            web_app_url: env::var("WEB_APP_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            port: parsed("PORT", 3000)?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn parsed<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::Invalid {
            name,
            value,
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_variable() {
        let err = required("TROUPE_TEST_SURELY_UNSET").unwrap_err();
        assert!(matches!(err, ConfigError::Missing(_)));
    }

    #[test]
    fn test_parsed_falls_back_to_default() {
        let value: i64 = parsed("TROUPE_TEST_SURELY_UNSET_TOO", 900).unwrap();
        assert_eq!(value, 900);
    }

    #[test]
    fn test_parsed_rejects_garbage() {
        env::set_var("TROUPE_TEST_GARBAGE_PORT", "not-a-number");
        let result: Result<u16, _> = parsed("TROUPE_TEST_GARBAGE_PORT", 3000);
        env::remove_var("TROUPE_TEST_GARBAGE_PORT");

        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }
}
