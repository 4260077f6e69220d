//! Configuration types.
//!
//! This module defines the requester configuration and the logging enums
//! accepted by [`init_logger_with`](crate::initialization::init_logger_with).

use strum_macros::{Display, EnumString};
use thiserror::Error;
use url::Url;

use crate::config::constants::{BASE_URL, DEFAULT_USER_AGENT};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace). Parses from lowercase strings such as `"debug"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON lines for machine parsing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    #[default]
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// A configuration value that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid configuration for '{field}': {message}")]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// What is wrong with it and what is expected instead
    pub message: String,
}

/// Requester configuration.
///
/// The defaults target the public USGS service. Tests point `base_url` at a
/// local mock server instead.
///
/// # Examples
///
/// ```
/// use quake_query::ClientConfig;
///
/// let config = ClientConfig {
///     base_url: "http://127.0.0.1:8080/fdsnws/event/1".to_string(),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service root; the `count` and `query` endpoints hang off it
    pub base_url: String,

    /// HTTP User-Agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Checks that the configuration can be used to build requests.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigValidationError`] naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.endpoint("")?;
        if self.user_agent.trim().is_empty() {
            return Err(ConfigValidationError {
                field: "user_agent",
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Resolves an endpoint path (e.g. `"count"`) against `base_url`.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ConfigValidationError> {
        let invalid = |message: String| ConfigValidationError {
            field: "base_url",
            message,
        };
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| invalid(format!("'{}' is not a valid URL ({e})", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "scheme must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if !path.is_empty() {
            url.path_segments_mut()
                .map_err(|_| invalid(format!("'{}' cannot be a base URL", self.base_url)))?
                .pop_if_empty()
                .push(path);
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_log_enums_parse_lowercase() {
        assert_eq!(LogLevel::from_str("debug").unwrap(), LogLevel::Debug);
        assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
        assert!(LogFormat::from_str("yaml").is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url, BASE_URL);
    }

    #[test]
    fn test_endpoint_appends_path() {
        let config = ClientConfig::default();
        let url = config.endpoint("count").unwrap();
        assert_eq!(
            url.as_str(),
            "https://earthquake.usgs.gov/fdsnws/event/1/count"
        );

        // Trailing slash must not produce an empty segment
        let config = ClientConfig {
            base_url: "http://localhost:9000/api/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.endpoint("query").unwrap().as_str(),
            "http://localhost:9000/api/query"
        );
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let config = ClientConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "base_url");

        let config = ClientConfig {
            base_url: "ftp://example.com/".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.message.contains("http"));
    }

    #[test]
    fn test_validate_rejects_empty_user_agent() {
        let config = ClientConfig {
            user_agent: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().field, "user_agent");
    }
}
