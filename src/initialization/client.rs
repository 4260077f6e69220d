//! HTTP client initialization.
//!
//! The count requester talks to the service synchronously, so it uses the
//! blocking `reqwest` client. Timeouts are applied per attempt rather than on
//! the client.

use reqwest::blocking::{Client, ClientBuilder};

use crate::config::ClientConfig;
use crate::error_handling::InitializationError;

/// Initializes the HTTP client used for count requests.
///
/// Creates a `reqwest::blocking::Client` configured with:
/// - User-Agent header from the configuration
/// - Redirect following enabled (reqwest's default of 10 hops)
/// - Rustls TLS backend (no native TLS)
/// - No client-wide timeout; an attempt without its own timeout waits
///   until the service answers
///
/// # Errors
///
/// - `InitializationError::ConfigError` if the configuration is invalid
/// - `InitializationError::HttpClientError` if client creation fails
pub fn init_client(config: &ClientConfig) -> Result<Client, InitializationError> {
    config.validate()?;
    let client = ClientBuilder::new()
        .user_agent(config.user_agent.clone())
        .timeout(None)
        .build()?;
    Ok(client)
}
