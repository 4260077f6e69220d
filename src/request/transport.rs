//! Count transports.
//!
//! A transport performs exactly one attempt: one round trip to the count
//! endpoint. Retrying is the caller's business.

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::ClientConfig;
use crate::error_handling::{categorize_reqwest_error, http_error, InitializationError, RequestError};
use crate::filter::EarthquakeFilter;
use crate::initialization::init_client;
use crate::query::count_url;

/// Body of a successful count response. Extra fields (e.g. `maxAllowed`) are ignored.
#[derive(Debug, Deserialize)]
struct CountResponse {
    count: u64,
}

/// One attempt at counting the events matching a filter.
pub trait CountTransport {
    /// Performs a single attempt.
    ///
    /// Failures must already be classified: transport problems as
    /// [`RequestError::Http`], [`RequestError::Request`] or
    /// [`RequestError::Timeout`], anything else as a non-transport kind.
    fn fetch_count(
        &self,
        filter: &EarthquakeFilter,
        timeout: Option<Duration>,
    ) -> Result<u64, RequestError>;
}

/// Transport issuing a blocking HTTP GET against the count endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: ClientConfig,
}

impl HttpTransport {
    /// Builds a transport with its own client.
    ///
    /// # Errors
    ///
    /// Returns an [`InitializationError`] if the configuration is invalid or
    /// the client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, InitializationError> {
        let client = init_client(&config)?;
        Ok(Self { client, config })
    }

    /// Builds a transport around an existing client.
    ///
    /// The client's own timeout, if any, still applies to attempts made without one.
    pub fn with_client(client: Client, config: ClientConfig) -> Result<Self, InitializationError> {
        config.validate()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl CountTransport for HttpTransport {
    fn fetch_count(
        &self,
        filter: &EarthquakeFilter,
        timeout: Option<Duration>,
    ) -> Result<u64, RequestError> {
        let url = count_url(&self.config, filter)
            .map_err(|e| RequestError::Client(InitializationError::from(e)))?;
        debug!("GET {}", url);

        let mut request = self.client.get(url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().map_err(|e| categorize_reqwest_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(http_error(status));
        }

        // Read the body first so a timeout while streaming it stays a timeout
        let body = response.text().map_err(|e| categorize_reqwest_error(&e))?;
        parse_count(&body)
    }
}

/// Decodes a `{"count": <n>}` body.
fn parse_count(body: &str) -> Result<u64, RequestError> {
    serde_json::from_str::<CountResponse>(body)
        .map(|response| response.count)
        .map_err(|e| RequestError::Decode(e.to_string()))
}
