//! Error categorization.
//!
//! Maps `reqwest` failures onto the three transport kinds the count requester
//! distinguishes, and decides which errors the retry loop may suppress.

use reqwest::StatusCode;

use super::types::RequestError;

/// Categorizes a `reqwest::Error` into a classified [`RequestError`].
///
/// Timeouts are checked first because a connect phase that runs out of time
/// reports both `is_connect()` and `is_timeout()`.
///
/// # Arguments
///
/// * `error` - The `reqwest::Error` to categorize
///
/// # Returns
///
/// - [`RequestError::Timeout`] when the attempt ran out of time
/// - [`RequestError::Http`] when the error carries a status code
/// - [`RequestError::Request`] for every other delivery failure
pub fn categorize_reqwest_error(error: &reqwest::Error) -> RequestError {
    if error.is_timeout() {
        return RequestError::Timeout;
    }

    if let Some(status) = error.status() {
        return http_error(status);
    }

    // Connect, request, redirect and body failures all mean the count never
    // arrived; keep the most specific cause as the reason.
    let reason = std::error::Error::source(error)
        .map(|source| source.to_string())
        .unwrap_or_else(|| error.to_string());
    RequestError::Request(reason)
}

/// Builds the HTTP error kind for a non-2xx status, carrying its reason phrase.
pub fn http_error(status: StatusCode) -> RequestError {
    RequestError::Http {
        status: status.as_u16(),
        reason: status
            .canonical_reason()
            .unwrap_or("Unknown Status")
            .to_string(),
    }
}

/// Determines if an error may be swallowed by the retry loop.
///
/// Only the classified transport kinds qualify. Decode failures and argument
/// errors would fail identically on every attempt, so they propagate at once.
pub fn is_retriable_error(error: &RequestError) -> bool {
    error.is_transport()
}
