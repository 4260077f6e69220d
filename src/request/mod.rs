//! Count requests with bounded retries.
//!
//! Each call serializes the filter, performs up to `retries + 1` attempts and
//! returns the first count obtained. Only classified transport failures are
//! retried, and never on the final attempt: the caller always observes the
//! error of the last attempt made. There is no delay between attempts.
//!
//! Calls share no mutable state, so a [`Requester`] can be used from several
//! threads at once.

mod transport;

use std::time::Duration;

use log::{debug, warn};

use crate::config::{ClientConfig, MAX_RETRY_COUNT, MAX_TIMEOUT, MIN_TIMEOUT};
use crate::error_handling::{is_retriable_error, RequestError};
use crate::filter::EarthquakeFilter;

pub use transport::{CountTransport, HttpTransport};

/// How many times a failed attempt may be retried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RetryBudget {
    /// At most this many retries; `Limited(0)` is a single attempt.
    Limited(u64),
    /// Retry until success, capped at [`MAX_RETRY_COUNT`] retries.
    Unbounded,
    /// No retries.
    #[default]
    Never,
}

impl RetryBudget {
    /// Number of retries this budget allows.
    pub fn retries(self) -> u64 {
        match self {
            RetryBudget::Limited(retries) => retries,
            RetryBudget::Unbounded => MAX_RETRY_COUNT,
            RetryBudget::Never => 0,
        }
    }
}

impl From<u64> for RetryBudget {
    fn from(retries: u64) -> Self {
        RetryBudget::Limited(retries)
    }
}

/// Rejects timeouts outside `MIN_TIMEOUT..=MAX_TIMEOUT`.
fn validate_timeout(timeout: Option<Duration>) -> Result<(), RequestError> {
    match timeout {
        Some(timeout) if !(MIN_TIMEOUT..=MAX_TIMEOUT).contains(&timeout) => {
            Err(RequestError::InvalidArgument {
                field: "timeout",
                message: format!(
                    "must be between {:?} and {:?}, got {:?}",
                    MIN_TIMEOUT, MAX_TIMEOUT, timeout
                ),
            })
        }
        _ => Ok(()),
    }
}

/// Counts the events matching `filter` through `transport`, retrying
/// transport failures.
///
/// # Arguments
///
/// * `transport` - Performs each attempt
/// * `filter` - The validated filter, serialized without a result cap
/// * `timeout` - Per-attempt timeout; `None` waits indefinitely
/// * `retries` - How many failed attempts may be retried
///
/// # Errors
///
/// - [`RequestError::InvalidArgument`] for a timeout outside `[10ms, 1 day]`,
///   before any attempt
/// - The error of the final attempt once the budget is spent
/// - Any non-transport error, as soon as it occurs
pub fn count_with<T>(
    transport: &T,
    filter: &EarthquakeFilter,
    timeout: Option<Duration>,
    retries: RetryBudget,
) -> Result<u64, RequestError>
where
    T: CountTransport + ?Sized,
{
    validate_timeout(timeout)?;
    if retries == RetryBudget::Unbounded {
        warn!(
            "Unbounded retries requested; capping at {} retries",
            MAX_RETRY_COUNT
        );
    }
    let max_retries = retries.retries();

    let mut failures: u64 = 0;
    loop {
        debug!("Count attempt {} (retry budget {})", failures + 1, max_retries);
        match transport.fetch_count(filter, timeout) {
            Ok(count) => {
                debug!("Count attempt {} returned {}", failures + 1, count);
                return Ok(count);
            }
            Err(e) if failures < max_retries && is_retriable_error(&e) => {
                failures += 1;
                warn!("Count attempt {} failed, retrying: {}", failures, e);
            }
            Err(e) => return Err(e),
        }
    }
}

/// Issues count requests against the configured service.
#[derive(Debug, Clone)]
pub struct Requester {
    transport: HttpTransport,
}

impl Requester {
    /// Creates a requester for `config`.
    ///
    /// # Errors
    ///
    /// [`RequestError::Client`] if the configuration is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, RequestError> {
        Ok(Self {
            transport: HttpTransport::new(config)?,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        self.transport.config()
    }

    /// Counts the events matching `filter`. See [`count_with`].
    pub fn count(
        &self,
        filter: &EarthquakeFilter,
        timeout: Option<Duration>,
        retries: RetryBudget,
    ) -> Result<u64, RequestError> {
        count_with(&self.transport, filter, timeout, retries)
    }
}

/// Counts the events matching `filter` on the public service.
///
/// Builds a fresh client per call; hold a [`Requester`] to reuse one.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use quake_query::{count, EarthquakeFilter, MagnitudeFilter, RetryBudget};
///
/// let filter = EarthquakeFilter::builder()
///     .magnitude_filter(MagnitudeFilter::at_least(6.0)?)
///     .build()?;
/// let n = count(&filter, Some(Duration::from_secs(30)), RetryBudget::Limited(3))?;
/// println!("{n} events");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn count(
    filter: &EarthquakeFilter,
    timeout: Option<Duration>,
    retries: RetryBudget,
) -> Result<u64, RequestError> {
    Requester::new(ClientConfig::default())?.count(filter, timeout, retries)
}
