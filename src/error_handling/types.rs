//! Error type definitions.
//!
//! This module defines the validation errors raised by the filters, the
//! classified errors raised by the count requester, and initialization errors.

use std::fmt;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::{Display as DisplayMacro, EnumIter as EnumIterMacro};
use thiserror::Error;

use crate::config::ConfigValidationError;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The requester configuration is unusable.
    #[error("{0}")]
    ConfigError(#[from] ConfigValidationError),
}

/// Kind tag of a value handed to a filter constructor or setter.
///
/// Used by [`TypeMismatch`] to report what was accepted and what arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DisplayMacro, EnumIterMacro)]
pub enum ValueKind {
    None,
    #[strum(to_string = "int")]
    Integer,
    #[strum(to_string = "float")]
    Float,
    #[strum(to_string = "str")]
    Text,
    #[strum(to_string = "datetime")]
    Instant,
    TimeFilter,
    RectLocationFilter,
    CircleLocationFilter,
    CircleDistanceLocationFilter,
    DepthFilter,
    MagnitudeFilter,
    IntensityFilter,
}

/// A value of the wrong kind was supplied for a field.
///
/// The error carries the structured facts; the English sentence is produced
/// only by the `Display` impl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMismatch {
    /// Field (or argument) that received the value
    pub field: &'static str,
    /// Kinds the field accepts
    pub expected: Vec<ValueKind>,
    /// Kind actually received
    pub actual: ValueKind,
}

impl fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' must be of type ", self.field)?;
        let count = self.expected.len();
        for (i, kind) in self.expected.iter().enumerate() {
            write!(f, "'{kind}'")?;
            if count >= 2 && i == count - 2 {
                f.write_str(" or ")?;
            } else if count >= 2 && i < count - 2 {
                f.write_str(", ")?;
            }
        }
        write!(f, ", not '{}'", self.actual)
    }
}

impl std::error::Error for TypeMismatch {}

/// Errors raised while building or mutating a filter.
///
/// These are local and immediate: a failed constructor returns no object and a
/// failed setter leaves the object exactly as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// A value of the wrong kind was supplied.
    #[error(transparent)]
    Type(#[from] TypeMismatch),

    /// A value lies outside its domain or breaks a cross-field invariant.
    #[error("{message}")]
    OutOfRange {
        field: &'static str,
        message: String,
    },

    /// NaN is never a legal bound (±infinity is).
    #[error("'{field}' must be a number, not NaN")]
    NotANumber { field: &'static str },

    /// A distance unit string other than `km` or `mi`.
    #[error("Unit must be either 'km' or 'mi', not '{0}'")]
    InvalidUnit(String),

    /// An impact level string other than the four PAGER levels.
    #[error("Impact level must be 'green', 'yellow', 'orange' or 'red', not '{0}'")]
    InvalidImpactLevel(String),

    /// A unit missing from a conversion table.
    #[error("Unknown unit '{0}'")]
    UnknownUnit(String),
}

impl FilterError {
    pub(crate) fn out_of_range(field: &'static str, message: impl Into<String>) -> Self {
        FilterError::OutOfRange {
            field,
            message: message.into(),
        }
    }

    /// Name of the field that failed validation, when there is one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            FilterError::Type(mismatch) => Some(mismatch.field),
            FilterError::OutOfRange { field, .. } | FilterError::NotANumber { field } => {
                Some(*field)
            }
            FilterError::InvalidUnit(_) => Some("unit"),
            FilterError::InvalidImpactLevel(_) => Some("impact_level"),
            FilterError::UnknownUnit(_) => None,
        }
    }
}

/// Errors raised by the count requester.
///
/// Only [`Http`](RequestError::Http), [`Request`](RequestError::Request) and
/// [`Timeout`](RequestError::Timeout) are transport failures; they are the only
/// kinds the retry loop may suppress.
#[derive(Error, Debug)]
pub enum RequestError {
    /// The service answered with a non-2xx status.
    #[error("HTTP error {status}: {reason}")]
    Http { status: u16, reason: String },

    /// The request could not be delivered (DNS, connect, reset, ...).
    #[error("Request error: {0}")]
    Request(String),

    /// The attempt exceeded its timeout.
    #[error("Request to the API timed out.")]
    Timeout,

    /// The service answered 2xx but the body was not a count.
    #[error("Invalid count response: {0}")]
    Decode(String),

    /// An argument to the requester was rejected before any attempt.
    #[error("Invalid argument '{field}': {message}")]
    InvalidArgument {
        field: &'static str,
        message: String,
    },

    /// The HTTP client could not be set up.
    #[error(transparent)]
    Client(#[from] InitializationError),
}

impl RequestError {
    /// Whether this is one of the classified transport failures.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            RequestError::Http { .. } | RequestError::Request(_) | RequestError::Timeout
        )
    }
}
