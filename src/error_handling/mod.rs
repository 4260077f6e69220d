//! Error handling.
//!
//! This module provides:
//! - Validation errors raised by the filters (`FilterError`, `TypeMismatch`)
//! - Classified errors raised by the count requester (`RequestError`)
//! - Categorization of `reqwest` failures and the retry eligibility rule
//!
//! Validation errors are never retried. Transport errors are the only ones
//! the retry loop may suppress.

mod categorization;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, http_error, is_retriable_error};
pub use types::{FilterError, InitializationError, RequestError, TypeMismatch, ValueKind};
