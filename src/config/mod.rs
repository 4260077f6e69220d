//! Library configuration and constants.
//!
//! This module provides:
//! - Domain bounds enforced by the filters
//! - Service bounds applied by the query serializer
//! - Requester configuration and logging option types

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{ClientConfig, ConfigValidationError, LogFormat, LogLevel};
