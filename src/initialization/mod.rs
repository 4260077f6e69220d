//! Resource setup.
//!
//! This module provides functions to initialize the shared resources:
//! - The blocking HTTP client
//! - The logger
//!
//! All initialization functions return [`InitializationError`](crate::InitializationError).

mod client;
mod logger;

// Re-export public API
pub use client::init_client;
pub use logger::{init_logger, init_logger_with};
