//! Utility modules for common functionality.
//!
//! - error: Custom error context type for more structured error handling
//! - logging: Tracing subscriber setup

mod error;
pub mod logging;

pub use error::*;
