//! Error handling utilities for the application.
//!
//! This module provides a structured approach to error handling with context and metadata.
//! The primary type is [`ErrorContext`], which wraps an error message with additional
//! information such as the underlying source, a timestamp, a trace ID, and custom metadata.
//!
//! # Examples
//!
//! ```
//! use upstream_client_pool::utils::ErrorContext;
//!
//! let error = ErrorContext::new("Invalid setting")
//! 	.with_metadata("field", "connect_timeout")
//! 	.with_metadata("value", "0");
//!
//! assert_eq!(
//! 	error.to_string(),
//! 	"Invalid setting [field=connect_timeout, value=0]"
//! );
//! ```
//!
//! The source error is reachable only through [`std::error::Error::source`]; it is not repeated
//! in the `Display` output, so walking the chain prints each cause once.

use chrono::Utc;
use std::{collections::HashMap, fmt};
use uuid::Uuid;

/// A context wrapper for errors with additional metadata.
///
/// Each error context includes:
///
/// - A descriptive message
/// - An optional source error
/// - Optional key-value metadata
/// - A timestamp (automatically generated)
/// - A unique trace ID (automatically generated)
#[derive(Debug)]
pub struct ErrorContext {
	/// The error message
	pub message: String,
	/// The source error that caused this error
	pub source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
	/// Additional metadata about the error
	pub metadata: Option<HashMap<String, String>>,
	/// The timestamp of the error in RFC 3339 format
	pub timestamp: String,
	/// The unique identifier for the error (UUID v4)
	pub trace_id: String,
}

impl ErrorContext {
	/// Creates a new error context with the given message.
	///
	/// The timestamp and trace ID are generated automatically.
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			source: None,
			metadata: None,
			timestamp: Utc::now().to_rfc3339(),
			trace_id: Uuid::new_v4().to_string(),
		}
	}

	/// Attaches the error that caused this one.
	pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
		self.source = Some(Box::new(source));
		self
	}

	/// Adds a single key-value metadata pair to the error context.
	///
	/// This method creates the metadata HashMap if it doesn't already exist.
	pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		let metadata = self.metadata.get_or_insert_with(HashMap::new);
		metadata.insert(key.into(), value.into());
		self
	}

	/// Merges an optional metadata map into the error context.
	pub fn with_metadata_map(mut self, metadata: Option<HashMap<String, String>>) -> Self {
		if let Some(extra) = metadata {
			self.metadata.get_or_insert_with(HashMap::new).extend(extra);
		}
		self
	}
}

impl fmt::Display for ErrorContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.message)?;
		if let Some(metadata) = &self.metadata {
			if !metadata.is_empty() {
				let mut keys: Vec<_> = metadata.keys().collect();
				keys.sort();
				let parts: Vec<String> = keys
					.into_iter()
					.map(|key| format!("{}={}", key, metadata[key]))
					.collect();
				write!(f, " [{}]", parts.join(", "))?;
			}
		}
		Ok(())
	}
}

impl std::error::Error for ErrorContext {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		self.source
			.as_deref()
			.map(|source| source as &(dyn std::error::Error + 'static))
	}
}

/// Formats the complete error chain of an `anyhow::Error`, one cause per line.
pub fn format_error_chain(err: &anyhow::Error) -> String {
	let mut result = err.to_string();
	let mut source = err.source();

	while let Some(err) = source {
		result.push_str(&format!("\n  Caused by: {}", err));
		source = err.source();
	}

	result
}
