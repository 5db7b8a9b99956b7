//! Configuration error types.
//!
//! This module defines the error types that can occur while loading request settings
//! from files and the environment, and while validating them.

use std::collections::HashMap;

use crate::utils::ErrorContext;

/// Errors that can occur during configuration operations
#[derive(Debug)]
#[allow(clippy::enum_variant_names)]
pub enum ConfigError {
	/// Configuration validation failed
	ValidationError(ErrorContext),

	/// Failed to parse a settings file or environment value
	ParseError(ErrorContext),

	/// File system error during configuration loading
	FileError(ErrorContext),
}

impl ConfigError {
	fn context(
		kind: &str,
		msg: impl Into<String>,
		metadata: Option<HashMap<String, String>>,
	) -> ErrorContext {
		ErrorContext::new(format!("{}: {}", kind, msg.into())).with_metadata_map(metadata)
	}

	/// Create a new validation error
	pub fn validation_error(
		msg: impl Into<String>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::ValidationError(Self::context("Validation Error", msg, metadata))
	}

	/// Create a new parse error with source
	pub fn parse_error_with_source(
		msg: impl Into<String>,
		source: impl std::error::Error + Send + Sync + 'static,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::ParseError(Self::context("Parse Error", msg, metadata).with_source(source))
	}

	/// Create a new file error
	pub fn file_error(msg: impl Into<String>, metadata: Option<HashMap<String, String>>) -> Self {
		Self::FileError(Self::context("File Error", msg, metadata))
	}

	/// Create a new file error with source
	pub fn file_error_with_source(
		msg: impl Into<String>,
		source: impl std::error::Error + Send + Sync + 'static,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::FileError(Self::context("File Error", msg, metadata).with_source(source))
	}
}

impl std::error::Error for ConfigError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::ValidationError(ctx) => std::error::Error::source(ctx),
			Self::ParseError(ctx) => std::error::Error::source(ctx),
			Self::FileError(ctx) => std::error::Error::source(ctx),
		}
	}
}

// Standard error trait implementations
impl std::fmt::Display for ConfigError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::ValidationError(ctx) => ctx.fmt(f),
			Self::ParseError(ctx) => ctx.fmt(f),
			Self::FileError(ctx) => ctx.fmt(f),
		}
	}
}

impl From<std::io::Error> for ConfigError {
	fn from(err: std::io::Error) -> Self {
		Self::file_error_with_source("Failed to read settings", err, None)
	}
}

impl From<serde_json::Error> for ConfigError {
	fn from(err: serde_json::Error) -> Self {
		Self::parse_error_with_source("Failed to parse settings", err, None)
	}
}
