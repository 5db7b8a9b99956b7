//! HTTP client error types.

use std::time::Duration;
use thiserror::Error;

use crate::utils::ErrorContext;

/// Errors raised while constructing a pooled client or sending through it
#[derive(Debug, Error)]
pub enum HttpClientError {
	/// The TLS backend or transport could not be initialised
	#[error(transparent)]
	BuildError(ErrorContext),

	/// The transport failed before a response arrived
	#[error(transparent)]
	RequestError(ErrorContext),

	/// No response headers arrived within the configured header timeout
	#[error(transparent)]
	ResponseHeaderTimeout(ErrorContext),
}

impl HttpClientError {
	/// Creates a build error carrying the fingerprint it was raised for
	pub fn build_error_with_source(
		msg: impl Into<String>,
		fingerprint: &str,
		source: impl std::error::Error + Send + Sync + 'static,
	) -> Self {
		Self::BuildError(
			ErrorContext::new(format!("Build Error: {}", msg.into()))
				.with_source(source)
				.with_metadata("fingerprint", fingerprint),
		)
	}

	/// Wraps a transport failure
	pub fn request_error(source: reqwest::Error) -> Self {
		let mut ctx = ErrorContext::new("Request Error: Failed to send request");
		if let Some(url) = source.url() {
			ctx = ctx.with_metadata("url", redacted(url));
		}
		Self::RequestError(ctx.with_source(source))
	}

	/// Reports that the response headers did not arrive within `timeout`
	pub fn response_header_timeout(timeout: Duration, url: Option<&url::Url>) -> Self {
		let mut ctx = ErrorContext::new(format!(
			"Response Header Timeout: no response headers within {}s",
			timeout.as_secs()
		));
		if let Some(url) = url {
			ctx = ctx.with_metadata("url", redacted(url));
		}
		Self::ResponseHeaderTimeout(ctx)
	}

	/// Whether this error is a header or overall request timeout
	pub fn is_timeout(&self) -> bool {
		match self {
			Self::ResponseHeaderTimeout(_) => true,
			Self::RequestError(ctx) => ctx
				.source
				.as_deref()
				.and_then(|source| source.downcast_ref::<reqwest::Error>())
				.is_some_and(reqwest::Error::is_timeout),
			Self::BuildError(_) => false,
		}
	}
}

/// Renders `url` without its password
pub(crate) fn redacted(url: &url::Url) -> String {
	let mut url = url.clone();
	let _ = url.set_password(None);
	url.to_string()
}
