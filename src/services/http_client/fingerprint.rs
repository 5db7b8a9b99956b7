//! Canonical identity of a client configuration.
//!
//! Every field is written under a fixed tag so that two different fields can never produce
//! the same text. Durations are truncated to whole seconds, so configurations that differ only
//! below one second share a fingerprint.

use std::fmt;

use crate::models::ClientConfig;

/// Cache key derived from a [`ClientConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Fingerprint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for Fingerprint {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

/// Computes the fingerprint of `config`.
pub fn fingerprint(config: &ClientConfig) -> Fingerprint {
	Fingerprint(format!(
		"ct:{}s|rt:{}s|it:{}s|mic:{}|mich:{}|rht:{}s|dc:{}|wbs:{}|rbs:{}|fh2:{}|tlst:{}s|ect:{}s|proxy:{}|ptls:{}",
		config.connect_timeout.as_secs(),
		config.request_timeout.as_secs(),
		config.idle_conn_timeout.as_secs(),
		config.max_idle_conns,
		config.max_idle_conns_per_host,
		config.response_header_timeout.as_secs(),
		config.disable_compression,
		config.write_buffer_size,
		config.read_buffer_size,
		config.force_attempt_http2,
		config.tls_handshake_timeout.as_secs(),
		config.expect_continue_timeout.as_secs(),
		config.proxy_url,
		config.proxy_tls_skip_verify,
	))
}

impl ClientConfig {
	/// Shorthand for [`fingerprint`].
	pub fn fingerprint(&self) -> Fingerprint {
		fingerprint(self)
	}
}
