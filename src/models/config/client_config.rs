//! Outbound HTTP client configuration.
//!
//! [`ClientConfig`] is the value object handed to the client pool. It is treated as immutable
//! once constructed; a different configuration is a different client.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::config::RequestSettings;

/// Per-host idle cap used when `max_idle_conns_per_host` is zero
pub const DEFAULT_MAX_IDLE_CONNS_PER_HOST: usize = 2;

/// Transport and pool settings for one outbound HTTP client.
///
/// Durations serialize as whole seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
	/// Timeout for establishing a new connection (zero disables it)
	#[serde(with = "duration_secs")]
	pub connect_timeout: Duration,
	/// Overall deadline for a single request (zero disables it)
	#[serde(with = "duration_secs")]
	pub request_timeout: Duration,
	/// How long an idle pooled connection is kept (zero keeps it forever)
	#[serde(with = "duration_secs")]
	pub idle_conn_timeout: Duration,
	/// Idle connection cap across all destinations
	pub max_idle_conns: usize,
	/// Idle connection cap per destination host
	/// (zero falls back to [`DEFAULT_MAX_IDLE_CONNS_PER_HOST`])
	pub max_idle_conns_per_host: usize,
	/// How long to wait for response headers, counted from the start of the send
	/// (zero disables it)
	#[serde(with = "duration_secs")]
	pub response_header_timeout: Duration,
	/// Do not negotiate transparent gzip decoding
	pub disable_compression: bool,
	/// Transport write buffer size in bytes
	pub write_buffer_size: usize,
	/// Transport read buffer size in bytes
	pub read_buffer_size: usize,
	/// Negotiate HTTP/2 through ALPN; when false the client speaks HTTP/1.1 only
	pub force_attempt_http2: bool,
	/// Budget for the TLS handshake, added to `connect_timeout` to bound connection setup
	#[serde(with = "duration_secs")]
	pub tls_handshake_timeout: Duration,
	/// Wait for `100 Continue` before sending a body. Part of the fingerprint only; the
	/// transport never sends `Expect: 100-continue`
	#[serde(with = "duration_secs")]
	pub expect_continue_timeout: Duration,
	/// Proxy endpoint; empty means resolve from the environment
	pub proxy_url: String,
	/// Skip certificate verification for proxied traffic
	pub proxy_tls_skip_verify: bool,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			connect_timeout: Duration::from_secs(15),
			request_timeout: Duration::from_secs(600),
			idle_conn_timeout: Duration::from_secs(120),
			max_idle_conns: 100,
			max_idle_conns_per_host: 50,
			response_header_timeout: Duration::from_secs(600),
			disable_compression: false,
			write_buffer_size: 32 * 1024,
			read_buffer_size: 32 * 1024,
			force_attempt_http2: true,
			tls_handshake_timeout: Duration::from_secs(15),
			expect_continue_timeout: Duration::from_secs(1),
			proxy_url: String::new(),
			proxy_tls_skip_verify: false,
		}
	}
}

impl From<&RequestSettings> for ClientConfig {
	/// Derives a client configuration from seconds-valued request settings.
	///
	/// Fields the settings do not carry keep their [`Default`] values.
	fn from(settings: &RequestSettings) -> Self {
		Self {
			connect_timeout: Duration::from_secs(settings.connect_timeout),
			request_timeout: Duration::from_secs(settings.request_timeout),
			idle_conn_timeout: Duration::from_secs(settings.idle_conn_timeout),
			max_idle_conns: settings.max_idle_conns,
			max_idle_conns_per_host: settings.max_idle_conns_per_host,
			response_header_timeout: Duration::from_secs(settings.response_header_timeout),
			proxy_url: settings.proxy_url.trim().to_string(),
			proxy_tls_skip_verify: settings.proxy_tls_skip_verify,
			..Self::default()
		}
	}
}

impl ClientConfig {
	/// Bound on establishing a connection, TLS included.
	///
	/// `None` when `connect_timeout` is zero; otherwise `connect_timeout` plus
	/// `tls_handshake_timeout`.
	pub fn connect_bound(&self) -> Option<Duration> {
		if self.connect_timeout.is_zero() {
			return None;
		}
		Some(self.connect_timeout.saturating_add(self.tls_handshake_timeout))
	}

	/// Idle connections kept per destination host
	pub fn idle_per_host_limit(&self) -> usize {
		match self.max_idle_conns_per_host {
			0 => DEFAULT_MAX_IDLE_CONNS_PER_HOST,
			n => n,
		}
	}
}

mod duration_secs {
	use serde::{Deserialize, Deserializer, Serializer};
	use std::time::Duration;

	pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_u64(value.as_secs())
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
		u64::deserialize(deserializer).map(Duration::from_secs)
	}
}
