//! Client construction.
//!
//! Turns a [`ClientConfig`] into a ready-to-use [`HttpClient`]. Construction only configures
//! the transport; no connection is opened here.

use std::time::Duration;
use tracing::warn;
use url::Url;

use crate::{
	models::ClientConfig,
	services::http_client::{error::redacted, HttpClient, HttpClientError, ProxyMode},
};

/// TCP keep-alive interval applied to every client
const TCP_KEEPALIVE: Duration = Duration::from_secs(30);

/// Proxy schemes reqwest 0.12 connects through with the `socks` feature enabled
const PROXY_SCHEMES: [&str; 6] = ["http", "https", "socks4", "socks4a", "socks5", "socks5h"];

/// Builds clients from configurations.
///
/// Implementations must not share state between builds; caching is the pool's concern.
pub trait ClientFactory: Send + Sync {
	fn build(&self, config: &ClientConfig) -> Result<HttpClient, HttpClientError>;
}

/// Builds [`reqwest`]-backed clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestClientFactory;

impl ClientFactory for ReqwestClientFactory {
	fn build(&self, config: &ClientConfig) -> Result<HttpClient, HttpClientError> {
		let mut builder = reqwest::Client::builder()
			.tcp_keepalive(Some(TCP_KEEPALIVE))
			.pool_max_idle_per_host(config.idle_per_host_limit())
			.pool_idle_timeout(non_zero(config.idle_conn_timeout))
			.gzip(!config.disable_compression);

		if let Some(timeout) = config.connect_bound() {
			builder = builder.connect_timeout(timeout);
		}
		if let Some(timeout) = non_zero(config.request_timeout) {
			builder = builder.timeout(timeout);
		}
		if !config.force_attempt_http2 {
			builder = builder.http1_only();
		}

		if config.proxy_tls_skip_verify {
			builder = builder.danger_accept_invalid_certs(true);
			warn!(
				"Proxy TLS certificate verification is disabled - this is not recommended for production use"
			);
		}

		let proxy = match pin_proxy(&config.proxy_url) {
			Some((url, pinned)) => {
				builder = builder.proxy(pinned);
				ProxyMode::Pinned(url)
			}
			None => ProxyMode::Environment,
		};

		let inner = builder.build().map_err(|e| {
			HttpClientError::build_error_with_source(
				"Failed to build HTTP client",
				config.fingerprint().as_str(),
				e,
			)
		})?;
		Ok(HttpClient::new(
			inner,
			config.clone(),
			proxy,
			config.proxy_tls_skip_verify,
		))
	}
}

/// Resolves an explicit proxy for `proxy_url`.
///
/// `None` means the environment decides: either nothing was configured, or the value is not a
/// usable proxy URL, which is reported once here. The returned URL has its password removed.
fn pin_proxy(proxy_url: &str) -> Option<(Url, reqwest::Proxy)> {
	if proxy_url.is_empty() {
		return None;
	}
	let url = match Url::parse(proxy_url) {
		Ok(url) => url,
		Err(e) => {
			warn!(
				"Invalid proxy URL '{}' provided, falling back to environment settings: {}",
				proxy_url, e
			);
			return None;
		}
	};
	if !PROXY_SCHEMES.contains(&url.scheme()) {
		warn!(
			"Invalid proxy URL '{}' provided, falling back to environment settings: unsupported scheme '{}'",
			redacted(&url),
			url.scheme()
		);
		return None;
	}
	match reqwest::Proxy::all(url.clone()) {
		Ok(pinned) => {
			let mut shown = url;
			let _ = shown.set_password(None);
			Some((shown, pinned))
		}
		Err(e) => {
			warn!(
				"Invalid proxy URL '{}' provided, falling back to environment settings: {}",
				redacted(&url),
				e
			);
			None
		}
	}
}

fn non_zero(duration: Duration) -> Option<Duration> {
	Some(duration).filter(|d| !d.is_zero())
}
