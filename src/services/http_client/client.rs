//! Pooled outbound HTTP client.
//!
//! Requests sent through [`HttpClient`] are bounded twice: by the overall request deadline the
//! transport enforces, and by the response-header deadline enforced here around the send
//! future, which completes once the status line and headers have arrived.

use reqwest::{
	header::{HeaderMap, HeaderName, HeaderValue},
	Body, Method, Request, Response,
};
use serde::Serialize;
use std::{fmt::Display, future::Future, time::Duration};
use url::Url;

use crate::{
	models::ClientConfig,
	services::http_client::{Fingerprint, HttpClientError},
};

/// How the client resolves its outbound proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyMode {
	/// All traffic goes through this proxy (password removed)
	Pinned(Url),
	/// `HTTP_PROXY` / `HTTPS_PROXY` / `NO_PROXY` are consulted per request
	Environment,
}

/// A reusable client owning one connection pool.
///
/// Built once per distinct [`Fingerprint`] and shared through `Arc`. Connections are opened
/// lazily on first use.
#[derive(Debug)]
pub struct HttpClient {
	inner: reqwest::Client,
	fingerprint: Fingerprint,
	settings: ClientConfig,
	proxy: ProxyMode,
	proxy_tls_skip_verify: bool,
}

impl HttpClient {
	pub(crate) fn new(
		inner: reqwest::Client,
		settings: ClientConfig,
		proxy: ProxyMode,
		proxy_tls_skip_verify: bool,
	) -> Self {
		Self {
			inner,
			fingerprint: settings.fingerprint(),
			settings,
			proxy,
			proxy_tls_skip_verify,
		}
	}

	/// Starts a request against `url`, bounded by the configured request and header deadlines.
	pub fn request(&self, method: Method, url: Url) -> UpstreamRequest {
		UpstreamRequest {
			url: url.clone(),
			builder: self.inner.request(method, url),
			header_timeout: self.response_header_timeout(),
		}
	}

	/// Starts a `GET` request against `url`.
	pub fn get(&self, url: Url) -> UpstreamRequest {
		self.request(Method::GET, url)
	}

	/// Sends a prepared request.
	pub async fn execute(&self, request: Request) -> Result<Response, HttpClientError> {
		let url = request.url().clone();
		await_headers(
			self.response_header_timeout(),
			&url,
			self.inner.execute(request),
		)
		.await
	}

	/// The fingerprint this client was built for
	pub fn fingerprint(&self) -> &Fingerprint {
		&self.fingerprint
	}

	/// The configuration this client was built from
	pub fn settings(&self) -> &ClientConfig {
		&self.settings
	}

	pub fn proxy(&self) -> &ProxyMode {
		&self.proxy
	}

	/// Whether certificate verification was turned off for proxied traffic
	pub fn proxy_tls_skip_verify(&self) -> bool {
		self.proxy_tls_skip_verify
	}

	/// Per-request deadline; `None` when requests are unbounded
	pub fn request_timeout(&self) -> Option<Duration> {
		Some(self.settings.request_timeout).filter(|timeout| !timeout.is_zero())
	}

	/// Deadline for the response headers, counted from the start of the send
	pub fn response_header_timeout(&self) -> Option<Duration> {
		Some(self.settings.response_header_timeout).filter(|timeout| !timeout.is_zero())
	}

	/// Bound on dialing plus the TLS handshake; `None` when dialing is unbounded
	pub fn connect_timeout(&self) -> Option<Duration> {
		self.settings.connect_bound()
	}
}

/// A request being built against a pooled client.
///
/// Sending it applies the client's response-header deadline on top of the transport's own
/// request deadline.
#[derive(Debug)]
pub struct UpstreamRequest {
	url: Url,
	builder: reqwest::RequestBuilder,
	header_timeout: Option<Duration>,
}

impl UpstreamRequest {
	pub fn header(self, key: HeaderName, value: HeaderValue) -> Self {
		self.map(|builder| builder.header(key, value))
	}

	pub fn headers(self, headers: HeaderMap) -> Self {
		self.map(|builder| builder.headers(headers))
	}

	pub fn bearer_auth<T: Display>(self, token: T) -> Self {
		self.map(|builder| builder.bearer_auth(token))
	}

	pub fn basic_auth<U: Display, P: Display>(self, username: U, password: Option<P>) -> Self {
		self.map(|builder| builder.basic_auth(username, password))
	}

	pub fn body<T: Into<Body>>(self, body: T) -> Self {
		self.map(|builder| builder.body(body))
	}

	pub fn query<T: Serialize + ?Sized>(self, query: &T) -> Self {
		self.map(|builder| builder.query(query))
	}

	/// Overrides the overall deadline for this request only
	pub fn timeout(self, timeout: Duration) -> Self {
		self.map(|builder| builder.timeout(timeout))
	}

	/// Builds the request without sending it, for use with [`HttpClient::execute`].
	pub fn build(self) -> reqwest::Result<Request> {
		self.builder.build()
	}

	/// Sends the request and waits for the response headers.
	pub async fn send(self) -> Result<Response, HttpClientError> {
		await_headers(self.header_timeout, &self.url, self.builder.send()).await
	}

	fn map(self, f: impl FnOnce(reqwest::RequestBuilder) -> reqwest::RequestBuilder) -> Self {
		Self {
			builder: f(self.builder),
			..self
		}
	}
}

async fn await_headers<F>(
	header_timeout: Option<Duration>,
	url: &Url,
	send: F,
) -> Result<Response, HttpClientError>
where
	F: Future<Output = reqwest::Result<Response>>,
{
	let result = match header_timeout {
		Some(timeout) => tokio::time::timeout(timeout, send)
			.await
			.map_err(|_| HttpClientError::response_header_timeout(timeout, Some(url)))?,
		None => send.await,
	};
	result.map_err(HttpClientError::request_error)
}
