//! Client pool for sharing outbound HTTP clients.
//!
//! This module provides a thread-safe client pooling system that:
//! - Caches clients by configuration fingerprint
//! - Creates clients lazily on first use
//! - Builds at most one client per fingerprint, however many callers race for it
//! - Never evicts or replaces a cached client
//!
//! The pool uses a fast path under a shared read lock for existing clients and a slow path
//! under the write lock for creating new ones.

use std::{
	collections::HashMap,
	sync::{Arc, PoisonError, RwLock},
};
use tracing::debug;

use crate::{
	models::ClientConfig,
	services::http_client::{
		ClientFactory, Fingerprint, HttpClient, HttpClientError, ReqwestClientFactory,
	},
};

/// Fingerprint-keyed cache of pooled HTTP clients.
///
/// Create one at startup and share it (for example as `Arc<ClientPool>`) with whatever
/// dispatches upstream requests.
pub struct ClientPool<F: ClientFactory = ReqwestClientFactory> {
	/// Clients indexed by the fingerprint of the configuration they were built from
	clients: RwLock<HashMap<Fingerprint, Arc<HttpClient>>>,
	factory: F,
}

impl ClientPool {
	/// Creates a new empty pool backed by [`ReqwestClientFactory`].
	pub fn new() -> Self {
		Self::with_factory(ReqwestClientFactory)
	}
}

impl Default for ClientPool {
	fn default() -> Self {
		Self::new()
	}
}

impl<F: ClientFactory> ClientPool<F> {
	/// Creates a new empty pool that builds clients with `factory`.
	pub fn with_factory(factory: F) -> Self {
		Self {
			clients: RwLock::new(HashMap::new()),
			factory,
		}
	}

	/// Gets or creates the client for `config`.
	///
	/// Uses a double-checked locking pattern:
	/// 1. Fast path with read lock to check for an existing client
	/// 2. Slow path with write lock, re-checking before building a new client
	///
	/// Every caller whose configuration has the same fingerprint receives the same `Arc`.
	/// A failed build caches nothing.
	pub fn get_client(&self, config: &ClientConfig) -> Result<Arc<HttpClient>, HttpClientError> {
		let fingerprint = config.fingerprint();

		// Fast path: check if client exists
		if let Some(client) = self
			.clients
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.get(&fingerprint)
		{
			return Ok(client.clone());
		}

		// Slow path: another caller may have built it while we waited for the write lock
		let mut clients = self
			.clients
			.write()
			.unwrap_or_else(PoisonError::into_inner);
		if let Some(client) = clients.get(&fingerprint) {
			return Ok(client.clone());
		}

		debug!(fingerprint = %fingerprint, "building new HTTP client");
		let client = Arc::new(self.factory.build(config)?);
		clients.insert(fingerprint, client.clone());
		Ok(client)
	}

	/// Number of cached clients
	pub fn len(&self) -> usize {
		self.clients
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Whether a client has been built for `fingerprint`
	pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
		self.clients
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.contains_key(fingerprint)
	}
}
