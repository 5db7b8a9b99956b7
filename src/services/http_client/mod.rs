//! Outbound HTTP clients shared by configuration.
//!
//! - `fingerprint`: canonical cache key for a [`ClientConfig`](crate::models::ClientConfig)
//! - `factory`: builds a [`HttpClient`] from a configuration
//! - `pool`: caches one client per fingerprint

mod client;
mod error;
mod factory;
mod fingerprint;
mod pool;

pub use client::{HttpClient, ProxyMode, UpstreamRequest};
pub use error::HttpClientError;
pub use factory::{ClientFactory, ReqwestClientFactory};
pub use fingerprint::{fingerprint, Fingerprint};
pub use pool::ClientPool;
