//! Upstream client pool.
//!
//! Shares pooled outbound HTTP clients between the request-forwarding paths of a proxy
//! service. Clients are keyed by a fingerprint of their configuration and built at most once
//! per fingerprint.
//!
//! - `models`: client configuration and the request settings it is derived from
//! - `services`: fingerprinting, client construction and the client pool
//! - `bootstrap`: settings loading and pool setup
//! - `utils`: error context and logging helpers

pub mod bootstrap;
pub mod models;
pub mod services;
pub mod utils;
