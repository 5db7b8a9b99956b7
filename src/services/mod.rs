//! Core services.
//!
//! - `http_client`: fingerprint-keyed pool of outbound HTTP clients

pub mod http_client;
