//! Domain models and data structures.
//!
//! - `config`: the outbound client configuration and the request settings it is derived from

mod config;

pub use config::{
	ClientConfig, ConfigError, ConfigLoader, RequestSettings, DEFAULT_MAX_IDLE_CONNS_PER_HOST,
};
