//! Configuration loading and validation.
//!
//! Request settings are read from a JSON file, overridden from the environment and
//! validated before being turned into a [`ClientConfig`].

use std::path::Path;

mod client_config;
pub mod error;
mod settings;

pub use client_config::{ClientConfig, DEFAULT_MAX_IDLE_CONNS_PER_HOST};
pub use error::ConfigError;
pub use settings::RequestSettings;

/// Common interface for loading configuration files
pub trait ConfigLoader: Sized {
	/// Load a configuration from a specific file path
	fn load_from_path(path: &Path) -> Result<Self, Box<ConfigError>>;

	/// Validate the configuration
	fn validate(&self) -> Result<(), ConfigError>;

	/// Check if a file is a JSON file based on extension
	fn is_json_file(path: &Path) -> bool {
		path.extension()
			.map(|ext| ext.eq_ignore_ascii_case("json"))
			.unwrap_or(false)
	}
}
