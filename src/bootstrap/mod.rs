//! Service initialisation.
//!
//! Loads request settings from a file and the environment, validates them, and sets up the
//! shared client pool handed to the request-dispatch layer.

use std::{collections::HashMap, path::Path, sync::Arc};

use tracing::info;

use crate::{
	models::{ClientConfig, ConfigError, ConfigLoader, RequestSettings},
	services::http_client::ClientPool,
};

/// Loads the request settings.
///
/// Starts from `path` when given (defaults otherwise), applies environment overrides through
/// `lookup`, then validates the result.
pub fn load_settings<F>(path: Option<&Path>, lookup: F) -> Result<RequestSettings, Box<ConfigError>>
where
	F: Fn(&str) -> Option<String>,
{
	let settings = match path {
		Some(path) if !RequestSettings::is_json_file(path) => {
			return Err(Box::new(ConfigError::file_error(
				"Settings file must be a .json file",
				Some(HashMap::from([(
					"path".to_string(),
					path.display().to_string(),
				)])),
			)));
		}
		Some(path) => RequestSettings::load_from_path(path)?,
		None => RequestSettings::default(),
	};

	let settings = settings.apply_env_from(lookup)?;
	settings.validate()?;
	Ok(settings)
}

/// Creates the process-wide client pool and derives the default client configuration.
pub fn initialize_pool(settings: &RequestSettings) -> (Arc<ClientPool>, ClientConfig) {
	let config = ClientConfig::from(settings);
	info!(
		fingerprint = %config.fingerprint(),
		"client pool initialised"
	);
	(Arc::new(ClientPool::new()), config)
}
