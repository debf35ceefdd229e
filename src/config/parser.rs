use crate::config::types::{Config, LoadedConfig};
use crate::error::{PatchError, Result};
use std::path::Path;

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<LoadedConfig> {
	let content = std::fs::read_to_string(path).map_err(|source| PatchError::ConfigRead {
		path: path.to_path_buf(),
		source,
	})?;

	let config = parse_config_str(&content, path)?;
	Ok(LoadedConfig {
		config,
		path: path.to_path_buf(),
	})
}

/// Parse a config from a string (useful for testing).
pub fn parse_config_str(content: &str, path: &Path) -> Result<Config> {
	let config: Config = toml::from_str(content).map_err(|source| PatchError::ConfigParse {
		path: path.to_path_buf(),
		source,
	})?;

	// Validate the parsed config
	config.validate()?;

	Ok(config)
}
