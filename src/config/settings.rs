use crate::config::parser::parse_config_file;
use crate::config::types::{Config, LongLinePolicy};
use crate::error::Result;
use crate::patterns::{DEFAULT_MAX_LINE_LENGTH, Patcher, PatternTable};
use std::path::{Path, PathBuf};

/// Effective settings for one run: built-in defaults, then the config
/// file, then command-line overrides.
#[derive(Debug, Clone)]
pub struct Settings {
	pub table: PatternTable,
	pub max_line_length: usize,
	pub on_long_line: LongLinePolicy,

	/// The config file these settings came from, if any.
	pub source: Option<PathBuf>,
}

impl Settings {
	/// Settings with the compiled-in table and default limits.
	pub fn builtin() -> Result<Self> {
		Ok(Settings {
			table: PatternTable::builtin()?,
			max_line_length: DEFAULT_MAX_LINE_LENGTH,
			on_long_line: LongLinePolicy::default(),
			source: None,
		})
	}

	/// Settings described by an already-parsed config.
	pub fn from_config(config: &Config, source: Option<PathBuf>) -> Result<Self> {
		config.validate()?;

		Ok(Settings {
			table: PatternTable::from_config(config)?,
			max_line_length: config.max_line_length.unwrap_or(DEFAULT_MAX_LINE_LENGTH),
			on_long_line: config.on_long_line.unwrap_or_default(),
			source,
		})
	}

	/// Load settings from `path`, or the built-in settings when `path` is `None`.
	pub fn load(path: Option<&Path>) -> Result<Self> {
		match path {
			Some(path) => {
				let loaded = parse_config_file(path)?;
				Settings::from_config(&loaded.config, Some(loaded.path))
			}
			None => Settings::builtin(),
		}
	}

	/// Apply command-line overrides.
	pub fn with_overrides(
		mut self,
		max_line_length: Option<usize>,
		on_long_line: Option<LongLinePolicy>,
	) -> Self {
		if let Some(max) = max_line_length {
			self.max_line_length = max;
		}
		if let Some(policy) = on_long_line {
			self.on_long_line = policy;
		}
		self
	}

	/// Build the patcher these settings describe.
	pub fn patcher(&self) -> Result<Patcher> {
		Patcher::new(self.table.clone(), self.max_line_length)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::parser::parse_config_str;
	use crate::error::PatchError;
	use std::fs;

	#[test]
	fn test_builtin_settings() {
		let settings = Settings::builtin().unwrap();
		assert_eq!(settings.table.len(), 2);
		assert_eq!(settings.max_line_length, 4096);
		assert_eq!(settings.on_long_line, LongLinePolicy::Skip);
		assert!(settings.source.is_none());
	}

	#[test]
	fn test_load_without_path_is_builtin() {
		let settings = Settings::load(None).unwrap();
		assert_eq!(settings.table.len(), 2);
	}

	#[test]
	fn test_from_config_applies_values() {
		let content = r#"
max-line-length = 100
on-long-line = "fail"

[[patterns]]
match = "foo"
replace = "bar"
"#;
		let config = parse_config_str(content, Path::new("linepatch.toml")).unwrap();
		let settings = Settings::from_config(&config, None).unwrap();

		assert_eq!(settings.table.len(), 1);
		assert_eq!(settings.max_line_length, 100);
		assert_eq!(settings.on_long_line, LongLinePolicy::Fail);
	}

	#[test]
	fn test_load_from_file_records_source() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("linepatch.toml");
		fs::write(&path, "include-builtin = true\n").unwrap();

		let settings = Settings::load(Some(&path)).unwrap();
		assert_eq!(settings.source, Some(path));
		assert_eq!(settings.table.len(), 2);
	}

	#[test]
	fn test_load_invalid_regex_from_file() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("linepatch.toml");
		fs::write(
			&path,
			r#"
[[patterns]]
match = "(unclosed"
replace = "x"
kind = "regex"
"#,
		)
		.unwrap();

		let result = Settings::load(Some(&path));
		assert!(matches!(result, Err(PatchError::InvalidPattern { index: 0, .. })));
	}

	#[test]
	fn test_overrides_win_over_config() {
		let settings = Settings::builtin()
			.unwrap()
			.with_overrides(Some(10), Some(LongLinePolicy::Truncate));
		assert_eq!(settings.max_line_length, 10);
		assert_eq!(settings.on_long_line, LongLinePolicy::Truncate);
	}

	#[test]
	fn test_zero_override_rejected_by_patcher() {
		let settings = Settings::builtin().unwrap().with_overrides(Some(0), None);
		assert!(matches!(
			settings.patcher(),
			Err(PatchError::InvalidMaxLineLength)
		));
	}
}
