use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Top-level configuration from a `linepatch.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
	/// If true, the built-in patterns come first in the table.
	#[serde(default)]
	pub include_builtin: bool,

	/// Maximum line content length in bytes. Defaults to 4096.
	#[serde(default)]
	pub max_line_length: Option<usize>,

	/// What to do with lines longer than `max_line_length`.
	#[serde(default)]
	pub on_long_line: Option<LongLinePolicy>,

	/// Patterns in match order. First matching pattern wins.
	#[serde(default)]
	pub patterns: Vec<PatternSpec>,
}

/// One (pattern, replacement) pair as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternSpec {
	/// Text to search for.
	#[serde(rename = "match")]
	pub pattern: String,

	/// Text that replaces the leftmost occurrence.
	#[serde(rename = "replace")]
	pub replacement: String,

	#[serde(default)]
	pub kind: PatternKind,
}

impl PatternSpec {
	pub fn literal(pattern: &str, replacement: &str) -> Self {
		PatternSpec {
			pattern: pattern.to_string(),
			replacement: replacement.to_string(),
			kind: PatternKind::Literal,
		}
	}
}

/// How a pattern's text is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
	/// Byte-for-byte substring; replacement inserted verbatim.
	#[default]
	Literal,

	/// `regex` crate syntax; replacement may use `$1` / `${name}`.
	Regex,
}

impl fmt::Display for PatternKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PatternKind::Literal => write!(f, "literal"),
			PatternKind::Regex => write!(f, "regex"),
		}
	}
}

/// Handling of lines that exceed the maximum line length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LongLinePolicy {
	/// Drop the line and warn.
	#[default]
	Skip,

	/// Cut the line to the maximum length and warn.
	Truncate,

	/// Emit the original line unchanged and warn.
	Passthrough,

	/// Stop processing with an error.
	Fail,
}

impl FromStr for LongLinePolicy {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"skip" => Ok(LongLinePolicy::Skip),
			"truncate" => Ok(LongLinePolicy::Truncate),
			"passthrough" => Ok(LongLinePolicy::Passthrough),
			"fail" => Ok(LongLinePolicy::Fail),
			other => Err(format!(
				"unknown policy '{other}' (expected skip, truncate, passthrough or fail)"
			)),
		}
	}
}

impl fmt::Display for LongLinePolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			LongLinePolicy::Skip => "skip",
			LongLinePolicy::Truncate => "truncate",
			LongLinePolicy::Passthrough => "passthrough",
			LongLinePolicy::Fail => "fail",
		};
		write!(f, "{name}")
	}
}

/// A loaded configuration with its source path for display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

impl Config {
	/// Validate values the TOML schema cannot express.
	pub fn validate(&self) -> Result<(), crate::error::PatchError> {
		if self.max_line_length == Some(0) {
			return Err(crate::error::PatchError::InvalidMaxLineLength);
		}

		let offset = if self.include_builtin {
			crate::patterns::BUILTIN_PATTERNS.len()
		} else {
			0
		};
		for (i, spec) in self.patterns.iter().enumerate() {
			if spec.pattern.is_empty() {
				return Err(crate::error::PatchError::EmptyPattern { index: offset + i });
			}
		}

		if !self.include_builtin && self.patterns.is_empty() {
			return Err(crate::error::PatchError::EmptyTable);
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_policy_from_str() {
		assert_eq!("skip".parse::<LongLinePolicy>(), Ok(LongLinePolicy::Skip));
		assert_eq!("truncate".parse::<LongLinePolicy>(), Ok(LongLinePolicy::Truncate));
		assert_eq!("passthrough".parse::<LongLinePolicy>(), Ok(LongLinePolicy::Passthrough));
		assert_eq!("fail".parse::<LongLinePolicy>(), Ok(LongLinePolicy::Fail));
		assert!("drop".parse::<LongLinePolicy>().is_err());
	}

	#[test]
	fn test_policy_display_round_trips() {
		for policy in [
			LongLinePolicy::Skip,
			LongLinePolicy::Truncate,
			LongLinePolicy::Passthrough,
			LongLinePolicy::Fail,
		] {
			assert_eq!(policy.to_string().parse::<LongLinePolicy>(), Ok(policy));
		}
	}
}
