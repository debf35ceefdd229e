use std::path::PathBuf;

/// Library-level structured errors for linepatch.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
	#[error("I/O error on line stream")]
	Io(#[from] std::io::Error),

	#[error("Line {line} is too long: {len} bytes (maximum {max})")]
	LineTooLong { line: u64, len: usize, max: usize },

	#[error("Line {line} is too long after patching: {len} bytes (maximum {max})")]
	PatchedLineTooLong { line: u64, len: usize, max: usize },

	#[error("Failed to read config file: {path}")]
	ConfigRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid regex in pattern {}: {}", .index + 1, .pattern)]
	InvalidPattern {
		index: usize,
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Pattern {} has an empty match string", .index + 1)]
	EmptyPattern { index: usize },

	#[error("Pattern table is empty")]
	EmptyTable,

	#[error("max-line-length must be greater than zero")]
	InvalidMaxLineLength,
}

impl PatchError {
	/// Whether this error was raised by the line-length bound rather than the stream or config.
	pub fn is_line_too_long(&self) -> bool {
		matches!(
			self,
			PatchError::LineTooLong { .. } | PatchError::PatchedLineTooLong { .. }
		)
	}
}

/// Result type alias using PatchError.
pub type Result<T> = std::result::Result<T, PatchError>;
