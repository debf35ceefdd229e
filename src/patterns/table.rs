use crate::config::types::{Config, PatternKind, PatternSpec};
use crate::error::{PatchError, Result};
use regex::bytes::Regex;
use std::ops::Range;

/// The compiled-in pattern table, in match order.
///
/// These silence compiler and parser-generator warnings in the generated
/// parser `Makefile`. The text is bit-exact.
pub const BUILTIN_PATTERNS: &[(&str, &str)] = &[
	("CC = gcc", "CC = gcc -w"),
	("BISON_OPTS = -t -pgrammar_", "BISON_OPTS = -t -pgrammar_ -Wnone"),
];

/// A compiled pattern ready for matching.
#[derive(Debug, Clone)]
pub struct Pattern {
	/// The pattern text as written (literal text or regex source).
	pub text: String,

	/// The replacement text.
	pub replacement: String,

	/// How `text` and `replacement` are interpreted.
	pub kind: PatternKind,

	regex: Regex,
}

impl Pattern {
	/// Compile a pattern spec. `index` is its position in the table, used in errors.
	pub fn compile(index: usize, spec: &PatternSpec) -> Result<Self> {
		if spec.pattern.is_empty() {
			return Err(PatchError::EmptyPattern { index });
		}

		let source = match spec.kind {
			PatternKind::Literal => regex::escape(&spec.pattern),
			PatternKind::Regex => spec.pattern.clone(),
		};

		let regex = Regex::new(&source).map_err(|source| PatchError::InvalidPattern {
			index,
			pattern: spec.pattern.clone(),
			source,
		})?;

		Ok(Pattern {
			text: spec.pattern.clone(),
			replacement: spec.replacement.clone(),
			kind: spec.kind,
			regex,
		})
	}

	/// Byte range of the leftmost occurrence in `line`.
	pub fn find(&self, line: &[u8]) -> Option<Range<usize>> {
		self.regex.find(line).map(|m| m.range())
	}

	/// Replace the leftmost occurrence in `line`, or `None` if there is none.
	///
	/// Literal replacements are inserted verbatim; regex replacements expand
	/// `$1` / `${name}` capture references.
	pub fn apply(&self, line: &[u8]) -> Option<Vec<u8>> {
		match self.kind {
			PatternKind::Literal => {
				let span = self.find(line)?;
				let mut out =
					Vec::with_capacity(line.len() - span.len() + self.replacement.len());
				out.extend_from_slice(&line[..span.start]);
				out.extend_from_slice(self.replacement.as_bytes());
				out.extend_from_slice(&line[span.end..]);
				Some(out)
			}
			PatternKind::Regex => {
				let caps = self.regex.captures(line)?;
				let span = caps.get(0)?.range();
				let mut out = Vec::with_capacity(line.len() + self.replacement.len());
				out.extend_from_slice(&line[..span.start]);
				caps.expand(self.replacement.as_bytes(), &mut out);
				out.extend_from_slice(&line[span.end..]);
				Some(out)
			}
		}
	}

	/// Whether the replacement text would itself be matched by this pattern.
	///
	/// For regex patterns the replacement is checked as written, before any
	/// capture expansion.
	pub fn rematches_replacement(&self) -> bool {
		self.regex.is_match(self.replacement.as_bytes())
	}
}

/// Ordered, immutable pattern table. First matching pattern wins.
#[derive(Debug, Clone, Default)]
pub struct PatternTable {
	patterns: Vec<Pattern>,
}

impl PatternTable {
	/// The compiled-in table.
	pub fn builtin() -> Result<Self> {
		compile_patterns(&builtin_specs())
	}

	/// Build the table a config file describes.
	pub fn from_config(config: &Config) -> Result<Self> {
		let mut specs = Vec::new();
		if config.include_builtin {
			specs.extend(builtin_specs());
		}
		specs.extend(config.patterns.iter().cloned());

		if specs.is_empty() {
			return Err(PatchError::EmptyTable);
		}

		compile_patterns(&specs)
	}

	pub fn len(&self) -> usize {
		self.patterns.len()
	}

	pub fn is_empty(&self) -> bool {
		self.patterns.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
		self.patterns.iter()
	}

	/// Find the first pattern (in table order) occurring in `line`.
	pub fn find_matching_pattern(&self, line: &[u8]) -> Option<(usize, &Pattern)> {
		self.patterns
			.iter()
			.enumerate()
			.find(|(_, pattern)| pattern.find(line).is_some())
	}

	/// Indices of patterns whose replacement re-matches the same pattern.
	///
	/// Running the filter twice over such a line applies the pattern twice.
	pub fn rematching_patterns(&self) -> Vec<usize> {
		self.patterns
			.iter()
			.enumerate()
			.filter(|(_, pattern)| pattern.rematches_replacement())
			.map(|(i, _)| i)
			.collect()
	}
}

/// Compile pattern specs into a table, preserving order.
pub fn compile_patterns(specs: &[PatternSpec]) -> Result<PatternTable> {
	let patterns = specs
		.iter()
		.enumerate()
		.map(|(i, spec)| Pattern::compile(i, spec))
		.collect::<Result<Vec<_>>>()?;

	Ok(PatternTable { patterns })
}

/// The built-in table as literal specs.
pub fn builtin_specs() -> Vec<PatternSpec> {
	BUILTIN_PATTERNS
		.iter()
		.map(|(pattern, replacement)| PatternSpec::literal(pattern, replacement))
		.collect()
}
