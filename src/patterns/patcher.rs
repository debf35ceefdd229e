use crate::error::{PatchError, Result};
use crate::patterns::table::PatternTable;
use std::borrow::Cow;

/// Maximum line content length, in bytes, excluding the line terminator.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 4096;

/// Apply the first matching pattern of `table` to `line`.
///
/// Only the leftmost occurrence of the first matching pattern is replaced.
/// Lines without a match are returned borrowed.
pub fn process_line<'a>(line: &'a [u8], table: &PatternTable) -> Cow<'a, [u8]> {
	match table.find_matching_pattern(line) {
		Some((_, pattern)) => match pattern.apply(line) {
			Some(patched) => Cow::Owned(patched),
			None => Cow::Borrowed(line),
		},
		None => Cow::Borrowed(line),
	}
}

/// `process_line` over text.
pub fn process_str(line: &str, table: &PatternTable) -> String {
	String::from_utf8_lossy(&process_line(line.as_bytes(), table)).into_owned()
}

/// A pattern table paired with the line length bound.
#[derive(Debug, Clone)]
pub struct Patcher {
	table: PatternTable,
	max_line_length: usize,
}

impl Patcher {
	pub fn new(table: PatternTable, max_line_length: usize) -> Result<Self> {
		if max_line_length == 0 {
			return Err(PatchError::InvalidMaxLineLength);
		}
		Ok(Patcher {
			table,
			max_line_length,
		})
	}

	pub fn table(&self) -> &PatternTable {
		&self.table
	}

	pub fn max_line_length(&self) -> usize {
		self.max_line_length
	}

	/// Patch one line's content (terminator excluded).
	///
	/// Fails with `LineTooLong` if the input exceeds the bound and with
	/// `PatchedLineTooLong` if the substitution grows it past the bound.
	/// `line_no` is 1-based and only used for error reporting.
	pub fn process<'a>(&self, line_no: u64, line: &'a [u8]) -> Result<Cow<'a, [u8]>> {
		if line.len() > self.max_line_length {
			return Err(PatchError::LineTooLong {
				line: line_no,
				len: line.len(),
				max: self.max_line_length,
			});
		}

		let patched = process_line(line, &self.table);
		if patched.len() > self.max_line_length {
			return Err(PatchError::PatchedLineTooLong {
				line: line_no,
				len: patched.len(),
				max: self.max_line_length,
			});
		}

		Ok(patched)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::types::PatternSpec;
	use crate::patterns::table::compile_patterns;

	fn builtin() -> PatternTable {
		PatternTable::builtin().unwrap()
	}

	#[test]
	fn test_cc_line_patched() {
		assert_eq!(process_str("CC = gcc", &builtin()), "CC = gcc -w");
	}

	#[test]
	fn test_bison_line_patched() {
		assert_eq!(
			process_str("BISON_OPTS = -t -pgrammar_", &builtin()),
			"BISON_OPTS = -t -pgrammar_ -Wnone"
		);
	}

	#[test]
	fn test_unmatched_line_is_borrowed() {
		let table = builtin();
		let line = b"hello world";
		let out = process_line(line, &table);
		assert!(matches!(out, Cow::Borrowed(_)));
		assert_eq!(&*out, line);
	}

	#[test]
	fn test_surrounding_text_preserved() {
		assert_eq!(
			process_str("\tCC = gcc # compiler", &builtin()),
			"\tCC = gcc -w # compiler"
		);
	}

	#[test]
	fn test_match_inside_longer_token() {
		// Substring semantics: "CC = gcc-12" still contains "CC = gcc".
		assert_eq!(process_str("CC = gcc-12", &builtin()), "CC = gcc -w-12");
	}

	#[test]
	fn test_only_first_pattern_applied() {
		assert_eq!(
			process_str("CC = gcc; BISON_OPTS = -t -pgrammar_", &builtin()),
			"CC = gcc -w; BISON_OPTS = -t -pgrammar_"
		);
	}

	#[test]
	fn test_only_first_occurrence_of_pattern_replaced() {
		assert_eq!(
			process_str("CC = gcc CC = gcc", &builtin()),
			"CC = gcc -w CC = gcc"
		);
	}

	#[test]
	fn test_not_idempotent_for_builtin_table() {
		let once = process_str("CC = gcc", &builtin());
		let twice = process_str(&once, &builtin());
		assert_eq!(twice, "CC = gcc -w -w");
	}

	#[test]
	fn test_non_utf8_bytes_pass_through() {
		let table = builtin();
		let line = b"\xff\xfe CC = gcc \x80";
		assert_eq!(&*process_line(line, &table), b"\xff\xfe CC = gcc -w \x80");
	}

	#[test]
	fn test_empty_table_is_identity() {
		let table = compile_patterns(&[]).unwrap();
		assert_eq!(process_str("CC = gcc", &table), "CC = gcc");
	}

	#[test]
	fn test_patcher_rejects_zero_bound() {
		assert!(matches!(
			Patcher::new(builtin(), 0),
			Err(PatchError::InvalidMaxLineLength)
		));
	}

	#[test]
	fn test_patcher_line_at_bound_accepted() {
		let patcher = Patcher::new(builtin(), 8).unwrap();
		assert_eq!(&*patcher.process(1, b"12345678").unwrap(), b"12345678");
	}

	#[test]
	fn test_patcher_line_too_long() {
		let patcher = Patcher::new(builtin(), 8).unwrap();
		match patcher.process(7, b"123456789").unwrap_err() {
			PatchError::LineTooLong { line, len, max } => {
				assert_eq!(line, 7);
				assert_eq!(len, 9);
				assert_eq!(max, 8);
			}
			_ => panic!("Expected LineTooLong error"),
		}
	}

	#[test]
	fn test_patcher_replacement_exceeds_bound() {
		// "CC = gcc" fits in 8 bytes, "CC = gcc -w" does not.
		let patcher = Patcher::new(builtin(), 8).unwrap();
		match patcher.process(2, b"CC = gcc").unwrap_err() {
			PatchError::PatchedLineTooLong { line, len, max } => {
				assert_eq!(line, 2);
				assert_eq!(len, 11);
				assert_eq!(max, 8);
			}
			_ => panic!("Expected PatchedLineTooLong error"),
		}
	}

	#[test]
	fn test_patcher_shrinking_replacement() {
		let table = compile_patterns(&[PatternSpec::literal("long-name", "x")]).unwrap();
		let patcher = Patcher::new(table, 12).unwrap();
		let err = patcher.process(1, b"a long-name b").unwrap_err();
		assert_eq!(err.to_string(), "Line 1 is too long: 13 bytes (maximum 12)");
		assert_eq!(&*patcher.process(1, b"long-name b").unwrap(), b"x b");
	}
}
