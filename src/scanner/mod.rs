//! Tree-sitter external scanner for the MeTTa grammar.
//!
//! The grammar tokenizes everything itself, so the scanner recognizes
//! nothing and keeps no state. It exists because the generated parser links
//! against the five `tree_sitter_metta_external_scanner_*` symbols.

pub mod ffi;

/// Size of the buffer tree-sitter hands to `serialize`.
pub const SERIALIZATION_BUFFER_SIZE: usize = 1024;

/// Scanner with no state and no tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullScanner;

impl NullScanner {
	pub fn create() -> Self {
		NullScanner
	}

	/// Write the scanner state into `buffer`, returning the bytes written.
	pub fn serialize(&self, _buffer: &mut [u8]) -> usize {
		0
	}

	pub fn deserialize(&mut self, _buffer: &[u8]) {}

	/// Try to recognize one external token. `valid_symbols` flags which
	/// external tokens the parser would accept here.
	pub fn scan(&mut self, _valid_symbols: &[bool]) -> bool {
		false
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_serialize_writes_nothing() {
		let scanner = NullScanner::create();
		let mut buffer = [0xAAu8; SERIALIZATION_BUFFER_SIZE];
		assert_eq!(scanner.serialize(&mut buffer), 0);
		assert!(buffer.iter().all(|&b| b == 0xAA));
	}

	#[test]
	fn test_deserialize_keeps_state() {
		let mut scanner = NullScanner::create();
		scanner.deserialize(b"anything");
		scanner.deserialize(&[]);
		assert_eq!(scanner, NullScanner);
	}

	#[test]
	fn test_scan_never_matches() {
		let mut scanner = NullScanner::create();
		assert!(!scanner.scan(&[]));
		assert!(!scanner.scan(&[true, true, true]));
	}
}
