//! C ABI entry points expected by the generated MeTTa parser.
//!
//! The payload is always null: `NullScanner` is zero-sized, so there is
//! nothing to allocate. Every function accepts null pointers.

use super::NullScanner;
use std::ffi::{c_char, c_uint, c_void};

/// The tree-sitter lexer handed to `scan`. Never dereferenced here.
#[repr(C)]
pub struct TSLexer {
	_private: [u8; 0],
}

#[unsafe(no_mangle)]
pub extern "C" fn tree_sitter_metta_external_scanner_create() -> *mut c_void {
	std::ptr::null_mut()
}

#[unsafe(no_mangle)]
pub extern "C" fn tree_sitter_metta_external_scanner_destroy(_payload: *mut c_void) {}

#[unsafe(no_mangle)]
pub extern "C" fn tree_sitter_metta_external_scanner_serialize(
	_payload: *mut c_void,
	_buffer: *mut c_char,
) -> c_uint {
	NullScanner.serialize(&mut []) as c_uint
}

#[unsafe(no_mangle)]
pub extern "C" fn tree_sitter_metta_external_scanner_deserialize(
	_payload: *mut c_void,
	_buffer: *const c_char,
	_length: c_uint,
) {
	NullScanner.deserialize(&[]);
}

#[unsafe(no_mangle)]
pub extern "C" fn tree_sitter_metta_external_scanner_scan(
	_payload: *mut c_void,
	_lexer: *mut TSLexer,
	_valid_symbols: *const bool,
) -> bool {
	NullScanner.scan(&[])
}
