//! Pattern tables and line patching.
//!
//! This module handles:
//! - Compiling literal and regex patterns into an ordered table
//! - First-match-wins substitution on a single line

pub mod patcher;
pub mod table;

pub use patcher::{DEFAULT_MAX_LINE_LENGTH, Patcher, process_line, process_str};
pub use table::{BUILTIN_PATTERNS, Pattern, PatternTable, builtin_specs, compile_patterns};
