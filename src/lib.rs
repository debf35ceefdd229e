//! linepatch - line filter for patching generated build files.
//!
//! This library provides the core functionality for linepatch, including:
//! - An ordered pattern table with first-match-wins substitution
//! - Bounded, order-preserving line streaming with a long-line policy
//! - TOML configuration for custom pattern tables
//! - A no-op tree-sitter external scanner for the MeTTa grammar
//!
//! # Example
//!
//! ```
//! use linepatch::config::LongLinePolicy;
//! use linepatch::patterns::{Patcher, PatternTable, DEFAULT_MAX_LINE_LENGTH};
//! use linepatch::stream::patch_stream;
//!
//! let table = PatternTable::builtin().unwrap();
//! let patcher = Patcher::new(table, DEFAULT_MAX_LINE_LENGTH).unwrap();
//!
//! let mut output = Vec::new();
//! let report = patch_stream(
//!     &b"CC = gcc\nall: test\n"[..],
//!     &mut output,
//!     &patcher,
//!     LongLinePolicy::Skip,
//!     |warning| eprintln!("warning: {warning}"),
//! )
//! .unwrap();
//!
//! assert_eq!(output, b"CC = gcc -w\nall: test\n");
//! assert_eq!(report.lines_patched, 1);
//! ```

pub mod config;
pub mod error;
pub mod patterns;
pub mod scanner;
pub mod stream;

pub use error::{PatchError, Result};
