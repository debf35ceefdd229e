//! Configuration loading and parsing for linepatch.
//!
//! This module handles:
//! - TOML pattern-table file parsing and validation
//! - Resolving defaults, file values and command-line overrides
//! - The `--init` template

pub mod parser;
pub mod settings;
pub mod template;
pub mod types;

pub use parser::{parse_config_file, parse_config_str};
pub use settings::Settings;
pub use template::{CONFIG_FILE_NAME, generate_init_template};
pub use types::{Config, LoadedConfig, LongLinePolicy, PatternKind, PatternSpec};
