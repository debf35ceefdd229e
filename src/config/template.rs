use crate::patterns::BUILTIN_PATTERNS;
use std::fmt::Write;

/// Default file name written by `--init`.
pub const CONFIG_FILE_NAME: &str = "linepatch.toml";

/// Generate a template config that reproduces the built-in table.
pub fn generate_init_template() -> String {
	let mut template = String::from(
		r#"# linepatch configuration
#
# Lines are read from stdin and written to stdout. For each line the
# patterns below are tried in order; the first one found has its leftmost
# occurrence replaced and the rest are skipped.

# Prepend the compiled-in patterns to the table below.
include-builtin = false

# Maximum line length in bytes, excluding the line terminator.
max-line-length = 4096

# What to do with longer lines: skip, truncate, passthrough or fail.
on-long-line = "skip"
"#,
	);

	for (pattern, replacement) in BUILTIN_PATTERNS {
		let _ = write!(
			template,
			"\n[[patterns]]\nmatch = {}\nreplace = {}\n",
			toml_string(pattern),
			toml_string(replacement)
		);
	}

	template.push_str(
		r#"
# Regex patterns may reference capture groups in the replacement:
# [[patterns]]
# match = 'CFLAGS = (.*)'
# replace = 'CFLAGS = $1 -w'
# kind = "regex"
"#,
	);

	template
}

/// Quote `s` as a TOML string.
fn toml_string(s: &str) -> String {
	toml::Value::String(s.to_string()).to_string()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::parser::parse_config_str;
	use crate::config::types::LongLinePolicy;
	use crate::patterns::builtin_specs;
	use std::path::Path;

	#[test]
	fn test_template_parses() {
		let template = generate_init_template();
		let config = parse_config_str(&template, Path::new(CONFIG_FILE_NAME)).unwrap();

		assert!(!config.include_builtin);
		assert_eq!(config.max_line_length, Some(4096));
		assert_eq!(config.on_long_line, Some(LongLinePolicy::Skip));
	}

	#[test]
	fn test_template_reproduces_builtin_table() {
		let template = generate_init_template();
		let config = parse_config_str(&template, Path::new(CONFIG_FILE_NAME)).unwrap();
		assert_eq!(config.patterns, builtin_specs());
	}
}
