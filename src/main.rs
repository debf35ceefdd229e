use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use linepatch::config::{CONFIG_FILE_NAME, LongLinePolicy, Settings, generate_init_template};
use linepatch::stream::patch_stream;

/// Exit code when an over-long line was dropped, truncated or stopped the run.
const EXIT_LONG_LINE: u8 = 2;

#[derive(Parser)]
#[command(name = "linepatch")]
#[command(
	author,
	version,
	about = "Line filter that patches generated build files on stdin"
)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Pattern table file (TOML). Without it the built-in table is used
	#[arg(short, long, value_name = "FILE", global = true)]
	config: Option<PathBuf>,

	/// Maximum line length in bytes, excluding the line terminator
	#[arg(long, value_name = "BYTES")]
	max_line_length: Option<usize>,

	/// What to do with longer lines: skip, truncate, passthrough or fail
	#[arg(long, value_name = "POLICY")]
	on_long_line: Option<LongLinePolicy>,

	/// Don't print a warning for each over-long line
	#[arg(short, long)]
	quiet: bool,

	/// Print line counts to stderr when done
	#[arg(long)]
	stats: bool,

	/// Create a template linepatch.toml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing linepatch.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display the effective pattern table and limits
	Show,
	/// Check a config file for errors without reading stdin
	Validate,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	// Handle --init
	if cli.init {
		return handle_init(cli.force);
	}

	// Handle subcommands
	if let Some(ref command) = cli.command {
		return match command {
			Commands::Config { action } => match action {
				ConfigAction::Show => handle_config_show(cli.config.as_deref()),
				ConfigAction::Validate => handle_config_validate(cli.config.as_deref()),
			},
		};
	}

	handle_filter(&cli)
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let config_path = PathBuf::from(CONFIG_FILE_NAME);

	if config_path.exists() && !force {
		anyhow::bail!("{CONFIG_FILE_NAME} already exists. Use --force to overwrite.");
	}

	let template = generate_init_template();
	std::fs::write(&config_path, template)
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {CONFIG_FILE_NAME}");
	Ok(ExitCode::SUCCESS)
}

fn handle_config_show(config: Option<&Path>) -> Result<ExitCode> {
	let settings = Settings::load(config).context("Failed to load configuration")?;

	match settings.source {
		Some(ref path) => println!("# Source: {}", path.display()),
		None => println!("# Source: built-in"),
	}
	println!("# max-line-length: {}", settings.max_line_length);
	println!("# on-long-line: {}", settings.on_long_line);
	println!("# patterns: {}", settings.table.len());
	println!();

	for (i, pattern) in settings.table.iter().enumerate() {
		println!("  Pattern {}:", i + 1);
		println!("    kind: {}", pattern.kind);
		println!("    match: {:?}", pattern.text);
		println!("    replace: {:?}", pattern.replacement);
		println!();
	}

	let rematching = settings.table.rematching_patterns();
	if !rematching.is_empty() {
		let numbers: Vec<String> = rematching.iter().map(|i| (i + 1).to_string()).collect();
		println!(
			"Note: the replacement of pattern {} matches the pattern again; \
			 running the filter twice over the same file patches those lines twice.",
			numbers.join(", ")
		);
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate(config: Option<&Path>) -> Result<ExitCode> {
	let Some(path) = config else {
		println!("No configuration file given; the built-in table is in use.");
		return Ok(ExitCode::SUCCESS);
	};

	match Settings::load(Some(path)) {
		Ok(settings) => {
			println!("Configuration file is valid:");
			println!(
				"  {} ({} patterns)",
				path.display(),
				settings.table.len()
			);
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {:?}", anyhow::Error::from(e));
			Ok(ExitCode::FAILURE)
		}
	}
}

fn handle_filter(cli: &Cli) -> Result<ExitCode> {
	let settings = Settings::load(cli.config.as_deref())
		.context("Failed to load configuration")?
		.with_overrides(cli.max_line_length, cli.on_long_line);
	let patcher = settings.patcher().context("Invalid line length")?;

	let stdin = io::stdin().lock();
	let mut stdout = BufWriter::new(io::stdout().lock());
	let quiet = cli.quiet;

	let result = patch_stream(
		stdin,
		&mut stdout,
		&patcher,
		settings.on_long_line,
		|warning| {
			if !quiet {
				eprintln!("warning: {warning}");
			}
		},
	);

	match result {
		Ok(report) => {
			if cli.stats {
				eprintln!("linepatch: {report}");
			}
			if report.lost_data() {
				Ok(ExitCode::from(EXIT_LONG_LINE))
			} else {
				Ok(ExitCode::SUCCESS)
			}
		}
		Err(e) if e.is_line_too_long() => {
			eprintln!("error: {e}");
			Ok(ExitCode::from(EXIT_LONG_LINE))
		}
		Err(e) => Err(e).context("Failed to patch input"),
	}
}
