// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use subcleaner::app_config::{Config, LogLevel};
use subcleaner::app_controller::{Controller, FileReport};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for subcleaner
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// subcleaner - parse, repair and renumber SRT subtitle files
///
/// Every block of the input is parsed on its own; blocks that cannot be
/// parsed are reported with their index and file and left out of the output.
#[derive(Parser, Debug)]
#[command(name = "subcleaner")]
#[command(version)]
#[command(about = "Subtitle block parser and cleaner")]
#[command(long_about = "subcleaner reads SRT subtitle files, repairs loosely formatted timestamps and writes a cleaned copy.

EXAMPLES:
    subcleaner movie.srt                       # Writes movie.clean.srt next to the input
    subcleaner -o out/ movie.srt               # Write the cleaned file into out/
    subcleaner --fail-fast movie.srt           # Stop at the first broken block
    subcleaner --log-level debug /subtitles/   # Clean a whole directory
    subcleaner completions bash > subcleaner.bash

CONFIGURATION:
    Configuration is stored in subcleaner.json by default. If the file does
    not exist, a default one is created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input subtitle file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Directory for cleaned files (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Stop at the first block that fails to parse
    #[arg(long)]
    fail_fast: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "subcleaner.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Info until the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "subcleaner", &mut std::io::stdout());
        return Ok(());
    }

    let input_path = cli
        .input_path
        .clone()
        .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

    let config = load_config(&cli)?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)
        .context("Configuration validation failed")?;

    let reports = if input_path.is_file() {
        let output_dir = cli
            .output_dir
            .clone()
            .unwrap_or_else(|| input_path.parent().unwrap_or(Path::new(".")).to_path_buf());
        vec![controller.run(&input_path, &output_dir, cli.force_overwrite)?]
    } else if input_path.is_dir() {
        controller.run_folder(&input_path, cli.output_dir.as_deref(), cli.force_overwrite)?
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    };

    summarize(&reports);
    Ok(())
}

// @loads: Config file with CLI overrides applied
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(&cli.config_path)?;

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }
    if cli.fail_fast {
        config.fail_fast = true;
    }

    Ok(config)
}

fn summarize(reports: &[FileReport]) {
    for report in reports {
        match &report.output {
            Some(output) => info!(
                "{:?} -> {:?}: {} block(s), {} failed, {} duplicate(s)",
                report.input, output, report.blocks, report.failed_blocks, report.duplicates
            ),
            None => warn!("Skipped {:?}", report.input),
        }
    }
}
