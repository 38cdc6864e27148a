//! `KapsSprites` CLI - Command-line interface for palette exports

pub mod commands;
pub mod progress;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use commands::Commands;
use console::style;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::Error;

/// Exit status for configuration errors.
const EXIT_CONFIG: u8 = 2;
/// Exit status for runtime failures, including partially failed exports.
pub(crate) const EXIT_FAILURE: u8 = 1;

#[derive(Parser)]
#[command(name = "kaps-sprites")]
#[command(version, about = "KapsSprites: palette recoloring for Kaps sprites", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./kaps-sprites.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory the sprite roots are relative to (overrides the config)
    #[arg(short = 'C', long, global = true)]
    base_dir: Option<PathBuf>,

    /// Runs `export` with the configured targets when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    fn execute(&self) -> anyhow::Result<ExitCode> {
        let mut config = Config::load_or_default(self.config.as_deref())?;
        if let Some(base_dir) = &self.base_dir {
            config.base_dir.clone_from(base_dir);
        }

        match &self.command {
            Some(command) => command.execute(&config),
            None => Commands::default_export().execute(&config),
        }
    }
}

/// Map a failed run to its exit status.
fn exit_status(err: &anyhow::Error) -> u8 {
    let is_config = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<Error>())
        .any(Error::is_config_error);
    if is_config { EXIT_CONFIG } else { EXIT_FAILURE }
}

/// Run the `KapsSprites` CLI
///
/// Exits with 2 on configuration errors, 1 when the run failed or some
/// sprites could not be exported, 0 otherwise.
pub fn run_cli() -> ExitCode {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.execute() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", style("error:").red().bold());
            ExitCode::from(exit_status(&err))
        }
    }
}
