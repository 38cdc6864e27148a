//! Command execution implementations

use std::process::ExitCode;

use super::Commands;
use super::{export, locate, palettes, remap};
use crate::config::Config;

impl Commands {
    /// Execute the selected command against a loaded configuration.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self, config: &Config) -> anyhow::Result<ExitCode> {
        match self {
            Commands::Export {
                targets,
                threads,
                quiet,
            } => export::execute(config, targets, *threads, *quiet),
            Commands::Palettes => palettes::execute(config).map(|()| ExitCode::SUCCESS),
            Commands::Locate { code } => locate::execute(config, *code).map(|()| ExitCode::SUCCESS),
            Commands::Remap { path, target } => {
                remap::execute(config, path, *target).map(|()| ExitCode::SUCCESS)
            }
        }
    }
}
