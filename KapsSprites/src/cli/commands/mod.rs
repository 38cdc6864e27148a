//! CLI subcommand definitions

use std::path::PathBuf;

use clap::Subcommand;

pub mod execute;
pub mod export;
pub mod locate;
pub mod palettes;
pub mod remap;

#[derive(Subcommand)]
pub enum Commands {
    /// Recolor the default palette's sprites into the target palettes
    Export {
        /// Palette code to export (repeatable; defaults to the configured targets)
        #[arg(short, long = "target", value_name = "CODE")]
        targets: Vec<u32>,

        /// Worker threads (defaults to one per core)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// List the palette table with the derived role colors
    Palettes,

    /// List the sprites stored under one palette
    Locate {
        /// Palette code (defaults to the configured default palette)
        code: Option<u32>,
    },

    /// Print where a sprite path lands for another palette
    Remap {
        /// Sprite path containing a palette folder
        path: PathBuf,

        /// Target palette code
        #[arg(short, long = "target", value_name = "CODE")]
        target: u32,
    },
}

impl Commands {
    /// The command run when no subcommand is given.
    #[must_use]
    pub fn default_export() -> Self {
        Commands::Export {
            targets: Vec::new(),
            threads: None,
            quiet: false,
        }
    }
}
