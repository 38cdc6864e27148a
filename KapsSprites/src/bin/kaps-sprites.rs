//! `KapsSprites` command-line entry point

use std::process::ExitCode;

fn main() -> ExitCode {
    kaps_sprites::cli::run_cli()
}
