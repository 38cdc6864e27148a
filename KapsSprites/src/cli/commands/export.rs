//! CLI command for batch palette export

use std::process::ExitCode;
use std::sync::Once;
use std::time::Instant;

use anyhow::Context;

use crate::cli::EXIT_FAILURE;
use crate::cli::progress::{
    LOOKING_GLASS, PALETTE, WARNING, export_bar, print_done, print_step, update_export_bar,
};
use crate::config::Config;
use crate::export::{CancelToken, ExportPhase, ExportReport, export};

pub fn execute(
    config: &Config,
    targets: &[u32],
    threads: Option<usize>,
    quiet: bool,
) -> anyhow::Result<ExitCode> {
    let started = Instant::now();

    let mut config = config.clone();
    if !targets.is_empty() {
        config.targets = Some(targets.to_vec());
    }
    let plan = config.plan()?;
    let mut options = config.export_options();
    if let Some(threads) = threads {
        options.threads = threads;
    }

    let roots: Vec<_> = options.roots.iter().map(|r| r.display().to_string()).collect();
    if !quiet {
        print_step(
            1,
            2,
            LOOKING_GLASS,
            &format!(
                "Locating {} sprites in {}...",
                plan.default.folder_name(),
                roots.join(", ")
            ),
        );
    }

    let pb = export_bar(quiet);
    let recoloring = Once::new();
    let report = export(
        &plan.default,
        &plan.targets,
        &options,
        &CancelToken::new(),
        |progress| {
            if progress.phase == ExportPhase::Recoloring && !quiet {
                recoloring.call_once(|| {
                    pb.suspend(|| {
                        print_step(
                            2,
                            2,
                            PALETTE,
                            &format!("Recoloring {} palettes...", plan.targets.len()),
                        );
                    });
                });
            }
            update_export_bar(&pb, &config.marker, progress);
        },
    )
    .with_context(|| format!("Failed to export from {}", options.base_dir.display()))?;
    pb.finish_and_clear();

    print_failures(&report);
    if !quiet {
        print_summary(&report);
        print_done(started.elapsed());
    }

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_FAILURE)
    })
}

fn print_failures(report: &ExportReport) {
    for failure in &report.failures {
        eprintln!(
            "{}{} (palette {}): {}",
            WARNING,
            failure.source.display(),
            failure.target_code,
            failure.error
        );
    }
}

fn print_summary(report: &ExportReport) {
    println!();
    println!("Export complete:");
    println!("  Sprites found: {}", report.located);
    println!("  Palettes: {}", report.sets.len());
    println!("  Written: {}", report.exported());
    if report.failed() > 0 {
        println!("  Failed: {}", report.failed());
    }
    if report.skipped() > 0 {
        println!("  Skipped: {}", report.skipped());
    }
}
