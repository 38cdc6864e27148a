//! Batch palette export
//!
//! Produces the sprite tree of every target palette from the sprites of the
//! default palette: locate, recolor, remap, write. Sprites are independent, so
//! each palette's sprites are processed in parallel; a sprite that fails is
//! recorded and the batch carries on.

mod types;

pub use types::{
    AssetFailure, CancelToken, ExportOptions, ExportPhase, ExportProgress, ExportReport,
    SetReport,
};

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::locate::locate_all;
use crate::palette::ColorSet;
use crate::paths::try_remap_path;
use crate::recolor::Recolorer;

/// A sprite written by [`export_asset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedAsset {
    pub destination: PathBuf,
    pub pixels_changed: usize,
}

/// What happened to one sprite of one palette.
enum Outcome {
    Exported(usize),
    Failed(AssetFailure),
    Skipped,
}

/// Recolor one sprite and write it into the target palette's tree.
///
/// The palette folder is looked up in the path relative to `base_dir`, so a
/// base directory that itself looks like a palette folder is left alone.
/// Existing files at the destination are overwritten.
///
/// # Errors
/// Returns an error if the path has no palette folder, the sprite cannot be
/// read or written, or its size differs from `resolution`.
pub fn export_asset(
    source: &Path,
    base_dir: &Path,
    recolorer: &Recolorer,
    target: &ColorSet,
    resolution: Option<u32>,
) -> Result<ExportedAsset> {
    let relative = source.strip_prefix(base_dir).unwrap_or(source);
    let destination = base_dir.join(try_remap_path(relative, target)?);

    let mut grid = image::open(source)?.into_rgba8();
    if let Some(expected) = resolution {
        let (width, height) = grid.dimensions();
        if width != expected || height != expected {
            return Err(Error::UnexpectedDimensions {
                path: source.to_path_buf(),
                width,
                height,
                expected,
            });
        }
    }

    let pixels_changed = recolorer.recolor(&mut grid);

    if let Some(parent) = destination.parent() {
        // create_dir_all tolerates concurrent creation of the same directory
        fs::create_dir_all(parent)?;
    }
    grid.save(&destination)?;

    Ok(ExportedAsset {
        destination,
        pixels_changed,
    })
}

/// Export the default palette's sprites to every target palette.
///
/// Targets with the default palette's code are skipped. Sprites are located
/// once, under each of `options.roots`, and reused for every target.
///
/// # Arguments
/// * `default` - The palette the existing sprites are drawn in
/// * `targets` - Palettes to produce
/// * `options` - Roots, base directory, resolution and worker count
/// * `cancel` - Checked before each sprite; remaining sprites are skipped once set
/// * `progress` - Callback for progress updates
///
/// # Errors
/// Returns an error if the worker pool cannot be built or the sprite roots
/// cannot be walked. Per-sprite errors are reported in [`ExportReport::failures`].
pub fn export<F>(
    default: &ColorSet,
    targets: &[ColorSet],
    options: &ExportOptions,
    cancel: &CancelToken,
    progress: F,
) -> Result<ExportReport>
where
    F: Fn(&ExportProgress) + Send + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.threads)
        .build()?;

    progress(&ExportProgress::new(ExportPhase::Locating, 0, 0, 0));
    let roots: Vec<PathBuf> = options
        .roots
        .iter()
        .map(|root| options.base_dir.join(root))
        .collect();
    let assets = locate_all(&roots, default, &options.extensions)?;
    tracing::info!(
        "Found {} sprites in {}",
        assets.len(),
        default.folder_name()
    );

    let mut report = ExportReport {
        located: assets.len(),
        ..ExportReport::default()
    };

    for target in targets.iter().filter(|t| t.code() != default.code()) {
        let (set_report, failures) =
            pool.install(|| export_set(&assets, default, target, options, cancel, &progress));

        tracing::info!(
            "{}: {} exported, {} failed, {} skipped",
            target.folder_name(),
            set_report.exported,
            set_report.failed,
            set_report.skipped
        );
        progress(&ExportProgress::new(
            ExportPhase::SetComplete,
            target.code(),
            assets.len(),
            assets.len(),
        ));

        report.sets.push(set_report);
        report.failures.extend(failures);
    }

    report.cancelled = cancel.is_cancelled();
    progress(&ExportProgress::new(
        ExportPhase::Complete,
        0,
        report.sets.len(),
        report.sets.len(),
    ));

    Ok(report)
}

/// Export every sprite to one target palette.
fn export_set<F>(
    assets: &[PathBuf],
    default: &ColorSet,
    target: &ColorSet,
    options: &ExportOptions,
    cancel: &CancelToken,
    progress: &F,
) -> (SetReport, Vec<AssetFailure>)
where
    F: Fn(&ExportProgress) + Send + Sync,
{
    let recolorer = Recolorer::new(default, target);
    tracing::debug!(
        "Recoloring {} sprites from palette {} to palette {}",
        assets.len(),
        recolorer.source_code(),
        recolorer.target_code()
    );
    let total = assets.len();
    let processed = AtomicUsize::new(0);

    let outcomes: Vec<Outcome> = assets
        .par_iter()
        .map(|source| {
            if cancel.is_cancelled() {
                return Outcome::Skipped;
            }

            let display_path = source
                .strip_prefix(&options.base_dir)
                .unwrap_or(source)
                .to_string_lossy()
                .to_string();

            // Update progress (atomic)
            let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(&ExportProgress::with_file(
                ExportPhase::Recoloring,
                target.code(),
                current,
                total,
                display_path.as_str(),
            ));

            match export_asset(
                source,
                &options.base_dir,
                &recolorer,
                target,
                options.resolution,
            ) {
                Ok(written) => {
                    tracing::debug!(
                        "{} -> {} ({} pixels)",
                        display_path,
                        written.destination.display(),
                        written.pixels_changed
                    );
                    Outcome::Exported(written.pixels_changed)
                }
                Err(error) => {
                    tracing::warn!(
                        "Failed to export {} to {}: {}",
                        display_path,
                        target.folder_name(),
                        error
                    );
                    Outcome::Failed(AssetFailure {
                        source: source.clone(),
                        target_code: target.code(),
                        error,
                    })
                }
            }
        })
        .collect();

    let mut set_report = SetReport {
        target_code: target.code(),
        ..SetReport::default()
    };
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Outcome::Exported(pixels) => {
                set_report.exported += 1;
                set_report.pixels_changed += pixels;
            }
            Outcome::Failed(failure) => {
                set_report.failed += 1;
                failures.push(failure);
            }
            Outcome::Skipped => set_report.skipped += 1,
        }
    }

    (set_report, failures)
}
