//! CLI progress display utilities
//!
//! Step indicators, emojis and the export progress bar.

use std::time::Duration;

use console::{Emoji, style};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};

use crate::export::{ExportPhase, ExportProgress};

// =============================================================================
// Emoji Constants (with ASCII fallbacks for terminals without emoji support)
// =============================================================================

/// Magnifying glass - for scanning the sprite roots
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Palette - for recoloring
pub static PALETTE: Emoji<'_, '_> = Emoji("🎨 ", "");
/// Sparkles - for completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");
/// Warning sign - for failures
pub static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "! ");

/// Print a step indicator: `[1/3] 🎨 Message...`
pub fn print_step(current: usize, total: usize, emoji: Emoji, msg: &str) {
    println!(
        "{} {}{}",
        style(format!("[{current}/{total}]")).bold().dim(),
        emoji,
        msg
    );
}

/// Print completion message: `✨ Done in 2s`
pub fn print_done(elapsed: Duration) {
    println!("{} Done in {}", SPARKLE, HumanDuration(elapsed));
}

/// Progress bar style with percentage
///
/// Format: `color13 [████████░░░░░░░░] 50% (50/100)`
///
/// # Panics
/// Panics if the template string is invalid (this is a compile-time constant).
#[must_use]
pub fn bar_style_with_percent() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{msg:>8} [{bar:40.cyan/blue}] {percent}% ({pos}/{len})")
        .expect("valid template")
}

/// Progress bar for an export run; hidden when `quiet`.
#[must_use]
pub fn export_bar(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(0);
    pb.set_style(bar_style_with_percent());
    pb
}

/// Feed one export progress event into the bar.
pub fn update_export_bar(pb: &ProgressBar, marker: &str, progress: &ExportProgress) {
    match progress.phase {
        ExportPhase::Locating => pb.set_message(ExportPhase::Locating.as_str()),
        ExportPhase::Recoloring => {
            pb.set_message(format!("{marker}{}", progress.target_code));
            pb.set_length(progress.total as u64);
            pb.set_position(progress.current as u64);
        }
        ExportPhase::SetComplete => {
            pb.set_position(progress.total as u64);
            pb.println(format!(
                "  {} {marker}{} done",
                PALETTE, progress.target_code
            ));
        }
        ExportPhase::Complete => pb.finish_and_clear(),
    }
}
