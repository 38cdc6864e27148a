//! Types for batch export progress, cancellation and reporting

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::Error;

// ============================================================================
// Options
// ============================================================================

/// Where and how a batch export runs.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Directory the roots and the output tree are relative to.
    pub base_dir: PathBuf,
    /// Sprite roots searched below `base_dir` (`caps`, `germs`).
    pub roots: Vec<PathBuf>,
    /// File extensions considered sprites; empty accepts every file.
    pub extensions: Vec<String>,
    /// Required sprite width and height; `None` accepts any size.
    pub resolution: Option<u32>,
    /// Worker threads; 0 lets rayon decide.
    pub threads: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            roots: vec![PathBuf::from("caps"), PathBuf::from("germs")],
            extensions: vec!["png".to_string()],
            resolution: Some(64),
            threads: 0,
        }
    }
}

// ============================================================================
// Progress Types
// ============================================================================

/// Progress information during an export
#[derive(Debug, Clone)]
pub struct ExportProgress {
    /// Current operation phase
    pub phase: ExportPhase,
    /// Code of the palette being produced (0 while locating)
    pub target_code: u32,
    /// Current item number (1-indexed)
    pub current: usize,
    /// Total number of items
    pub total: usize,
    /// Sprite being processed, relative to the base directory
    pub current_file: Option<String>,
}

impl ExportProgress {
    #[must_use]
    pub fn new(phase: ExportPhase, target_code: u32, current: usize, total: usize) -> Self {
        Self {
            phase,
            target_code,
            current,
            total,
            current_file: None,
        }
    }

    #[must_use]
    pub fn with_file(
        phase: ExportPhase,
        target_code: u32,
        current: usize,
        total: usize,
        file: impl Into<String>,
    ) -> Self {
        Self {
            phase,
            target_code,
            current,
            total,
            current_file: Some(file.into()),
        }
    }
}

/// Phase of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPhase {
    /// Walking the sprite roots
    Locating,
    /// Recoloring and writing sprites for one palette
    Recoloring,
    /// One palette finished
    SetComplete,
    /// Every palette finished
    Complete,
}

impl ExportPhase {
    /// Get a human-readable description of this phase
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ExportPhase::Locating => "Locating sprites",
            ExportPhase::Recoloring => "Recoloring",
            ExportPhase::SetComplete => "Palette complete",
            ExportPhase::Complete => "Complete",
        }
    }
}

// ============================================================================
// Cancellation
// ============================================================================

/// Cooperative cancellation flag, checked before each sprite.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Results
// ============================================================================

/// A sprite that could not be exported.
#[derive(Debug)]
pub struct AssetFailure {
    /// Source sprite path
    pub source: PathBuf,
    /// Palette the sprite was being exported to
    pub target_code: u32,
    /// What went wrong
    pub error: Error,
}

/// Outcome counts for one target palette.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetReport {
    pub target_code: u32,
    /// Sprites written
    pub exported: usize,
    /// Sprites that failed
    pub failed: usize,
    /// Sprites skipped after cancellation
    pub skipped: usize,
    /// Pixels changed across all written sprites
    pub pixels_changed: usize,
}

/// Summary of a whole export run.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Sprites found for the default palette
    pub located: usize,
    /// One entry per target palette, in processing order
    pub sets: Vec<SetReport>,
    /// Every failed sprite, in processing order
    pub failures: Vec<AssetFailure>,
    /// Whether the run stopped early
    pub cancelled: bool,
}

impl ExportReport {
    #[must_use]
    pub fn exported(&self) -> usize {
        self.sets.iter().map(|s| s.exported).sum()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.sets.iter().map(|s| s.skipped).sum()
    }

    /// No failures and not cancelled.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && !self.cancelled
    }
}
