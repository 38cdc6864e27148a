//! # `KapsSprites`
//!
//! Palette recoloring for the Kaps sprite tree.
//!
//! Sprites are drawn once in a default character palette and stored under a
//! palette folder (`caps/hero/color1/idle_0.png`). Each palette entry derives
//! seven semantic colors (principal, outline, shade, mouth and three flash
//! colors); recoloring swaps every pixel of a source role color for the
//! matching target role color and writes the sprite under the target palette
//! folder (`caps/hero/color2/idle_0.png`).
//!
//! ## Quick Start
//!
//! ```no_run
//! use kaps_sprites::prelude::*;
//!
//! let config = Config::load_or_default(None)?;
//! let plan = config.plan()?;
//!
//! let report = export(
//!     &plan.default,
//!     &plan.targets,
//!     &config.export_options(),
//!     &CancelToken::new(),
//!     |_progress| {},
//! )?;
//! println!("{} sprites written, {} failed", report.exported(), report.failed());
//! # Ok::<(), kaps_sprites::Error>(())
//! ```
//!
//! ### Recoloring a Single Sprite
//!
//! ```
//! use image::RgbaImage;
//! use kaps_sprites::prelude::*;
//!
//! let sean = ColorSet::new(Rgb::new(110, 80, 235), 1)?;
//! let zyrame = ColorSet::new(Rgb::new(90, 190, 235), 2)?;
//!
//! let mut sprite = RgbaImage::from_pixel(64, 64, sean.color(Role::Mouth));
//! Recolorer::new(&sean, &zyrame).recolor(&mut sprite);
//! assert_eq!(sprite.get_pixel(0, 0).0, [45, 95, 117, 255]);
//! # Ok::<(), kaps_sprites::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `kaps-sprites` command-line binary

pub mod config;
pub mod error;
pub mod export;
pub mod locate;
pub mod palette;
pub mod paths;
pub mod recolor;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::{Config, ExportPlan};
    pub use crate::error::{Error, Result};
    pub use crate::export::{
        CancelToken, ExportOptions, ExportPhase, ExportProgress, ExportReport, export,
        export_asset,
    };
    pub use crate::locate::{locate_all, locate_assets};
    pub use crate::palette::{ColorSet, Palette, PaletteEntry, Rgb, Role};
    pub use crate::paths::{remap_path, try_remap_path};
    pub use crate::recolor::Recolorer;
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
