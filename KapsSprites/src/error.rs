//! Error types for `KapsSprites`

use std::path::PathBuf;

use thiserror::Error;

use crate::palette::Rgb;

/// The error type for `KapsSprites` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The image could not be decoded or encoded.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDir(String),

    // ==================== Palette Errors ====================
    /// A base color has a channel outside the safe `[20, 235]` range.
    ///
    /// Derived roles add or subtract up to 20 from each channel, so a base
    /// color closer to black or white cannot be recolored reliably.
    #[error("invalid color {color} for palette {code}: every channel must lie in [20, 235]")]
    InvalidPaletteColor {
        /// The 1-based palette code.
        code: u32,
        /// The offending base color.
        color: Rgb,
    },

    /// A role name that is not one of the seven semantic roles.
    #[error("unknown color role: {0}")]
    UnknownRole(String),

    /// A palette code that does not exist in the configured palette list.
    #[error("unknown palette code: {0}")]
    UnknownPalette(u32),

    /// A hex color string could not be parsed.
    #[error("invalid hex color: {0:?}")]
    InvalidHexColor(String),

    // ==================== Asset Errors ====================
    /// The asset path has no palette folder segment to substitute.
    #[error("no palette folder in path: {}", .path.display())]
    PathStructure {
        /// The offending asset path.
        path: PathBuf,
    },

    /// The sprite does not have the configured resolution.
    #[error("{}: expected {expected}x{expected} pixels, found {width}x{height}", .path.display())]
    UnexpectedDimensions {
        /// The sprite path.
        path: PathBuf,
        /// Actual width.
        width: u32,
        /// Actual height.
        height: u32,
        /// Expected width and height.
        expected: u32,
    },

    // ==================== Configuration Errors ====================
    /// The configuration file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// The worker pool could not be created.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    /// Whether this error comes from the configuration rather than from an asset.
    ///
    /// Configuration errors are fatal: they abort the run before any sprite is
    /// touched.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidPaletteColor { .. }
                | Error::UnknownRole(_)
                | Error::UnknownPalette(_)
                | Error::InvalidHexColor(_)
                | Error::Config(_)
        )
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDir(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

/// A specialized Result type for `KapsSprites` operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_classified() {
        let invalid = Error::InvalidPaletteColor {
            code: 8,
            color: Rgb::new(40, 50, 10),
        };
        assert!(invalid.is_config_error());
        assert!(Error::UnknownPalette(99).is_config_error());
        let path_error = Error::PathStructure {
            path: PathBuf::from("caps/idle.png"),
        };
        assert!(!path_error.is_config_error());
    }

    #[test]
    fn test_invalid_color_message() {
        let err = Error::InvalidPaletteColor {
            code: 3,
            color: Rgb::new(10, 60, 240),
        };
        assert_eq!(
            err.to_string(),
            "invalid color rgb(10, 60, 240) for palette 3: every channel must lie in [20, 235]"
        );
    }
}
