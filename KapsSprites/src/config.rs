//! Export configuration
//!
//! The configuration is a TOML file; every key is optional and falls back to
//! the built-in sidekick table and the `caps`/`germs` layout:
//!
//! ```toml
//! default_palette = 1
//! targets = [13, 14, 15]
//! roots = ["caps", "germs"]
//! resolution = 64
//!
//! [[palette]]
//! name = "Sean"
//! rgb = [110, 80, 235]
//!
//! [[palette]]
//! name = "Zyrame"
//! rgb = "#5abeeb"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::export::ExportOptions;
use crate::palette::{ColorSet, DEFAULT_MARKER, Palette, PaletteEntry};

/// File looked up in the working directory when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "kaps-sprites.toml";

/// Loaded configuration. Immutable once the run starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Code of the palette the existing sprites are drawn in.
    pub default_palette: u32,
    /// Codes to produce; `None` produces every palette but the default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<u32>>,
    /// Directory the roots are relative to.
    pub base_dir: PathBuf,
    /// Sprite roots.
    pub roots: Vec<PathBuf>,
    /// Required sprite width and height; 0 accepts any size.
    pub resolution: u32,
    /// Palette folder prefix.
    pub marker: String,
    /// Sprite file extensions; empty accepts every file.
    pub extensions: Vec<String>,
    /// Base colors, code 1 first.
    #[serde(rename = "palette")]
    pub palettes: Vec<PaletteEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_palette: 1,
            targets: None,
            base_dir: PathBuf::from("."),
            roots: vec![PathBuf::from("caps"), PathBuf::from("germs")],
            resolution: 64,
            marker: DEFAULT_MARKER.to_string(),
            extensions: vec!["png".to_string()],
            palettes: Palette::sidekicks().entries().to_vec(),
        }
    }
}

/// The validated color sets an export needs.
#[derive(Debug, Clone)]
pub struct ExportPlan {
    pub default: ColorSet,
    pub targets: Vec<ColorSet>,
}

impl Config {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read a configuration file.
    ///
    /// An unreadable file is reported as [`Error::Config`] like a malformed one.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!("Loading config {}", path.display());
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        toml::from_str(&text).map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Load `path` if given, else [`DEFAULT_CONFIG_FILE`] if it exists, else
    /// the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::load(DEFAULT_CONFIG_FILE),
            None => {
                tracing::debug!("No {DEFAULT_CONFIG_FILE}, using built-in palette table");
                Ok(Self::default())
            }
        }
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    #[must_use]
    pub fn palette(&self) -> Palette {
        Palette::new(self.palettes.clone())
    }

    /// Validate the whole palette table and pick the default and target sets.
    ///
    /// Every entry is validated, not only the ones exported, so a bad table
    /// fails before any sprite is touched.
    ///
    /// # Errors
    /// [`Error::InvalidPaletteColor`] for an out-of-range entry,
    /// [`Error::UnknownPalette`] for a default or target code outside the table.
    pub fn plan(&self) -> Result<ExportPlan> {
        let sets = self.palette().color_sets(&self.marker)?;
        let find = |code: u32| {
            sets.iter()
                .find(|set| set.code() == code)
                .cloned()
                .ok_or(Error::UnknownPalette(code))
        };

        let default = find(self.default_palette)?;
        let targets = match &self.targets {
            Some(codes) => codes.iter().map(|&code| find(code)).collect::<Result<Vec<_>>>()?,
            None => sets
                .iter()
                .filter(|set| set.code() != self.default_palette)
                .cloned()
                .collect(),
        };

        Ok(ExportPlan { default, targets })
    }

    /// Export options for this configuration, using rayon's default worker count.
    #[must_use]
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            base_dir: self.base_dir.clone(),
            roots: self.roots.clone(),
            extensions: self.extensions.clone(),
            resolution: (self.resolution != 0).then_some(self.resolution),
            threads: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Rgb;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = include_str!("../config/kaps-sprites.toml");

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_sample_config_parses() {
        let config = Config::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.palettes.len(), 21);
        assert_eq!(config.palettes, Config::default().palettes);
        assert_eq!(config.targets, Some((13..=21).collect()));
    }

    #[test]
    fn test_array_and_hex_colors() {
        let config = Config::from_toml_str(
            r##"
            [[palette]]
            name = "Sean"
            rgb = [110, 80, 235]

            [[palette]]
            rgb = "#5abeeb"
            "##,
        )
        .unwrap();
        assert_eq!(config.palettes[0].rgb, Rgb::new(110, 80, 235));
        assert_eq!(config.palettes[1].rgb, Rgb::new(90, 190, 235));
        assert_eq!(config.palettes[1].name, None);
    }

    #[test]
    fn test_bad_hex_is_config_error() {
        let err = Config::from_toml_str("[[palette]]\nrgb = \"#zzzzzz\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_toml_str("palettes_dir = \"x\"").is_err());
    }

    #[test]
    fn test_plan_defaults_to_all_other_palettes() {
        let plan = Config::default().plan().unwrap();
        assert_eq!(plan.default.code(), 1);
        assert_eq!(plan.targets.len(), 20);
        assert_eq!(plan.targets[0].code(), 2);
    }

    #[test]
    fn test_plan_explicit_targets() {
        let config = Config {
            targets: Some(vec![13, 21]),
            ..Config::default()
        };
        let codes: Vec<_> = config.plan().unwrap().targets.iter().map(ColorSet::code).collect();
        assert_eq!(codes, vec![13, 21]);
    }

    #[test]
    fn test_plan_unknown_target() {
        let config = Config {
            targets: Some(vec![2, 40]),
            ..Config::default()
        };
        assert!(matches!(config.plan(), Err(Error::UnknownPalette(40))));
    }

    #[test]
    fn test_plan_rejects_invalid_entry_anywhere() {
        let mut config = Config {
            targets: Some(vec![2]),
            ..Config::default()
        };
        config.palettes[15].rgb = Rgb::new(240, 175, 235);
        assert!(matches!(
            config.plan(),
            Err(Error::InvalidPaletteColor { code: 16, .. })
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config {
            targets: Some(vec![3]),
            resolution: 0,
            ..Config::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
        assert_eq!(config.export_options().resolution, None);
    }
}
