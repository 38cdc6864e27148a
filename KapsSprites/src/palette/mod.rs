//! Character palettes
//!
//! A palette is the ordered list of base colors, one per character. Each base
//! color expands into a [`ColorSet`] of seven semantic roles; palette codes
//! are 1-based indices into the list.

mod color_set;

pub use color_set::{ColorSet, DEFAULT_MARKER, Role};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Lowest channel value a base color may use.
pub const MIN_CHANNEL: u8 = 20;

/// Highest channel value a base color may use.
pub const MAX_CHANNEL: u8 = 235;

// ============================================================================
// Rgb
// ============================================================================

/// A base color: one opaque RGB triple.
///
/// In configuration files a color is written either as an array
/// (`[110, 80, 235]`) or as a hex string (`"#6e50eb"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RgbRepr", into = "RgbRepr")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Whether every channel lies in `[MIN_CHANNEL, MAX_CHANNEL]`.
    #[must_use]
    pub fn is_in_safe_range(self) -> bool {
        self.channels()
            .iter()
            .all(|c| (MIN_CHANNEL..=MAX_CHANNEL).contains(c))
    }

    /// Parse `#rrggbb`, `rrggbb` or the short `#rgb` form.
    pub fn from_hex(value: &str) -> Result<Self> {
        let digits = value.trim().trim_start_matches('#');
        let invalid = || Error::InvalidHexColor(value.to_string());

        if !digits.is_ascii() {
            return Err(invalid());
        }
        let width = match digits.len() {
            3 => 1,
            6 => 2,
            _ => return Err(invalid()),
        };

        let mut channels = [0u8; 3];
        for (i, channel) in channels.iter_mut().enumerate() {
            let part = &digits[i * width..(i + 1) * width];
            let parsed = u8::from_str_radix(part, 16).map_err(|_| invalid())?;
            // #abc expands to #aabbcc
            *channel = if width == 1 { parsed * 17 } else { parsed };
        }

        Ok(Self::new(channels[0], channels[1], channels[2]))
    }

    /// Format as lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

/// On-disk forms of [`Rgb`].
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RgbRepr {
    Array([u8; 3]),
    Hex(String),
}

impl TryFrom<RgbRepr> for Rgb {
    type Error = Error;

    fn try_from(repr: RgbRepr) -> Result<Self> {
        match repr {
            RgbRepr::Array(channels) => Ok(channels.into()),
            RgbRepr::Hex(hex) => Rgb::from_hex(&hex),
        }
    }
}

impl From<Rgb> for RgbRepr {
    fn from(rgb: Rgb) -> Self {
        RgbRepr::Array(rgb.channels())
    }
}

// ============================================================================
// Palette
// ============================================================================

/// One character's entry in the palette table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// Character name, for listings only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub rgb: Rgb,
}

impl PaletteEntry {
    #[must_use]
    pub fn new(name: Option<&str>, rgb: Rgb) -> Self {
        Self {
            name: name.map(str::to_string),
            rgb,
        }
    }
}

/// The sidekick palette table shipped with the game.
///
/// Unnamed entries are reserved for characters that have not been designed yet.
const SIDEKICKS: [(Option<&str>, Rgb); 21] = [
    (Some("Sean"), Rgb::new(110, 80, 235)),
    (Some("Zyrame"), Rgb::new(90, 190, 235)),
    (Some("Red"), Rgb::new(220, 60, 40)),
    (Some("Mimaps"), Rgb::new(180, 235, 60)),
    (Some("Painter"), Rgb::new(50, 235, 215)),
    (Some("Xereth"), Rgb::new(215, 50, 100)),
    (Some("Bomber"), Rgb::new(220, 235, 160)),
    (None, Rgb::new(40, 50, 60)),
    (None, Rgb::new(180, 200, 220)),
    (Some("Jim"), Rgb::new(100, 110, 170)),
    (Some("Uni"), Rgb::new(50, 180, 180)),
    (Some("Sniper"), Rgb::new(235, 150, 130)),
    (None, Rgb::new(50, 100, 225)),
    (None, Rgb::new(175, 225, 235)),
    (None, Rgb::new(175, 175, 235)),
    (None, Rgb::new(235, 175, 235)),
    (None, Rgb::new(175, 235, 175)),
    (None, Rgb::new(120, 225, 100)),
    (None, Rgb::new(235, 180, 60)),
    (None, Rgb::new(220, 70, 180)),
    (None, Rgb::new(75, 75, 115)),
];

/// Ordered list of base colors; the entry at index `i` has code `i + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    #[must_use]
    pub fn new(entries: Vec<PaletteEntry>) -> Self {
        Self { entries }
    }

    /// The built-in sidekick table.
    #[must_use]
    pub fn sidekicks() -> Self {
        Self::new(
            SIDEKICKS
                .iter()
                .map(|&(name, rgb)| PaletteEntry::new(name, rgb))
                .collect(),
        )
    }

    #[must_use]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by its 1-based code.
    #[must_use]
    pub fn get(&self, code: u32) -> Option<&PaletteEntry> {
        let index = usize::try_from(code).ok()?.checked_sub(1)?;
        self.entries.get(index)
    }

    /// Build the color set for one code.
    pub fn color_set(&self, code: u32, marker: &str) -> Result<ColorSet> {
        let entry = self.get(code).ok_or(Error::UnknownPalette(code))?;
        Ok(ColorSet::new(entry.rgb, code)?.with_marker(marker))
    }

    /// Build and validate the color sets of every entry, in code order.
    ///
    /// Fails on the first entry with an out-of-range channel.
    pub fn color_sets(&self, marker: &str) -> Result<Vec<ColorSet>> {
        (1..=self.entries.len() as u32)
            .map(|code| self.color_set(code, marker))
            .collect()
    }
}
