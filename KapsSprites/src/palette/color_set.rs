//! Semantic color roles derived from one base color

use std::fmt;
use std::str::FromStr;

use image::Rgba;

use super::Rgb;
use crate::error::{Error, Result};

/// Prefix of every palette folder name (`color1`, `color2`, ...).
pub const DEFAULT_MARKER: &str = "color";

/// A semantic role of a sprite color.
///
/// The declaration order is the enumeration order used everywhere a set is
/// iterated. When two roles of one set share a value, the later role wins
/// during recoloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Principal,
    Outline,
    Shade,
    Mouth,
    FlashFilling,
    FlashOutline,
    FlashShade,
}

/// How a role's channels are computed from the base channels.
#[derive(Clone, Copy)]
enum Derivation {
    Offset(i16),
    Half,
}

impl Role {
    /// Every role, in enumeration order.
    pub const ALL: [Role; 7] = [
        Role::Principal,
        Role::Outline,
        Role::Shade,
        Role::Mouth,
        Role::FlashFilling,
        Role::FlashOutline,
        Role::FlashShade,
    ];

    /// Name used in listings and lookups.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Role::Principal => "principal",
            Role::Outline => "outline",
            Role::Shade => "shade",
            Role::Mouth => "mouth",
            Role::FlashFilling => "flash-filling",
            Role::FlashOutline => "flash-outline",
            Role::FlashShade => "flash-shade",
        }
    }

    fn derivation(self) -> Derivation {
        match self {
            Role::Principal | Role::FlashOutline => Derivation::Offset(0),
            Role::Outline => Derivation::Offset(-20),
            Role::Shade => Derivation::Offset(-10),
            Role::Mouth => Derivation::Half,
            Role::FlashFilling => Derivation::Offset(20),
            Role::FlashShade => Derivation::Offset(10),
        }
    }

    /// Derive this role's opaque color from a base color.
    ///
    /// Offsets saturate at 0 and 255.
    #[must_use]
    pub fn derive(self, base: Rgb) -> Rgba<u8> {
        let apply = |channel: u8| match self.derivation() {
            Derivation::Offset(offset) => {
                (i16::from(channel) + offset).clamp(0, i16::from(u8::MAX)) as u8
            }
            Derivation::Half => channel / 2,
        };
        Rgba([apply(base.r), apply(base.g), apply(base.b), u8::MAX])
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Role::ALL
            .into_iter()
            .find(|role| role.name() == s)
            .ok_or_else(|| Error::UnknownRole(s.to_string()))
    }
}

/// The seven role colors of one palette entry.
///
/// Built once per palette entry and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorSet {
    code: u32,
    base: Rgb,
    marker: String,
    colors: [Rgba<u8>; 7],
}

impl ColorSet {
    /// Derive a color set from a base color.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPaletteColor`] if any channel lies outside
    /// `[20, 235]`.
    pub fn new(base: Rgb, code: u32) -> Result<Self> {
        if !base.is_in_safe_range() {
            return Err(Error::InvalidPaletteColor { code, color: base });
        }

        Ok(Self {
            code,
            base,
            marker: DEFAULT_MARKER.to_string(),
            colors: Role::ALL.map(|role| role.derive(base)),
        })
    }

    /// Use a different palette folder prefix than [`DEFAULT_MARKER`].
    #[must_use]
    pub fn with_marker(mut self, marker: &str) -> Self {
        marker.clone_into(&mut self.marker);
        self
    }

    #[must_use]
    pub fn code(&self) -> u32 {
        self.code
    }

    #[must_use]
    pub fn code_str(&self) -> String {
        self.code.to_string()
    }

    #[must_use]
    pub fn base(&self) -> Rgb {
        self.base
    }

    #[must_use]
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Name of the folder holding this set's sprites, e.g. `color3`.
    #[must_use]
    pub fn folder_name(&self) -> String {
        format!("{}{}", self.marker, self.code)
    }

    #[must_use]
    pub fn color(&self, role: Role) -> Rgba<u8> {
        self.colors[role as usize]
    }

    /// Look up a color by role name (`"flash-shade"`, ...).
    pub fn color_by_name(&self, name: &str) -> Result<Rgba<u8>> {
        Ok(self.color(name.parse()?))
    }

    pub fn roles(&self) -> impl Iterator<Item = Role> {
        Role::ALL.into_iter()
    }

    /// `(role, color)` pairs in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, Rgba<u8>)> + '_ {
        Role::ALL.into_iter().map(|role| (role, self.color(role)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rgba(r: u8, g: u8, b: u8) -> Rgba<u8> {
        Rgba([r, g, b, 255])
    }

    #[test]
    fn test_role_offsets() {
        let set = ColorSet::new(Rgb::new(110, 80, 235), 1).unwrap();

        assert_eq!(set.color(Role::Principal), rgba(110, 80, 235));
        assert_eq!(set.color(Role::Outline), rgba(90, 60, 215));
        assert_eq!(set.color(Role::Shade), rgba(100, 70, 225));
        assert_eq!(set.color(Role::Mouth), rgba(55, 40, 117));
        assert_eq!(set.color(Role::FlashFilling), rgba(130, 100, 255));
        assert_eq!(set.color(Role::FlashOutline), rgba(110, 80, 235));
        assert_eq!(set.color(Role::FlashShade), rgba(120, 90, 245));
    }

    #[test]
    fn test_exactly_seven_roles_in_order() {
        let set = ColorSet::new(Rgb::new(90, 190, 235), 2).unwrap();
        let names: Vec<_> = set.roles().map(Role::name).collect();
        assert_eq!(
            names,
            [
                "principal",
                "outline",
                "shade",
                "mouth",
                "flash-filling",
                "flash-outline",
                "flash-shade"
            ]
        );
        assert_eq!(set.iter().count(), 7);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let base = Rgb::new(50, 235, 215);
        assert_eq!(ColorSet::new(base, 5).unwrap(), ColorSet::new(base, 5).unwrap());
    }

    #[test]
    fn test_every_valid_base_stays_in_range() {
        // The extremes of the valid range hit 0 and 255 exactly, never beyond.
        for value in [20u8, 21, 127, 234, 235] {
            let set = ColorSet::new(Rgb::new(value, value, value), 1).unwrap();
            assert_eq!(set.color(Role::Outline).0[0], value - 20);
            assert_eq!(set.color(Role::FlashFilling).0[0], value + 20);
        }
    }

    #[test]
    fn test_invalid_channels_rejected() {
        for base in [
            Rgb::new(19, 100, 100),
            Rgb::new(100, 0, 100),
            Rgb::new(100, 100, 236),
            Rgb::new(255, 255, 255),
        ] {
            assert!(
                matches!(
                    ColorSet::new(base, 4),
                    Err(Error::InvalidPaletteColor { code: 4, color }) if color == base
                ),
                "{base} should be rejected"
            );
        }
    }

    #[test]
    fn test_derive_saturates() {
        assert_eq!(Role::Outline.derive(Rgb::new(5, 5, 5)), rgba(0, 0, 0));
        assert_eq!(Role::FlashFilling.derive(Rgb::new(250, 250, 250)), rgba(255, 255, 255));
    }

    #[test]
    fn test_folder_name_and_code() {
        let set = ColorSet::new(Rgb::new(220, 60, 40), 3).unwrap();
        assert_eq!(set.folder_name(), "color3");
        assert_eq!(set.code_str(), "3");

        let set = set.with_marker("palette");
        assert_eq!(set.folder_name(), "palette3");
    }

    #[test]
    fn test_color_by_name() {
        let set = ColorSet::new(Rgb::new(220, 60, 40), 3).unwrap();
        assert_eq!(set.color_by_name("mouth").unwrap(), rgba(110, 30, 20));
        assert!(matches!(
            set.color_by_name("highlight"),
            Err(Error::UnknownRole(name)) if name == "highlight"
        ));
    }
}
