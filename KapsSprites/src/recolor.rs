//! Exact-match sprite recoloring

use std::collections::HashMap;

use image::{Rgba, RgbaImage};

use crate::palette::ColorSet;

/// Color substitution table for one (source, target) pair of color sets.
///
/// Built once and reused for every sprite of a batch. Each pixel is looked up
/// once, so a replaced pixel is never matched again against another role.
#[derive(Debug, Clone)]
pub struct Recolorer {
    source_code: u32,
    target_code: u32,
    table: HashMap<Rgba<u8>, Rgba<u8>>,
}

impl Recolorer {
    /// Build the substitution table from `source` role colors to `target`
    /// role colors.
    ///
    /// When two source roles share a color, the role later in
    /// [`Role::ALL`](crate::palette::Role::ALL) decides the replacement.
    #[must_use]
    pub fn new(source: &ColorSet, target: &ColorSet) -> Self {
        let mut table = HashMap::with_capacity(crate::palette::Role::ALL.len());
        for (role, color) in source.iter() {
            let replacement = target.color(role);
            if let Some(previous) = table.insert(color, replacement) {
                if previous != replacement {
                    tracing::debug!(
                        "{}: role {} overrides an earlier role sharing {:?}",
                        source.folder_name(),
                        role,
                        color.0
                    );
                }
            }
        }

        Self {
            source_code: source.code(),
            target_code: target.code(),
            table,
        }
    }

    #[must_use]
    pub fn source_code(&self) -> u32 {
        self.source_code
    }

    #[must_use]
    pub fn target_code(&self) -> u32 {
        self.target_code
    }

    /// Replacement for one color, if it is a source role color.
    #[must_use]
    pub fn lookup(&self, color: Rgba<u8>) -> Option<Rgba<u8>> {
        self.table.get(&color).copied()
    }

    /// Recolor every pixel of `grid` in place.
    ///
    /// # Returns
    /// The number of pixels whose value changed.
    pub fn recolor(&self, grid: &mut RgbaImage) -> usize {
        let mut changed = 0;
        for pixel in grid.pixels_mut() {
            if let Some(replacement) = self.lookup(*pixel) {
                if *pixel != replacement {
                    *pixel = replacement;
                    changed += 1;
                }
            }
        }
        changed
    }
}

/// One-off form of [`Recolorer::recolor`].
///
/// Prefer building a [`Recolorer`] once when recoloring many sprites.
pub fn recolor(grid: &mut RgbaImage, source: &ColorSet, target: &ColorSet) -> usize {
    Recolorer::new(source, target).recolor(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{Rgb, Role};
    use pretty_assertions::assert_eq;

    fn sets() -> (ColorSet, ColorSet) {
        (
            ColorSet::new(Rgb::new(110, 80, 235), 1).unwrap(),
            ColorSet::new(Rgb::new(90, 190, 235), 2).unwrap(),
        )
    }

    #[test]
    fn test_outline_grid() {
        let (a, b) = sets();
        let mut grid = RgbaImage::from_pixel(2, 2, a.color(Role::Outline));

        let changed = recolor(&mut grid, &a, &b);

        assert_eq!(changed, 4);
        assert!(grid.pixels().all(|p| *p == b.color(Role::Outline)));
    }

    #[test]
    fn test_mouth_color() {
        let (a, b) = sets();
        let mut grid = RgbaImage::from_pixel(1, 1, Rgba([55, 40, 117, 255]));
        recolor(&mut grid, &a, &b);
        assert_eq!(*grid.get_pixel(0, 0), Rgba([45, 95, 117, 255]));
    }

    #[test]
    fn test_unrelated_pixels_untouched() {
        let (a, b) = sets();
        let background = Rgba([0, 0, 0, 0]);
        let almost_outline = Rgba([90, 60, 215, 254]);
        let mut grid = RgbaImage::from_pixel(3, 1, background);
        grid.put_pixel(1, 0, almost_outline);
        grid.put_pixel(2, 0, a.color(Role::Shade));

        let changed = recolor(&mut grid, &a, &b);

        assert_eq!(changed, 1);
        assert_eq!(*grid.get_pixel(0, 0), background);
        assert_eq!(*grid.get_pixel(1, 0), almost_outline);
        assert_eq!(*grid.get_pixel(2, 0), b.color(Role::Shade));
    }

    #[test]
    fn test_round_trip_restores_grid() {
        let (a, b) = sets();
        let mut grid = RgbaImage::new(64, 64);
        for (i, pixel) in grid.pixels_mut().enumerate() {
            *pixel = match i % 9 {
                0..=6 => a.color(Role::ALL[i % 9]),
                7 => Rgba([0, 0, 0, 0]),
                _ => Rgba([1, 2, 3, 255]),
            };
        }
        let original = grid.clone();

        Recolorer::new(&a, &b).recolor(&mut grid);
        assert_ne!(grid, original);
        Recolorer::new(&b, &a).recolor(&mut grid);

        assert_eq!(grid, original);
    }

    #[test]
    fn test_replaced_pixels_are_not_matched_again() {
        // Target outline equals the source principal color: a source outline
        // pixel must end up as the target outline, not be chained onward.
        let source = ColorSet::new(Rgb::new(100, 100, 100), 1).unwrap();
        let target = ColorSet::new(Rgb::new(120, 120, 120), 2).unwrap();
        assert_eq!(target.color(Role::Outline), source.color(Role::Principal));

        let mut grid = RgbaImage::from_pixel(1, 1, source.color(Role::Outline));
        recolor(&mut grid, &source, &target);

        assert_eq!(*grid.get_pixel(0, 0), target.color(Role::Outline));
    }

    #[test]
    fn test_shared_principal_and_flash_outline() {
        let (a, b) = sets();
        let recolorer = Recolorer::new(&a, &b);
        assert_eq!(
            recolorer.lookup(a.color(Role::FlashOutline)),
            Some(b.color(Role::FlashOutline))
        );
        assert_eq!(
            recolorer.lookup(a.color(Role::Principal)),
            Some(b.color(Role::Principal))
        );
        assert_eq!(recolorer.source_code(), 1);
        assert_eq!(recolorer.target_code(), 2);
    }
}
