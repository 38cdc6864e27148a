//! Palette folder path rewriting
//!
//! Every recolorable sprite lives under exactly one palette folder, a path
//! component made of the marker followed by the palette code (`color1`). The
//! destination of a recolored sprite is its source path with that component
//! swapped for the target set's folder.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};
use crate::palette::ColorSet;

/// Parse a palette folder name into its code.
///
/// Only whole components match: `color12` gives `Some(12)`, while `color`,
/// `color12b` and `mycolor12` give `None`.
#[must_use]
pub fn palette_code(component: &str, marker: &str) -> Option<u32> {
    let digits = component.strip_prefix(marker)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Whether a path component is a palette folder for any code.
#[must_use]
pub fn is_palette_folder(component: &OsStr, marker: &str) -> bool {
    component
        .to_str()
        .is_some_and(|name| palette_code(name, marker).is_some())
}

/// Rewrite every palette folder component and count the substitutions.
fn substitute(path: &Path, target: &ColorSet) -> (PathBuf, usize) {
    let folder = target.folder_name();
    let mut replaced = 0;
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Normal(name) if is_palette_folder(name, target.marker()) => {
                out.push(&folder);
                replaced += 1;
            }
            other => out.push(other.as_os_str()),
        }
    }

    (out, replaced)
}

/// Compute where a sprite recolored to `target` should be written.
///
/// A path without any palette folder is returned unchanged and a warning is
/// logged; use [`try_remap_path`] to treat that case as an error.
#[must_use]
pub fn remap_path(path: &Path, target: &ColorSet) -> PathBuf {
    let (remapped, replaced) = substitute(path, target);
    if replaced == 0 {
        tracing::warn!("No palette folder in {}, path left unchanged", path.display());
    }
    remapped
}

/// Like [`remap_path`], but fails with [`Error::PathStructure`] when the path
/// has no palette folder.
pub fn try_remap_path(path: &Path, target: &ColorSet) -> Result<PathBuf> {
    match substitute(path, target) {
        (_, 0) => Err(Error::PathStructure {
            path: path.to_path_buf(),
        }),
        (remapped, _) => Ok(remapped),
    }
}
