//! Sprite discovery

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;
use crate::palette::ColorSet;

/// Whether the file extension is one of `extensions` (case-insensitive).
///
/// An empty list accepts every file.
fn has_extension(path: &Path, extensions: &[String]) -> bool {
    extensions.is_empty()
        || path.extension().is_some_and(|ext| {
            extensions
                .iter()
                .any(|wanted| ext.eq_ignore_ascii_case(wanted.trim_start_matches('.')))
        })
}

/// Whether one of the directories between `root` and the file is exactly
/// `folder`.
///
/// Components of `root` itself never match.
fn lives_under(path: &Path, root: &Path, folder: &str) -> bool {
    path.strip_prefix(root)
        .ok()
        .and_then(Path::parent)
        .is_some_and(|dir| dir.components().any(|c| c.as_os_str() == folder))
}

/// Find every sprite under `root` that belongs to `set`.
///
/// A file belongs to the set when one of its directories below `root` is
/// named exactly like the set's palette folder, so `color3` never picks up
/// files from `color30`, and a root inside a directory named `color1` does
/// not make everything under it a palette 1 sprite. A missing root yields no
/// sprites.
///
/// # Returns
/// A sorted list of sprite paths, each starting with `root`.
pub fn locate_assets<P: AsRef<Path>>(
    root: P,
    set: &ColorSet,
    extensions: &[String],
) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    if !root.is_dir() {
        tracing::warn!("Sprite root not found: {}", root.display());
        return Ok(Vec::new());
    }

    let folder = set.folder_name();
    let mut assets = Vec::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file()
            && has_extension(path, extensions)
            && lives_under(path, root, &folder)
        {
            assets.push(path.to_path_buf());
        }
    }

    assets.sort();
    tracing::debug!(
        "Found {} sprites for {} under {}",
        assets.len(),
        folder,
        root.display()
    );
    Ok(assets)
}

/// Union of [`locate_assets`] over several roots, in root order.
pub fn locate_all<P: AsRef<Path>>(
    roots: &[P],
    set: &ColorSet,
    extensions: &[String],
) -> Result<Vec<PathBuf>> {
    let mut assets = Vec::new();
    for root in roots {
        assets.extend(locate_assets(root, set, extensions)?);
    }
    Ok(assets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Rgb;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    fn set(code: u32) -> ColorSet {
        ColorSet::new(Rgb::new(100, 100, 100), code).unwrap()
    }

    fn png() -> Vec<String> {
        vec!["png".to_string()]
    }

    #[test]
    fn test_whole_segment_match() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "caps/knight/color3/idle.png");
        touch(dir.path(), "caps/knight/color30/idle.png");

        let found = locate_assets(dir.path().join("caps"), &set(3), &png()).unwrap();
        assert_eq!(found, vec![dir.path().join("caps/knight/color3/idle.png")]);
    }

    #[test]
    fn test_nested_folders_and_sorting() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "germs/wall/level2/color1/pop_1.png");
        touch(dir.path(), "germs/wall/level1/color1/idle_0.png");
        touch(dir.path(), "germs/basic/color1/idle_0.png");
        touch(dir.path(), "germs/basic/color2/idle_0.png");

        let found = locate_assets(dir.path().join("germs"), &set(1), &png()).unwrap();
        let relative: Vec<_> = found
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            relative,
            vec![
                PathBuf::from("germs/basic/color1/idle_0.png"),
                PathBuf::from("germs/wall/level1/color1/idle_0.png"),
                PathBuf::from("germs/wall/level2/color1/pop_1.png"),
            ]
        );
    }

    #[test]
    fn test_extension_filter() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "caps/color1/left.png");
        touch(dir.path(), "caps/color1/RIGHT.PNG");
        touch(dir.path(), "caps/color1/notes.txt");

        let found = locate_assets(dir.path().join("caps"), &set(1), &png()).unwrap();
        assert_eq!(found.len(), 2);

        let everything = locate_assets(dir.path().join("caps"), &set(1), &[]).unwrap();
        assert_eq!(everything.len(), 3);
    }

    #[test]
    fn test_file_named_like_folder_is_not_a_match() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "caps/hero/color1");

        let found = locate_assets(dir.path().join("caps"), &set(1), &[]).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_palette_named_ancestor_is_ignored() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("color1");
        touch(&base, "caps/hero/color1/idle_0.png");
        touch(&base, "caps/hero/color5/idle_0.png");

        let found = locate_assets(base.join("caps"), &set(1), &png()).unwrap();
        assert_eq!(found, vec![base.join("caps/hero/color1/idle_0.png")]);

        let found = locate_assets(base.join("caps"), &set(5), &png()).unwrap();
        assert_eq!(found, vec![base.join("caps/hero/color5/idle_0.png")]);
    }

    #[test]
    fn test_missing_root_is_empty() {
        let dir = tempdir().unwrap();
        let found = locate_assets(dir.path().join("nope"), &set(1), &png()).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_locate_all_unions_roots() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "caps/color1/left.png");
        touch(dir.path(), "germs/virus/color1/idle_0.png");

        let roots = [dir.path().join("caps"), dir.path().join("germs")];
        let found = locate_all(&roots, &set(1), &png()).unwrap();
        assert_eq!(
            found,
            vec![
                dir.path().join("caps/color1/left.png"),
                dir.path().join("germs/virus/color1/idle_0.png"),
            ]
        );
    }
}
