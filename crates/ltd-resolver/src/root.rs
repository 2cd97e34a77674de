//! When several sibling directories tie at the shallowest depth the parent
//! of the first one is returned. That is a heuristic: the other siblings'
//! files are only reachable if they share that parent.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::declarations::declaration_files;

/// Shallowest directory under `source_root` containing declaration files.
#[must_use]
pub fn resolve_declaration_root(source_root: &Path) -> Option<PathBuf> {
    let mut by_depth: BTreeMap<usize, Vec<PathBuf>> = BTreeMap::new();
    for relative in declaration_files(source_root, true) {
        by_depth
            .entry(relative.components().count())
            .or_default()
            .push(relative);
    }

    let (_, shallowest) = by_depth.into_iter().next()?;

    let mut directories: Vec<PathBuf> = shallowest
        .iter()
        .map(|file| source_root.join(file.parent().unwrap_or_else(|| Path::new(""))))
        .collect();
    directories.dedup();

    match directories.as_slice() {
        [only] => Some(normalize_trailing(only)),
        [first, ..] => Some(
            first
                .parent()
                .map_or_else(|| normalize_trailing(first), Path::to_path_buf),
        ),
        [] => None,
    }
}

// `root.join("")` leaves a trailing separator behind.
fn normalize_trailing(path: &Path) -> PathBuf {
    path.components().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "export {};").unwrap();
    }

    #[test]
    fn test_single_directory_at_minimal_depth() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "types/index.d.ts");
        touch(dir.path(), "types/util.d.ts");
        touch(dir.path(), "types/deep/more.d.ts");

        assert_eq!(
            resolve_declaration_root(dir.path()),
            Some(dir.path().join("types"))
        );
    }

    #[test]
    fn test_only_minimal_depth_group_is_considered() {
        let dir = TempDir::new().unwrap();
        // depths {2, 2, 3}
        touch(dir.path(), "lib/a.d.ts");
        touch(dir.path(), "lib/b.d.ts");
        touch(dir.path(), "other/nested/c.d.ts");

        assert_eq!(
            resolve_declaration_root(dir.path()),
            Some(dir.path().join("lib"))
        );
    }

    #[test]
    fn test_files_at_root() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "index.d.ts");
        touch(dir.path(), "ts3.4/index.d.ts");

        assert_eq!(
            resolve_declaration_root(dir.path()),
            Some(dir.path().to_path_buf())
        );
    }

    #[test]
    fn test_sibling_directories_fall_back_to_parent() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "pkg/client/index.d.ts");
        touch(dir.path(), "pkg/server/index.d.ts");

        assert_eq!(
            resolve_declaration_root(dir.path()),
            Some(dir.path().join("pkg"))
        );
    }

    #[test]
    fn test_no_declarations() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/index.ts");
        assert_eq!(resolve_declaration_root(dir.path()), None);
    }
}
