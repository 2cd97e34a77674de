use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[must_use]
pub fn is_declaration_file(path: &Path, include_tsx: bool) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| {
            name.ends_with(".d.ts") || (include_tsx && name.ends_with(".d.tsx"))
        })
}

/// Every declaration file under `root`, as sorted unique paths relative to
/// `root`. Symlinked files are followed; dangling links are skipped.
#[must_use]
pub fn declaration_files(root: &Path, include_tsx: bool) -> Vec<PathBuf> {
    if !root.is_dir() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| is_declaration_file(entry.path(), include_tsx))
        .filter_map(|entry| entry.path().strip_prefix(root).ok().map(Path::to_path_buf))
        .collect();

    files.sort();
    files.dedup();
    files
}

/// Declaration entries already placed under `root`, links included even
/// when dangling. Used to find stale targets.
#[must_use]
pub fn declaration_entries(root: &Path, include_tsx: bool) -> Vec<PathBuf> {
    if !root.is_dir() {
        return Vec::new();
    }

    let mut entries: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| !entry.file_type().is_dir())
        .filter(|entry| is_declaration_file(entry.path(), include_tsx))
        .filter_map(|entry| entry.path().strip_prefix(root).ok().map(Path::to_path_buf))
        .collect();

    entries.sort();
    entries
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
    fn test_pattern() {
        assert!(is_declaration_file(Path::new("a/index.d.ts"), false));
        assert!(!is_declaration_file(Path::new("a/index.ts"), true));
        assert!(!is_declaration_file(Path::new("a/jsx.d.tsx"), false));
        assert!(is_declaration_file(Path::new("a/jsx.d.tsx"), true));
    }

    #[test]
    fn test_enumerates_relative_sorted() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "c.d.ts");
        touch(dir.path(), "a/b.d.ts");
        touch(dir.path(), "a/b.js");
        touch(dir.path(), "jsx/el.d.tsx");

        assert_eq!(
            declaration_files(dir.path(), false),
            vec![PathBuf::from("a/b.d.ts"), PathBuf::from("c.d.ts")]
        );
        assert_eq!(declaration_files(dir.path(), true).len(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_follows_file_links() {
        let source = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        touch(source.path(), "index.d.ts");
        std::os::unix::fs::symlink(
            source.path().join("index.d.ts"),
            target.path().join("linked.d.ts"),
        )
        .unwrap();
        std::os::unix::fs::symlink(
            source.path().join("missing.d.ts"),
            target.path().join("dangling.d.ts"),
        )
        .unwrap();

        assert_eq!(
            declaration_files(target.path(), false),
            vec![PathBuf::from("linked.d.ts")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_entries_include_dangling_links() {
        let target = TempDir::new().unwrap();
        touch(target.path(), "kept.d.ts");
        std::os::unix::fs::symlink(
            target.path().join("missing.d.ts"),
            target.path().join("dangling.d.ts"),
        )
        .unwrap();

        assert_eq!(
            declaration_entries(target.path(), true),
            vec![PathBuf::from("dangling.d.ts"), PathBuf::from("kept.d.ts")]
        );
    }

    #[test]
    fn test_missing_root() {
        let dir = TempDir::new().unwrap();
        assert!(declaration_files(&dir.path().join("nope"), true).is_empty());
    }
}
