use std::path::{Component, Path, PathBuf};

use ltd_constants::{BIN_NAME, MANIFEST_FILE, SCRATCH_ROOT};

/// Nearest ancestor of `start` (inclusive) holding a package.json, else `start`.
#[must_use]
pub fn find_project_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| dir.join(MANIFEST_FILE).is_file())
        .unwrap_or(start)
        .to_path_buf()
}

#[must_use]
pub fn get_package_json_path(project_dir: &Path) -> PathBuf {
    project_dir.join(MANIFEST_FILE)
}

#[must_use]
pub fn get_node_modules_path(project_dir: &Path) -> PathBuf {
    project_dir.join("node_modules")
}

#[must_use]
pub fn get_scratch_path(project_dir: &Path) -> PathBuf {
    project_dir.join(SCRATCH_ROOT).join(BIN_NAME)
}

/// Handle scoped package names in file paths
#[must_use]
pub fn get_scoped_package_path(base_path: &Path, package_name: &str) -> PathBuf {
    package_name
        .split('/')
        .filter(|segment| !segment.is_empty())
        .fold(base_path.to_path_buf(), |path, segment| path.join(segment))
}

/// Flattens a module key into a single directory name (`@types/node` -> `__types__node`).
#[must_use]
pub fn sanitize_module_key(key: &str) -> String {
    key.replace(['/', '@'], "__")
}

#[must_use]
pub fn to_forward_slashes(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolves `.` and `..` lexically, without touching the filesystem.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
