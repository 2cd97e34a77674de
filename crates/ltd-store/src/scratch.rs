use std::path::{Path, PathBuf};

use ltd_constants::ARCHIVE_ROOT_DIR;
use ltd_utils::sanitize_module_key;

/// `tmp` is keyed by the sanitized module key, so concurrent fetches never
/// share it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchPaths {
    pub tmp: PathBuf,
    pub archive: PathBuf,
    pub unpacked: PathBuf,
}

impl ScratchPaths {
    #[must_use]
    pub fn new(scratch_root: &Path, key: &str, package_name: &str, filename: &str) -> Self {
        let tmp = scratch_root.join(sanitize_module_key(key));
        let unpacked_name = package_name
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or(ARCHIVE_ROOT_DIR);

        Self {
            archive: tmp.join(filename),
            unpacked: tmp.join(unpacked_name),
            tmp,
        }
    }

    /// Registry tarballs unpack into `package/` whatever the package is called.
    #[must_use]
    pub fn fallback_unpacked(&self) -> PathBuf {
        self.tmp.join(ARCHIVE_ROOT_DIR)
    }
}
