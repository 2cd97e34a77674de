pub mod client;
pub mod git;
pub mod source;

pub use client::DownloadClient;
pub use source::{SourceKind, SourceUrl};

use std::path::{Path, PathBuf};

use ltd_constants::REGISTRY_URL;
use ltd_error::{Result, TypeLinkError};
use ltd_store::{FileLinker, ScratchPaths, extract_archive};

/// A fetched module. Owns its scratch partition until [`Self::dispose`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPackage {
    pub name: String,
    pub scratch: PathBuf,
    pub archive_path: Option<PathBuf>,
    pub clone_root: Option<PathBuf>,
    /// `::subdir` already applied.
    pub unpacked_root: PathBuf,
}

impl FetchedPackage {
    #[must_use]
    pub fn effective_root(&self) -> &Path {
        &self.unpacked_root
    }

    pub async fn dispose(self) -> Result<()> {
        FileLinker::remove_existing(&self.scratch).await?;
        Ok(())
    }
}

pub struct Fetcher {
    client: DownloadClient,
    registry: String,
    scratch_root: PathBuf,
    debug: bool,
}

impl Fetcher {
    #[must_use]
    pub fn new(scratch_root: &Path, debug: bool) -> Self {
        Self::with_registry(scratch_root, REGISTRY_URL, debug)
    }

    #[must_use]
    pub fn with_registry(scratch_root: &Path, registry: &str, debug: bool) -> Self {
        Self {
            client: DownloadClient::new(),
            registry: registry.to_string(),
            scratch_root: scratch_root.to_path_buf(),
            debug,
        }
    }

    pub async fn fetch(&self, key: &str, version_or_url: &str) -> Result<FetchedPackage> {
        let info = ltd_registry::get_package_info(
            self.client.get_client(),
            &self.registry,
            key,
            version_or_url,
        )
        .await;

        if info.url.trim().is_empty() {
            return Err(TypeLinkError::NotInstallable(
                key.to_string(),
                "no download location".to_string(),
            ));
        }

        let source = SourceUrl::parse(&info.url);
        let Some(filename) = source.filename.as_deref() else {
            return Err(TypeLinkError::NotInstallable(
                key.to_string(),
                format!("cannot derive a file name from {}", info.url),
            ));
        };

        let mut paths = ScratchPaths::new(&self.scratch_root, key, &info.name, filename);
        FileLinker::remove_existing(&paths.tmp).await?;
        tokio::fs::create_dir_all(&paths.tmp).await?;

        let mut kind = source.kind;
        let mut archive_path = None;

        if kind == SourceKind::Archive {
            self.client
                .download_to_file(&source.base, &paths.archive, self.debug)
                .await?;
            archive_path = Some(paths.archive.clone());

            match self.unpack(&paths).await {
                Ok(unpacked) => paths.unpacked = unpacked,
                Err(e) => {
                    ltd_logger::debug(&format!("{e}, cloning instead"), self.debug);
                    kind = SourceKind::Git;
                }
            }
        }

        let clone_root = if kind == SourceKind::Git {
            FileLinker::remove_existing(&paths.unpacked).await?;
            git::clone_and_checkout(
                source.clone_url.clone(),
                paths.unpacked.clone(),
                source.git_ref.clone(),
            )
            .await?;
            Some(paths.unpacked.clone())
        } else {
            None
        };

        let unpacked_root = source
            .subdir
            .as_ref()
            .map_or_else(|| paths.unpacked.clone(), |subdir| paths.unpacked.join(subdir));

        if !unpacked_root.is_dir() {
            return Err(TypeLinkError::SourceMissing(
                key.to_string(),
                unpacked_root.display().to_string(),
            ));
        }

        Ok(FetchedPackage {
            name: info.name,
            scratch: paths.tmp,
            archive_path,
            clone_root,
            unpacked_root,
        })
    }

    async fn unpack(&self, paths: &ScratchPaths) -> Result<PathBuf> {
        let archive = paths.archive.clone();
        let dest = paths.tmp.clone();
        let failed = |msg: String| {
            TypeLinkError::ExtractFailed(paths.archive.display().to_string(), msg)
        };

        tokio::task::spawn_blocking(move || extract_archive(&archive, &dest))
            .await
            .map_err(|e| failed(e.to_string()))?
            .map_err(|e| failed(e.to_string()))?;
        Ok(locate_unpacked_root(paths))
    }
}

/// The directory named after the package, else `package/`, else the only
/// directory the archive produced.
fn locate_unpacked_root(paths: &ScratchPaths) -> PathBuf {
    if paths.unpacked.is_dir() {
        return paths.unpacked.clone();
    }
    let fallback = paths.fallback_unpacked();
    if fallback.is_dir() {
        return fallback;
    }

    let directories: Vec<PathBuf> = std::fs::read_dir(&paths.tmp)
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| path.is_dir())
                .collect()
        })
        .unwrap_or_default();

    match directories.as_slice() {
        [only] => only.clone(),
        _ => fallback,
    }
}
