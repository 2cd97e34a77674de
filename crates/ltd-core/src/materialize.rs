use futures::future::join_all;
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use ltd_error::Result;
use ltd_project::Options;
use ltd_resolver::{IgnoreMatcher, declaration_entries, declaration_files};
use ltd_store::FileLinker;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedAction {
    Copy { source: PathBuf, dest: PathBuf },
    Link { source: PathBuf, dest: PathBuf },
    Remove { dest: PathBuf },
}

impl PlannedAction {
    #[must_use]
    pub fn dest(&self) -> &Path {
        match self {
            Self::Copy { dest, .. } | Self::Link { dest, .. } | Self::Remove { dest } => dest,
        }
    }
}

impl fmt::Display for PlannedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copy { source, dest } => write!(f, "{} => {}", source.display(), dest.display()),
            Self::Link { source, dest } => write!(f, "{} -> {}", source.display(), dest.display()),
            Self::Remove { dest } => write!(f, "{}", dest.display()),
        }
    }
}

pub struct Materializer {
    dry_run: bool,
    unlink: bool,
    reports: bool,
    ignore: IgnoreMatcher,
}

impl Materializer {
    pub fn new(options: &Options) -> Result<Self> {
        Ok(Self {
            dry_run: options.dry_run,
            unlink: options.unlink,
            reports: options.reports(),
            ignore: IgnoreMatcher::new(&options.ignore_paths)?,
        })
    }

    /// Makes the declaration entries under `target` mirror `source_root`.
    /// Stale entries go first, then every file is placed concurrently.
    pub async fn materialize(
        &self,
        source_root: &Path,
        target: &Path,
        copy: bool,
    ) -> Result<Vec<PlannedAction>> {
        let sources = declaration_files(source_root, true);
        self.reconcile(&sources, source_root, target, copy).await
    }

    /// Removes every declaration entry under `target`.
    pub async fn clear(&self, target: &Path) -> Result<Vec<PlannedAction>> {
        self.reconcile(&[], target, target, true).await
    }

    async fn reconcile(
        &self,
        sources: &[PathBuf],
        source_root: &Path,
        target: &Path,
        copy: bool,
    ) -> Result<Vec<PlannedAction>> {
        let stale: Vec<PathBuf> = declaration_entries(target, true)
            .into_iter()
            .filter(|entry| sources.binary_search(entry).is_err())
            .collect();

        let mut actions = join_all(stale.iter().map(|relative| self.remove(target.join(relative))))
            .await
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        let placed = join_all(
            sources
                .iter()
                .map(|relative| self.place(source_root, target, relative, copy)),
        )
        .await
        .into_iter()
        .collect::<Result<Vec<_>>>()?;
        actions.extend(placed);

        if !self.dry_run {
            remove_empty_dirs(target);
        }

        Ok(actions)
    }

    async fn place(
        &self,
        source_root: &Path,
        target: &Path,
        relative: &Path,
        copy: bool,
    ) -> Result<PlannedAction> {
        let source = source_root.join(relative);
        let dest = target.join(relative);

        if self.unlink || self.ignore.is_ignored(&source) {
            return self.remove(dest).await;
        }

        if !self.dry_run {
            FileLinker::remove_existing(&dest).await?;
            if copy {
                FileLinker::copy_file(&source, &dest).await?;
            } else {
                FileLinker::link_file(&source, &dest).await?;
            }
        }

        let action = if copy {
            PlannedAction::Copy { source, dest }
        } else {
            PlannedAction::Link { source, dest }
        };
        self.report(&action);
        Ok(action)
    }

    async fn remove(&self, dest: PathBuf) -> Result<PlannedAction> {
        if !self.dry_run {
            FileLinker::remove_existing(&dest).await?;
        }
        let action = PlannedAction::Remove { dest };
        self.report(&action);
        Ok(action)
    }

    fn report(&self, action: &PlannedAction) {
        if !self.reports {
            return;
        }
        match action {
            PlannedAction::Remove { .. } => ltd_logger::error(&action.to_string()),
            _ => ltd_logger::info(&action.to_string()),
        }
    }
}

/// Deepest first; non-empty directories refuse removal and stay.
fn remove_empty_dirs(root: &Path) {
    for entry in WalkDir::new(root)
        .contents_first(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_dir())
    {
        let _ = std::fs::remove_dir(entry.path());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str, body: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    fn options() -> Options {
        Options::default()
    }

    fn source_fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "index.d.ts", "export * from './lib';");
        touch(dir.path(), "lib/index.d.ts", "export declare const a: 1;");
        touch(dir.path(), "lib/index.js", "exports.a = 1;");
        touch(dir.path(), "jsx/el.d.tsx", "export {};");
        dir
    }

    fn placed(target: &Path) -> Vec<PathBuf> {
        declaration_entries(target, true)
    }

    #[tokio::test]
    async fn test_copy_is_idempotent() {
        let source = source_fixture();
        let out = TempDir::new().unwrap();
        let target = out.path().join("@types/thing");
        let materializer = Materializer::new(&options()).unwrap();

        let first = materializer.materialize(source.path(), &target, true).await.unwrap();
        let after_first = placed(&target);
        let second = materializer.materialize(source.path(), &target, true).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(after_first, placed(&target));
        assert_eq!(
            after_first,
            vec![
                PathBuf::from("index.d.ts"),
                PathBuf::from("jsx/el.d.tsx"),
                PathBuf::from("lib/index.d.ts"),
            ]
        );
        assert_eq!(
            fs::read_to_string(target.join("lib/index.d.ts")).unwrap(),
            "export declare const a: 1;"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_link_mode() {
        let source = source_fixture();
        let out = TempDir::new().unwrap();
        let materializer = Materializer::new(&options()).unwrap();

        let actions = materializer
            .materialize(source.path(), out.path(), false)
            .await
            .unwrap();

        assert!(actions.iter().all(|a| matches!(a, PlannedAction::Link { .. })));
        assert_eq!(
            fs::read_link(out.path().join("index.d.ts")).unwrap(),
            source.path().join("index.d.ts")
        );
    }

    #[tokio::test]
    async fn test_ignored_files_are_pruned() {
        let source = source_fixture();
        let out = TempDir::new().unwrap();
        let materializer = Materializer::new(&options()).unwrap();
        materializer.materialize(source.path(), out.path(), true).await.unwrap();
        assert!(out.path().join("lib/index.d.ts").exists());

        let ignoring = Materializer::new(&Options {
            ignore_paths: vec![r"[/\\]lib[/\\]index\.d\.ts$".to_string()],
            ..options()
        })
        .unwrap();
        let actions = ignoring.materialize(source.path(), out.path(), true).await.unwrap();

        assert!(!out.path().join("lib").exists());
        assert!(out.path().join("index.d.ts").exists());
        assert!(actions.contains(&PlannedAction::Remove {
            dest: out.path().join("lib/index.d.ts")
        }));
    }

    #[tokio::test]
    async fn test_unlink_then_relink() {
        let source = source_fixture();
        let out = TempDir::new().unwrap();
        let target = out.path().join("thing");
        let linker = Materializer::new(&options()).unwrap();
        let unlinker = Materializer::new(&Options {
            unlink: true,
            ..options()
        })
        .unwrap();

        linker.materialize(source.path(), &target, true).await.unwrap();
        let before = placed(&target);

        let removed = unlinker.materialize(source.path(), &target, true).await.unwrap();
        assert!(removed.iter().all(|a| matches!(a, PlannedAction::Remove { .. })));
        assert!(placed(&target).is_empty());
        assert!(!target.exists());

        linker.materialize(source.path(), &target, true).await.unwrap();
        assert_eq!(before, placed(&target));
    }

    #[tokio::test]
    async fn test_stale_entries_removed() {
        let source = source_fixture();
        let out = TempDir::new().unwrap();
        touch(out.path(), "old/gone.d.ts", "export {};");
        touch(out.path(), "notes.txt", "kept");
        let materializer = Materializer::new(&options()).unwrap();

        materializer.materialize(source.path(), out.path(), true).await.unwrap();

        assert!(!out.path().join("old").exists());
        assert!(out.path().join("notes.txt").exists());
    }

    #[tokio::test]
    async fn test_dry_run_changes_nothing() {
        let source = source_fixture();
        let out = TempDir::new().unwrap();
        touch(out.path(), "old/gone.d.ts", "export {};");
        let materializer = Materializer::new(&Options {
            dry_run: true,
            ..options()
        })
        .unwrap();

        let actions = materializer.materialize(source.path(), out.path(), true).await.unwrap();

        assert_eq!(actions.len(), 4);
        assert_eq!(placed(out.path()), vec![PathBuf::from("old/gone.d.ts")]);
    }

    #[tokio::test]
    async fn test_missing_source_clears_target() {
        let out = TempDir::new().unwrap();
        touch(out.path(), "index.d.ts", "export {};");
        let materializer = Materializer::new(&options()).unwrap();

        let actions = materializer
            .materialize(&out.path().join("absent"), out.path(), true)
            .await
            .unwrap();

        assert_eq!(
            actions,
            vec![PlannedAction::Remove {
                dest: out.path().join("index.d.ts")
            }]
        );
    }

    #[tokio::test]
    async fn test_clear() {
        let source = source_fixture();
        let out = TempDir::new().unwrap();
        let target = out.path().join("thing");
        let materializer = Materializer::new(&options()).unwrap();
        materializer.materialize(source.path(), &target, true).await.unwrap();

        let actions = materializer.clear(&target).await.unwrap();

        assert_eq!(actions.len(), 3);
        assert!(!target.exists());
    }

    #[test]
    fn test_display() {
        let copy = PlannedAction::Copy {
            source: PathBuf::from("/a/x.d.ts"),
            dest: PathBuf::from("/b/x.d.ts"),
        };
        let link = PlannedAction::Link {
            source: PathBuf::from("/a/x.d.ts"),
            dest: PathBuf::from("/b/x.d.ts"),
        };
        assert_eq!(copy.to_string(), "/a/x.d.ts => /b/x.d.ts");
        assert_eq!(link.to_string(), "/a/x.d.ts -> /b/x.d.ts");
        assert_eq!(
            PlannedAction::Remove { dest: PathBuf::from("/b/x.d.ts") }.to_string(),
            "/b/x.d.ts"
        );
    }
}
