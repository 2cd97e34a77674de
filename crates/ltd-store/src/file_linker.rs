use std::io;
use std::path::Path;
use tokio::fs;

pub struct FileLinker;

impl FileLinker {
    /// Removes whatever sits at `dest`: file, symlink (dangling or not) or
    /// directory. A missing path is not an error.
    pub async fn remove_existing(dest: &Path) -> io::Result<()> {
        let metadata = match fs::symlink_metadata(dest).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e),
        };

        if metadata.is_dir() {
            fs::remove_dir_all(dest).await
        } else {
            fs::remove_file(dest).await
        }
    }

    pub async fn copy_file(source: &Path, dest: &Path) -> io::Result<()> {
        Self::ensure_parent_directory_exists(dest).await?;
        fs::copy(source, dest).await?;
        Ok(())
    }

    pub async fn link_file(source: &Path, dest: &Path) -> io::Result<()> {
        Self::ensure_parent_directory_exists(dest).await?;
        Self::create_symlink(source, dest).await
    }

    async fn ensure_parent_directory_exists(dest: &Path) -> io::Result<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    async fn create_symlink(source: &Path, dest: &Path) -> io::Result<()> {
        #[cfg(target_family = "unix")]
        fs::symlink(source, dest).await?;

        #[cfg(target_family = "windows")]
        fs::symlink_file(source, dest).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_copy_creates_parents() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.d.ts");
        std::fs::write(&source, "export {};").unwrap();
        let dest = dir.path().join("out/nested/a.d.ts");

        FileLinker::copy_file(&source, &dest).await.unwrap();

        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "export {};");
        assert!(!std::fs::symlink_metadata(&dest).unwrap().file_type().is_symlink());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_link_points_at_source() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.d.ts");
        std::fs::write(&source, "export {};").unwrap();
        let dest = dir.path().join("out/a.d.ts");

        FileLinker::link_file(&source, &dest).await.unwrap();

        assert_eq!(std::fs::read_link(&dest).unwrap(), source);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_remove_dangling_link() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("dangling.d.ts");
        std::os::unix::fs::symlink(dir.path().join("gone.d.ts"), &dest).unwrap();

        FileLinker::remove_existing(&dest).await.unwrap();

        assert!(std::fs::symlink_metadata(&dest).is_err());
    }

    #[tokio::test]
    async fn test_remove_directory_and_missing() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("a.d.ts");
        std::fs::create_dir_all(dest.join("inner")).unwrap();

        FileLinker::remove_existing(&dest).await.unwrap();
        assert!(!dest.exists());

        FileLinker::remove_existing(&dest).await.unwrap();
    }
}
