use git2::Repository;
use git2::build::CheckoutBuilder;
use std::path::{Path, PathBuf};

use ltd_error::{Result, TypeLinkError};

pub fn clone_repository(url: &str, dest: &Path) -> Result<Repository> {
    Repository::clone(url, dest)
        .map_err(|e| TypeLinkError::CloneFailed(url.to_string(), e.message().to_string()))
}

/// Checks out `reference` detached. Remote branches win over local names so
/// `main` means `origin/main`; tags and commit ids resolve directly.
pub fn checkout_ref(repo: &Repository, reference: &str) -> Result<()> {
    let checkout_failed =
        |e: git2::Error| TypeLinkError::CheckoutFailed(reference.to_string(), e.message().to_string());

    let object = repo
        .revparse_single(&format!("origin/{reference}"))
        .or_else(|_| repo.revparse_single(reference))
        .map_err(checkout_failed)?;
    let commit = object.peel_to_commit().map_err(checkout_failed)?;

    repo.checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().force()))
        .map_err(checkout_failed)?;
    repo.set_head_detached(commit.id()).map_err(checkout_failed)?;
    Ok(())
}

pub async fn clone_and_checkout(url: String, dest: PathBuf, reference: Option<String>) -> Result<()> {
    tokio::task::spawn_blocking(move || -> Result<()> {
        let repo = clone_repository(&url, &dest)?;
        if let Some(reference) = reference {
            checkout_ref(&repo, &reference)?;
        }
        Ok(())
    })
    .await
    .map_err(|e| TypeLinkError::IoError(e.to_string()))?
}
