use std::path::Path;

use ltd_constants::INDEX_FILE;
use ltd_error::Result;
use ltd_resolver::declaration_files;
use ltd_utils::to_forward_slashes;

#[must_use]
pub fn create_linked_directives(file_paths: &[String], namespace: &str) -> String {
    let mut paths: Vec<&str> = file_paths
        .iter()
        .map(String::as_str)
        .filter(|path| *path != INDEX_FILE)
        .collect();
    paths.sort_unstable();
    paths.dedup();

    let mut lines: Vec<String> = paths
        .into_iter()
        .map(|path| format!("/// <reference path=\"{path}\" />"))
        .collect();
    lines.push(format!("declare module '{namespace}' {{}}"));
    lines.join("\n")
}

/// Rewrites `<types_location>/index.d.ts` from what is on disk now.
pub async fn write_linked_directives(types_location: &Path, namespace: &str) -> Result<String> {
    let file_paths: Vec<String> = declaration_files(types_location, false)
        .iter()
        .map(|path| to_forward_slashes(path))
        .collect();
    let content = create_linked_directives(&file_paths, namespace);

    tokio::fs::create_dir_all(types_location).await?;
    tokio::fs::write(types_location.join(INDEX_FILE), &content).await?;
    Ok(content)
}
