use std::fs;
use std::path::Path;

use crate::package_json::PackageJson;
use ltd_utils::get_package_json_path;

#[must_use]
pub fn manifest_exists(project_dir: &Path) -> bool {
    get_package_json_path(project_dir).is_file()
}

pub fn read_package_json(project_dir: &Path) -> anyhow::Result<PackageJson> {
    let path = get_package_json_path(project_dir);
    let content = fs::read_to_string(path)?;
    let parsed: PackageJson = serde_json::from_str(&content)?;
    Ok(parsed)
}

pub fn write_package_json(project_dir: &Path, package_json: &PackageJson) -> anyhow::Result<()> {
    let path = get_package_json_path(project_dir);
    let mut content = serde_json::to_string_pretty(package_json)?;
    content.push('\n');
    fs::write(path, content)?;
    Ok(())
}
