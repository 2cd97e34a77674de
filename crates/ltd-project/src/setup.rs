use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::dependency_manager::DependencyManager;
use crate::package_json::PackageJson;
use ltd_constants::{BIN_NAME, GITIGNORE_FILE, SCRATCH_ROOT, VERSION};

/// A project counts as set up once either manifest key exists.
#[must_use]
pub const fn is_already_configured(package_json: &PackageJson) -> bool {
    package_json.link_type_definitions.is_some()
        || package_json.link_type_definitions_options.is_some()
}

pub struct SetupWiring;

impl SetupWiring {
    #[must_use]
    pub fn postinstall_hook() -> String {
        format!("{BIN_NAME} link")
    }

    #[must_use]
    pub fn ignore_entry() -> String {
        format!("{SCRATCH_ROOT}/{BIN_NAME}")
    }

    pub fn apply(package_json: &mut PackageJson, types_location: Option<&str>) {
        package_json.link_type_definitions = Some(Vec::new());

        if let Some(location) = types_location.filter(|l| !l.is_empty()) {
            let mut options = Map::new();
            options.insert(
                "typesLocation".to_string(),
                Value::String(location.to_string()),
            );
            package_json.link_type_definitions_options = Some(Value::Object(options));
        }

        let hook = Self::postinstall_hook();
        let scripts = package_json.scripts.get_or_insert_with(IndexMap::new);
        let postinstall = match scripts.get("postinstall") {
            Some(existing) if !existing.is_empty() => format!("{existing} && {hook}"),
            _ => hook,
        };
        scripts.insert("postinstall".to_string(), postinstall);

        DependencyManager::add_dev_dependency(package_json, BIN_NAME, VERSION);
    }

    /// Appends the scratch directory to `.gitignore`, creating the file when
    /// missing. Returns `false` when the entry was already present.
    pub fn ensure_ignore_entry(project_dir: &Path) -> anyhow::Result<bool> {
        let path = project_dir.join(GITIGNORE_FILE);
        let entry = Self::ignore_entry();
        let existing = if path.exists() {
            fs::read_to_string(&path)?
        } else {
            String::new()
        };

        if existing.lines().any(|line| line.trim() == entry) {
            return Ok(false);
        }

        let mut content = existing;
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        content.push_str(&entry);
        content.push('\n');
        fs::write(path, content)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_apply_to_fresh_manifest() {
        let mut pkg = PackageJson::default();
        assert!(!is_already_configured(&pkg));

        SetupWiring::apply(&mut pkg, None);

        assert!(is_already_configured(&pkg));
        assert_eq!(pkg.link_type_definitions, Some(vec![]));
        assert!(pkg.link_type_definitions_options.is_none());
        let scripts = pkg.scripts.as_ref().unwrap();
        assert_eq!(
            scripts.get("postinstall").map(String::as_str),
            Some("link-type-definitions link")
        );
        let dev = pkg.dev_dependencies.as_ref().unwrap();
        assert_eq!(
            dev.get(BIN_NAME).cloned(),
            Some(format!("^{VERSION}"))
        );
    }

    #[test]
    fn test_apply_chains_existing_postinstall() {
        let mut pkg: PackageJson =
            serde_json::from_str(r#"{"scripts":{"postinstall":"patch-package"}}"#).unwrap();

        SetupWiring::apply(&mut pkg, Some("types"));

        let scripts = pkg.scripts.as_ref().unwrap();
        assert_eq!(
            scripts.get("postinstall").map(String::as_str),
            Some("patch-package && link-type-definitions link")
        );
        assert_eq!(
            pkg.link_type_definitions_options,
            Some(serde_json::json!({"typesLocation": "types"}))
        );
    }

    #[test]
    fn test_options_key_alone_counts_as_configured() {
        let pkg: PackageJson =
            serde_json::from_str(r#"{"linkTypeDefinitionsOptions":{}}"#).unwrap();
        assert!(is_already_configured(&pkg));
    }

    #[test]
    fn test_ensure_ignore_entry() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".gitignore"), "node_modules").unwrap();

        assert!(SetupWiring::ensure_ignore_entry(dir.path()).unwrap());
        assert!(!SetupWiring::ensure_ignore_entry(dir.path()).unwrap());

        let content = std::fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        assert_eq!(content, "node_modules\n.tmp/link-type-definitions\n");
    }

    #[test]
    fn test_ensure_ignore_entry_creates_file() {
        let dir = TempDir::new().unwrap();
        assert!(SetupWiring::ensure_ignore_entry(dir.path()).unwrap());
        assert!(dir.path().join(".gitignore").is_file());
    }
}
