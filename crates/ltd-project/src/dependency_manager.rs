use crate::package_json::PackageJson;
use indexmap::IndexMap;

pub struct DependencyManager;

impl DependencyManager {
    /// Append a module to `linkTypeDefinitions` unless it is already listed
    pub fn add_link_entry(package_json: &mut PackageJson, name: &str) {
        let entries = package_json
            .link_type_definitions
            .get_or_insert_with(Vec::new);
        if !entries.iter().any(|entry| entry == name) {
            entries.push(name.to_string());
        }
    }

    /// Record a fetched module in `typeDefinitions`, replacing any earlier version
    pub fn add_remote_entry(package_json: &mut PackageJson, name: &str, version_or_url: &str) {
        package_json
            .type_definitions
            .get_or_insert_with(IndexMap::new)
            .insert(name.to_string(), version_or_url.to_string());
    }

    /// Remove a module from both lists. Returns whether anything was removed.
    pub fn remove_entry(package_json: &mut PackageJson, name: &str) -> bool {
        let mut removed = false;

        if let Some(entries) = &mut package_json.link_type_definitions {
            let before = entries.len();
            entries.retain(|entry| entry != name);
            removed |= entries.len() != before;
        }
        if let Some(remote) = &mut package_json.type_definitions {
            removed |= remote.shift_remove(name).is_some();
        }

        removed
    }

    /// Add a devDependency with a caret range unless the version already carries one
    pub fn add_dev_dependency(package_json: &mut PackageJson, name: &str, version: &str) {
        let version_string = if version.starts_with('^') || version.starts_with('~') {
            version.to_string()
        } else {
            format!("^{version}")
        };

        package_json
            .dev_dependencies
            .get_or_insert_with(IndexMap::new)
            .insert(name.to_string(), version_string);
    }
}
