use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use ltd_constants::{DEFAULT_NAMESPACE, TYPES_ROOT};
use ltd_utils::{get_package_json_path, get_scoped_package_path, get_scratch_path, normalize_path};

/// `save` and `unlink` are per-invocation only and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredOptions {
    pub copy: Option<bool>,
    pub dry_run: Option<bool>,
    pub verbose: Option<bool>,
    pub types_location: Option<String>,
    pub namespace: Option<String>,
    pub ignore_paths: Option<Vec<String>>,
}

impl StoredOptions {
    #[must_use]
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(object) = value.and_then(Value::as_object) else {
            return Self::default();
        };

        Self {
            copy: bool_field(object, "copy"),
            dry_run: bool_field(object, "dryRun"),
            verbose: bool_field(object, "verbose"),
            types_location: string_field(object, "typesLocation"),
            namespace: namespace_field(object),
            ignore_paths: string_list_field(object, "ignorePaths"),
        }
    }
}

fn bool_field(object: &Map<String, Value>, key: &str) -> Option<bool> {
    object.get(key).and_then(Value::as_bool)
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// `namespace`, or the short `ns` spelling when `namespace` is absent.
fn namespace_field(object: &Map<String, Value>) -> Option<String> {
    string_field(object, "namespace").or_else(|| string_field(object, "ns"))
}

fn string_list_field(object: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    object.get(key).and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    })
}

#[derive(Debug, Clone, Default)]
pub struct OptionOverrides {
    pub copy: Option<bool>,
    pub dry_run: Option<bool>,
    pub save: Option<bool>,
    pub unlink: Option<bool>,
    pub verbose: Option<bool>,
    pub types_location: Option<String>,
    pub namespace: Option<String>,
    pub ignore_paths: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    pub copy: bool,
    pub dry_run: bool,
    pub save: bool,
    pub unlink: bool,
    pub verbose: bool,
    pub types_location: String,
    pub namespace: String,
    pub ignore_paths: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self::merge(&StoredOptions::default(), &OptionOverrides::default())
    }
}

impl Options {
    #[must_use]
    pub fn merge(stored: &StoredOptions, overrides: &OptionOverrides) -> Self {
        let namespace = overrides
            .namespace
            .clone()
            .or_else(|| stored.namespace.clone())
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());

        let types_location = overrides
            .types_location
            .clone()
            .or_else(|| stored.types_location.clone())
            .unwrap_or_else(|| format!("{TYPES_ROOT}/{namespace}"));

        Self {
            copy: overrides.copy.or(stored.copy).unwrap_or(true),
            dry_run: overrides.dry_run.or(stored.dry_run).unwrap_or(false),
            save: overrides.save.unwrap_or(false),
            unlink: overrides.unlink.unwrap_or(false),
            verbose: overrides.verbose.or(stored.verbose).unwrap_or(false),
            types_location,
            namespace,
            ignore_paths: overrides
                .ignore_paths
                .clone()
                .or_else(|| stored.ignore_paths.clone())
                .unwrap_or_default(),
        }
    }

    /// Whether per-file actions should be reported.
    #[must_use]
    pub const fn reports(&self) -> bool {
        self.dry_run || self.verbose
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub manifest: PathBuf,
    pub types_location: PathBuf,
    pub scratch: PathBuf,
}

impl ProjectPaths {
    #[must_use]
    pub fn new(root: &Path, options: &Options) -> Self {
        Self {
            root: root.to_path_buf(),
            manifest: get_package_json_path(root),
            types_location: normalize_path(&root.join(&options.types_location)),
            scratch: get_scratch_path(root),
        }
    }

    /// `<typesLocation>/<moduleName>`; scoped names nest.
    #[must_use]
    pub fn module_target(&self, module_name: &str) -> PathBuf {
        get_scoped_package_path(&self.types_location, module_name)
    }
}
