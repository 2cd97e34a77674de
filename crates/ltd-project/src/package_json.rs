use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct PackageJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scripts: Option<IndexMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<IndexMap<String, String>>,
    #[serde(rename = "devDependencies", skip_serializing_if = "Option::is_none")]
    pub dev_dependencies: Option<IndexMap<String, String>>,
    #[serde(
        rename = "linkTypeDefinitions",
        skip_serializing_if = "Option::is_none"
    )]
    pub link_type_definitions: Option<Vec<String>>,
    #[serde(
        rename = "linkTypeDefinitionsOptions",
        skip_serializing_if = "Option::is_none"
    )]
    pub link_type_definitions_options: Option<Value>,
    #[serde(rename = "typeDefinitions", skip_serializing_if = "Option::is_none")]
    pub type_definitions: Option<IndexMap<String, String>>,
    // Catch-all for other fields to preserve them
    #[serde(flatten)]
    pub other: IndexMap<String, Value>,
}

/// `version_or_url` is `Some` only for modules that have to be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    pub name: String,
    pub version_or_url: Option<String>,
}

impl ModuleDescriptor {
    #[must_use]
    pub fn installed(name: &str) -> Self {
        Self {
            name: name.to_string(),
            version_or_url: None,
        }
    }

    #[must_use]
    pub fn remote(name: &str, version_or_url: &str) -> Self {
        Self {
            name: name.to_string(),
            version_or_url: Some(version_or_url.to_string()),
        }
    }

    #[must_use]
    pub fn is_relative(&self) -> bool {
        self.name.starts_with("./")
    }

    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.version_or_url.is_some()
    }
}

impl PackageJson {
    /// Every configured module, deduplicated by name. `typeDefinitions`
    /// entries are read after `linkTypeDefinitions`, so they win on clashes.
    #[must_use]
    pub fn configured_modules(&self) -> Vec<ModuleDescriptor> {
        let mut modules: IndexMap<String, ModuleDescriptor> = IndexMap::new();

        for name in self.link_type_definitions.iter().flatten() {
            modules.insert(name.clone(), ModuleDescriptor::installed(name));
        }
        for (name, version_or_url) in self.type_definitions.iter().flatten() {
            modules.insert(name.clone(), ModuleDescriptor::remote(name, version_or_url));
        }

        modules.into_values().collect()
    }

    #[must_use]
    pub fn find_module(&self, name: &str) -> Option<ModuleDescriptor> {
        self.configured_modules()
            .into_iter()
            .find(|module| module.name == name)
    }

    #[must_use]
    pub fn has_declared_dependency(&self, name: &str) -> bool {
        [&self.dependencies, &self.dev_dependencies]
            .into_iter()
            .flatten()
            .any(|deps| deps.contains_key(name))
    }
}
