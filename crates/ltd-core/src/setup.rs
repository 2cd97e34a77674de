use std::path::Path;

use ltd_constants::GITIGNORE_FILE;
use ltd_error::{Result, TypeLinkError};
use crate::pipeline::render_options;
use ltd_project::{
    OptionOverrides, Options, PackageJson, SetupWiring, StoredOptions, is_already_configured,
    manifest_exists, read_package_json, write_package_json,
};
use ltd_utils::find_project_root;

#[derive(Debug, Clone, Default)]
pub struct SetupOptions {
    pub types_location: Option<String>,
    pub install: bool,
    pub dry_run: bool,
    pub verbose: bool,
}

impl SetupOptions {
    #[must_use]
    pub fn merged(&self, package_json: &PackageJson) -> Options {
        let stored = StoredOptions::from_value(package_json.link_type_definitions_options.as_ref());
        Options::merge(
            &stored,
            &OptionOverrides {
                dry_run: Some(self.dry_run),
                verbose: Some(self.verbose),
                types_location: self.types_location.clone().filter(|l| !l.is_empty()),
                ..OptionOverrides::default()
            },
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupOutcome {
    NotConfigured,
    AlreadyConfigured,
    Configured,
}

pub struct SetupManager;

impl SetupManager {
    pub fn setup(&self, project_dir: &Path, options: &SetupOptions) -> Result<SetupOutcome> {
        let start = std::path::absolute(project_dir)?;
        let root = find_project_root(&start);

        if !manifest_exists(&root) {
            ltd_logger::warn(&format!(
                "not configured: no package.json found in {}",
                root.display()
            ));
            return Ok(SetupOutcome::NotConfigured);
        }

        let mut package_json = read_package_json(&root)
            .map_err(|e| TypeLinkError::ManifestError(e.to_string()))?;

        if options.verbose {
            ltd_logger::info(&render_options(&options.merged(&package_json))?);
        }

        if is_already_configured(&package_json) {
            ltd_logger::warn("project already setup with link-type-definitions");
            return Ok(SetupOutcome::AlreadyConfigured);
        }

        SetupWiring::apply(&mut package_json, options.types_location.as_deref());
        let reports = options.dry_run || options.verbose;

        if !options.dry_run {
            write_package_json(&root, &package_json)
                .map_err(|e| TypeLinkError::ManifestError(e.to_string()))?;
        }
        if reports {
            ltd_logger::info(&format!(
                "updated {}",
                ltd_utils::get_package_json_path(&root).display()
            ));
        }

        let ignore_updated = if options.dry_run {
            true
        } else {
            SetupWiring::ensure_ignore_entry(&root)
                .map_err(|e| TypeLinkError::IoError(e.to_string()))?
        };
        if reports && ignore_updated {
            ltd_logger::info(&format!("updated {}", root.join(GITIGNORE_FILE).display()));
        }

        if options.install && !options.dry_run {
            ltd_runtime::install_dependencies(&root)
                .map_err(|e| TypeLinkError::IoError(e.to_string()))?;
        }

        Ok(SetupOutcome::Configured)
    }
}
