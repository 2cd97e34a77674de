use futures::future::join_all;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::directives::write_linked_directives;
use crate::fetch::Fetcher;
use crate::materialize::{Materializer, PlannedAction};
use ltd_error::{Result, TypeLinkError};
use ltd_project::{
    DependencyManager, ModuleDescriptor, OptionOverrides, Options, PackageJson, ProjectPaths,
    StoredOptions, manifest_exists, read_package_json, write_package_json,
};
use ltd_resolver::resolve_declaration_root;
use ltd_store::FileLinker;
use ltd_utils::{find_project_root, get_node_modules_path, get_scoped_package_path, parse_pkg_spec};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleRequest {
    All,
    Link(String),
    /// `name`, `name@version` or `name@url`.
    Install(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleReport {
    pub name: String,
    pub actions: Vec<PlannedAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub modules: Vec<ModuleReport>,
    pub skipped: Vec<(String, String)>,
    /// Index content as written; `None` on dry runs.
    pub index: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    NotConfigured,
    Completed(RunReport),
}

pub struct LinkPipeline {
    package_json: PackageJson,
    options: Options,
    paths: ProjectPaths,
    fetcher: Fetcher,
    materializer: Materializer,
    // Dry runs fetch here instead of the project's scratch area.
    _dry_scratch: Option<TempDir>,
}

impl LinkPipeline {
    /// `None` when there is no readable manifest.
    pub fn load(project_dir: &Path, overrides: &OptionOverrides) -> Result<Option<Self>> {
        let start = std::path::absolute(project_dir)?;
        let root = find_project_root(&start);

        if !manifest_exists(&root) {
            ltd_logger::warn(&format!(
                "not configured: no package.json found in {}",
                root.display()
            ));
            return Ok(None);
        }

        let package_json = match read_package_json(&root) {
            Ok(package_json) => package_json,
            Err(e) => {
                ltd_logger::warn(&format!("not configured: {e}"));
                return Ok(None);
            }
        };

        let stored = StoredOptions::from_value(package_json.link_type_definitions_options.as_ref());
        let options = Options::merge(&stored, overrides);
        let paths = ProjectPaths::new(&root, &options);

        let dry_scratch = if options.dry_run {
            Some(TempDir::new()?)
        } else {
            None
        };
        let scratch_root = dry_scratch
            .as_ref()
            .map_or(paths.scratch.as_path(), TempDir::path);

        Ok(Some(Self {
            materializer: Materializer::new(&options)?,
            fetcher: Fetcher::new(scratch_root, options.verbose),
            package_json,
            options,
            paths,
            _dry_scratch: dry_scratch,
        }))
    }

    pub async fn run(&self, request: &ModuleRequest) -> Result<RunReport> {
        if self.options.verbose {
            ltd_logger::info(&render_options(&self.options)?);
        }

        let descriptors = self.descriptors(request)?;
        if descriptors.is_empty() {
            ltd_logger::warn("no type definitions configured");
            return Ok(RunReport::default());
        }

        if let [single] = descriptors.as_slice()
            && *request != ModuleRequest::All
        {
            self.save(single)?;
        }

        if *request == ModuleRequest::All && !self.options.dry_run {
            self.reset_types_location().await?;
        }

        let fetches = !self.options.unlink
            && !self.options.dry_run
            && descriptors.iter().any(ModuleDescriptor::is_remote);
        if fetches {
            FileLinker::remove_existing(&self.paths.scratch).await?;
        }

        let results = join_all(descriptors.iter().map(|descriptor| async move {
            (descriptor.name.clone(), self.process(descriptor).await)
        }))
        .await;

        let mut report = RunReport::default();
        for (name, result) in results {
            match result {
                Ok(actions) => report.modules.push(ModuleReport { name, actions }),
                Err(e) => {
                    ltd_logger::warn(&format!("{name}: {e}"));
                    report.skipped.push((name, e.to_string()));
                }
            }
        }

        if fetches && let Err(e) = FileLinker::remove_existing(&self.paths.scratch).await {
            ltd_logger::debug(
                &format!("could not remove {}: {e}", self.paths.scratch.display()),
                self.options.verbose,
            );
        }

        if !self.options.dry_run {
            let content =
                write_linked_directives(&self.paths.types_location, &self.options.namespace)
                    .await?;
            report.index = Some(content);
        }

        Ok(report)
    }

    fn descriptors(&self, request: &ModuleRequest) -> Result<Vec<ModuleDescriptor>> {
        match request {
            ModuleRequest::All => Ok(self.package_json.configured_modules()),
            ModuleRequest::Link(name) => {
                let descriptor = self
                    .package_json
                    .find_module(name)
                    .unwrap_or_else(|| ModuleDescriptor::installed(name));
                self.check_declared(&descriptor)?;
                Ok(vec![descriptor])
            }
            ModuleRequest::Install(spec) => {
                let (name, version) = parse_pkg_spec(spec);
                let explicit_version = spec.len() > name.len();
                let version_or_url = if explicit_version {
                    version
                } else {
                    self.package_json
                        .type_definitions
                        .as_ref()
                        .and_then(|remote| remote.get(&name).cloned())
                        .unwrap_or(version)
                };
                Ok(vec![ModuleDescriptor::remote(&name, &version_or_url)])
            }
        }
    }

    fn check_declared(&self, descriptor: &ModuleDescriptor) -> Result<()> {
        if descriptor.is_remote()
            || descriptor.is_relative()
            || self.options.unlink
            || self.package_json.has_declared_dependency(&descriptor.name)
        {
            Ok(())
        } else {
            Err(TypeLinkError::NotDeclared(descriptor.name.clone()))
        }
    }

    fn save(&self, descriptor: &ModuleDescriptor) -> Result<()> {
        if !self.options.save {
            return Ok(());
        }

        let mut package_json = self.package_json.clone();
        if self.options.unlink {
            DependencyManager::remove_entry(&mut package_json, &descriptor.name);
        } else if let Some(version_or_url) = &descriptor.version_or_url {
            DependencyManager::add_remote_entry(&mut package_json, &descriptor.name, version_or_url);
        } else {
            DependencyManager::add_link_entry(&mut package_json, &descriptor.name);
        }

        if !self.options.dry_run {
            write_package_json(&self.paths.root, &package_json)
                .map_err(|e| TypeLinkError::ManifestError(e.to_string()))?;
        }
        if self.options.reports() {
            ltd_logger::info(&format!("updated {}", self.paths.manifest.display()));
        }
        Ok(())
    }

    // Never the project root or anything outside it.
    async fn reset_types_location(&self) -> Result<()> {
        let location = &self.paths.types_location;
        if location.starts_with(&self.paths.root) && *location != self.paths.root {
            FileLinker::remove_existing(location).await?;
        } else {
            ltd_logger::debug(
                &format!("not resetting {}", location.display()),
                self.options.verbose,
            );
        }
        Ok(())
    }

    async fn process(&self, descriptor: &ModuleDescriptor) -> Result<Vec<PlannedAction>> {
        if descriptor.is_relative() {
            return self.process_relative(descriptor).await;
        }

        let target = self.paths.module_target(&descriptor.name);
        if self.options.unlink {
            return self.materializer.clear(&target).await;
        }

        match &descriptor.version_or_url {
            Some(version_or_url) => self.process_remote(descriptor, version_or_url, &target).await,
            None => self.process_installed(descriptor, &target).await,
        }
    }

    async fn process_relative(&self, descriptor: &ModuleDescriptor) -> Result<Vec<PlannedAction>> {
        let relative = descriptor.name.trim_start_matches("./").trim_end_matches('/');
        let target_name = match self.package_json.name.as_deref() {
            Some(package_name) if !package_name.is_empty() => format!("{package_name}/{relative}"),
            _ => relative.to_string(),
        };
        let target = self.paths.module_target(&target_name);

        if self.options.unlink {
            return self.materializer.clear(&target).await;
        }

        let source = ltd_utils::normalize_path(&self.paths.root.join(relative));
        if !source.is_dir() {
            return Err(TypeLinkError::SourceMissing(
                descriptor.name.clone(),
                source.display().to_string(),
            ));
        }
        self.materializer
            .materialize(&source, &target, self.options.copy)
            .await
    }

    async fn process_installed(
        &self,
        descriptor: &ModuleDescriptor,
        target: &Path,
    ) -> Result<Vec<PlannedAction>> {
        self.check_declared(descriptor)?;

        let module_dir =
            get_scoped_package_path(&get_node_modules_path(&self.paths.root), &descriptor.name);
        if !module_dir.is_dir() {
            return Err(TypeLinkError::SourceMissing(
                descriptor.name.clone(),
                module_dir.display().to_string(),
            ));
        }

        let source_root = self.declaration_root(&descriptor.name, &module_dir);
        self.materializer
            .materialize(&source_root, target, self.options.copy)
            .await
    }

    // Scratch sources are deleted afterwards, so always copy.
    async fn process_remote(
        &self,
        descriptor: &ModuleDescriptor,
        version_or_url: &str,
        target: &Path,
    ) -> Result<Vec<PlannedAction>> {
        ltd_logger::status(&format!("fetching {}", descriptor.name));
        let fetched = self.fetcher.fetch(&descriptor.name, version_or_url).await?;
        let source_root = self.declaration_root(&descriptor.name, fetched.effective_root());
        let result = self.materializer.materialize(&source_root, target, true).await;

        if let Err(e) = fetched.dispose().await {
            ltd_logger::debug(&format!("scratch cleanup failed: {e}"), self.options.verbose);
        }
        result
    }

    fn declaration_root(&self, name: &str, package_root: &Path) -> PathBuf {
        resolve_declaration_root(package_root).unwrap_or_else(|| {
            ltd_logger::debug(
                &format!("{name}: no declaration files found"),
                self.options.verbose,
            );
            package_root.to_path_buf()
        })
    }
}

pub(crate) fn render_options(options: &Options) -> Result<String> {
    serde_json::to_string_pretty(options).map_err(|e| TypeLinkError::ManifestError(e.to_string()))
}

pub async fn run(
    project_dir: &Path,
    request: &ModuleRequest,
    overrides: &OptionOverrides,
) -> Result<RunOutcome> {
    let Some(pipeline) = LinkPipeline::load(project_dir, overrides)? else {
        return Ok(RunOutcome::NotConfigured);
    };
    pipeline.run(request).await.map(RunOutcome::Completed)
}
