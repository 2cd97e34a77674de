pub mod directives;
pub mod fetch;
pub mod materialize;
pub mod pipeline;
pub mod setup;

pub use directives::{create_linked_directives, write_linked_directives};
pub use fetch::{FetchedPackage, Fetcher};
pub use materialize::{Materializer, PlannedAction};
pub use pipeline::{LinkPipeline, ModuleReport, ModuleRequest, RunOutcome, RunReport};
pub use setup::{SetupManager, SetupOptions, SetupOutcome};

use std::path::Path;

use ltd_error::{Result, TypeLinkError};
use ltd_project::OptionOverrides;

fn block_on_run(
    project_dir: &Path,
    request: &ModuleRequest,
    overrides: &OptionOverrides,
) -> Result<RunOutcome> {
    let rt = tokio::runtime::Runtime::new().map_err(|e| {
        TypeLinkError::IoError(format!("Failed to create async runtime: {e}"))
    })?;

    rt.block_on(pipeline::run(project_dir, request, overrides))
}

fn request_for(module: Option<&str>) -> ModuleRequest {
    module.map_or(ModuleRequest::All, |name| ModuleRequest::Link(name.to_string()))
}

/// Links every configured module, or just `module`.
pub fn link(
    project_dir: &Path,
    module: Option<&str>,
    overrides: &OptionOverrides,
) -> Result<RunOutcome> {
    block_on_run(project_dir, &request_for(module), overrides)
}

/// Removes the placed files of every configured module, or just `module`.
pub fn unlink(
    project_dir: &Path,
    module: Option<&str>,
    overrides: &OptionOverrides,
) -> Result<RunOutcome> {
    let overrides = OptionOverrides {
        unlink: Some(true),
        ..overrides.clone()
    };
    block_on_run(project_dir, &request_for(module), &overrides)
}

/// Fetches `spec` (`name[@version|@url]`) from the registry or its URL.
/// Without a spec this is a full run, the same as [`link`].
pub fn install(
    project_dir: &Path,
    spec: Option<&str>,
    overrides: &OptionOverrides,
) -> Result<RunOutcome> {
    let request = spec.map_or(ModuleRequest::All, |spec| ModuleRequest::Install(spec.to_string()));
    block_on_run(project_dir, &request, overrides)
}

pub fn setup(project_dir: &Path, options: &SetupOptions) -> Result<SetupOutcome> {
    SetupManager.setup(project_dir, options)
}
