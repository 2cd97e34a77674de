pub mod config;
pub mod dependency_manager;
pub mod io;
pub mod package_json;
pub mod setup;

pub use config::{OptionOverrides, Options, ProjectPaths, StoredOptions};
pub use dependency_manager::DependencyManager;
pub use io::{manifest_exists, read_package_json, write_package_json};
pub use package_json::{ModuleDescriptor, PackageJson};
pub use setup::{SetupWiring, is_already_configured};
