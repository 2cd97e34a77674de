use std::path::Path;
use std::process::{Command, Stdio};

use ltd_constants::PACKAGE_MANAGERS;
use ltd_logger;

const DEFAULT_PACKAGE_MANAGER: &str = "npm";

fn is_on_path(program: &str) -> bool {
    let locator = if cfg!(target_os = "windows") {
        "where"
    } else {
        "which"
    };

    Command::new(locator)
        .arg(program)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|status| status.success())
}

/// First of `candidates` found on PATH, in preference order, else `npm`.
#[must_use]
pub fn detect_package_manager(candidates: &[&str]) -> String {
    candidates
        .iter()
        .find(|candidate| is_on_path(candidate))
        .map_or_else(|| DEFAULT_PACKAGE_MANAGER.to_string(), |found| (*found).to_string())
}

pub fn run_install(project_dir: &Path, tool: &str) -> anyhow::Result<()> {
    ltd_logger::shell(&format!("{tool} install"));

    let status = if cfg!(target_os = "windows") {
        Command::new("cmd")
            .args(["/C", tool, "install"])
            .current_dir(project_dir)
            .status()?
    } else {
        Command::new(tool)
            .arg("install")
            .current_dir(project_dir)
            .status()?
    };

    if status.success() {
        ltd_logger::success(&format!("{tool} install finished"));
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "{} install failed with exit code: {}",
            tool,
            status.code().unwrap_or(-1)
        ))
    }
}

/// Detects the preferred package manager and runs its install.
pub fn install_dependencies(project_dir: &Path) -> anyhow::Result<()> {
    let tool = detect_package_manager(PACKAGE_MANAGERS);
    run_install(project_dir, &tool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_npm() {
        assert_eq!(
            detect_package_manager(&["definitely-not-a-package-manager-xyz"]),
            "npm"
        );
        assert_eq!(detect_package_manager(&[]), "npm");
    }

    #[cfg(unix)]
    #[test]
    fn test_prefers_first_available() {
        assert_eq!(
            detect_package_manager(&["definitely-not-a-package-manager-xyz", "sh"]),
            "sh"
        );
    }
}
