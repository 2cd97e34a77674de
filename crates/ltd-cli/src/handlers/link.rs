use anyhow::Result;
use owo_colors::OwoColorize;
use std::path::Path;

use ltd_constants::BIN_NAME;
use ltd_core::{RunOutcome, RunReport};
use ltd_project::OptionOverrides;

pub struct LinkHandler;

impl LinkHandler {
    pub fn handle_link(module: Option<&str>, overrides: &OptionOverrides) -> Result<()> {
        Self::print_header("link", module);
        let outcome = ltd_core::link(Path::new("."), module, overrides)?;
        Self::report(&outcome, "linked", overrides);
        Ok(())
    }

    pub fn handle_unlink(module: Option<&str>, overrides: &OptionOverrides) -> Result<()> {
        Self::print_header("unlink", module);
        let outcome = ltd_core::unlink(Path::new("."), module, overrides)?;
        Self::report(&outcome, "unlinked", overrides);
        Ok(())
    }

    pub fn handle_install(package: Option<&str>, overrides: &OptionOverrides) -> Result<()> {
        Self::print_header("install", package);
        let outcome = ltd_core::install(Path::new("."), package, overrides)?;
        Self::report(&outcome, "installed", overrides);
        Ok(())
    }

    fn report(outcome: &RunOutcome, verb: &str, overrides: &OptionOverrides) {
        let RunOutcome::Completed(report) = outcome else {
            return;
        };

        if overrides.dry_run == Some(true) {
            ltd_logger::finish(&format!("dry run: {}", Self::summary(report, verb)));
        } else {
            ltd_logger::finish(&Self::summary(report, verb));
        }
    }

    fn summary(report: &RunReport, verb: &str) -> String {
        let count = report.modules.len();
        let noun = if count == 1 { "module" } else { "modules" };
        if report.skipped.is_empty() {
            format!("{verb} {count} {noun}")
        } else {
            format!("{verb} {count} {noun}, {} skipped", report.skipped.len())
        }
    }

    fn print_header(command: &str, target: Option<&str>) {
        println!(
            "{} {} {}",
            BIN_NAME.bright_cyan().bold(),
            command.bright_white(),
            target.unwrap_or_default().bright_white()
        );
        println!();
    }
}
