use anyhow::Result;
use owo_colors::OwoColorize;
use std::path::Path;

use ltd_constants::BIN_NAME;
use ltd_core::{SetupOptions, SetupOutcome};

pub struct SetupHandler;

impl SetupHandler {
    pub fn handle_setup(options: &SetupOptions) -> Result<()> {
        println!(
            "{} {}",
            BIN_NAME.bright_cyan().bold(),
            "setup".bright_white()
        );
        println!();

        if ltd_core::setup(Path::new("."), options)? == SetupOutcome::Configured {
            if options.dry_run {
                ltd_logger::finish("dry run: project would be set up");
            } else {
                ltd_logger::finish("project set up");
            }
        }
        Ok(())
    }
}
