pub mod commands;
pub mod handlers;

use clap::Parser;

use commands::{Cli, Commands};
use handlers::{HelpHandler, LinkHandler, SetupHandler};
use ltd_core::SetupOptions;
use ltd_project::OptionOverrides;

/// Parses the command line and runs it. Returns the process exit code.
#[must_use]
pub fn run_cli() -> i32 {
    let cli = Cli::parse();
    ltd_logger::init_logger(false);

    let result = match cli.command {
        None => {
            HelpHandler::show_overview();
            Ok(())
        }
        Some(Commands::Install { package, args }) => {
            LinkHandler::handle_install(package.as_deref(), &args.overrides())
        }
        Some(Commands::Link {
            module,
            symlink,
            args,
        }) => {
            let overrides = OptionOverrides {
                copy: symlink.then_some(false),
                ..args.overrides()
            };
            LinkHandler::handle_link(module.as_deref(), &overrides)
        }
        Some(Commands::Unlink { module, args }) => {
            LinkHandler::handle_unlink(module.as_deref(), &args.overrides())
        }
        Some(Commands::Setup {
            location,
            no_install,
            dry_run,
            verbose,
        }) => SetupHandler::handle_setup(&SetupOptions {
            types_location: location,
            install: !no_install,
            dry_run,
            verbose,
        }),
        Some(Commands::Help { command }) => HelpHandler::handle_help(command.as_deref()),
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            ltd_logger::error(&e.to_string());
            1
        }
    }
}
