use clap::{Args, Parser, Subcommand};

use ltd_project::OptionOverrides;

#[derive(Parser)]
#[command(name = "link-type-definitions")]
#[command(version)]
#[command(propagate_version = true)]
#[command(about = "Links and installs TypeScript declaration packages", long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Flags shared by every command that runs the link pipeline.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Print the planned actions without touching the disk
    #[arg(short = 'd', long = "dry-run")]
    pub dry_run: bool,
    /// Print the merged options and every file action
    #[arg(short = 'v', long)]
    pub verbose: bool,
    /// Record the module in package.json (or drop it when unlinking)
    #[arg(short = 'S', long)]
    pub save: bool,
}

impl RunArgs {
    /// Only flags that were given override the stored options.
    #[must_use]
    pub fn overrides(&self) -> OptionOverrides {
        OptionOverrides {
            dry_run: self.dry_run.then_some(true),
            verbose: self.verbose.then_some(true),
            save: self.save.then_some(true),
            ..OptionOverrides::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetches typeDefinitions from the registry or a git remote
    #[command(alias = "i")]
    Install {
        /// Package to fetch (e.g. @types/node@12.11.1 or name@https://host/repo.git#branch)
        #[arg()]
        package: Option<String>,
        #[command(flatten)]
        args: RunArgs,
    },
    /// Links the type definitions listed in package.json
    #[command(alias = "ln")]
    Link {
        /// A single module to link
        #[arg()]
        module: Option<String>,
        /// Symlink installed modules instead of copying them
        #[arg(long)]
        symlink: bool,
        #[command(flatten)]
        args: RunArgs,
    },
    /// Removes linked type definitions
    Unlink {
        /// A single module to unlink
        #[arg()]
        module: Option<String>,
        #[command(flatten)]
        args: RunArgs,
    },
    /// Wires link-type-definitions into the project's install lifecycle
    Setup {
        /// Where linked types are placed, relative to the project root
        #[arg(short = 'l', long)]
        location: Option<String>,
        /// Skip running the package manager afterwards
        #[arg(long = "no-install")]
        no_install: bool,
        /// Print the changes without writing them
        #[arg(short = 'd', long = "dry-run")]
        dry_run: bool,
        #[arg(short = 'v', long)]
        verbose: bool,
    },
    /// Shows help information for link-type-definitions or a specific command
    Help {
        /// The command to show help for (optional)
        #[arg()]
        command: Option<String>,
    },
}
