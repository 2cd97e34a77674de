use anyhow::Result;
use clap::CommandFactory;
use owo_colors::OwoColorize;

use crate::commands::Cli;
use ltd_constants::{BIN_NAME, COMMANDS, DESCRIPTION, EXAMPLES, VERSION};

const RUN_FLAGS: &[(&str, &str)] = &[
    ("-d, --dry-run", "Print planned actions without touching the disk"),
    ("-v, --verbose", "Print merged options and every file action"),
    ("-S, --save", "Record or drop the module in package.json"),
    ("--symlink", "Symlink installed modules instead of copying (link)"),
    ("-V, --version", "Print version"),
];

pub struct HelpHandler;

impl HelpHandler {
    pub fn handle_help(command: Option<&str>) -> Result<()> {
        match command {
            Some(name) => Self::show_command_help(name),
            None => {
                Self::show_overview();
                Ok(())
            }
        }
    }

    fn show_command_help(name: &str) -> Result<()> {
        let mut cli = Cli::command();

        if let Some(subcommand) = cli.find_subcommand_mut(name) {
            subcommand.print_help()?;
        } else {
            println!(
                "{}: Unknown command '{}'",
                "Error".bright_red().bold(),
                name
            );
            println!();
            Self::show_overview();
        }

        println!();
        Ok(())
    }

    pub fn show_overview() {
        println!("{}", DESCRIPTION.bright_white().bold());
        println!(
            "{} {}",
            "Version:".bright_white().bold(),
            VERSION.bright_black().bold()
        );
        println!();

        Self::section("Usage:");
        println!(
            "  {} {} {}",
            BIN_NAME.bright_cyan().bold(),
            "<COMMAND>".bright_white(),
            "[MODULE] [OPTIONS]".bright_black().bold()
        );
        println!();

        Self::section("Commands:");
        let commands: Vec<(String, String)> = COMMANDS
            .iter()
            .map(|(name, description, aliases)| {
                let label = if aliases.is_empty() {
                    (*name).to_string()
                } else {
                    format!("{name} [{}]", aliases.join(", "))
                };
                (label, (*description).to_string())
            })
            .collect();
        Self::print_rows(&commands, |label| match label.split_once(' ') {
            Some((name, aliases)) => format!(
                "{} {}",
                name.bright_cyan().bold(),
                aliases.bright_black().bold()
            ),
            None => label.bright_cyan().bold().to_string(),
        });
        println!();

        Self::section("Options:");
        let flags: Vec<(String, String)> = RUN_FLAGS
            .iter()
            .map(|(flag, description)| ((*flag).to_string(), (*description).to_string()))
            .collect();
        Self::print_rows(&flags, |flag| flag.bright_cyan().bold().to_string());
        println!();

        Self::section("Examples:");
        let mut examples: Vec<(String, String)> = EXAMPLES
            .iter()
            .map(|(example, description)| ((*example).to_string(), (*description).to_string()))
            .collect();
        examples.push((
            format!("{BIN_NAME} help <command>"),
            "Show help for a specific command".to_string(),
        ));
        Self::print_rows(&examples, Self::colorize_example);
        println!();
    }

    fn section(title: &str) {
        println!("{}", title.bright_magenta().bold());
    }

    /// Two aligned columns; padding is computed on the uncolored label.
    fn print_rows(rows: &[(String, String)], colorize: impl Fn(&str) -> String) {
        let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

        for (label, description) in rows {
            let padding = " ".repeat(width.saturating_sub(label.len()));
            println!(
                "  {}{padding}  # {}",
                colorize(label),
                description.bright_black().bold()
            );
        }
    }

    /// Binary name cyan, flags dim, everything else white.
    fn colorize_example(example: &str) -> String {
        example
            .split_whitespace()
            .enumerate()
            .map(|(position, part)| {
                if position == 0 {
                    part.bright_cyan().bold().to_string()
                } else if part.starts_with('-') {
                    part.bright_black().bold().to_string()
                } else {
                    part.bright_white().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
