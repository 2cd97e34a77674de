//! Warnings and errors go to stderr. A status line is replaced by the next
//! line printed.

use crossterm::{ExecutableCommand, cursor, terminal};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::{Mutex, OnceLock};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
    Debug,
    Shell,
}

impl LogLevel {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Info => "ℹ",
            Self::Success => "✓",
            Self::Warning => "⚠",
            Self::Error => "✗",
            Self::Debug => "•",
            Self::Shell => "$",
        }
    }

    const fn to_stderr(self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }

    fn render(self, message: &str) -> String {
        let symbol = self.symbol();
        match self {
            Self::Info => format!("{} {}", symbol.bright_cyan().bold(), message.white()),
            Self::Success => format!(
                "{} {}",
                symbol.bright_green().bold(),
                message.bright_green()
            ),
            Self::Warning => format!(
                "{} {}",
                symbol.bright_yellow().bold(),
                message.bright_yellow()
            ),
            Self::Error => format!("{} {}", symbol.bright_red().bold(), message.bright_red()),
            Self::Debug => format!(
                "{} {}",
                symbol.bright_black().bold(),
                message.bright_black()
            ),
            Self::Shell => format!(
                "{} {}",
                symbol.bright_blue().bold(),
                message.bright_black()
            ),
        }
    }
}

/// `850ms` below one second, `1.25s` above.
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    if elapsed < Duration::from_secs(1) {
        format!("{}ms", elapsed.as_millis())
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    }
}

pub struct Logger {
    started: Instant,
    quiet: bool,
    status_drawn: Mutex<bool>,
}

impl Logger {
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            started: Instant::now(),
            quiet,
            status_drawn: Mutex::new(false),
        }
    }

    fn take_status_line(&self) {
        let Ok(mut drawn) = self.status_drawn.lock() else {
            return;
        };
        if *drawn {
            let mut stdout = io::stdout();
            let _ = stdout.execute(cursor::MoveToColumn(0));
            let _ = stdout.execute(terminal::Clear(terminal::ClearType::CurrentLine));
            let _ = stdout.flush();
            *drawn = false;
        }
    }

    /// Errors are printed even when quiet.
    pub fn log(&self, level: LogLevel, message: &str) {
        if self.quiet && level != LogLevel::Error {
            return;
        }

        self.take_status_line();
        let line = level.render(message);
        if level.to_stderr() {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    pub fn status(&self, message: &str) {
        if self.quiet {
            return;
        }

        self.take_status_line();
        print!("{} {}", "◦".bright_cyan(), message.bright_white());
        let _ = io::stdout().flush();
        if let Ok(mut drawn) = self.status_drawn.lock() {
            *drawn = true;
        }
    }

    pub fn finish(&self, message: &str) {
        if self.quiet {
            return;
        }

        self.take_status_line();
        println!(
            "{} {} {}",
            LogLevel::Success.symbol().bright_green().bold(),
            message.bright_green(),
            format!("[{}]", format_elapsed(self.started.elapsed())).bright_black()
        );
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Installs the process logger. Only the first call takes effect.
pub fn init_logger(quiet: bool) {
    let _ = LOGGER.set(Logger::new(quiet));
}

// Library callers and tests may log before the CLI has configured anything.
fn get_logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger::new(false))
}

pub fn status(message: &str) {
    get_logger().status(message);
}

pub fn info(message: &str) {
    get_logger().log(LogLevel::Info, message);
}

pub fn success(message: &str) {
    get_logger().log(LogLevel::Success, message);
}

pub fn warn(message: &str) {
    get_logger().log(LogLevel::Warning, message);
}

pub fn error(message: &str) {
    get_logger().log(LogLevel::Error, message);
}

pub fn debug(message: &str, debug_enabled: bool) {
    if debug_enabled {
        get_logger().log(LogLevel::Debug, message);
    }
}

pub fn shell(command: &str) {
    get_logger().log(LogLevel::Shell, command);
}

pub fn finish(message: &str) {
    get_logger().finish(message);
}
