//! Operator-facing status lines.
//!
//! Diagnostics go through `log`; these helpers are for the messages the
//! operator is meant to read while the build runs.

use std::io::IsTerminal;
use std::sync::OnceLock;

// ANSI color codes
const RED: &str = "\x1b[0;31m";
const GREEN: &str = "\x1b[0;32m";
const YELLOW: &str = "\x1b[1;33m";
const BLUE: &str = "\x1b[0;34m";
const CYAN: &str = "\x1b[0;36m";
const RESET: &str = "\x1b[0m";

/// Kind of status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Progress information.
    Info,
    /// A step completed.
    Success,
    /// Something unexpected but not fatal.
    Warning,
    /// A failure.
    Error,
    /// Configuration details.
    Config,
}

impl Level {
    fn glyph(&self) -> &'static str {
        match self {
            Level::Info => "ℹ️ ",
            Level::Success => "✅",
            Level::Warning => "⚠️ ",
            Level::Error => "❌",
            Level::Config => "⚙️ ",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            Level::Info => BLUE,
            Level::Success => GREEN,
            Level::Warning => YELLOW,
            Level::Error => RED,
            Level::Config => CYAN,
        }
    }
}

fn colors_enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| {
        std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
    })
}

/// Formats a status line, colored when `color` is set.
pub fn paint(level: Level, message: &str, color: bool) -> String {
    let line = format!("{} {}", level.glyph(), message);
    if color {
        format!("{}{}{}", level.color(), line, RESET)
    } else {
        line
    }
}

/// Formats a status line for the current terminal.
pub fn format(level: Level, message: &str) -> String {
    paint(level, message, colors_enabled())
}

/// Prints an informational line.
pub fn info(message: impl AsRef<str>) {
    println!("{}", format(Level::Info, message.as_ref()));
}

/// Prints a success line.
pub fn success(message: impl AsRef<str>) {
    println!("{}", format(Level::Success, message.as_ref()));
}

/// Prints a warning line.
pub fn warning(message: impl AsRef<str>) {
    println!("{}", format(Level::Warning, message.as_ref()));
}

/// Prints an error line to stderr.
pub fn error(message: impl AsRef<str>) {
    eprintln!("{}", format(Level::Error, message.as_ref()));
}

/// Prints a configuration line.
pub fn config(message: impl AsRef<str>) {
    println!("{}", format(Level::Config, message.as_ref()));
}

/// Horizontal rule under section titles.
pub fn rule() -> String {
    "=".repeat(44)
}
