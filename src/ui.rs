//! Console styling shared by the runner and the CLI

use colored::{ColoredString, Colorize};

pub fn debug_tag() -> ColoredString {
    "[DEBUG]".dimmed()
}

pub fn run_tag() -> ColoredString {
    "[RUN]".cyan()
}

/// Tag printed when a scope opens, e.g. `[BUILD]`
pub fn command_tag(command: &str) -> ColoredString {
    format!("[{}]", command.to_uppercase()).bold()
}

pub fn succeeded() -> ColoredString {
    "ok".green()
}

pub fn failed() -> ColoredString {
    "failed".red().bold()
}

pub fn heading(text: &str) -> ColoredString {
    text.bold()
}
