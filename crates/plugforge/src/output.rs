// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal rendering for command results.
//!
//! Colored symbols when stdout is a terminal, bracketed tags otherwise.

use std::io::IsTerminal;

use colored::Colorize;

/// Severity of one printed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Warn,
    Fail,
}

/// Line printer shared by every subcommand.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    use_color: bool,
}

impl Printer {
    pub fn new(plain: bool) -> Self {
        Self {
            use_color: !plain && std::io::stdout().is_terminal(),
        }
    }

    pub fn header(&self, title: &str) {
        println!();
        println!("  plugforge {title}");
        println!("  {}", "-".repeat(50));
    }

    pub fn line(&self, status: Status, name: &str, message: &str) {
        println!("{}", self.format_line(status, name, message));
    }

    pub fn format_line(&self, status: Status, name: &str, message: &str) -> String {
        if self.use_color {
            let (symbol, message) = match status {
                Status::Ok => ("✓".green().to_string(), message.normal().to_string()),
                Status::Warn => ("!".yellow().to_string(), message.yellow().to_string()),
                Status::Fail => ("✗".red().to_string(), message.red().to_string()),
            };
            format!("    {symbol} {name:<20} {message}")
        } else {
            let tag = match status {
                Status::Ok => "[OK]  ",
                Status::Warn => "[WARN]",
                Status::Fail => "[FAIL]",
            };
            format!("    {tag} {name:<20} {message}")
        }
    }

    /// Closing summary: issue count, or `all_clear` when there are none.
    pub fn summary(&self, issues: usize, all_clear: &str) {
        println!();
        if issues > 0 {
            let issue_word = if issues == 1 { "issue" } else { "issues" };
            println!("  {issues} {issue_word} found.");
        } else {
            println!("  {all_clear}");
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_use_bracketed_tags() {
        let printer = Printer { use_color: false };
        assert_eq!(
            printer.format_line(Status::Ok, "state/zustand", "generated"),
            "    [OK]   state/zustand        generated"
        );
        assert_eq!(
            printer.format_line(Status::Fail, "x", "boom"),
            format!("    [FAIL] {:<20} boom", "x")
        );
    }

    #[test]
    fn plain_flag_disables_color() {
        assert!(!Printer::new(true).use_color);
    }
}
