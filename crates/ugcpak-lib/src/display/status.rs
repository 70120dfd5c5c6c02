//! Status display for user feedback
//!
//! Semantic status updates that replace raw println! usage. Styling goes
//! through `console`, which honours the process-wide color setting.

use console::style;
use std::io::{self, Write};

/// Status display writer for semantic user feedback
#[derive(Debug, Default, Clone, Copy)]
pub struct StatusDisplay;

impl StatusDisplay {
    pub fn new() -> Self {
        Self
    }

    /// Display a working/checking status
    ///
    /// Output: `⠋ Checking tool dependencies...`
    pub fn checking(&self, task: &str) {
        println!("{} Checking {}...", style("⠋").cyan(), task);
        io::stdout().flush().unwrap_or(());
    }

    /// Display a success status with optional details
    ///
    /// Output: `✓ RunUAT: found`
    pub fn success(&self, item: &str, details: &str) {
        println!("{} {}", style("✓").green(), join_details(item, details));
    }

    /// Display an error status with details
    ///
    /// Output: `✗ RunUAT: not found`
    pub fn error(&self, item: &str, details: &str) {
        println!("{} {}", style("✗").red(), join_details(item, details));
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("!").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("·").blue(), message);
    }

    pub fn message(&self, text: &str) {
        println!("{}", text);
    }

    pub fn emphasis(&self, text: &str) {
        println!("{}", style(text).bold());
    }

    pub fn subtle(&self, text: &str) {
        println!("{}", style(text).dim());
    }

    pub fn complete(&self, task: &str) {
        println!("{} {}", style("✓").green(), task);
    }

    /// Display a header for a section of work
    pub fn section(&self, title: &str) {
        println!();
        println!("{}", style(title).bold());
    }

    /// Display a step in a multi-step process
    ///
    /// Output: `[1/5] Cook`
    pub fn step(&self, current: usize, total: usize, description: &str) {
        let prefix = format!("[{}/{}]", current, total);
        println!("{} {}", style(prefix).dim(), description);
    }
}

fn join_details(item: &str, details: &str) -> String {
    if details.is_empty() {
        item.to_string()
    } else {
        format!("{}: {}", item, details)
    }
}
