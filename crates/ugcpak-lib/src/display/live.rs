//! Live display provider writing to the terminal

use super::providers::{DisplayProvider, StatusProvider};
use super::status::StatusDisplay;

/// Production display provider
#[derive(Debug, Default)]
pub struct LiveDisplayProvider {
    status: StatusDisplay,
}

impl LiveDisplayProvider {
    pub fn new() -> Self {
        Self {
            status: StatusDisplay::new(),
        }
    }
}

impl DisplayProvider for LiveDisplayProvider {
    fn status(&self) -> Box<dyn StatusProvider + '_> {
        Box::new(LiveStatusProvider {
            display: &self.status,
        })
    }
}

struct LiveStatusProvider<'a> {
    display: &'a StatusDisplay,
}

impl StatusProvider for LiveStatusProvider<'_> {
    fn checking(&self, task: &str) {
        self.display.checking(task);
    }

    fn success(&self, item: &str, details: &str) {
        self.display.success(item, details);
    }

    fn error(&self, item: &str, details: &str) {
        self.display.error(item, details);
    }

    fn warning(&self, message: &str) {
        self.display.warning(message);
    }

    fn info(&self, message: &str) {
        self.display.info(message);
    }

    fn message(&self, text: &str) {
        self.display.message(text);
    }

    fn emphasis(&self, text: &str) {
        self.display.emphasis(text);
    }

    fn subtle(&self, text: &str) {
        self.display.subtle(text);
    }

    fn complete(&self, task: &str) {
        self.display.complete(task);
    }

    fn tool_check(&self, tool: &str, available: bool, details: &str) {
        if available {
            self.display.success(tool, details);
        } else {
            self.display.error(tool, details);
        }
    }

    fn section(&self, title: &str) {
        self.display.section(title);
    }

    fn step(&self, current: usize, total: usize, description: &str) {
        self.display.step(current, total, description);
    }
}
