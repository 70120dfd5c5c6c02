//! Mock display provider implementation for testing
//!
//! Records all display calls for assertion in unit tests.

use super::providers::*;
use std::sync::{Arc, Mutex};

/// A recorded display call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayCall {
    StatusChecking { task: String },
    StatusSuccess { item: String, details: String },
    StatusError { item: String, details: String },
    StatusWarning { message: String },
    StatusInfo { message: String },
    StatusMessage { text: String },
    StatusEmphasis { text: String },
    StatusSubtle { text: String },
    StatusComplete { task: String },
    StatusToolCheck { tool: String, available: bool, details: String },
    StatusSection { title: String },
    StatusStep { current: usize, total: usize, description: String },
}

impl DisplayCall {
    /// Short name of the call kind, for counting
    pub fn call_type(&self) -> &'static str {
        match self {
            Self::StatusChecking { .. } => "checking",
            Self::StatusSuccess { .. } => "success",
            Self::StatusError { .. } => "error",
            Self::StatusWarning { .. } => "warning",
            Self::StatusInfo { .. } => "info",
            Self::StatusMessage { .. } => "message",
            Self::StatusEmphasis { .. } => "emphasis",
            Self::StatusSubtle { .. } => "subtle",
            Self::StatusComplete { .. } => "complete",
            Self::StatusToolCheck { .. } => "tool_check",
            Self::StatusSection { .. } => "section",
            Self::StatusStep { .. } => "step",
        }
    }
}

/// Mock implementation of DisplayProvider that records all calls
#[derive(Clone, Default)]
pub struct MockDisplayProvider {
    calls: Arc<Mutex<Vec<DisplayCall>>>,
}

impl MockDisplayProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded display calls for testing assertions
    pub fn get_calls(&self) -> Vec<DisplayCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Check if a specific call was made
    pub fn has_call(&self, expected: &DisplayCall) -> bool {
        self.get_calls().contains(expected)
    }

    /// Get count of calls of a specific type
    pub fn count_calls(&self, call_type: &str) -> usize {
        self.get_calls()
            .iter()
            .filter(|call| call.call_type() == call_type)
            .count()
    }
}

impl DisplayProvider for MockDisplayProvider {
    fn status(&self) -> Box<dyn StatusProvider + '_> {
        Box::new(MockStatusProvider {
            calls: self.calls.clone(),
        })
    }
}

struct MockStatusProvider {
    calls: Arc<Mutex<Vec<DisplayCall>>>,
}

impl MockStatusProvider {
    fn record(&self, call: DisplayCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl StatusProvider for MockStatusProvider {
    fn checking(&self, task: &str) {
        self.record(DisplayCall::StatusChecking {
            task: task.to_string(),
        });
    }

    fn success(&self, item: &str, details: &str) {
        self.record(DisplayCall::StatusSuccess {
            item: item.to_string(),
            details: details.to_string(),
        });
    }

    fn error(&self, item: &str, details: &str) {
        self.record(DisplayCall::StatusError {
            item: item.to_string(),
            details: details.to_string(),
        });
    }

    fn warning(&self, message: &str) {
        self.record(DisplayCall::StatusWarning {
            message: message.to_string(),
        });
    }

    fn info(&self, message: &str) {
        self.record(DisplayCall::StatusInfo {
            message: message.to_string(),
        });
    }

    fn message(&self, text: &str) {
        self.record(DisplayCall::StatusMessage {
            text: text.to_string(),
        });
    }

    fn emphasis(&self, text: &str) {
        self.record(DisplayCall::StatusEmphasis {
            text: text.to_string(),
        });
    }

    fn subtle(&self, text: &str) {
        self.record(DisplayCall::StatusSubtle {
            text: text.to_string(),
        });
    }

    fn complete(&self, task: &str) {
        self.record(DisplayCall::StatusComplete {
            task: task.to_string(),
        });
    }

    fn tool_check(&self, tool: &str, available: bool, details: &str) {
        self.record(DisplayCall::StatusToolCheck {
            tool: tool.to_string(),
            available,
            details: details.to_string(),
        });
    }

    fn section(&self, title: &str) {
        self.record(DisplayCall::StatusSection {
            title: title.to_string(),
        });
    }

    fn step(&self, current: usize, total: usize, description: &str) {
        self.record(DisplayCall::StatusStep {
            current,
            total,
            description: description.to_string(),
        });
    }
}
