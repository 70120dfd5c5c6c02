//! Display provider traits for dependency injection
//!
//! Abstracts all user communication behind testable traits, so command
//! handlers can be exercised without writing to the terminal.

/// Provider trait for all user-facing communication
pub trait DisplayProvider {
    /// Display status messages with semantic meaning
    fn status(&self) -> Box<dyn StatusProvider + '_>;
}

/// Provider trait for status updates and user feedback
pub trait StatusProvider {
    /// Display a working/checking status
    fn checking(&self, task: &str);

    /// Display a success status with optional details
    fn success(&self, item: &str, details: &str);

    /// Display an error status with details
    fn error(&self, item: &str, details: &str);

    /// Display a warning
    fn warning(&self, message: &str);

    /// Display an info status
    fn info(&self, message: &str);

    /// Display a simple message without status symbols
    fn message(&self, text: &str);

    /// Display an emphasized message
    fn emphasis(&self, text: &str);

    /// Display a subtle/secondary message
    fn subtle(&self, text: &str);

    /// Display a completion message
    fn complete(&self, task: &str);

    /// Check and report tool availability
    fn tool_check(&self, tool: &str, available: bool, details: &str);

    /// Display a header for a section of work
    fn section(&self, title: &str);

    /// Display a step in a multi-step process
    fn step(&self, current: usize, total: usize, description: &str);
}
