//! ugcpak primitives - core types, errors, and coordination
//!
//! Central collection of shared types that form the foundation of ugcpak.
//! Everything here works together: color choice informs logging, config
//! drives behavior, errors chain properly.

use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// Shared macros and patterns
mod shared;
use shared::impl_fromstr_for_value_enum;

/// Available log output streams
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    /// STDERR
    Stderr,
    /// STDOUT
    Stdout,
}

/// Log levels for structured logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

/// Output formats for structured logging
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// TEXT
    /// alias: text, txt, plain
    Text,

    /// JSON
    /// alias: json
    Json,

    /// YAML
    /// alias: yaml, yml
    Yaml,
}

/// Color output intent, resolved against the environment before use
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Let the terminal decide
    /// alias: auto, automatic, detect, default
    Auto,

    /// Explicitly enable (useful in non-interactive)
    /// alias: always, force, on
    Always,

    /// Explicitly disable
    /// alias: never, off
    Never,
}

// ============================================================================
// LOGGER CONFIGURATION TYPES
// ============================================================================

/// Logger configuration derived from the application config
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,
    pub ansi: bool,
}

/// Progress-aware logging context for operations that need progress tracking
#[derive(Debug, Clone)]
pub struct LogContext {
    pub operation: String,
    pub total_items: Option<u64>,
    pub current_item: Option<u64>,
}

impl LogContext {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            total_items: None,
            current_item: None,
        }
    }

    pub fn with_progress(operation: &str, total: u64) -> Self {
        Self {
            operation: operation.to_string(),
            total_items: Some(total),
            current_item: None,
        }
    }

    pub fn set_progress(&mut self, current: u64) {
        self.current_item = Some(current);
    }
}

// ============================================================================
// BUILD TARGET TYPES
// ============================================================================

/// Platforms a UGC package can be built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetPlatform {
    Windows,
    Android,
    Linux,
}

/// Which side of the game the content is cooked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetDescriptor {
    Client,
    Server,
}

impl TargetPlatform {
    pub const ALL: [TargetPlatform; 3] = [Self::Windows, Self::Android, Self::Linux];

    /// Name as accepted on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::Android => "Android",
            Self::Linux => "Linux",
        }
    }

    /// Platform identifier understood by the automation tool
    pub fn automation_name(&self) -> &'static str {
        match self {
            Self::Windows => "Win64",
            Self::Android => "Android",
            Self::Linux => "Linux",
        }
    }

    /// Directory name the staging step writes this platform's output under.
    ///
    /// Linux content is only ever cooked for the dedicated server, and the
    /// staged tree uses the server build name even though cook and package
    /// are invoked with plain `Linux`.
    pub fn staged_name(&self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::Android => "Android",
            Self::Linux => "LinuxServer",
        }
    }

    pub fn descriptor(&self) -> TargetDescriptor {
        match self {
            Self::Windows | Self::Android => TargetDescriptor::Client,
            Self::Linux => TargetDescriptor::Server,
        }
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TargetPlatform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|platform| platform.name() == s)
            .ok_or_else(|| format!("Invalid target platform: {}", s))
    }
}

// ============================================================================
// STRUCTURED ERROR TYPES
// ============================================================================

/// Application configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load environment file '{file}': {source}")]
    EnvFileError {
        file: String,
        source: dotenvy::Error,
    },

    #[error("Invalid working directory: {path}")]
    InvalidWorkDir { path: String },

    #[error("Failed to parse environment variables: {source}")]
    EnvironmentParsingFailed {
        #[from]
        source: envy::Error,
    },

    #[error("Configuration validation failed: {reason}")]
    ValidationFailed { reason: String },

    #[error("Failed to parse '{value}': {reason}")]
    ParseError { value: String, reason: String },

    #[error("Failed to resolve current directory: {source}")]
    CurrentDirError { source: std::io::Error },
}

/// Logger initialization errors
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Failed to initialize tracing subscriber: {reason}")]
    InitializationFailed { reason: String },

    #[error("Logger already initialized")]
    AlreadyInitialized,
}

impl LogLevel {
    /// Convert verbosity level from AppConfig to LogLevel
    pub fn from_verbosity(verbosity: u8) -> Self {
        match verbosity {
            0 => LogLevel::Error,
            1 => LogLevel::Warning,
            2 => LogLevel::Info,
            3 => LogLevel::Debug,
            4.. => LogLevel::Trace,
        }
    }

    /// Directive string for tracing's EnvFilter
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warning => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Check if this log level should be displayed given current verbosity
    pub fn should_log(&self, current_level: LogLevel) -> bool {
        *self <= current_level
    }
}

impl ValueEnum for LogLevel {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Self::Error,
            Self::Warning,
            Self::Info,
            Self::Debug,
            Self::Trace,
        ]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Self::Error => Some(
                clap::builder::PossibleValue::new("error")
                    .alias("err")
                    .alias("fatal")
                    .alias("critical"),
            ),
            Self::Warning => Some(clap::builder::PossibleValue::new("warn").alias("warning")),
            Self::Info => Some(clap::builder::PossibleValue::new("info").alias("information")),
            Self::Debug => Some(clap::builder::PossibleValue::new("debug").alias("debugging")),
            Self::Trace => Some(
                clap::builder::PossibleValue::new("trace")
                    .alias("tracing")
                    .alias("verbose"),
            ),
        }
    }
}

impl ValueEnum for LogFormat {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Text, Self::Json, Self::Yaml]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Self::Text => Some(
                clap::builder::PossibleValue::new("text")
                    .alias("txt")
                    .alias("plain"),
            ),
            Self::Json => Some(clap::builder::PossibleValue::new("json")),
            Self::Yaml => Some(clap::builder::PossibleValue::new("yaml").alias("yml")),
        }
    }
}

impl ValueEnum for ColorChoice {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Auto, Self::Always, Self::Never]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Self::Auto => Some(
                clap::builder::PossibleValue::new("auto")
                    .alias("automatic")
                    .alias("detect")
                    .alias("default"),
            ),
            Self::Always => Some(
                clap::builder::PossibleValue::new("always")
                    .alias("force")
                    .alias("on"),
            ),
            Self::Never => Some(clap::builder::PossibleValue::new("never").alias("off")),
        }
    }
}

// Generate FromStr implementations for all ValueEnum types
impl_fromstr_for_value_enum!(LogLevel, "invalid log level");
impl_fromstr_for_value_enum!(LogFormat, "invalid log format");
impl_fromstr_for_value_enum!(LogOutput, "invalid log output stream");
impl_fromstr_for_value_enum!(ColorChoice, "invalid color choice");

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
