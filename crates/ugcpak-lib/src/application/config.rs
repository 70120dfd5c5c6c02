//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> .env -> env vars -> CLI args.

use crate::primitives::*;
use crate::ugc::EnvironmentPaths;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

/// Default configuration values
pub mod defaults {
    pub const LOG_LEVEL: &str = "2"; // Info: stage progress is the main output
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const COLOR: &str = "auto";
}

/// Default value functions for configuration fields
mod default_fns {
    use crate::primitives::{ColorChoice, LogFormat, LogOutput};

    pub fn log_level() -> u8 {
        2
    }

    pub fn log_format() -> LogFormat {
        LogFormat::Text
    }

    pub fn log_output() -> LogOutput {
        LogOutput::Stderr
    }

    pub fn color() -> ColorChoice {
        ColorChoice::Auto
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Working directory that relative paths are resolved against
    #[arg(short, long, env = "UGCPAK_WORKDIR")]
    #[serde(default)]
    pub workdir: Option<PathBuf>,

    /// Local root containing Engine/ and the default project
    #[arg(long, env = "UGCPAK_ENGINE_ROOT")]
    #[serde(default)]
    pub engine_root: Option<PathBuf>,

    /// Automation tool launcher (defaults to Engine/Build/BatchFiles/RunUAT)
    #[arg(long, env = "UGCPAK_UAT")]
    #[serde(default)]
    pub uat: Option<PathBuf>,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, env = "UGCPAK_LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Output format (text, json, yaml)
    #[arg(long, env = "UGCPAK_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, env = "UGCPAK_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(short, long, env = "UGCPAK_COLOR", default_value = defaults::COLOR)]
    #[serde(default = "default_fns::color")]
    pub color: ColorChoice,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workdir: None,
            engine_root: None,
            uat: None,
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::color(),
        }
    }
}

impl AppConfig {
    /// Whether styled output should carry ANSI colors
    pub fn colors_enabled(&self) -> bool {
        match self.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => console::colors_enabled(),
        }
    }

    /// Create LoggerConfig from AppConfig
    pub fn to_logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            ansi: self.colors_enabled(),
        }
    }

    /// Resolve the explicit path context handed to the packaging pipeline.
    ///
    /// Falls back to the current directory when no workdir was configured.
    pub fn environment_paths(&self) -> Result<EnvironmentPaths, ConfigError> {
        let workdir = match &self.workdir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().map_err(|e| ConfigError::CurrentDirError { source: e })?,
        };

        let local_root = match &self.engine_root {
            Some(root) if root.is_absolute() => root.clone(),
            Some(root) => workdir.join(root),
            None => workdir.clone(),
        };

        let automation_tool = match &self.uat {
            Some(uat) if uat.is_absolute() => uat.clone(),
            Some(uat) => workdir.join(uat),
            None => EnvironmentPaths::default_automation_tool(&local_root),
        };

        Ok(EnvironmentPaths {
            workdir,
            local_root,
            automation_tool,
        })
    }

    /// Validate the final configuration
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.workdir.is_none() {
            self.workdir = Some(
                std::env::current_dir().map_err(|e| ConfigError::CurrentDirError { source: e })?,
            );
        }

        if let Some(workdir) = &self.workdir {
            if !workdir.is_dir() {
                return Err(ConfigError::InvalidWorkDir {
                    path: workdir.display().to_string(),
                });
            }
        }

        if self.log_level > 4 {
            return Err(ConfigError::ValidationFailed {
                reason: format!("log level {} is out of range 0..=4", self.log_level),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("config.test.rs");
}
