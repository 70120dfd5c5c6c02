//! # ugcpak Library
//!
//! Packages game plugins as distributable UGC mods.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Foundation types, errors and build targets
//! - [`logger`] - Structured logging with progress tracking
//! - [`display`] - User-facing status output
//! - [`ugc`] - The packaging pipeline: request, config patch, stages, relocation, finalization
//! - [`application`] - CLI interface, configuration and command handlers
//!
//! ## Quick Start
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! ugcpak_lib::main().await
//! # }
//! ```

pub mod application;
pub mod display;
pub mod logger;
pub mod primitives;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
pub mod ugc;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, Commands, execute_command, execute_command_with_session};
pub use logger::Logger;
pub use primitives::{ConfigError, LogFormat, LogLevel, LogOutput, LoggerError, TargetPlatform};
pub use ugc::{BuildPipeline, PakError, PakErrorKind, PakOutcome};

// Private imports for the main function
use anyhow::Result;
use application::CliConfig;

pub async fn main() -> Result<()> {
    // Load CLI configuration
    let config = CliConfig::load()?;

    // Execute the command
    execute_command(config).await
}
