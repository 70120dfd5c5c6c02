//! Configuration loading
//!
//! Coordinates loading configuration from .env files, the environment and
//! the command line, in that order of increasing precedence.

use crate::primitives::ConfigError;
use std::io;

use super::{config::AppConfig, env::EnvironmentConfig};

/// Files consulted for environment defaults, first match per variable wins
pub const ENV_FILES: [&str; 2] = [".env.local", ".env"];

impl AppConfig {
    /// Load `.env.local` and `.env` into the process environment.
    ///
    /// Must run before the CLI is parsed so clap's `env` fallbacks see them.
    /// Missing files are not an error.
    pub fn load_env_files() -> Result<(), ConfigError> {
        for env_file in ENV_FILES {
            match dotenvy::from_filename(env_file) {
                Ok(_) => tracing::debug!(file = env_file, "Loaded environment file"),
                Err(dotenvy::Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(ConfigError::EnvFileError {
                        file: env_file.to_string(),
                        source: e,
                    });
                }
            }
        }
        Ok(())
    }

    /// Apply standard environment conventions and validate
    pub fn resolve(mut self) -> Result<Self, ConfigError> {
        let env_config = EnvironmentConfig::load()?;
        self.color = env_config.apply_color_config(self.color);
        self.validate()?;
        Ok(self)
    }
}
