use crate::primitives::ConfigError;
use clap::{Parser, Subcommand};

use super::config::AppConfig;

/// ugcpak CLI - UGC plugin packaging
#[derive(Debug, Clone, Parser)]
#[command(name = "ugcpak")]
#[command(about = "Cook, stage and package a game plugin as a distributable UGC mod")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// ugcpak commands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from CLI
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

impl CliConfig {
    /// Load configuration: .env files, then environment, then command line arguments
    pub fn load() -> Result<Self, ConfigError> {
        AppConfig::load_env_files()?;
        let cli = Cli::parse();
        Ok(Self {
            app_config: cli.config.resolve()?,
            command: cli.command,
        })
    }
}

/// Available ugcpak commands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Check that the automation tool and default project can be found
    Requirements,

    /// Show version information
    Version,

    /// Cook, stage, package and relocate a plugin into a UGC mod package
    #[command(after_help = "Parameters:\n  \
        -PluginPath=<file>             plugin descriptor (required)\n  \
        -Platform=Windows|Android|Linux target platform (required)\n  \
        -PlatformDir=<name>            output folder for deploy layout (required)\n  \
        -Project=<file>                project file [<root>/Pavlov/Pavlov.uproject]\n  \
        -Version=<string>              informational [NOVERSION]\n  \
        -BasedOnReleaseVersion=<name>  release baseline [PavlovMod_1.0.0]\n  \
        -CookDir=<dir>                 directory to cook [everything]\n  \
        -MapToCook=<map>               reserved\n  \
        -Stage=True                    stage layout <id>/Data, no archive\n  \
        -ModioUploader=True            deliver raw directory, no archive\n  \
        -MetaDataPath=<file>           copied into the package as metadata.json\n  \
        -StagingDirectory=<dir>        stage root [<projectDir>/Saved/StagedBuilds]")]
    Build {
        /// Automation-style parameters, e.g. -PluginPath=MyMod.uplugin -Platform=Windows
        #[arg(
            value_name = "PARAMS",
            num_args = 0..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        params: Vec<String>,
    },
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            command: None,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
