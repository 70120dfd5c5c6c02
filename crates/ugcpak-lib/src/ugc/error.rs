//! Error taxonomy for the UGC packaging pipeline
//!
//! Every variant is fatal: the pipeline aborts on the first one it sees.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use super::stages::Stage;

/// Pipeline errors
#[derive(Debug, Error)]
pub enum PakError {
    #[error("Missing -{name}=... argument")]
    MissingArgument { name: &'static str },

    #[error("Invalid target platform '{value}': expected Windows, Android or Linux")]
    InvalidPlatform { value: String },

    #[error("Plugin '{}' not found", path.display())]
    PluginNotFound { path: PathBuf },

    #[error("Configuration error at '{}': {reason}", path.display())]
    InvalidConfiguration { path: PathBuf, reason: String },

    #[error("{stage} stage failed: {reason}")]
    ExternalStageFailure { stage: Stage, reason: String },

    #[error("Relocation failed at '{}': {reason}", path.display())]
    RelocationFailure { path: PathBuf, reason: String },

    #[error("Finalization failed at '{}': {reason}", path.display())]
    FinalizationFailure { path: PathBuf, reason: String },
}

/// Discriminant of [`PakError`] for programmatic branching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PakErrorKind {
    MissingArgument,
    InvalidPlatform,
    PluginNotFound,
    InvalidConfiguration,
    ExternalStageFailure,
    RelocationFailure,
    FinalizationFailure,
}

impl PakError {
    pub fn kind(&self) -> PakErrorKind {
        match self {
            Self::MissingArgument { .. } => PakErrorKind::MissingArgument,
            Self::InvalidPlatform { .. } => PakErrorKind::InvalidPlatform,
            Self::PluginNotFound { .. } => PakErrorKind::PluginNotFound,
            Self::InvalidConfiguration { .. } => PakErrorKind::InvalidConfiguration,
            Self::ExternalStageFailure { .. } => PakErrorKind::ExternalStageFailure,
            Self::RelocationFailure { .. } => PakErrorKind::RelocationFailure,
            Self::FinalizationFailure { .. } => PakErrorKind::FinalizationFailure,
        }
    }

    pub(crate) fn config(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self::InvalidConfiguration {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn relocation(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self::RelocationFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn finalization(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self::FinalizationFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
