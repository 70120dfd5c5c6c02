//! UGC plugin packaging
//!
//! Turns a game plugin into a distributable mod package: validates the
//! request, patches the editor config around the cook, drives the external
//! automation stages, relocates the staged pak output and finalizes the
//! package.

pub mod descriptor;
pub mod error;
pub mod finalize;
pub mod ini;
pub mod layout;
pub mod params;
pub mod patcher;
pub mod pipeline;
pub mod relocate;
pub mod request;
pub mod stages;

pub use descriptor::PluginDescriptor;
pub use error::{PakError, PakErrorKind};
pub use finalize::Finalizer;
pub use ini::IniDocument;
pub use layout::StagingLayout;
pub use params::ParamSet;
pub use patcher::{ConfigPatch, ConfigPatchGuard, editor_config_path};
pub use pipeline::{BuildPipeline, PakOutcome};
pub use relocate::OutputRelocator;
pub use request::{BuildRequest, EnvironmentPaths, PluginIdentity};
pub use stages::{NO_CHANGELIST, Stage, StageOrchestrator};
