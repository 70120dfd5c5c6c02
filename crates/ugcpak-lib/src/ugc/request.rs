//! Build request resolution
//!
//! Turns raw automation parameters into a validated [`BuildRequest`].
//! Validation order matches the order operators hit the errors in practice:
//! output folder, then platform, then the plugin itself.

use crate::application::session::FileSystemProvider;
use crate::primitives::TargetPlatform;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use super::error::PakError;
use super::params::ParamSet;

/// Parameter names
pub mod keys {
    pub const PLUGIN_PATH: &str = "PluginPath";
    pub const PLATFORM: &str = "Platform";
    pub const PLATFORM_DIR: &str = "PlatformDir";
    pub const PROJECT: &str = "Project";
    pub const VERSION: &str = "Version";
    pub const BASED_ON_RELEASE_VERSION: &str = "BasedOnReleaseVersion";
    pub const COOK_DIR: &str = "CookDir";
    pub const MAP_TO_COOK: &str = "MapToCook";
    pub const STAGE: &str = "Stage";
    pub const MODIO_UPLOADER: &str = "ModioUploader";
    pub const METADATA_PATH: &str = "MetaDataPath";
    pub const STAGING_DIRECTORY: &str = "StagingDirectory";
}

/// Parameter defaults
pub mod defaults {
    pub const VERSION: &str = "NOVERSION";
    pub const RELEASE_BASELINE: &str = "PavlovMod_1.0.0";
    pub const PROJECT_DIR: &str = "Pavlov";
    pub const PROJECT_FILE: &str = "Pavlov.uproject";
}

/// Paths of the environment a build runs in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentPaths {
    /// Base for relative parameter paths
    pub workdir: PathBuf,
    /// Root containing Engine/ and the default project
    pub local_root: PathBuf,
    /// Automation tool launcher
    pub automation_tool: PathBuf,
}

impl EnvironmentPaths {
    /// `RunUAT` inside an engine checkout
    pub fn default_automation_tool(local_root: &Path) -> PathBuf {
        let launcher = if cfg!(windows) { "RunUAT.bat" } else { "RunUAT.sh" };
        local_root
            .join("Engine")
            .join("Build")
            .join("BatchFiles")
            .join(launcher)
    }

    /// Project used when none is given
    pub fn default_project(&self) -> PathBuf {
        self.local_root
            .join(defaults::PROJECT_DIR)
            .join(defaults::PROJECT_FILE)
    }

    /// Anchor a parameter path at the working directory
    pub fn absolute(&self, path: &str) -> PathBuf {
        normalize(&self.workdir.join(path))
    }
}

/// Identity of the content unit being packaged.
///
/// The plugin file name with every extension stripped. Doubles as the DLC
/// name handed to the toolchain and as the package folder name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginIdentity(String);

impl PluginIdentity {
    pub fn from_plugin_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        let stem = file_name.split('.').next().unwrap_or(file_name);
        if stem.is_empty() {
            return None;
        }
        Some(Self(stem.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated build request. Read-only once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub version: String,
    pub plugin_path: PathBuf,
    pub identity: PluginIdentity,
    pub release_baseline: String,
    /// Empty means cook everything
    pub cook_directory: String,
    /// Accepted for compatibility, not passed to the toolchain
    pub map_to_cook: String,
    pub project_file: PathBuf,
    pub stage_only: bool,
    pub uploader_mode: bool,
    pub target_platform: TargetPlatform,
    pub platform_subdir: String,
    pub metadata_path: Option<PathBuf>,
    pub staging_directory: Option<PathBuf>,
}

impl BuildRequest {
    /// Validate raw parameters into a request
    pub fn resolve(
        params: &ParamSet,
        env: &EnvironmentPaths,
        fs: &dyn FileSystemProvider,
    ) -> Result<Self, PakError> {
        let platform_subdir = required(params, keys::PLATFORM_DIR)?.to_string();

        let platform_value = required(params, keys::PLATFORM)?;
        let target_platform: TargetPlatform =
            platform_value
                .parse()
                .map_err(|_| PakError::InvalidPlatform {
                    value: platform_value.to_string(),
                })?;

        let plugin_value = required(params, keys::PLUGIN_PATH)?;
        let plugin_path = env.absolute(plugin_value);
        if !fs.is_file(&plugin_path) {
            return Err(PakError::PluginNotFound { path: plugin_path });
        }
        let identity = PluginIdentity::from_plugin_path(&plugin_path).ok_or_else(|| {
            PakError::config(&plugin_path, "plugin file name has no usable stem")
        })?;

        let project_file = params
            .value(keys::PROJECT)
            .filter(|p| !p.is_empty())
            .map(|p| env.absolute(p))
            .unwrap_or_else(|| env.default_project());

        Ok(Self {
            version: params.value_or(keys::VERSION, defaults::VERSION).to_string(),
            plugin_path,
            identity,
            release_baseline: params
                .value_or(keys::BASED_ON_RELEASE_VERSION, defaults::RELEASE_BASELINE)
                .to_string(),
            cook_directory: params.value_or(keys::COOK_DIR, "").to_string(),
            map_to_cook: params.value_or(keys::MAP_TO_COOK, "").to_string(),
            project_file,
            stage_only: params.is_true(keys::STAGE),
            uploader_mode: params.is_true(keys::MODIO_UPLOADER),
            target_platform,
            platform_subdir,
            metadata_path: params
                .value(keys::METADATA_PATH)
                .filter(|p| !p.is_empty())
                .map(|p| env.absolute(p)),
            staging_directory: params
                .value(keys::STAGING_DIRECTORY)
                .filter(|p| !p.is_empty())
                .map(|p| env.absolute(p)),
        })
    }

    /// Directory holding the project file
    pub fn project_dir(&self) -> &Path {
        self.project_file.parent().unwrap_or(Path::new(""))
    }

    /// Project name, the project file's stem
    pub fn project_name(&self) -> &str {
        self.project_file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }

    /// Root every staged output is written under
    pub fn stage_root(&self) -> PathBuf {
        self.staging_directory.clone().unwrap_or_else(|| {
            self.project_dir().join("Saved").join("StagedBuilds")
        })
    }

    /// Whether the run ends by compressing the package
    pub fn produces_archive(&self) -> bool {
        !self.stage_only && !self.uploader_mode
    }
}

fn required<'a>(params: &'a ParamSet, name: &'static str) -> Result<&'a str, PakError> {
    params
        .value(name)
        .filter(|v| !v.is_empty())
        .ok_or(PakError::MissingArgument { name })
}

/// Lexically normalize a path: drop `.` and fold `..` into its parent
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    include!("request.test.rs");
}
