//! Staging layout
//!
//! Where the toolchain leaves its staged output and where the package ends
//! up. Computed from the request for every run and never persisted.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::error::PakError;
use super::request::BuildRequest;

/// Transient folder the staged pak content passes through
pub const TRANSIENT_DIR: &str = "Temp";
/// Content folder of a stage-mode package
pub const STAGE_DATA_DIR: &str = "Data";
pub const METADATA_FILE: &str = "metadata.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingLayout {
    pub stage_root: PathBuf,
    /// Project-shaped tree the toolchain stages for the platform
    pub staged_platform_root: PathBuf,
    /// Pak output for the plugin inside the staged tree
    pub staged_content: PathBuf,
    pub transient_dir: PathBuf,
    /// Final package content
    pub mod_dir: PathBuf,
    /// Folder the metadata file goes to
    pub package_root: PathBuf,
    /// Archive written next to the mod directory, if any
    pub archive_path: Option<PathBuf>,
}

impl StagingLayout {
    pub fn compute(request: &BuildRequest) -> Result<Self, PakError> {
        let stage_root = request.stage_root();
        let platform = request.target_platform.staged_name();

        let plugin_dir = request.plugin_path.parent().unwrap_or(Path::new(""));
        let plugin_rel = plugin_dir.strip_prefix(request.project_dir()).map_err(|_| {
            PakError::relocation(
                plugin_dir,
                format!(
                    "plugin is not inside the project directory '{}'",
                    request.project_dir().display()
                ),
            )
        })?;

        let staged_platform_root = stage_root.join(platform);
        let staged_content = staged_platform_root
            .join(request.project_name())
            .join(plugin_rel)
            .join("Content")
            .join("Paks")
            .join(platform);

        let package_dir = if request.stage_only {
            stage_root.join(request.identity.as_str())
        } else {
            stage_root
                .join(&request.platform_subdir)
                .join(request.identity.as_str())
        };
        let mod_dir = if request.stage_only {
            package_dir.join(STAGE_DATA_DIR)
        } else {
            package_dir.clone()
        };

        let archive_path = request.produces_archive().then(|| sibling_archive(&mod_dir));

        Ok(Self {
            transient_dir: stage_root.join(TRANSIENT_DIR),
            stage_root,
            staged_platform_root,
            staged_content,
            mod_dir,
            package_root: package_dir,
            archive_path,
        })
    }

    /// Where a supplied metadata file is copied to
    pub fn metadata_target(&self) -> PathBuf {
        self.package_root.join(METADATA_FILE)
    }
}

/// `<dir>.zip` next to `dir`
fn sibling_archive(dir: &Path) -> PathBuf {
    let mut name = OsString::from(dir.as_os_str());
    name.push(".zip");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    include!("layout.test.rs");
}
