//! Scoped editor-config patching
//!
//! [`ConfigPatch::apply`] makes sure the project's user-editor ini excludes
//! the plugin folder from blueprint nativization, and hands back a guard.
//! Restoring the guard deletes the ini again if this run created it. Entries
//! added to an ini that already existed stay in place.

use crate::application::session::FileSystemProvider;
use std::path::{Path, PathBuf};

use super::error::PakError;
use super::ini::IniDocument;
use super::request::PluginIdentity;

pub const NATIVIZATION_SECTION: &str = "BlueprintNativizationSettings";
pub const EXCLUDED_FOLDERS_KEY: &str = "ExcludedFolderPaths";

/// Per-user editor config of a project
pub fn editor_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join("Config").join("UserEditor.ini")
}

/// One ini entry that must exist while the cook runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPatch {
    pub section: String,
    pub key: String,
    pub value: String,
}

impl ConfigPatch {
    /// Exclude the plugin's content folder from nativization
    pub fn exclude_plugin(identity: &PluginIdentity) -> Self {
        Self {
            section: NATIVIZATION_SECTION.to_string(),
            key: EXCLUDED_FOLDERS_KEY.to_string(),
            value: format!("/{identity}/"),
        }
    }

    /// Ensure the entry exists in the ini at `path`, creating the file if needed
    pub fn apply<'a>(
        &self,
        fs: &'a dyn FileSystemProvider,
        path: &Path,
    ) -> Result<ConfigPatchGuard<'a>, PakError> {
        let pre_existed = fs.is_file(path);

        if !pre_existed {
            if let Some(parent) = path.parent() {
                fs.create_dir_all(parent)
                    .map_err(|e| PakError::config(parent, e))?;
            }
            fs.write_file(path, "").map_err(|e| PakError::config(path, e))?;
            tracing::debug!(path = %path.display(), "created editor config");
        }

        // From here on a failure drops the guard, which removes a created file
        let guard = ConfigPatchGuard {
            fs,
            path: path.to_path_buf(),
            pre_existed,
            restored: false,
        };

        let content = fs.read_to_string(path).map_err(|e| PakError::config(path, e))?;
        let mut doc = IniDocument::parse(&content);

        if doc.contains_entry(&self.section, &self.key, &self.value) {
            tracing::debug!(section = %self.section, value = %self.value, "config entry already present");
        } else {
            doc.append_to_section(&self.section, format!("+{}={}", self.key, self.value));
            fs.write_file(path, &doc.render())
                .map_err(|e| PakError::config(path, e))?;
            tracing::info!(
                path = %path.display(),
                section = %self.section,
                value = %self.value,
                "patched editor config"
            );
        }

        Ok(guard)
    }
}

/// Restores an applied [`ConfigPatch`]
#[must_use = "dropping the guard restores the config immediately"]
pub struct ConfigPatchGuard<'a> {
    fs: &'a dyn FileSystemProvider,
    path: PathBuf,
    pre_existed: bool,
    restored: bool,
}

impl ConfigPatchGuard<'_> {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pre_existed(&self) -> bool {
        self.pre_existed
    }

    /// Delete the ini if this run created it
    pub fn restore(mut self) -> Result<(), PakError> {
        self.restored = true;
        self.remove_created()
    }

    fn remove_created(&self) -> Result<(), PakError> {
        if self.pre_existed || !self.fs.exists(&self.path) {
            return Ok(());
        }
        self.fs
            .remove_file(&self.path)
            .map_err(|e| PakError::config(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), "removed editor config created for the cook");
        Ok(())
    }
}

impl Drop for ConfigPatchGuard<'_> {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        if let Err(e) = self.remove_created() {
            tracing::warn!("config patch not restored: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    include!("patcher.test.rs");
}
