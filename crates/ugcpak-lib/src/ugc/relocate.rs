//! Output relocation
//!
//! Pulls the plugin's pak output out of the project-shaped staging tree and
//! re-homes it under the mod layout. Every step is fatal on failure and the
//! transient folder may be left behind when one fails.

use crate::application::session::FileSystemProvider;
use std::path::{Path, PathBuf};

use super::error::PakError;
use super::layout::StagingLayout;

pub struct OutputRelocator<'a> {
    fs: &'a dyn FileSystemProvider,
}

impl<'a> OutputRelocator<'a> {
    pub fn new(fs: &'a dyn FileSystemProvider) -> Self {
        Self { fs }
    }

    /// Move the staged content into the mod directory and return it
    pub fn relocate(&self, layout: &StagingLayout) -> Result<PathBuf, PakError> {
        if !self.fs.is_directory(&layout.staged_content) {
            return Err(PakError::relocation(
                &layout.staged_content,
                "staged content not found",
            ));
        }

        self.remove_dir_if_present(&layout.transient_dir)?;
        self.move_dir(&layout.staged_content, &layout.transient_dir)?;

        self.fs
            .remove_dir_all(&layout.staged_platform_root)
            .map_err(|e| PakError::relocation(&layout.staged_platform_root, e))?;
        tracing::debug!(path = %layout.staged_platform_root.display(), "removed staged project tree");

        self.remove_dir_if_present(&layout.mod_dir)?;
        self.remove_previous_metadata(layout)?;
        if let Some(parent) = layout.mod_dir.parent() {
            self.fs
                .create_dir_all(parent)
                .map_err(|e| PakError::relocation(parent, e))?;
        }

        self.move_dir(&layout.transient_dir, &layout.mod_dir)?;
        // A fallback copy can leave the source folder behind
        self.remove_dir_if_present(&layout.transient_dir)?;

        tracing::info!(mod_dir = %layout.mod_dir.display(), "relocated staged content");
        Ok(layout.mod_dir.clone())
    }

    fn move_dir(&self, from: &Path, to: &Path) -> Result<(), PakError> {
        self.fs.move_dir(from, to).map_err(|e| {
            PakError::relocation(from, format!("cannot move to '{}': {e}", to.display()))
        })?;
        tracing::debug!(from = %from.display(), to = %to.display(), "moved directory");
        Ok(())
    }

    /// A stage-mode package keeps metadata beside `Data`, outside the folder
    /// that gets replaced
    fn remove_previous_metadata(&self, layout: &StagingLayout) -> Result<(), PakError> {
        if layout.package_root == layout.mod_dir {
            return Ok(());
        }
        let metadata = layout.metadata_target();
        if self.fs.is_file(&metadata) {
            self.fs
                .remove_file(&metadata)
                .map_err(|e| PakError::relocation(&metadata, e))?;
            tracing::debug!(path = %metadata.display(), "removed previous metadata");
        }
        Ok(())
    }

    fn remove_dir_if_present(&self, dir: &Path) -> Result<(), PakError> {
        if self.fs.exists(dir) {
            self.fs
                .remove_dir_all(dir)
                .map_err(|e| PakError::relocation(dir, e))?;
            tracing::debug!(path = %dir.display(), "removed previous output");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("relocate.test.rs");
}
