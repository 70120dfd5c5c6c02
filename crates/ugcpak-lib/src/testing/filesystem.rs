//! Filesystem-based testing utilities
//!
//! A temporary directory laid out like a game project with one content
//! plugin, removed again when the fixture is dropped.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Project folder created by [`TempDirFixture::with_project`]
pub const PROJECT_DIR: &str = "Pavlov";

/// Temporary directory fixture with automatic cleanup
pub struct TempDirFixture {
    pub temp_dir: TempDir,
}

impl TempDirFixture {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: tempfile::tempdir()?,
        })
    }

    /// Fixture holding `Pavlov/Pavlov.uproject` and a content plugin named `plugin`
    pub fn with_project(plugin: &str) -> Result<Self> {
        let fixture = Self::new()?;
        fixture.write_file(&format!("{PROJECT_DIR}/{PROJECT_DIR}.uproject"), "{}")?;
        fixture.write_file(
            &format!("{PROJECT_DIR}/Plugins/{plugin}/{plugin}.uplugin"),
            &format!(
                r#"{{"FileVersion":3,"FriendlyName":"{plugin}","VersionName":"1.0","CanContainContent":true}}"#
            ),
        )?;
        fixture.create_dir(&format!("{PROJECT_DIR}/Config"))?;
        Ok(fixture)
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn project_dir(&self) -> PathBuf {
        self.path().join(PROJECT_DIR)
    }

    pub fn project_file(&self) -> PathBuf {
        self.project_dir().join(format!("{PROJECT_DIR}.uproject"))
    }

    pub fn plugin_path(&self, plugin: &str) -> PathBuf {
        self.project_dir()
            .join("Plugins")
            .join(plugin)
            .join(format!("{plugin}.uplugin"))
    }

    /// Default stage root of the project
    pub fn stage_root(&self) -> PathBuf {
        self.project_dir().join("Saved").join("StagedBuilds")
    }

    pub fn create_dir(&self, subdir: &str) -> Result<()> {
        fs::create_dir_all(self.path().join(subdir))?;
        Ok(())
    }

    /// Write a file, creating parent directories
    pub fn write_file(&self, file_path: &str, content: &str) -> Result<()> {
        let full_path = self.path().join(file_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full_path, content)?;
        Ok(())
    }

    pub fn read_file(&self, file_path: &str) -> Result<String> {
        Ok(fs::read_to_string(self.path().join(file_path))?)
    }

    pub fn file_exists(&self, file_path: &str) -> bool {
        self.path().join(file_path).exists()
    }
}

#[cfg(test)]
mod tests {
    include!("filesystem.test.rs");
}
