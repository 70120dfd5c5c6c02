//! Package finalization: metadata copy and archive

use crate::application::session::FileSystemProvider;
use std::io;
use std::path::{Path, PathBuf};
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use super::error::PakError;

pub struct Finalizer<'a> {
    fs: &'a dyn FileSystemProvider,
}

impl<'a> Finalizer<'a> {
    pub fn new(fs: &'a dyn FileSystemProvider) -> Self {
        Self { fs }
    }

    /// Copy `source` to `target`; never overwrites
    pub fn copy_metadata(&self, source: &Path, target: &Path) -> Result<PathBuf, PakError> {
        if !self.fs.is_file(source) {
            return Err(PakError::finalization(source, "metadata file not found"));
        }
        if self.fs.exists(target) {
            return Err(PakError::finalization(target, "metadata already exists"));
        }
        self.fs
            .copy_file(source, target)
            .map_err(|e| PakError::finalization(target, e))?;
        tracing::info!(from = %source.display(), to = %target.display(), "copied metadata");
        Ok(target.to_path_buf())
    }

    /// Compress everything below `dir`, empty folders included, into
    /// `archive`, replacing a previous archive
    pub fn compress(&self, dir: &Path, archive: &Path) -> Result<PathBuf, PakError> {
        if self.fs.exists(archive) {
            self.fs
                .remove_file(archive)
                .map_err(|e| PakError::finalization(archive, e))?;
        }

        let files = self
            .fs
            .list_files(dir)
            .map_err(|e| PakError::finalization(dir, e))?;
        let dirs = self
            .fs
            .list_dirs(dir)
            .map_err(|e| PakError::finalization(dir, e))?;

        self.write_zip(dir, &dirs, &files, archive)
            .map_err(|e| PakError::finalization(archive, e))?;

        tracing::info!(
            archive = %archive.display(),
            files = files.len(),
            "compressed package"
        );
        Ok(archive.to_path_buf())
    }

    fn write_zip(
        &self,
        root: &Path,
        dirs: &[PathBuf],
        files: &[PathBuf],
        archive: &Path,
    ) -> io::Result<()> {
        let handle = self.fs.create_file(archive)?;
        let mut zip = zip::ZipWriter::new(handle);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        // Path order puts each folder before its contents
        let mut entries: Vec<(&PathBuf, bool)> = dirs
            .iter()
            .map(|d| (d, true))
            .chain(files.iter().map(|f| (f, false)))
            .collect();
        entries.sort();

        for (path, is_dir) in entries {
            let Some(name) = entry_name(root, path) else {
                continue;
            };
            if is_dir {
                zip.add_directory(format!("{name}/"), options)?;
            } else {
                zip.start_file(name.as_str(), options)?;
                let mut reader = self.fs.open_read(path)?;
                io::copy(&mut reader, &mut zip)?;
            }
        }

        zip.finish()?;
        Ok(())
    }
}

/// Archive entry name: relative to `root`, `/`-separated
fn entry_name(root: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    (!parts.is_empty()).then(|| parts.join("/"))
}

#[cfg(test)]
mod tests {
    include!("finalize.test.rs");
}
