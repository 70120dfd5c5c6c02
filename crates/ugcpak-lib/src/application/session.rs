//! Command session architecture
//!
//! Implements the Session-Scoped Dependency Injection Pattern.
//! Each command execution creates a session that owns all ephemeral state:
//! the display, filesystem, process and configuration providers.

use crate::application::config::AppConfig;
use crate::display::{DisplayProvider, LiveDisplayProvider};
use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Output lines kept from a child process
const OUTPUT_TAIL_LINES: usize = 200;

/// Writable, seekable file handle (what archive writers need)
pub trait WriteSeek: Write + Seek {}

impl<T: Write + Seek> WriteSeek for T {}

/// Provider trait for filesystem operations
pub trait FileSystemProvider {
    /// Get current working directory
    fn current_dir(&self) -> Result<PathBuf>;

    /// Check if path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory
    fn is_directory(&self, path: &Path) -> bool;

    /// Check if path is a regular file
    fn is_file(&self, path: &Path) -> bool;

    /// Create directory and all parent directories
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Remove a directory and all its contents
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Remove a file
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Read entire file contents as string
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file, replacing it
    fn write_file(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Copy a file; fails if the destination already exists
    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Move a directory to a path that must not exist yet
    fn move_dir(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// All regular files below a directory, recursively, sorted
    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// All directories below a directory, recursively, sorted
    fn list_dirs(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// Open a file for streaming reads
    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read + '_>>;

    /// Create (or truncate) a file for writing
    fn create_file(&self, path: &Path) -> io::Result<Box<dyn WriteSeek + '_>>;
}

/// Process execution output
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub exit_code: Option<i32>,
}

/// Provider trait for process execution
pub trait ProcessProvider {
    /// Execute a program with given arguments in working directory, blocking until it exits
    fn execute(&self, program: &Path, args: &[String], working_dir: &Path)
    -> Result<ProcessOutput>;

    /// Locate a program on PATH
    fn which(&self, program: &str) -> Option<PathBuf>;
}

/// Provider trait for configuration access
pub trait ConfigProvider {
    /// Get the application configuration
    fn app_config(&self) -> &AppConfig;
}

/// Session trait that both CommandSession and MockCommandSession implement
pub trait Session {
    /// Get the display provider for this session
    fn display(&self) -> &dyn DisplayProvider;

    /// Get the filesystem provider for this session
    fn filesystem(&self) -> &dyn FileSystemProvider;

    /// Get the process provider for this session
    fn process(&self) -> &dyn ProcessProvider;

    /// Get the config provider for this session
    fn config(&self) -> &dyn ConfigProvider;
}

/// Live implementation of FileSystemProvider
pub struct LiveFileSystemProvider;

impl LiveFileSystemProvider {
    fn copy_tree(from: &Path, to: &Path) -> io::Result<()> {
        fs::create_dir_all(to)?;
        for entry in fs::read_dir(from)? {
            let entry = entry?;
            let src_path = entry.path();
            let dst_path = to.join(entry.file_name());
            if entry.file_type()?.is_dir() {
                Self::copy_tree(&src_path, &dst_path)?;
            } else {
                fs::copy(&src_path, &dst_path)?;
            }
        }
        Ok(())
    }

    fn collect_entries(
        dir: &Path,
        files: &mut Vec<PathBuf>,
        dirs: &mut Vec<PathBuf>,
    ) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                Self::collect_entries(&path, files, dirs)?;
                dirs.push(path);
            } else {
                files.push(path);
            }
        }
        Ok(())
    }
}

impl FileSystemProvider for LiveFileSystemProvider {
    fn current_dir(&self) -> Result<PathBuf> {
        std::env::current_dir().context("Failed to get current directory")
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        fs::write(path, content)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        let mut source = File::open(from)?;
        let mut target = OpenOptions::new().write(true).create_new(true).open(to)?;
        io::copy(&mut source, &mut target)?;
        Ok(())
    }

    fn move_dir(&self, from: &Path, to: &Path) -> io::Result<()> {
        if to.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("destination already exists: {}", to.display()),
            ));
        }

        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                tracing::debug!(
                    from = %from.display(),
                    to = %to.display(),
                    "rename crosses devices, copying instead"
                );
                if let Err(copy_err) = Self::copy_tree(from, to) {
                    // Leave the source as the only copy
                    let _ = fs::remove_dir_all(to);
                    return Err(copy_err);
                }
                fs::remove_dir_all(from)
            }
            Err(e) => Err(e),
        }
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        Self::collect_entries(dir, &mut files, &mut Vec::new())?;
        files.sort();
        Ok(files)
    }

    fn list_dirs(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();
        Self::collect_entries(dir, &mut Vec::new(), &mut dirs)?;
        dirs.sort();
        Ok(dirs)
    }

    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(File::open(path)?))
    }

    fn create_file(&self, path: &Path) -> io::Result<Box<dyn WriteSeek + '_>> {
        Ok(Box::new(File::create(path)?))
    }
}

/// Live implementation of ProcessProvider
pub struct LiveProcessProvider {
    /// Custom PATH override for hermetic testing
    custom_path: Option<String>,
}

impl LiveProcessProvider {
    /// Create a new LiveProcessProvider with system PATH
    pub fn new() -> Self {
        Self { custom_path: None }
    }

    /// Create a LiveProcessProvider with custom PATH for hermetic testing
    pub fn with_custom_path(path: String) -> Self {
        Self {
            custom_path: Some(path),
        }
    }

    fn path_env(&self) -> Option<std::ffi::OsString> {
        match &self.custom_path {
            Some(path) => Some(path.into()),
            None => std::env::var_os("PATH"),
        }
    }
}

impl Default for LiveProcessProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessProvider for LiveProcessProvider {
    fn execute(
        &self,
        program: &Path,
        args: &[String],
        working_dir: &Path,
    ) -> Result<ProcessOutput> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(custom_path) = &self.custom_path {
            cmd.env("PATH", custom_path);
        }

        let mut child = cmd
            .spawn()
            .with_context(|| format!("Failed to execute command: {}", program.display()))?;

        let stderr_reader = child.stderr.take().map(|stderr| {
            std::thread::spawn(move || {
                let mut tail = VecDeque::new();
                for line in BufReader::new(stderr).lines().map_while(|l| l.ok()) {
                    tracing::warn!(target: "ugcpak::uat", "{}", line);
                    push_tail(&mut tail, line);
                }
                tail
            })
        });

        let mut stdout_tail = VecDeque::new();
        if let Some(stdout) = child.stdout.take() {
            for line in BufReader::new(stdout).lines().map_while(|l| l.ok()) {
                tracing::info!(target: "ugcpak::uat", "{}", line);
                push_tail(&mut stdout_tail, line);
            }
        }

        let status = child
            .wait()
            .with_context(|| format!("Failed to wait for command: {}", program.display()))?;

        let stderr_tail = match stderr_reader {
            Some(handle) => handle.join().unwrap_or_default(),
            None => VecDeque::new(),
        };

        Ok(ProcessOutput {
            stdout: Vec::from(stdout_tail).join("\n"),
            stderr: Vec::from(stderr_tail).join("\n"),
            success: status.success(),
            exit_code: status.code(),
        })
    }

    fn which(&self, program: &str) -> Option<PathBuf> {
        let path_env = self.path_env()?;
        std::env::split_paths(&path_env)
            .map(|dir| dir.join(program))
            .find(|candidate| candidate.is_file())
    }
}

fn push_tail(tail: &mut VecDeque<String>, line: String) {
    if tail.len() == OUTPUT_TAIL_LINES {
        tail.pop_front();
    }
    tail.push_back(line);
}

/// Live implementation of ConfigProvider
pub struct LiveConfigProvider {
    app_config: AppConfig,
}

impl LiveConfigProvider {
    pub fn new(app_config: AppConfig) -> Self {
        Self { app_config }
    }
}

impl ConfigProvider for LiveConfigProvider {
    fn app_config(&self) -> &AppConfig {
        &self.app_config
    }
}

/// CommandSession owns all ephemeral state for a single command execution
pub struct CommandSession<F, P, C>
where
    F: FileSystemProvider,
    P: ProcessProvider,
    C: ConfigProvider,
{
    /// Display provider for this session
    display_provider: LiveDisplayProvider,
    /// Filesystem operations provider
    filesystem_provider: F,
    /// Process execution provider
    process_provider: P,
    /// Configuration provider
    config_provider: C,
}

impl CommandSession<LiveFileSystemProvider, LiveProcessProvider, LiveConfigProvider> {
    /// Create a new command session with owned state (production composition)
    pub fn new(app_config: AppConfig) -> Self {
        console::set_colors_enabled(app_config.colors_enabled());

        // A second session in the same process keeps the first subscriber
        let _ = crate::logger::Logger::init(app_config.to_logger_config());

        Self {
            display_provider: LiveDisplayProvider::new(),
            filesystem_provider: LiveFileSystemProvider,
            process_provider: LiveProcessProvider::new(),
            config_provider: LiveConfigProvider::new(app_config),
        }
    }
}

impl<F, P, C> CommandSession<F, P, C>
where
    F: FileSystemProvider,
    P: ProcessProvider,
    C: ConfigProvider,
{
    /// Create a new generic command session with custom providers (for testing)
    pub fn new_with_providers(filesystem_provider: F, process_provider: P, config_provider: C) -> Self {
        Self {
            display_provider: LiveDisplayProvider::new(),
            filesystem_provider,
            process_provider,
            config_provider,
        }
    }
}

impl<F, P, C> Session for CommandSession<F, P, C>
where
    F: FileSystemProvider,
    P: ProcessProvider,
    C: ConfigProvider,
{
    fn display(&self) -> &dyn DisplayProvider {
        &self.display_provider
    }

    fn filesystem(&self) -> &dyn FileSystemProvider {
        &self.filesystem_provider
    }

    fn process(&self) -> &dyn ProcessProvider {
        &self.process_provider
    }

    fn config(&self) -> &dyn ConfigProvider {
        &self.config_provider
    }
}

#[cfg(test)]
mod tests {
    include!("session.test.rs");
}
