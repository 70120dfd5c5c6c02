//! Mock implementations of session providers for testing
//!
//! These mocks enable testing of the packaging pipeline and command handlers
//! without touching the real filesystem or launching the automation tool.

use crate::application::config::AppConfig;
use crate::application::session::*;
use crate::display::{DisplayProvider, MockDisplayProvider};
use anyhow::Result;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock filesystem provider for testing
///
/// Clones share the same in-memory tree, so a clone can be handed to a
/// process side effect that "produces" toolchain output.
#[derive(Clone)]
pub struct MockFileSystemProvider {
    pub current_dir: PathBuf,
    /// In-memory filesystem: path -> content
    pub files: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
    /// Track directories that exist
    pub directories: Arc<Mutex<HashSet<PathBuf>>>,
    /// Paths under which every mutation fails with PermissionDenied
    pub read_only: Arc<Mutex<HashSet<PathBuf>>>,
}

impl MockFileSystemProvider {
    pub fn new() -> Self {
        let fs = Self {
            current_dir: PathBuf::from("/test/workdir"),
            files: Arc::new(Mutex::new(HashMap::new())),
            directories: Arc::new(Mutex::new(HashSet::new())),
            read_only: Arc::new(Mutex::new(HashSet::new())),
        };
        fs.add_dir(Path::new("/test/workdir"));
        fs
    }

    pub fn with_current_dir(mut self, dir: PathBuf) -> Self {
        self.add_dir(&dir);
        self.current_dir = dir;
        self
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.add_file(path, content);
        self
    }

    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        self.add_dir(&path.into());
        self
    }

    /// Make every mutation at or below `path` fail
    pub fn with_read_only(self, path: impl Into<PathBuf>) -> Self {
        self.read_only.lock().unwrap().insert(path.into());
        self
    }

    /// Insert a file, creating its ancestors
    pub fn add_file(&self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.lock().unwrap().insert(path, content.into());
    }

    /// Insert a directory and its ancestors
    pub fn add_dir(&self, path: &Path) {
        let mut directories = self.directories.lock().unwrap();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            directories.insert(ancestor.to_path_buf());
        }
    }

    /// Current content of a file, for assertions
    pub fn file_content(&self, path: &Path) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Raw bytes of a file, for assertions
    pub fn file_bytes(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(path).cloned()
    }

    /// All file paths currently stored
    pub fn file_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<_> = self.files.lock().unwrap().keys().cloned().collect();
        paths.sort();
        paths
    }

    fn check_writable(&self, path: &Path) -> io::Result<()> {
        let read_only = self.read_only.lock().unwrap();
        if read_only.iter().any(|root| path.starts_with(root)) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("read-only: {}", path.display()),
            ));
        }
        Ok(())
    }

    fn check_parent(&self, path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !self.is_directory(parent) => {
                Err(not_found(parent))
            }
            _ => Ok(()),
        }
    }
}

impl Default for MockFileSystemProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file or directory: {}", path.display()),
    )
}

fn already_exists(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("already exists: {}", path.display()),
    )
}

impl FileSystemProvider for MockFileSystemProvider {
    fn current_dir(&self) -> Result<PathBuf> {
        Ok(self.current_dir.clone())
    }

    fn exists(&self, path: &Path) -> bool {
        self.is_file(path) || self.is_directory(path)
    }

    fn is_directory(&self, path: &Path) -> bool {
        self.directories.lock().unwrap().contains(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.check_writable(path)?;
        if self.is_file(path) {
            return Err(already_exists(path));
        }
        self.add_dir(path);
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        self.check_writable(path)?;
        if !self.is_directory(path) {
            return Err(not_found(path));
        }
        self.files
            .lock()
            .unwrap()
            .retain(|p, _| !p.starts_with(path));
        self.directories
            .lock()
            .unwrap()
            .retain(|p| !p.starts_with(path));
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.check_writable(path)?;
        self.files
            .lock()
            .unwrap()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_found(path))
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let bytes = self.file_bytes(path).ok_or_else(|| not_found(path))?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        self.check_writable(path)?;
        self.check_parent(path)?;
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.as_bytes().to_vec());
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        let bytes = self.file_bytes(from).ok_or_else(|| not_found(from))?;
        self.check_writable(to)?;
        self.check_parent(to)?;
        if self.exists(to) {
            return Err(already_exists(to));
        }
        self.files.lock().unwrap().insert(to.to_path_buf(), bytes);
        Ok(())
    }

    fn move_dir(&self, from: &Path, to: &Path) -> io::Result<()> {
        self.check_writable(from)?;
        self.check_writable(to)?;
        if !self.is_directory(from) {
            return Err(not_found(from));
        }
        if self.exists(to) {
            return Err(already_exists(to));
        }
        self.check_parent(to)?;

        let rebase = |p: &Path| to.join(p.strip_prefix(from).unwrap_or(p));

        let mut files = self.files.lock().unwrap();
        let moved: Vec<_> = files
            .keys()
            .filter(|p| p.starts_with(from))
            .cloned()
            .collect();
        for path in moved {
            if let Some(bytes) = files.remove(&path) {
                files.insert(rebase(&path), bytes);
            }
        }

        let mut directories = self.directories.lock().unwrap();
        let moved: Vec<_> = directories
            .iter()
            .filter(|p| p.starts_with(from))
            .cloned()
            .collect();
        for path in moved {
            directories.remove(&path);
            directories.insert(rebase(&path));
        }
        Ok(())
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        if !self.is_directory(dir) {
            return Err(not_found(dir));
        }
        let mut files: Vec<_> = self
            .files
            .lock()
            .unwrap()
            .keys()
            .filter(|p| p.starts_with(dir))
            .cloned()
            .collect();
        files.sort();
        Ok(files)
    }

    fn list_dirs(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        if !self.is_directory(dir) {
            return Err(not_found(dir));
        }
        let mut dirs: Vec<_> = self
            .directories
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.starts_with(dir) && p.as_path() != dir)
            .cloned()
            .collect();
        dirs.sort();
        Ok(dirs)
    }

    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read + '_>> {
        let bytes = self.file_bytes(path).ok_or_else(|| not_found(path))?;
        Ok(Box::new(Cursor::new(bytes)))
    }

    fn create_file(&self, path: &Path) -> io::Result<Box<dyn WriteSeek + '_>> {
        self.check_writable(path)?;
        self.check_parent(path)?;
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), Vec::new());
        Ok(Box::new(MockFileHandle {
            path: path.to_path_buf(),
            buffer: Cursor::new(Vec::new()),
            files: Arc::clone(&self.files),
        }))
    }
}

/// Writable handle that lands in the in-memory tree when dropped
struct MockFileHandle {
    path: PathBuf,
    buffer: Cursor<Vec<u8>>,
    files: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
}

impl Write for MockFileHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for MockFileHandle {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.buffer.seek(pos)
    }
}

impl Drop for MockFileHandle {
    fn drop(&mut self) {
        if let Ok(mut files) = self.files.lock() {
            files.insert(self.path.clone(), std::mem::take(self.buffer.get_mut()));
        }
    }
}

/// Process call record for spy pattern
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessCall {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl ProcessCall {
    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }
}

type SideEffect = Box<dyn Fn(&[String])>;

/// Mock process provider for testing with spy pattern
///
/// Every call succeeds with empty output unless a failure is scripted for
/// one of its arguments.
pub struct MockProcessProvider {
    pub calls: RefCell<Vec<ProcessCall>>,
    /// Argument -> (exit code, stderr)
    pub failures: HashMap<String, (i32, String)>,
    /// Argument -> spawn error message
    pub spawn_errors: HashMap<String, String>,
    side_effects: Vec<(String, SideEffect)>,
    pub programs: HashMap<String, PathBuf>,
}

impl MockProcessProvider {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            failures: HashMap::new(),
            spawn_errors: HashMap::new(),
            side_effects: Vec::new(),
            programs: HashMap::new(),
        }
    }

    /// Calls carrying `arg` exit unsuccessfully
    pub fn with_failure_on(mut self, arg: &str, exit_code: i32, stderr: &str) -> Self {
        self.failures
            .insert(arg.to_string(), (exit_code, stderr.to_string()));
        self
    }

    /// Calls carrying `arg` cannot even be launched
    pub fn with_spawn_error_on(mut self, arg: &str, message: &str) -> Self {
        self.spawn_errors
            .insert(arg.to_string(), message.to_string());
        self
    }

    /// Run `effect` whenever a call carries `arg`, before its result is returned
    pub fn with_side_effect(mut self, arg: &str, effect: impl Fn(&[String]) + 'static) -> Self {
        self.side_effects.push((arg.to_string(), Box::new(effect)));
        self
    }

    pub fn with_program(mut self, name: &str, path: impl Into<PathBuf>) -> Self {
        self.programs.insert(name.to_string(), path.into());
        self
    }

    /// Get all recorded process calls for verification
    pub fn get_calls(&self) -> Vec<ProcessCall> {
        self.calls.borrow().clone()
    }

    /// Get calls carrying a specific argument
    pub fn get_calls_with_arg(&self, arg: &str) -> Vec<ProcessCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.has_arg(arg))
            .cloned()
            .collect()
    }
}

impl Default for MockProcessProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessProvider for MockProcessProvider {
    fn execute(&self, program: &Path, args: &[String], working_dir: &Path) -> Result<ProcessOutput> {
        // Record the call for spy pattern verification
        self.calls.borrow_mut().push(ProcessCall {
            program: program.to_path_buf(),
            args: args.to_vec(),
            working_dir: working_dir.to_path_buf(),
        });

        if let Some(message) = args.iter().find_map(|a| self.spawn_errors.get(a)) {
            anyhow::bail!("{}", message);
        }

        for (arg, effect) in &self.side_effects {
            if args.contains(arg) {
                effect(args);
            }
        }

        match args.iter().find_map(|a| self.failures.get(a)) {
            Some((code, stderr)) => Ok(ProcessOutput {
                stdout: String::new(),
                stderr: stderr.clone(),
                success: false,
                exit_code: Some(*code),
            }),
            None => Ok(ProcessOutput {
                stdout: String::new(),
                stderr: String::new(),
                success: true,
                exit_code: Some(0),
            }),
        }
    }

    fn which(&self, program: &str) -> Option<PathBuf> {
        self.programs.get(program).cloned()
    }
}

/// Mock config provider for testing
pub struct MockConfigProvider {
    pub app_config: AppConfig,
}

impl MockConfigProvider {
    pub fn new(app_config: AppConfig) -> Self {
        Self { app_config }
    }
}

impl ConfigProvider for MockConfigProvider {
    fn app_config(&self) -> &AppConfig {
        &self.app_config
    }
}

/// Mock command session for testing
pub struct MockCommandSession {
    pub display_provider: MockDisplayProvider,
    pub filesystem_provider: MockFileSystemProvider,
    pub process_provider: MockProcessProvider,
    pub config_provider: MockConfigProvider,
}

impl MockCommandSession {
    /// Session rooted at `/test/workdir`, which is also the engine root
    pub fn new() -> Self {
        let app_config = AppConfig {
            workdir: Some(PathBuf::from("/test/workdir")),
            ..AppConfig::default()
        };
        Self {
            display_provider: MockDisplayProvider::new(),
            filesystem_provider: MockFileSystemProvider::new(),
            process_provider: MockProcessProvider::new(),
            config_provider: MockConfigProvider::new(app_config),
        }
    }

    pub fn with_filesystem(mut self, filesystem: MockFileSystemProvider) -> Self {
        self.filesystem_provider = filesystem;
        self
    }

    pub fn with_process(mut self, process: MockProcessProvider) -> Self {
        self.process_provider = process;
        self
    }

    pub fn with_config(mut self, config: MockConfigProvider) -> Self {
        self.config_provider = config;
        self
    }
}

impl Default for MockCommandSession {
    fn default() -> Self {
        Self::new()
    }
}

impl Session for MockCommandSession {
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
    use super::*;

    #[test]
    fn test_with_file_creates_ancestors() {
        let fs = MockFileSystemProvider::new().with_file("/a/b/c.txt", "hi");
        assert!(fs.is_directory(Path::new("/a/b")));
        assert!(fs.is_directory(Path::new("/a")));
        assert_eq!(fs.read_to_string(Path::new("/a/b/c.txt")).unwrap(), "hi");
    }

    #[test]
    fn test_write_requires_parent() {
        let fs = MockFileSystemProvider::new();
        let err = fs.write_file(Path::new("/missing/x.ini"), "x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_move_dir_rekeys_tree() {
        let fs = MockFileSystemProvider::new()
            .with_file("/s/Win64/x/a.pak", "a")
            .with_file("/s/Win64/x/y/b.pak", "b");
        fs.move_dir(Path::new("/s/Win64/x"), Path::new("/s/Temp")).unwrap();

        assert!(fs.is_file(Path::new("/s/Temp/a.pak")));
        assert!(fs.is_file(Path::new("/s/Temp/y/b.pak")));
        assert!(fs.is_directory(Path::new("/s/Temp/y")));
        assert!(!fs.exists(Path::new("/s/Win64/x")));
        assert!(fs.is_directory(Path::new("/s/Win64")));
    }

    #[test]
    fn test_list_dirs_excludes_root() {
        let fs = MockFileSystemProvider::new()
            .with_file("/m/a/x.pak", "x")
            .with_dir("/m/empty");
        assert_eq!(
            fs.list_dirs(Path::new("/m")).unwrap(),
            vec![PathBuf::from("/m/a"), PathBuf::from("/m/empty")]
        );
    }

    #[test]
    fn test_move_dir_refuses_existing_destination() {
        let fs = MockFileSystemProvider::new()
            .with_dir("/s/from")
            .with_dir("/s/to");
        let err = fs.move_dir(Path::new("/s/from"), Path::new("/s/to")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }

    #[test]
    fn test_copy_file_does_not_overwrite() {
        let fs = MockFileSystemProvider::new()
            .with_file("/m/meta.json", "new")
            .with_file("/out/metadata.json", "old");
        let err = fs
            .copy_file(Path::new("/m/meta.json"), Path::new("/out/metadata.json"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs.file_content(Path::new("/out/metadata.json")).unwrap(), "old");
    }

    #[test]
    fn test_created_file_commits_on_drop() {
        let fs = MockFileSystemProvider::new().with_dir("/out");
        {
            let mut handle = fs.create_file(Path::new("/out/x.bin")).unwrap();
            handle.write_all(b"abc").unwrap();
        }
        assert_eq!(fs.file_bytes(Path::new("/out/x.bin")).unwrap(), b"abc");
    }

    #[test]
    fn test_read_only_paths_reject_writes() {
        let fs = MockFileSystemProvider::new()
            .with_dir("/locked")
            .with_read_only("/locked");
        let err = fs.write_file(Path::new("/locked/a"), "x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_process_spy_and_scripted_failure() {
        let process = MockProcessProvider::new().with_failure_on("-cook", 3, "boom");
        let ok = process
            .execute(Path::new("/uat"), &["-stage".to_string()], Path::new("/"))
            .unwrap();
        let failed = process
            .execute(Path::new("/uat"), &["-cook".to_string()], Path::new("/"))
            .unwrap();

        assert!(ok.success);
        assert!(!failed.success);
        assert_eq!(failed.exit_code, Some(3));
        assert_eq!(process.get_calls().len(), 2);
        assert_eq!(process.get_calls_with_arg("-cook").len(), 1);
    }

    #[test]
    fn test_process_side_effect_writes_shared_tree() {
        let fs = MockFileSystemProvider::new();
        let handle = fs.clone();
        let process = MockProcessProvider::new()
            .with_side_effect("-stage", move |_| handle.add_file("/staged/a.pak", "pak"));

        process
            .execute(Path::new("/uat"), &["-stage".to_string()], Path::new("/"))
            .unwrap();
        assert!(fs.is_file(Path::new("/staged/a.pak")));
    }
}
