//! Hermetic test environment for E2E testing
//!
//! Builds an engine root in a temporary directory with a project, a content
//! plugin and a mock `RunUAT.sh`. The mock logs every invocation and, on the
//! stage step, writes pak files where the real toolchain would stage them.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use ugcpak_lib::application::config::AppConfig;
use ugcpak_lib::application::session::{
    CommandSession, LiveConfigProvider, LiveFileSystemProvider, LiveProcessProvider,
};

/// Project name used by every environment
pub const PROJECT: &str = "Pavlov";

const UAT_TEMPLATE: &str = r#"#!/bin/bash
# Mock automation tool, calls are logged to @LOG@
echo "$*" >> "@LOG@"

stagedir=""; dlc=""; plat=""; project=""
for arg in "$@"; do
  case "$arg" in
    -stagingdirectory=*) stagedir="${arg#*=}" ;;
    -dlcname=*) dlc="${arg#*=}" ;;
    -project=*) project="${arg#*=}" ;;
    -platform=Win64) plat="Windows" ;;
    -platform=Android) plat="Android" ;;
    -server) plat="LinuxServer" ;;
  esac
done
echo "BuildCookRun $dlc for $plat"

@FAIL@

for arg in "$@"; do
  case "$arg" in
    -cook)
      if grep -qi "ExcludedFolderPaths=/$dlc/" "$(dirname "$project")/Config/UserEditor.ini" 2>/dev/null; then
        echo "cook saw patch" >> "@LOG@"
      fi ;;
    -stage)
      out="$stagedir/$plat/$(basename "$project" .uproject)/Plugins/$dlc/Content/Paks/$plat"
      mkdir -p "$out"
      echo "pak" > "$out/$dlc-$plat.pak"
      echo "toc" > "$out/$dlc-$plat.utoc" ;;
  esac
done
exit 0
"#;

/// How the mock automation tool behaves
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockUatBehavior {
    /// Every stage succeeds
    Succeed,
    /// The call carrying `flag` prints `error` and exits 1
    FailOn { flag: String, error: String },
}

/// Hermetic test environment with a mock automation tool
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    /// Engine root: holds Engine/ and the project
    pub engine_root: PathBuf,
    /// Working directory for relative parameters
    pub work_path: PathBuf,
    pub uat_log: PathBuf,
}

impl TestEnvironment {
    /// Environment with one content plugin named `plugin`
    pub fn new(plugin: &str, behavior: MockUatBehavior) -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().to_path_buf();
        let engine_root = root.join("engine");
        let work_path = root.join("work");
        let uat_log = root.join("uat.log");

        fs::create_dir_all(&work_path)?;
        let env = Self {
            temp_dir,
            engine_root,
            work_path,
            uat_log,
        };

        env.write(&env.project_file(), "{}")?;
        env.write(
            &env.plugin_path(plugin),
            &format!(r#"{{"FriendlyName":"{plugin}","VersionName":"1.0","CanContainContent":true}}"#),
        )?;
        fs::create_dir_all(env.project_dir().join("Config"))?;
        env.install_uat(&behavior)?;
        Ok(env)
    }

    fn install_uat(&self, behavior: &MockUatBehavior) -> Result<()> {
        let fail_block = match behavior {
            MockUatBehavior::Succeed => String::new(),
            MockUatBehavior::FailOn { flag, error } => format!(
                "for arg in \"$@\"; do\n  if [ \"$arg\" = \"{flag}\" ]; then echo '{error}' >&2; exit 1; fi\ndone"
            ),
        };
        let log = self.uat_log.to_string_lossy();
        let script = UAT_TEMPLATE
            .replace("@LOG@", &log)
            .replace("@FAIL@", &fail_block);

        let path = self.uat_path();
        self.write(&path, &script)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&path)?.permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&path, perms)?;
        }
        Ok(())
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content).with_context(|| format!("writing {}", path.display()))
    }

    pub fn uat_path(&self) -> PathBuf {
        self.engine_root.join("Engine/Build/BatchFiles/RunUAT.sh")
    }

    pub fn project_dir(&self) -> PathBuf {
        self.engine_root.join(PROJECT)
    }

    pub fn project_file(&self) -> PathBuf {
        self.project_dir().join(format!("{PROJECT}.uproject"))
    }

    pub fn plugin_path(&self, plugin: &str) -> PathBuf {
        self.project_dir()
            .join("Plugins")
            .join(plugin)
            .join(format!("{plugin}.uplugin"))
    }

    pub fn editor_ini(&self) -> PathBuf {
        self.project_dir().join("Config/UserEditor.ini")
    }

    pub fn stage_root(&self) -> PathBuf {
        self.project_dir().join("Saved/StagedBuilds")
    }

    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            workdir: Some(self.work_path.clone()),
            engine_root: Some(self.engine_root.clone()),
            uat: Some(self.uat_path()),
            ..AppConfig::default()
        }
    }

    /// Production session wired to this environment
    pub fn session(
        &self,
    ) -> CommandSession<LiveFileSystemProvider, LiveProcessProvider, LiveConfigProvider> {
        CommandSession::new_with_providers(
            LiveFileSystemProvider,
            LiveProcessProvider::new(),
            LiveConfigProvider::new(self.app_config()),
        )
    }

    /// Logged automation tool calls, one argument line per call
    pub fn uat_calls(&self) -> Result<Vec<String>> {
        if !self.uat_log.exists() {
            return Ok(Vec::new());
        }
        Ok(fs::read_to_string(&self.uat_log)?
            .lines()
            .filter(|line| line.starts_with("BuildCookRun"))
            .map(str::to_string)
            .collect())
    }

    /// Whether the cook ran with the nativization exclusion in place
    pub fn cook_saw_patch(&self) -> Result<bool> {
        if !self.uat_log.exists() {
            return Ok(false);
        }
        Ok(fs::read_to_string(&self.uat_log)?
            .lines()
            .any(|line| line == "cook saw patch"))
    }
}
