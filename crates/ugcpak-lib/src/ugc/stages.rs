//! External build stages
//!
//! Each stage is one blocking `BuildCookRun` invocation of the automation
//! tool. Stages run strictly in order and the first failure ends the run.

use crate::application::session::ProcessProvider;
use crate::logger;
use crate::primitives::{LogContext, TargetDescriptor};
use std::fmt;
use std::path::{Path, PathBuf};

use super::error::PakError;
use super::request::BuildRequest;

/// Changelist sentinel: build without source control
pub const NO_CHANGELIST: i32 = -1;

/// Stderr lines quoted in a failure message
const FAILURE_TAIL_LINES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Cook,
    StageCopy,
    Package,
    Archive,
    Deploy,
}

impl Stage {
    /// Execution order
    pub const ALL: [Stage; 5] = [
        Stage::Cook,
        Stage::StageCopy,
        Stage::Package,
        Stage::Archive,
        Stage::Deploy,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Cook => "Cook",
            Stage::StageCopy => "Stage",
            Stage::Package => "Package",
            Stage::Archive => "Archive",
            Stage::Deploy => "Deploy",
        }
    }

    /// Position in [`Stage::ALL`], 1-based
    pub fn ordinal(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0) + 1
    }

    fn flags(&self) -> &'static [&'static str] {
        match self {
            Stage::Cook => &["-cook"],
            Stage::StageCopy => &["-skipcook", "-stage"],
            Stage::Package => &["-skipcook", "-skipstage", "-package"],
            Stage::Archive => &["-skipcook", "-skipstage", "-archive"],
            Stage::Deploy => &["-skipcook", "-skipstage", "-deploy"],
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Command line for one stage
pub fn stage_arguments(
    stage: Stage,
    request: &BuildRequest,
    stage_root: &Path,
    changelist: i32,
) -> Vec<String> {
    let mut args = vec![
        "BuildCookRun".to_string(),
        format!("-project={}", request.project_file.display()),
        "-noP4".to_string(),
        "-unattended".to_string(),
        "-utf8output".to_string(),
    ];

    match request.target_platform.descriptor() {
        TargetDescriptor::Client => {
            args.push(format!(
                "-platform={}",
                request.target_platform.automation_name()
            ));
        }
        TargetDescriptor::Server => {
            args.push("-server".to_string());
            args.push("-noclient".to_string());
            args.push(format!(
                "-serverplatform={}",
                request.target_platform.automation_name()
            ));
        }
    }

    args.extend(
        [
            "-pak",
            "-manifests",
            "-DLCIncludeEngineContent",
            "-SkipCookingEditorContent",
        ]
        .map(String::from),
    );
    args.push(format!("-dlcname={}", request.identity));
    args.push(format!("-basedonreleaseversion={}", request.release_baseline));
    args.push(format!("-stagingdirectory={}", stage_root.display()));

    if changelist >= 0 {
        args.push(format!("-cl={changelist}"));
    }

    args.extend(stage.flags().iter().map(|f| f.to_string()));
    if stage == Stage::Cook && !request.cook_directory.is_empty() {
        args.push(format!("-cookdir={}", request.cook_directory));
    }

    args
}

/// Runs the external stages for one request
pub struct StageOrchestrator<'a> {
    process: &'a dyn ProcessProvider,
    automation_tool: PathBuf,
    working_dir: PathBuf,
    request: &'a BuildRequest,
    stage_root: PathBuf,
    changelist: i32,
}

impl<'a> StageOrchestrator<'a> {
    pub fn new(
        process: &'a dyn ProcessProvider,
        automation_tool: PathBuf,
        working_dir: PathBuf,
        request: &'a BuildRequest,
        stage_root: PathBuf,
    ) -> Self {
        Self {
            process,
            automation_tool,
            working_dir,
            request,
            stage_root,
            changelist: NO_CHANGELIST,
        }
    }

    pub fn with_changelist(mut self, changelist: i32) -> Self {
        self.changelist = changelist;
        self
    }

    /// Run a single stage to completion
    pub fn run(&self, stage: Stage) -> Result<(), PakError> {
        let mut context = LogContext::with_progress(stage.name(), Stage::ALL.len() as u64);
        context.set_progress(stage.ordinal() as u64);
        let _span = crate::progress_span!(stage.name(), total = Stage::ALL.len()).entered();
        logger::step(&format!("Running {stage} stage"), &context);

        let args = stage_arguments(stage, self.request, &self.stage_root, self.changelist);
        tracing::debug!(tool = %self.automation_tool.display(), args = ?args, "invoking automation tool");

        let output = self
            .process
            .execute(&self.automation_tool, &args, &self.working_dir)
            .map_err(|e| PakError::ExternalStageFailure {
                stage,
                reason: format!("{e:#}"),
            })?;

        if !output.success {
            let code = output
                .exit_code
                .map(|c| format!("exit code {c}"))
                .unwrap_or_else(|| "terminated by signal".to_string());
            let tail = failure_tail(&output.stderr, &output.stdout);
            let reason = if tail.is_empty() {
                code
            } else {
                format!("{code}: {tail}")
            };
            return Err(PakError::ExternalStageFailure { stage, reason });
        }

        tracing::info!(stage = %stage, "stage completed");
        Ok(())
    }

    /// Run stages in the given order, stopping at the first failure.
    /// `on_start` sees each stage before it is launched.
    pub fn run_sequence(
        &self,
        stages: &[Stage],
        mut on_start: impl FnMut(Stage),
    ) -> Result<(), PakError> {
        stages.iter().try_for_each(|stage| {
            on_start(*stage);
            self.run(*stage)
        })
    }
}

fn failure_tail(stderr: &str, stdout: &str) -> String {
    let source = if stderr.trim().is_empty() { stdout } else { stderr };
    let lines: Vec<&str> = source.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(FAILURE_TAIL_LINES);
    lines[start..].join(" | ")
}

#[cfg(test)]
mod tests {
    include!("stages.test.rs");
}
