//! End-to-end packaging run
//!
//! Resolve -> patch config -> Cook -> restore config -> remaining stages ->
//! relocate -> finalize. The first error ends the run; nothing already done
//! is rolled back.

use crate::application::session::Session;
use crate::logger;
use crate::primitives::LogContext;
use std::path::PathBuf;

use super::descriptor::PluginDescriptor;
use super::error::PakError;
use super::finalize::Finalizer;
use super::layout::StagingLayout;
use super::params::ParamSet;
use super::patcher::{ConfigPatch, editor_config_path};
use super::relocate::OutputRelocator;
use super::request::{BuildRequest, EnvironmentPaths, PluginIdentity};
use super::stages::{Stage, StageOrchestrator};

/// Stages plus relocation and finalization
const TOTAL_STEPS: usize = Stage::ALL.len() + 2;

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PakOutcome {
    pub identity: PluginIdentity,
    pub mod_dir: PathBuf,
    pub metadata_path: Option<PathBuf>,
    pub archive_path: Option<PathBuf>,
}

pub struct BuildPipeline<'a> {
    session: &'a dyn Session,
    env: EnvironmentPaths,
}

impl<'a> BuildPipeline<'a> {
    pub fn new(session: &'a dyn Session, env: EnvironmentPaths) -> Self {
        Self { session, env }
    }

    pub fn run(&self, params: &ParamSet) -> Result<PakOutcome, PakError> {
        let fs = self.session.filesystem();
        let display = self.session.display();

        let request = BuildRequest::resolve(params, &self.env, fs)?;
        let descriptor = PluginDescriptor::load(fs, &request.plugin_path)?;
        tracing::info!(
            identity = %request.identity,
            friendly_name = %descriptor.friendly_name,
            plugin_version = %descriptor.version_name,
            version = %request.version,
            platform = %request.target_platform,
            "resolved build request"
        );
        if !descriptor.can_contain_content {
            tracing::warn!(identity = %request.identity, "plugin descriptor does not declare CanContainContent");
        }
        if !request.map_to_cook.is_empty() {
            tracing::debug!(map = %request.map_to_cook, "MapToCook is accepted but not used");
        }

        // Fail on an impossible layout before spending time in the toolchain
        let layout = StagingLayout::compute(&request)?;

        display.status().section(&format!(
            "Packaging {} for {}",
            request.identity, request.target_platform
        ));

        let orchestrator = StageOrchestrator::new(
            self.session.process(),
            self.env.automation_tool.clone(),
            self.env.local_root.clone(),
            &request,
            layout.stage_root.clone(),
        );

        self.cook(&orchestrator, &request)?;
        orchestrator.run_sequence(&Stage::ALL[1..], |stage| {
            display
                .status()
                .step(stage.ordinal(), TOTAL_STEPS, &format!("{stage}"));
        })?;

        let mut context = LogContext::with_progress("relocate", TOTAL_STEPS as u64);
        context.set_progress(TOTAL_STEPS as u64 - 1);
        logger::step("Relocating staged content", &context);
        display
            .status()
            .step(TOTAL_STEPS - 1, TOTAL_STEPS, "Relocate");
        let mod_dir = OutputRelocator::new(fs).relocate(&layout)?;

        let mut context = LogContext::with_progress("finalize", TOTAL_STEPS as u64);
        context.set_progress(TOTAL_STEPS as u64);
        logger::step("Finalizing package", &context);
        display.status().step(TOTAL_STEPS, TOTAL_STEPS, "Finalize");
        let finalizer = Finalizer::new(fs);

        let metadata_path = request
            .metadata_path
            .as_deref()
            .map(|source| finalizer.copy_metadata(source, &layout.metadata_target()))
            .transpose()?;

        let archive_path = layout
            .archive_path
            .as_deref()
            .map(|archive| finalizer.compress(&mod_dir, archive))
            .transpose()?;

        Ok(PakOutcome {
            identity: request.identity,
            mod_dir,
            metadata_path,
            archive_path,
        })
    }

    /// Cook with the editor config patched, restoring it either way
    fn cook(
        &self,
        orchestrator: &StageOrchestrator<'_>,
        request: &BuildRequest,
    ) -> Result<(), PakError> {
        let fs = self.session.filesystem();
        self.session
            .display()
            .status()
            .step(Stage::Cook.ordinal(), TOTAL_STEPS, &Stage::Cook.to_string());

        let ini = editor_config_path(request.project_dir());
        let guard = ConfigPatch::exclude_plugin(&request.identity).apply(fs, &ini)?;
        let cooked = orchestrator.run(Stage::Cook);
        let restored = guard.restore();

        match (cooked, restored) {
            (Err(cook_err), Err(restore_err)) => {
                tracing::warn!("config patch not restored: {}", restore_err);
                Err(cook_err)
            }
            (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
            (Ok(()), Ok(())) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    include!("pipeline.test.rs");
}
