//! Command execution handlers
//!
//! Session-based command execution: each handler receives the session and
//! reaches the filesystem, the automation tool and the terminal only
//! through its providers.

use crate::application::session::{CommandSession, Session};
use crate::application::{CliConfig, Commands};
use crate::ugc::{BuildPipeline, ParamSet, PakOutcome};
use anyhow::{Context, Result};

/// Execute CLI commands using the session-based architecture
pub async fn execute_command(config: CliConfig) -> Result<()> {
    // Create command session (owns all ephemeral state)
    let session = CommandSession::new(config.app_config);

    let command = match config.command {
        Some(cmd) => cmd,
        None => {
            session
                .display()
                .status()
                .message("ugcpak - UGC plugin packaging");
            session
                .display()
                .status()
                .subtle("Run 'ugcpak --help' for usage information");
            return Ok(());
        }
    };

    execute_command_with_session(command, &session).await
}

/// Execute a specific command with a provided session (for testing)
pub async fn execute_command_with_session(command: Commands, session: &dyn Session) -> Result<()> {
    match command {
        Commands::Requirements => handle_requirements(session).await,
        Commands::Version => handle_version(session).await,
        Commands::Build { params } => handle_build(session, params).await,
    }
}

async fn handle_requirements(session: &dyn Session) -> Result<()> {
    let env = session
        .config()
        .app_config()
        .environment_paths()
        .context("Failed to resolve environment paths")?;
    let fs = session.filesystem();
    let status = session.display().status();

    status.section("Checking packaging environment");

    let engine_root_ok = fs.is_directory(&env.local_root);
    status.tool_check(
        "engine root",
        engine_root_ok,
        &env.local_root.display().to_string(),
    );

    if fs.is_file(&env.automation_tool) {
        status.tool_check("automation tool", true, &env.automation_tool.display().to_string());
    } else {
        let on_path = env
            .automation_tool
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| session.process().which(name));
        match on_path {
            Some(path) => status.tool_check(
                "automation tool",
                true,
                &format!("{} (from PATH)", path.display()),
            ),
            None => {
                status.tool_check(
                    "automation tool",
                    false,
                    &format!("{} not found", env.automation_tool.display()),
                );
                status.subtle("   Set --uat or UGCPAK_UAT to the RunUAT launcher");
            }
        }
    }

    let default_project = env.default_project();
    let project_ok = fs.is_file(&default_project);
    status.tool_check(
        "default project",
        project_ok,
        &default_project.display().to_string(),
    );
    if !project_ok {
        status.subtle("   Pass -Project=<file> to build against another project");
    }

    Ok(())
}

async fn handle_version(session: &dyn Session) -> Result<()> {
    let status = session.display().status();
    status.emphasis(&format!("ugcpak {}", env!("CARGO_PKG_VERSION")));
    status.message("Cooks, stages and packages game plugins as UGC mods");
    status.message("");
    status.info(&format!("Target: {}", std::env::consts::ARCH));
    Ok(())
}

async fn handle_build(session: &dyn Session, raw_params: Vec<String>) -> Result<()> {
    let params = ParamSet::parse(&raw_params);
    let env = session
        .config()
        .app_config()
        .environment_paths()
        .context("Failed to resolve environment paths")?;

    tracing::debug!(params = params.len(), workdir = %env.workdir.display(), "starting UGC build");

    match BuildPipeline::new(session, env).run(&params) {
        Ok(outcome) => {
            report_outcome(session, &outcome);
            Ok(())
        }
        Err(e) => {
            session
                .display()
                .status()
                .error("UGC build failed", &e.to_string());
            Err(e).context("UGC build failed")
        }
    }
}

fn report_outcome(session: &dyn Session, outcome: &PakOutcome) {
    let status = session.display().status();
    status.success(
        outcome.identity.as_str(),
        &outcome.mod_dir.display().to_string(),
    );
    if let Some(metadata) = &outcome.metadata_path {
        status.info(&format!("Metadata: {}", metadata.display()));
    }
    match &outcome.archive_path {
        Some(archive) => status.success("archive", &archive.display().to_string()),
        None => status.subtle("   No archive produced (stage or uploader mode)"),
    }
    status.complete(&format!("Packaged {}", outcome.identity));
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
