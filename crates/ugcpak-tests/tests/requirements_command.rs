//! E2E tests for the requirements command

use anyhow::Result;
use ugcpak_lib::application::cli::Commands;
use ugcpak_lib::application::commands::execute_command_with_session;
use ugcpak_lib::application::session::CommandSession;
use ugcpak_lib::application::session_mocks::{
    MockConfigProvider, MockFileSystemProvider, MockProcessProvider,
};
use ugcpak_tests::{MockUatBehavior, TestEnvironment};

#[tokio::test]
async fn e2e_requirements_on_complete_environment() -> Result<()> {
    let env = TestEnvironment::new("MyMod", MockUatBehavior::Succeed)?;
    let session = env.session();

    execute_command_with_session(Commands::Requirements, &session).await?;
    Ok(())
}

#[tokio::test]
async fn e2e_requirements_never_fails_on_missing_tools() -> Result<()> {
    let env = TestEnvironment::new("MyMod", MockUatBehavior::Succeed)?;
    let session = CommandSession::new_with_providers(
        MockFileSystemProvider::new(),
        MockProcessProvider::new(),
        MockConfigProvider::new(env.app_config()),
    );

    execute_command_with_session(Commands::Requirements, &session).await?;
    Ok(())
}
