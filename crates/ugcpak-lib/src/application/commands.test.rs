use super::*;
use crate::application::session_mocks::{
    MockCommandSession, MockFileSystemProvider, MockProcessProvider,
};
use crate::application::session::FileSystemProvider;
use crate::display::DisplayCall;
use crate::ugc::EnvironmentPaths;
use std::path::{Path, PathBuf};

const PLUGIN: &str = "/test/workdir/Pavlov/Plugins/MyMod/MyMod.uplugin";

fn build(params: &[&str]) -> Commands {
    Commands::Build {
        params: params.iter().map(|s| s.to_string()).collect(),
    }
}

fn project_fs() -> MockFileSystemProvider {
    MockFileSystemProvider::new()
        .with_file("/test/workdir/Pavlov/Pavlov.uproject", "{}")
        .with_file(PLUGIN, r#"{"FriendlyName":"My Mod","CanContainContent":true}"#)
        .with_dir("/test/workdir/Pavlov/Config")
}

fn staging_process(fs: &MockFileSystemProvider) -> MockProcessProvider {
    let handle = fs.clone();
    MockProcessProvider::new().with_side_effect("-stage", move |_| {
        handle.add_file(
            "/test/workdir/Pavlov/Saved/StagedBuilds/Windows/Pavlov/Plugins/MyMod/Content/Paks/Windows/MyMod.pak",
            "pak",
        );
    })
}

#[tokio::test]
async fn test_build_reports_outcome() {
    let fs = project_fs();
    let session = MockCommandSession::new()
        .with_filesystem(fs.clone())
        .with_process(staging_process(&fs));

    execute_command_with_session(
        build(&["-PluginPath=Pavlov/Plugins/MyMod/MyMod.uplugin", "-Platform=Windows", "-PlatformDir=PC"]),
        &session,
    )
    .await
    .unwrap();

    assert!(fs.is_file(Path::new("/test/workdir/Pavlov/Saved/StagedBuilds/PC/MyMod.zip")));
    assert!(session.display_provider.has_call(&DisplayCall::StatusSuccess {
        item: "MyMod".to_string(),
        details: "/test/workdir/Pavlov/Saved/StagedBuilds/PC/MyMod".to_string(),
    }));
    assert!(session.display_provider.has_call(&DisplayCall::StatusComplete {
        task: "Packaged MyMod".to_string(),
    }));

    let calls = session.process_provider.get_calls();
    assert_eq!(calls.len(), 5);
    assert_eq!(
        calls[0].program,
        EnvironmentPaths::default_automation_tool(Path::new("/test/workdir"))
    );
}

#[tokio::test]
async fn test_build_failure_names_stage() {
    let fs = project_fs();
    let session = MockCommandSession::new()
        .with_filesystem(fs)
        .with_process(MockProcessProvider::new().with_failure_on("-cook", 1, "bad asset"));

    let err = execute_command_with_session(
        build(&[&format!("-PluginPath={PLUGIN}"), "-Platform=Windows", "-PlatformDir=PC"]),
        &session,
    )
    .await
    .unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("UGC build failed"));
    assert!(message.contains("Cook stage failed"));
    assert!(message.contains("bad asset"));
    assert_eq!(session.display_provider.count_calls("error"), 1);
}

#[tokio::test]
async fn test_build_without_params_reports_missing_argument() {
    let session = MockCommandSession::new();
    let err = execute_command_with_session(build(&[]), &session)
        .await
        .unwrap_err();

    let pak = err.downcast_ref::<crate::ugc::PakError>().unwrap();
    assert_eq!(pak.kind(), crate::ugc::PakErrorKind::MissingArgument);
    assert!(format!("{err:#}").contains("PlatformDir"));
}

#[tokio::test]
async fn test_version_command() {
    let session = MockCommandSession::new();
    execute_command_with_session(Commands::Version, &session)
        .await
        .unwrap();

    assert!(session.display_provider.has_call(&DisplayCall::StatusEmphasis {
        text: format!("ugcpak {}", env!("CARGO_PKG_VERSION")),
    }));
}

#[tokio::test]
async fn test_requirements_reports_each_check() {
    let fs = project_fs();
    let session = MockCommandSession::new().with_filesystem(fs);

    execute_command_with_session(Commands::Requirements, &session)
        .await
        .unwrap();

    let calls = session.display_provider.get_calls();
    let checks: Vec<_> = calls
        .iter()
        .filter_map(|call| match call {
            DisplayCall::StatusToolCheck { tool, available, .. } => Some((tool.as_str(), *available)),
            _ => None,
        })
        .collect();
    assert_eq!(
        checks,
        vec![
            ("engine root", true),
            ("automation tool", false),
            ("default project", true)
        ]
    );
}

#[tokio::test]
async fn test_requirements_finds_launcher_on_path() {
    let launcher = EnvironmentPaths::default_automation_tool(Path::new("/test/workdir"));
    let name = launcher.file_name().unwrap().to_str().unwrap().to_string();
    let session = MockCommandSession::new()
        .with_process(MockProcessProvider::new().with_program(&name, PathBuf::from("/usr/bin").join(&name)));

    execute_command_with_session(Commands::Requirements, &session)
        .await
        .unwrap();

    assert!(session.display_provider.get_calls().iter().any(|call| matches!(
        call,
        DisplayCall::StatusToolCheck { tool, available: true, .. } if tool == "automation tool"
    )));
}
