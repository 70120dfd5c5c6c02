//! E2E tests for the build command
//!
//! Runs the full pipeline on a real filesystem against a mock automation
//! tool script.
#![cfg(unix)]

use anyhow::Result;
use std::fs::{self, File};
use std::io::Read;
use ugcpak_lib::application::cli::Commands;
use ugcpak_lib::application::commands::execute_command_with_session;
use ugcpak_lib::{PakError, PakErrorKind};
use ugcpak_tests::{MockUatBehavior, TestEnvironment};

fn build(params: &[String]) -> Commands {
    Commands::Build {
        params: params.to_vec(),
    }
}

fn params(env: &TestEnvironment, platform: &str) -> Vec<String> {
    vec![
        format!("-PluginPath={}", env.plugin_path("MyMod").display()),
        format!("-Platform={platform}"),
        "-PlatformDir=PC".to_string(),
    ]
}

#[tokio::test]
async fn e2e_windows_deploy_produces_directory_and_zip() -> Result<()> {
    let env = TestEnvironment::new("MyMod", MockUatBehavior::Succeed)?;
    let session = env.session();

    execute_command_with_session(build(&params(&env, "Windows")), &session).await?;

    let mod_dir = env.stage_root().join("PC/MyMod");
    assert!(mod_dir.join("MyMod-Windows.pak").is_file());
    assert!(mod_dir.join("MyMod-Windows.utoc").is_file());
    assert!(!env.stage_root().join("Windows").exists());
    assert!(!env.stage_root().join("Temp").exists());

    let mut archive = zip::ZipArchive::new(File::open(env.stage_root().join("PC/MyMod.zip"))?)?;
    let mut names: Vec<_> = archive.file_names().map(str::to_string).collect();
    names.sort();
    assert_eq!(names, vec!["MyMod-Windows.pak", "MyMod-Windows.utoc"]);
    let mut pak = String::new();
    archive.by_name("MyMod-Windows.pak")?.read_to_string(&mut pak)?;
    assert_eq!(pak.trim(), "pak");

    let calls = env.uat_calls()?;
    assert_eq!(calls.len(), 5);
    for (call, flag) in calls.iter().zip(["-cook", "-stage", "-package", "-archive", "-deploy"]) {
        assert!(call.split_whitespace().any(|a| a == flag), "{call}");
        assert!(call.contains("-platform=Win64"));
        assert!(call.contains("-dlcname=MyMod"));
        assert!(call.contains("-basedonreleaseversion=PavlovMod_1.0.0"));
    }

    assert!(env.cook_saw_patch()?);
    assert!(!env.editor_ini().exists());
    Ok(())
}

#[tokio::test]
async fn e2e_linux_build_relocates_linux_server_output() -> Result<()> {
    let env = TestEnvironment::new("MyMod", MockUatBehavior::Succeed)?;
    let session = env.session();

    execute_command_with_session(build(&params(&env, "Linux")), &session).await?;

    let mod_dir = env.stage_root().join("PC/MyMod");
    assert!(mod_dir.join("MyMod-LinuxServer.pak").is_file());
    assert!(!env.stage_root().join("LinuxServer").exists());

    let calls = env.uat_calls()?;
    assert!(calls.iter().all(|c| c.contains("-server") && c.contains("-serverplatform=Linux")));
    assert!(calls.iter().all(|c| !c.contains("-platform=")));
    Ok(())
}

#[tokio::test]
async fn e2e_stage_mode_writes_data_and_metadata_without_zip() -> Result<()> {
    let env = TestEnvironment::new("MyMod", MockUatBehavior::Succeed)?;
    let metadata = env.work_path.join("meta.json");
    fs::write(&metadata, r#"{"title":"My Mod"}"#)?;
    let session = env.session();

    let mut args = params(&env, "Android");
    args.push("-Stage=True".to_string());
    // Relative to the working directory
    args.push("-MetaDataPath=meta.json".to_string());
    execute_command_with_session(build(&args), &session).await?;

    let package = env.stage_root().join("MyMod");
    assert!(package.join("Data/MyMod-Android.pak").is_file());
    assert_eq!(
        fs::read_to_string(package.join("metadata.json"))?,
        r#"{"title":"My Mod"}"#
    );
    assert!(!env.stage_root().join("MyMod.zip").exists());
    assert!(!package.join("Data.zip").exists());
    assert!(!env.stage_root().join("PC").exists());
    Ok(())
}

#[tokio::test]
async fn e2e_stage_mode_rebuild_with_metadata_succeeds() -> Result<()> {
    let env = TestEnvironment::new("MyMod", MockUatBehavior::Succeed)?;
    let metadata = env.work_path.join("meta.json");
    let session = env.session();

    let mut args = params(&env, "Windows");
    args.push("-Stage=True".to_string());
    args.push(format!("-MetaDataPath={}", metadata.display()));

    fs::write(&metadata, r#"{"rev":1}"#)?;
    execute_command_with_session(build(&args), &session).await?;
    fs::write(&metadata, r#"{"rev":2}"#)?;
    execute_command_with_session(build(&args), &session).await?;

    let package = env.stage_root().join("MyMod");
    assert!(package.join("Data/MyMod-Windows.pak").is_file());
    assert_eq!(fs::read_to_string(package.join("metadata.json"))?, r#"{"rev":2}"#);
    assert_eq!(env.uat_calls()?.len(), 10);
    Ok(())
}

#[tokio::test]
async fn e2e_rebuild_replaces_previous_output() -> Result<()> {
    let env = TestEnvironment::new("MyMod", MockUatBehavior::Succeed)?;
    let session = env.session();

    execute_command_with_session(build(&params(&env, "Windows")), &session).await?;
    fs::write(env.stage_root().join("PC/MyMod/stale.txt"), "old")?;

    execute_command_with_session(build(&params(&env, "Windows")), &session).await?;

    assert!(!env.stage_root().join("PC/MyMod/stale.txt").exists());
    let archive = zip::ZipArchive::new(File::open(env.stage_root().join("PC/MyMod.zip"))?)?;
    assert_eq!(archive.len(), 2);
    Ok(())
}

#[tokio::test]
async fn e2e_cook_failure_restores_editor_config() -> Result<()> {
    let env = TestEnvironment::new(
        "MyMod",
        MockUatBehavior::FailOn {
            flag: "-cook".to_string(),
            error: "ERROR: cook failed".to_string(),
        },
    )?;
    let session = env.session();

    let err = execute_command_with_session(build(&params(&env, "Windows")), &session)
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("Cook stage failed"));
    assert!(format!("{err:#}").contains("ERROR: cook failed"));
    assert!(!env.editor_ini().exists());
    assert_eq!(env.uat_calls()?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn e2e_existing_editor_config_is_kept() -> Result<()> {
    let env = TestEnvironment::new("MyMod", MockUatBehavior::Succeed)?;
    fs::write(env.editor_ini(), "[/Script/UnrealEd.EditorLoadingSavingSettings]\nbMonitorContentDirectories=False\n")?;
    let session = env.session();

    execute_command_with_session(build(&params(&env, "Windows")), &session).await?;

    let ini = fs::read_to_string(env.editor_ini())?;
    assert!(ini.starts_with("[/Script/UnrealEd.EditorLoadingSavingSettings]\nbMonitorContentDirectories=False\n"));
    assert!(ini.contains("+ExcludedFolderPaths=/MyMod/"));
    assert!(env.cook_saw_patch()?);
    Ok(())
}

#[tokio::test]
async fn e2e_missing_platform_dir_runs_nothing() -> Result<()> {
    let env = TestEnvironment::new("MyMod", MockUatBehavior::Succeed)?;
    let session = env.session();

    let args = vec![
        format!("-PluginPath={}", env.plugin_path("MyMod").display()),
        "-Platform=Windows".to_string(),
    ];
    let err = execute_command_with_session(build(&args), &session)
        .await
        .unwrap_err();

    let pak = err.downcast_ref::<PakError>().expect("pipeline error");
    assert_eq!(pak.kind(), PakErrorKind::MissingArgument);
    assert!(env.uat_calls()?.is_empty());
    assert!(!env.editor_ini().exists());
    Ok(())
}

#[tokio::test]
async fn e2e_missing_plugin_is_reported() -> Result<()> {
    let env = TestEnvironment::new("MyMod", MockUatBehavior::Succeed)?;
    let session = env.session();

    let args = vec![
        "-PluginPath=Nope/Nope.uplugin".to_string(),
        "-Platform=Windows".to_string(),
        "-PlatformDir=PC".to_string(),
    ];
    let err = execute_command_with_session(build(&args), &session)
        .await
        .unwrap_err();

    let pak = err.downcast_ref::<PakError>().expect("pipeline error");
    assert_eq!(pak.kind(), PakErrorKind::PluginNotFound);
    Ok(())
}
