use super::*;
use crate::application::session_mocks::{
    MockCommandSession, MockFileSystemProvider, MockProcessProvider,
};
use crate::application::session::FileSystemProvider;
use crate::ugc::PakErrorKind;
use std::cell::Cell;
use std::io::Cursor;
use std::path::Path;
use std::rc::Rc;

const PLUGIN: &str = "/proj/Plugins/MyMod/MyMod.uplugin";
const INI: &str = "/proj/Config/UserEditor.ini";
const DESCRIPTOR: &str = r#"{"FriendlyName":"My Mod","VersionName":"1.0","CanContainContent":true}"#;

fn env() -> EnvironmentPaths {
    EnvironmentPaths {
        workdir: PathBuf::from("/test/workdir"),
        local_root: PathBuf::from("/engine"),
        automation_tool: PathBuf::from("/engine/Engine/Build/BatchFiles/RunUAT.sh"),
    }
}

fn project_fs() -> MockFileSystemProvider {
    MockFileSystemProvider::new()
        .with_file("/proj/Pavlov.uproject", "{}")
        .with_file(PLUGIN, DESCRIPTOR)
        .with_dir("/proj/Config")
}

fn params(platform: &str) -> ParamSet {
    ParamSet::new()
        .with("PluginPath", PLUGIN)
        .with("Platform", platform)
        .with("PlatformDir", "PC")
        .with("Project", "/proj/Pavlov.uproject")
        .with("StagingDirectory", "/stage")
}

fn staged_content(platform: &str) -> PathBuf {
    PathBuf::from(format!(
        "/stage/{platform}/Pavlov/Plugins/MyMod/Content/Paks/{platform}"
    ))
}

/// Toolchain that writes pak output when the stage step runs
fn staging_process(fs: &MockFileSystemProvider, staged_platform: &str) -> MockProcessProvider {
    let handle = fs.clone();
    let content = staged_content(staged_platform);
    MockProcessProvider::new().with_side_effect("-stage", move |_| {
        handle.add_file(content.join("MyMod.pak"), "pak");
        handle.add_file(content.join("MyMod.utoc"), "toc");
    })
}

fn zip_names(fs: &MockFileSystemProvider, path: &Path) -> Vec<String> {
    let bytes = fs.file_bytes(path).expect("archive");
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

#[test]
fn test_windows_deploy_produces_directory_and_archive() {
    let fs = project_fs();
    let ini_seen_during_cook = Rc::new(Cell::new(false));
    let seen = Rc::clone(&ini_seen_during_cook);
    let ini_view = fs.clone();
    let process = staging_process(&fs, "Windows").with_side_effect("-cook", move |_| {
        let content = ini_view.file_content(Path::new(INI)).unwrap_or_default();
        seen.set(content.contains("+ExcludedFolderPaths=/MyMod/"));
    });
    let session = MockCommandSession::new()
        .with_filesystem(fs.clone())
        .with_process(process);

    let outcome = BuildPipeline::new(&session, env())
        .run(&params("Windows"))
        .unwrap();

    assert_eq!(outcome.identity.as_str(), "MyMod");
    assert_eq!(outcome.mod_dir, PathBuf::from("/stage/PC/MyMod"));
    assert_eq!(outcome.archive_path, Some(PathBuf::from("/stage/PC/MyMod.zip")));
    assert_eq!(outcome.metadata_path, None);

    assert!(ini_seen_during_cook.get());
    assert!(!fs.exists(Path::new(INI)));

    assert_eq!(
        fs.list_files(Path::new("/stage/PC/MyMod")).unwrap(),
        vec![
            PathBuf::from("/stage/PC/MyMod/MyMod.pak"),
            PathBuf::from("/stage/PC/MyMod/MyMod.utoc")
        ]
    );
    assert_eq!(
        zip_names(&fs, Path::new("/stage/PC/MyMod.zip")),
        vec!["MyMod.pak", "MyMod.utoc"]
    );
    assert!(!fs.exists(Path::new("/stage/Windows")));
    assert!(!fs.exists(Path::new("/stage/Temp")));

    let calls = session.process_provider.get_calls();
    assert_eq!(calls.len(), 5);
    assert!(calls.iter().all(|c| c.has_arg("-platform=Win64")));
    assert!(calls.iter().all(|c| c.working_dir == Path::new("/engine")));
    assert_eq!(session.display_provider.count_calls("step"), 7);
}

#[test]
fn test_linux_uses_server_descriptor_and_linux_server_tree() {
    let fs = project_fs();
    let session = MockCommandSession::new()
        .with_filesystem(fs.clone())
        .with_process(staging_process(&fs, "LinuxServer"));

    let outcome = BuildPipeline::new(&session, env())
        .run(&params("Linux"))
        .unwrap();

    assert_eq!(outcome.mod_dir, PathBuf::from("/stage/PC/MyMod"));
    assert!(fs.is_file(Path::new("/stage/PC/MyMod/MyMod.pak")));
    assert!(!fs.exists(Path::new("/stage/LinuxServer")));

    let calls = session.process_provider.get_calls();
    assert!(calls.iter().all(|c| c.has_arg("-server") && c.has_arg("-serverplatform=Linux")));
}

#[test]
fn test_stage_mode_with_metadata_skips_archive() {
    let fs = project_fs().with_file("/tmp/meta.json", r#"{"id":1}"#);
    let session = MockCommandSession::new()
        .with_filesystem(fs.clone())
        .with_process(staging_process(&fs, "Windows"));

    let outcome = BuildPipeline::new(&session, env())
        .run(
            &params("Windows")
                .with("Stage", "True")
                .with("MetaDataPath", "/tmp/meta.json"),
        )
        .unwrap();

    assert_eq!(outcome.mod_dir, PathBuf::from("/stage/MyMod/Data"));
    assert_eq!(
        outcome.metadata_path,
        Some(PathBuf::from("/stage/MyMod/metadata.json"))
    );
    assert_eq!(outcome.archive_path, None);
    assert!(fs.is_file(Path::new("/stage/MyMod/Data/MyMod.pak")));
    assert_eq!(
        fs.file_content(Path::new("/stage/MyMod/metadata.json")).unwrap(),
        r#"{"id":1}"#
    );
    assert!(!fs.file_paths().iter().any(|p| p.extension().is_some_and(|e| e == "zip")));
}

#[test]
fn test_stage_mode_rebuild_with_metadata_replaces_previous_package() {
    let fs = project_fs().with_file("/tmp/meta.json", r#"{"id":1}"#);
    let session = MockCommandSession::new()
        .with_filesystem(fs.clone())
        .with_process(staging_process(&fs, "Windows"));
    let stage_params = params("Windows")
        .with("Stage", "True")
        .with("MetaDataPath", "/tmp/meta.json");

    BuildPipeline::new(&session, env()).run(&stage_params).unwrap();
    fs.add_file("/tmp/meta.json", r#"{"id":2}"#);
    let outcome = BuildPipeline::new(&session, env()).run(&stage_params).unwrap();

    assert_eq!(
        outcome.metadata_path,
        Some(PathBuf::from("/stage/MyMod/metadata.json"))
    );
    assert_eq!(
        fs.file_content(Path::new("/stage/MyMod/metadata.json")).unwrap(),
        r#"{"id":2}"#
    );
    assert!(fs.is_file(Path::new("/stage/MyMod/Data/MyMod.pak")));
}

#[test]
fn test_uploader_mode_delivers_raw_directory() {
    let fs = project_fs();
    let session = MockCommandSession::new()
        .with_filesystem(fs.clone())
        .with_process(staging_process(&fs, "Android"));

    let outcome = BuildPipeline::new(&session, env())
        .run(&params("Android").with("ModioUploader", "True"))
        .unwrap();

    assert_eq!(outcome.archive_path, None);
    assert!(!fs.exists(Path::new("/stage/PC/MyMod.zip")));
    assert!(fs.is_file(Path::new("/stage/PC/MyMod/MyMod.pak")));
}

#[test]
fn test_only_literal_true_enables_stage_mode() {
    let fs = project_fs();
    let session = MockCommandSession::new()
        .with_filesystem(fs.clone())
        .with_process(staging_process(&fs, "Windows"));

    let outcome = BuildPipeline::new(&session, env())
        .run(&params("Windows").with("Stage", "true"))
        .unwrap();
    assert_eq!(outcome.mod_dir, PathBuf::from("/stage/PC/MyMod"));
    assert!(outcome.archive_path.is_some());
}

#[test]
fn test_cook_failure_restores_config_and_stops() {
    let fs = project_fs();
    let process = MockProcessProvider::new().with_failure_on("-cook", 25, "Cook failed");
    let session = MockCommandSession::new()
        .with_filesystem(fs.clone())
        .with_process(process);

    let err = BuildPipeline::new(&session, env())
        .run(&params("Windows"))
        .unwrap_err();

    assert!(matches!(
        err,
        PakError::ExternalStageFailure { stage: Stage::Cook, .. }
    ));
    assert!(!fs.exists(Path::new(INI)));
    assert_eq!(session.process_provider.get_calls().len(), 1);
}

#[test]
fn test_preexisting_config_keeps_added_entry() {
    let fs = project_fs().with_file(INI, "[Other]\nA=1\n");
    let session = MockCommandSession::new()
        .with_filesystem(fs.clone())
        .with_process(staging_process(&fs, "Windows"));

    BuildPipeline::new(&session, env())
        .run(&params("Windows"))
        .unwrap();

    let content = fs.file_content(Path::new(INI)).unwrap();
    assert!(content.starts_with("[Other]\nA=1\n"));
    assert!(content.contains("[BlueprintNativizationSettings]\n+ExcludedFolderPaths=/MyMod/"));
}

#[test]
fn test_later_stage_failure_aborts_before_relocation() {
    let fs = project_fs();
    let session = MockCommandSession::new()
        .with_filesystem(fs.clone())
        .with_process(staging_process(&fs, "Windows").with_failure_on("-archive", 1, "disk full"));

    let err = BuildPipeline::new(&session, env())
        .run(&params("Windows"))
        .unwrap_err();

    assert!(matches!(
        err,
        PakError::ExternalStageFailure { stage: Stage::Archive, .. }
    ));
    assert_eq!(session.process_provider.get_calls().len(), 4);
    // Staged output stays where the toolchain left it
    assert!(fs.is_directory(&staged_content("Windows")));
    assert!(!fs.exists(Path::new("/stage/PC")));
}

#[test]
fn test_missing_staged_output_is_relocation_failure() {
    let session = MockCommandSession::new().with_filesystem(project_fs());
    let err = BuildPipeline::new(&session, env())
        .run(&params("Windows"))
        .unwrap_err();
    assert_eq!(err.kind(), PakErrorKind::RelocationFailure);
}

#[test]
fn test_validation_errors_run_no_stage() {
    let session = MockCommandSession::new().with_filesystem(project_fs());
    let pipeline = BuildPipeline::new(&session, env());

    let err = pipeline.run(&ParamSet::new()).unwrap_err();
    assert!(matches!(err, PakError::MissingArgument { name: "PlatformDir" }));

    let err = pipeline
        .run(&ParamSet::new().with("PlatformDir", "PC"))
        .unwrap_err();
    assert!(matches!(err, PakError::MissingArgument { name: "Platform" }));

    let err = pipeline.run(&params("Mac")).unwrap_err();
    assert_eq!(err.kind(), PakErrorKind::InvalidPlatform);

    let err = pipeline
        .run(&params("Windows").with("PluginPath", "/proj/Plugins/Nope/Nope.uplugin"))
        .unwrap_err();
    assert_eq!(err.kind(), PakErrorKind::PluginNotFound);

    assert!(session.process_provider.get_calls().is_empty());
}

#[test]
fn test_plugin_outside_project_fails_before_toolchain() {
    let fs = project_fs().with_file("/elsewhere/MyMod/MyMod.uplugin", DESCRIPTOR);
    let session = MockCommandSession::new().with_filesystem(fs);

    let err = BuildPipeline::new(&session, env())
        .run(&params("Windows").with("PluginPath", "/elsewhere/MyMod/MyMod.uplugin"))
        .unwrap_err();
    assert_eq!(err.kind(), PakErrorKind::RelocationFailure);
    assert!(session.process_provider.get_calls().is_empty());
}
