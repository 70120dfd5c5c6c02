use super::*;
use crate::application::session_mocks::MockProcessProvider;
use crate::primitives::TargetPlatform;
use crate::ugc::{PakErrorKind, PluginIdentity};

fn request(platform: TargetPlatform) -> BuildRequest {
    let plugin_path = PathBuf::from("/proj/Plugins/MyMod/MyMod.uplugin");
    BuildRequest {
        version: "NOVERSION".to_string(),
        identity: PluginIdentity::from_plugin_path(&plugin_path).unwrap(),
        plugin_path,
        release_baseline: "PavlovMod_1.0.0".to_string(),
        cook_directory: String::new(),
        map_to_cook: String::new(),
        project_file: PathBuf::from("/proj/Pavlov.uproject"),
        stage_only: false,
        uploader_mode: false,
        target_platform: platform,
        platform_subdir: "PC".to_string(),
        metadata_path: None,
        staging_directory: None,
    }
}

fn orchestrator<'a>(
    process: &'a MockProcessProvider,
    request: &'a BuildRequest,
) -> StageOrchestrator<'a> {
    StageOrchestrator::new(
        process,
        PathBuf::from("/engine/RunUAT.sh"),
        PathBuf::from("/engine"),
        request,
        PathBuf::from("/stage"),
    )
}

#[test]
fn test_client_arguments() {
    let args = stage_arguments(
        Stage::Cook,
        &request(TargetPlatform::Windows),
        Path::new("/stage"),
        NO_CHANGELIST,
    );

    assert_eq!(args[0], "BuildCookRun");
    for expected in [
        "-project=/proj/Pavlov.uproject",
        "-platform=Win64",
        "-pak",
        "-manifests",
        "-DLCIncludeEngineContent",
        "-SkipCookingEditorContent",
        "-dlcname=MyMod",
        "-basedonreleaseversion=PavlovMod_1.0.0",
        "-stagingdirectory=/stage",
        "-cook",
    ] {
        assert!(args.iter().any(|a| a == expected), "missing {expected}");
    }
    assert!(!args.iter().any(|a| a == "-server"));
    assert!(!args.iter().any(|a| a.starts_with("-cl=")));
    assert!(!args.iter().any(|a| a.starts_with("-cookdir=")));
}

#[test]
fn test_server_arguments_for_linux() {
    let args = stage_arguments(
        Stage::Package,
        &request(TargetPlatform::Linux),
        Path::new("/stage"),
        NO_CHANGELIST,
    );
    assert!(args.iter().any(|a| a == "-server"));
    assert!(args.iter().any(|a| a == "-noclient"));
    assert!(args.iter().any(|a| a == "-serverplatform=Linux"));
    assert!(!args.iter().any(|a| a.starts_with("-platform=")));
    assert!(args.ends_with(&[
        "-skipcook".to_string(),
        "-skipstage".to_string(),
        "-package".to_string()
    ]));
}

#[test]
fn test_cook_dir_and_changelist() {
    let mut req = request(TargetPlatform::Android);
    req.cook_directory = "/Game/MyMod".to_string();

    let cook = stage_arguments(Stage::Cook, &req, Path::new("/stage"), 42);
    assert!(cook.iter().any(|a| a == "-platform=Android"));
    assert!(cook.iter().any(|a| a == "-cookdir=/Game/MyMod"));
    assert!(cook.iter().any(|a| a == "-cl=42"));

    let deploy = stage_arguments(Stage::Deploy, &req, Path::new("/stage"), 42);
    assert!(!deploy.iter().any(|a| a.starts_with("-cookdir=")));
}

#[test]
fn test_stage_order_and_names() {
    assert_eq!(Stage::ALL[0], Stage::Cook);
    assert_eq!(Stage::Deploy.ordinal(), 5);
    assert_eq!(Stage::StageCopy.to_string(), "Stage");
}

#[test]
fn test_sequence_runs_in_order() {
    let process = MockProcessProvider::new();
    let req = request(TargetPlatform::Windows);
    let mut started = Vec::new();
    orchestrator(&process, &req)
        .run_sequence(&Stage::ALL, |stage| started.push(stage))
        .unwrap();
    assert_eq!(started, Stage::ALL.to_vec());

    let calls = process.get_calls();
    assert_eq!(calls.len(), 5);
    let markers = ["-cook", "-stage", "-package", "-archive", "-deploy"];
    for (call, marker) in calls.iter().zip(markers) {
        assert!(call.has_arg(marker), "expected {marker}");
        assert_eq!(call.program, PathBuf::from("/engine/RunUAT.sh"));
        assert_eq!(call.working_dir, PathBuf::from("/engine"));
    }
}

#[test]
fn test_first_failure_aborts_sequence() {
    let process = MockProcessProvider::new().with_failure_on("-package", 1, "line1\nPAK FAILED");
    let req = request(TargetPlatform::Windows);
    let err = orchestrator(&process, &req)
        .run_sequence(&Stage::ALL, |_| {})
        .unwrap_err();

    match &err {
        PakError::ExternalStageFailure { stage, reason } => {
            assert_eq!(*stage, Stage::Package);
            assert!(reason.contains("exit code 1"));
            assert!(reason.contains("PAK FAILED"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().starts_with("Package stage failed"));
    assert_eq!(process.get_calls().len(), 3);
}

#[test]
fn test_spawn_error_is_stage_failure() {
    let process = MockProcessProvider::new().with_spawn_error_on("-cook", "no such file");
    let req = request(TargetPlatform::Windows);
    let err = orchestrator(&process, &req).run(Stage::Cook).unwrap_err();
    assert_eq!(err.kind(), PakErrorKind::ExternalStageFailure);
    assert!(err.to_string().contains("no such file"));
}

#[test]
fn test_failure_tail_prefers_stderr() {
    assert_eq!(failure_tail("", "a\nb"), "a | b");
    assert_eq!(failure_tail("e1\n\ne2", "out"), "e1 | e2");
    assert_eq!(failure_tail("1\n2\n3\n4\n5\n6", ""), "2 | 3 | 4 | 5 | 6");
}
