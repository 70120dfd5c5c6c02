use super::*;
use crate::application::session_mocks::MockFileSystemProvider;
use crate::ugc::PakErrorKind;

fn env() -> EnvironmentPaths {
    EnvironmentPaths {
        workdir: PathBuf::from("/work"),
        local_root: PathBuf::from("/engine"),
        automation_tool: PathBuf::from("/engine/RunUAT.sh"),
    }
}

fn fs() -> MockFileSystemProvider {
    MockFileSystemProvider::new().with_file("/proj/Plugins/MyMod/MyMod.uplugin", "{}")
}

fn full() -> ParamSet {
    ParamSet::new()
        .with("PluginPath", "/proj/Plugins/MyMod/MyMod.uplugin")
        .with("Platform", "Windows")
        .with("PlatformDir", "PC")
}

#[test]
fn test_defaults() {
    let request = BuildRequest::resolve(&full(), &env(), &fs()).unwrap();

    assert_eq!(request.identity.as_str(), "MyMod");
    assert_eq!(request.version, "NOVERSION");
    assert_eq!(request.release_baseline, "PavlovMod_1.0.0");
    assert_eq!(request.cook_directory, "");
    assert_eq!(request.map_to_cook, "");
    assert_eq!(request.project_file, PathBuf::from("/engine/Pavlov/Pavlov.uproject"));
    assert_eq!(request.stage_root(), PathBuf::from("/engine/Pavlov/Saved/StagedBuilds"));
    assert!(!request.stage_only);
    assert!(!request.uploader_mode);
    assert!(request.produces_archive());
    assert_eq!(request.metadata_path, None);
}

#[test]
fn test_explicit_values() {
    let params = full()
        .with("Version", "2.1")
        .with("BasedOnReleaseVersion", "PavlovMod_2.0.0")
        .with("CookDir", "/Game/MyMod")
        .with("Project", "/proj/Pavlov.uproject")
        .with("Stage", "True")
        .with("MetaDataPath", "meta/meta.json");
    let request = BuildRequest::resolve(&params, &env(), &fs()).unwrap();

    assert_eq!(request.version, "2.1");
    assert_eq!(request.release_baseline, "PavlovMod_2.0.0");
    assert_eq!(request.cook_directory, "/Game/MyMod");
    assert_eq!(request.project_dir(), Path::new("/proj"));
    assert_eq!(request.project_name(), "Pavlov");
    assert!(request.stage_only);
    assert!(!request.produces_archive());
    assert_eq!(request.metadata_path, Some(PathBuf::from("/work/meta/meta.json")));
}

#[test]
fn test_boolean_switches_need_literal_true() {
    for value in ["true", "1", "yes", ""] {
        let params = full().with("Stage", value).with("ModioUploader", value);
        let request = BuildRequest::resolve(&params, &env(), &fs()).unwrap();
        assert!(!request.stage_only, "{value}");
        assert!(!request.uploader_mode, "{value}");
    }
}

#[test]
fn test_checks_run_in_order() {
    let err = BuildRequest::resolve(&ParamSet::new(), &env(), &fs()).unwrap_err();
    assert!(matches!(err, PakError::MissingArgument { name: "PlatformDir" }));

    let params = ParamSet::new().with("PlatformDir", "PC");
    let err = BuildRequest::resolve(&params, &env(), &fs()).unwrap_err();
    assert!(matches!(err, PakError::MissingArgument { name: "Platform" }));

    let params = params.with("Platform", "Linux");
    let err = BuildRequest::resolve(&params, &env(), &fs()).unwrap_err();
    assert!(matches!(err, PakError::MissingArgument { name: "PluginPath" }));
}

#[test]
fn test_empty_required_value_counts_as_missing() {
    let params = full().with("PlatformDir", "");
    let err = BuildRequest::resolve(&params, &env(), &fs()).unwrap_err();
    assert_eq!(err.kind(), PakErrorKind::MissingArgument);
}

#[test]
fn test_unknown_platform_is_rejected() {
    let params = full().with("Platform", "PS5");
    let err = BuildRequest::resolve(&params, &env(), &fs()).unwrap_err();
    assert!(matches!(err, PakError::InvalidPlatform { ref value } if value == "PS5"));
}

#[test]
fn test_platform_must_match_exactly() {
    let params = full().with("Platform", "linux");
    let err = BuildRequest::resolve(&params, &env(), &fs()).unwrap_err();
    assert!(matches!(err, PakError::InvalidPlatform { ref value } if value == "linux"));

    let params = full().with("Platform", "Linux");
    let request = BuildRequest::resolve(&params, &env(), &fs()).unwrap();
    assert_eq!(request.target_platform, TargetPlatform::Linux);
}

#[test]
fn test_missing_plugin_file() {
    let params = full().with("PluginPath", "Plugins/Other/Other.uplugin");
    let err = BuildRequest::resolve(&params, &env(), &fs()).unwrap_err();
    match err {
        PakError::PluginNotFound { path } => {
            assert_eq!(path, PathBuf::from("/work/Plugins/Other/Other.uplugin"))
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_relative_plugin_path_resolves_against_workdir() {
    let fs = MockFileSystemProvider::new().with_file("/work/Plugins/MyMod/MyMod.uplugin", "{}");
    let params = full().with("PluginPath", "./Plugins/../Plugins/MyMod/MyMod.uplugin");
    let request = BuildRequest::resolve(&params, &env(), &fs).unwrap();
    assert_eq!(
        request.plugin_path,
        PathBuf::from("/work/Plugins/MyMod/MyMod.uplugin")
    );
}

#[test]
fn test_identity_strips_every_extension() {
    let identity = PluginIdentity::from_plugin_path(Path::new("/p/MyMod.v2.uplugin")).unwrap();
    assert_eq!(identity.to_string(), "MyMod");
    assert!(PluginIdentity::from_plugin_path(Path::new("/p/.uplugin")).is_none());
}

#[test]
fn test_default_automation_tool() {
    let tool = EnvironmentPaths::default_automation_tool(Path::new("/engine"));
    assert!(tool.starts_with("/engine/Engine/Build/BatchFiles"));
    assert!(tool.file_name().unwrap().to_string_lossy().starts_with("RunUAT"));
}

#[test]
fn test_normalize() {
    assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
    assert_eq!(normalize(Path::new("../x")), PathBuf::from("../x"));
}
