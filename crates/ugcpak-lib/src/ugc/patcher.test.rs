use super::*;
use crate::application::session_mocks::MockFileSystemProvider;
use crate::ugc::PakErrorKind;

fn identity() -> PluginIdentity {
    PluginIdentity::from_plugin_path(Path::new("/proj/Plugins/MyMod/MyMod.uplugin")).unwrap()
}

const INI: &str = "/proj/Config/UserEditor.ini";

#[test]
fn test_editor_config_path() {
    assert_eq!(
        editor_config_path(Path::new("/proj")),
        PathBuf::from("/proj/Config/UserEditor.ini")
    );
}

#[test]
fn test_missing_ini_is_created_then_deleted() {
    let fs = MockFileSystemProvider::new().with_dir("/proj/Config");
    let patch = ConfigPatch::exclude_plugin(&identity());

    let guard = patch.apply(&fs, Path::new(INI)).unwrap();
    assert!(!guard.pre_existed());
    assert_eq!(
        fs.file_content(Path::new(INI)).unwrap(),
        "[BlueprintNativizationSettings]\n+ExcludedFolderPaths=/MyMod/\n"
    );

    guard.restore().unwrap();
    assert!(!fs.exists(Path::new(INI)));
}

#[test]
fn test_existing_ini_gains_entry_and_survives() {
    let fs = MockFileSystemProvider::new().with_file(INI, "[Other]\nA=1\n");
    let patch = ConfigPatch::exclude_plugin(&identity());

    let guard = patch.apply(&fs, Path::new(INI)).unwrap();
    guard.restore().unwrap();

    assert_eq!(
        fs.file_content(Path::new(INI)).unwrap(),
        "[Other]\nA=1\n\n[BlueprintNativizationSettings]\n+ExcludedFolderPaths=/MyMod/\n"
    );
}

#[test]
fn test_present_entry_is_not_duplicated() {
    let original = "[blueprintnativizationsettings]\nExcludedFolderPaths=/mymod/\n";
    let fs = MockFileSystemProvider::new().with_file(INI, original);
    let patch = ConfigPatch::exclude_plugin(&identity());

    patch.apply(&fs, Path::new(INI)).unwrap().restore().unwrap();
    assert_eq!(fs.file_content(Path::new(INI)).unwrap(), original);
}

#[test]
fn test_dropped_guard_still_removes_created_file() {
    let fs = MockFileSystemProvider::new().with_dir("/proj/Config");
    {
        let _guard = ConfigPatch::exclude_plugin(&identity())
            .apply(&fs, Path::new(INI))
            .unwrap();
        assert!(fs.is_file(Path::new(INI)));
    }
    assert!(!fs.exists(Path::new(INI)));
}

#[test]
fn test_missing_config_dir_is_created() {
    let fs = MockFileSystemProvider::new().with_dir("/proj");
    let guard = ConfigPatch::exclude_plugin(&identity())
        .apply(&fs, Path::new(INI))
        .unwrap();
    assert!(fs.is_file(Path::new(INI)));
    guard.restore().unwrap();
}

#[test]
fn test_unwritable_ini_is_configuration_error() {
    let fs = MockFileSystemProvider::new()
        .with_file(INI, "[Other]\n")
        .with_read_only("/proj/Config");
    let err = ConfigPatch::exclude_plugin(&identity())
        .apply(&fs, Path::new(INI))
        .err()
        .unwrap();
    assert_eq!(err.kind(), PakErrorKind::InvalidConfiguration);
    // Pre-existing file is untouched
    assert_eq!(fs.file_content(Path::new(INI)).unwrap(), "[Other]\n");
}
