use super::*;
use crate::application::session_mocks::MockFileSystemProvider;
use crate::primitives::TargetPlatform;
use crate::ugc::{BuildRequest, PakErrorKind, PluginIdentity};

fn layout(platform: TargetPlatform, stage_only: bool) -> StagingLayout {
    let plugin_path = PathBuf::from("/proj/Plugins/MyMod/MyMod.uplugin");
    let request = BuildRequest {
        version: "NOVERSION".to_string(),
        identity: PluginIdentity::from_plugin_path(&plugin_path).unwrap(),
        plugin_path,
        release_baseline: "PavlovMod_1.0.0".to_string(),
        cook_directory: String::new(),
        map_to_cook: String::new(),
        project_file: PathBuf::from("/proj/Pavlov.uproject"),
        stage_only,
        uploader_mode: false,
        target_platform: platform,
        platform_subdir: "PC".to_string(),
        metadata_path: None,
        staging_directory: Some(PathBuf::from("/stage")),
    };
    StagingLayout::compute(&request).unwrap()
}

fn staged_fs(layout: &StagingLayout) -> MockFileSystemProvider {
    MockFileSystemProvider::new()
        .with_file(layout.staged_content.join("MyMod.pak"), "pak")
        .with_file(layout.staged_content.join("sub/MyMod.utoc"), "toc")
        .with_file(layout.staged_platform_root.join("Pavlov/Manifest.txt"), "m")
}

#[test]
fn test_deploy_relocation_moves_exactly_staged_files() {
    let layout = layout(TargetPlatform::Windows, false);
    let fs = staged_fs(&layout);

    let mod_dir = OutputRelocator::new(&fs).relocate(&layout).unwrap();

    assert_eq!(mod_dir, PathBuf::from("/stage/PC/MyMod"));
    assert_eq!(
        fs.list_files(&mod_dir).unwrap(),
        vec![mod_dir.join("MyMod.pak"), mod_dir.join("sub/MyMod.utoc")]
    );
    assert!(!fs.exists(&layout.transient_dir));
    assert!(!fs.exists(&layout.staged_platform_root));
}

#[test]
fn test_linux_reads_linux_server_tree() {
    let layout = layout(TargetPlatform::Linux, false);
    assert!(layout.staged_content.to_string_lossy().contains("LinuxServer"));
    let fs = staged_fs(&layout);

    OutputRelocator::new(&fs).relocate(&layout).unwrap();
    assert!(fs.is_file(Path::new("/stage/PC/MyMod/MyMod.pak")));
    assert!(!fs.exists(Path::new("/stage/LinuxServer")));
}

#[test]
fn test_stage_mode_replaces_previous_data() {
    let layout = layout(TargetPlatform::Windows, true);
    let fs = staged_fs(&layout)
        .with_file("/stage/MyMod/Data/stale.pak", "old")
        .with_file("/stage/MyMod/metadata.json", "{}")
        .with_file("/stage/MyMod/notes.txt", "keep");

    OutputRelocator::new(&fs).relocate(&layout).unwrap();

    assert!(fs.is_file(Path::new("/stage/MyMod/Data/MyMod.pak")));
    assert!(!fs.exists(Path::new("/stage/MyMod/Data/stale.pak")));
    assert!(!fs.exists(Path::new("/stage/MyMod/metadata.json")));
    assert!(fs.is_file(Path::new("/stage/MyMod/notes.txt")));
}

#[test]
fn test_deploy_mode_leaves_metadata_to_mod_dir_wipe() {
    let layout = layout(TargetPlatform::Windows, false);
    let fs = staged_fs(&layout).with_file("/stage/PC/MyMod/metadata.json", "{}");

    OutputRelocator::new(&fs).relocate(&layout).unwrap();

    assert!(!fs.exists(Path::new("/stage/PC/MyMod/metadata.json")));
    assert!(fs.is_file(Path::new("/stage/PC/MyMod/MyMod.pak")));
}

#[test]
fn test_stale_transient_dir_is_cleared() {
    let layout = layout(TargetPlatform::Windows, false);
    let fs = staged_fs(&layout).with_file("/stage/Temp/leftover.pak", "x");

    OutputRelocator::new(&fs).relocate(&layout).unwrap();
    assert!(!fs.exists(Path::new("/stage/PC/MyMod/leftover.pak")));
}

#[test]
fn test_missing_staged_content_fails() {
    let layout = layout(TargetPlatform::Windows, false);
    let fs = MockFileSystemProvider::new().with_dir("/stage/Windows");

    let err = OutputRelocator::new(&fs).relocate(&layout).unwrap_err();
    assert_eq!(err.kind(), PakErrorKind::RelocationFailure);
    assert!(err.to_string().contains("Content/Paks/Windows") || err.to_string().contains("Paks"));
}

#[test]
fn test_move_failure_is_relocation_failure() {
    let layout = layout(TargetPlatform::Windows, false);
    let fs = staged_fs(&layout).with_read_only("/stage/PC");

    let err = OutputRelocator::new(&fs).relocate(&layout).unwrap_err();
    assert_eq!(err.kind(), PakErrorKind::RelocationFailure);
    // The content waits in the transient folder
    assert!(fs.is_file(Path::new("/stage/Temp/MyMod.pak")));
}
