use super::*;
use crate::primitives::TargetPlatform;
use crate::ugc::{PakErrorKind, PluginIdentity};

fn request(platform: TargetPlatform, stage_only: bool) -> BuildRequest {
    let plugin_path = PathBuf::from("/proj/Plugins/MyMod/MyMod.uplugin");
    BuildRequest {
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
    }
}

#[test]
fn test_deploy_layout_for_windows() {
    let layout = StagingLayout::compute(&request(TargetPlatform::Windows, false)).unwrap();

    assert_eq!(layout.staged_platform_root, PathBuf::from("/stage/Windows"));
    assert_eq!(
        layout.staged_content,
        PathBuf::from("/stage/Windows/Pavlov/Plugins/MyMod/Content/Paks/Windows")
    );
    assert_eq!(layout.transient_dir, PathBuf::from("/stage/Temp"));
    assert_eq!(layout.mod_dir, PathBuf::from("/stage/PC/MyMod"));
    assert_eq!(layout.package_root, layout.mod_dir);
    assert_eq!(layout.archive_path, Some(PathBuf::from("/stage/PC/MyMod.zip")));
    assert_eq!(layout.metadata_target(), PathBuf::from("/stage/PC/MyMod/metadata.json"));
}

#[test]
fn test_linux_reads_from_linux_server_tree() {
    let layout = StagingLayout::compute(&request(TargetPlatform::Linux, false)).unwrap();
    assert_eq!(
        layout.staged_content,
        PathBuf::from("/stage/LinuxServer/Pavlov/Plugins/MyMod/Content/Paks/LinuxServer")
    );
    assert_eq!(layout.mod_dir, PathBuf::from("/stage/PC/MyMod"));
}

#[test]
fn test_stage_mode_layout() {
    let layout = StagingLayout::compute(&request(TargetPlatform::Android, true)).unwrap();
    assert_eq!(layout.mod_dir, PathBuf::from("/stage/MyMod/Data"));
    assert_eq!(layout.package_root, PathBuf::from("/stage/MyMod"));
    assert_eq!(layout.archive_path, None);
    assert_eq!(layout.metadata_target(), PathBuf::from("/stage/MyMod/metadata.json"));
}

#[test]
fn test_uploader_mode_has_no_archive() {
    let mut req = request(TargetPlatform::Windows, false);
    req.uploader_mode = true;
    let layout = StagingLayout::compute(&req).unwrap();
    assert_eq!(layout.mod_dir, PathBuf::from("/stage/PC/MyMod"));
    assert_eq!(layout.archive_path, None);
}

#[test]
fn test_default_stage_root_is_under_project() {
    let mut req = request(TargetPlatform::Windows, false);
    req.staging_directory = None;
    let layout = StagingLayout::compute(&req).unwrap();
    assert_eq!(layout.stage_root, PathBuf::from("/proj/Saved/StagedBuilds"));
}

#[test]
fn test_plugin_outside_project_is_rejected() {
    let mut req = request(TargetPlatform::Windows, false);
    req.plugin_path = PathBuf::from("/elsewhere/MyMod/MyMod.uplugin");
    let err = StagingLayout::compute(&req).unwrap_err();
    assert_eq!(err.kind(), PakErrorKind::RelocationFailure);
}
