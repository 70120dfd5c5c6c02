use super::*;
use crate::application::AppConfig;
use crate::application::session::{CommandSession, LiveFileSystemProvider};
use crate::application::session_mocks::{MockConfigProvider, MockProcessProvider};
use crate::ugc::{BuildPipeline, EnvironmentPaths, ParamSet};
use std::io::Read;

#[test]
fn test_project_fixture_layout() {
    let fixture = TempDirFixture::with_project("MyMod").unwrap();

    assert!(fixture.project_file().is_file());
    assert!(fixture.plugin_path("MyMod").is_file());
    assert!(fixture.file_exists("Pavlov/Config"));
    assert!(fixture.read_file("Pavlov/Plugins/MyMod/MyMod.uplugin").unwrap().contains("\"FriendlyName\":\"MyMod\""));
}

#[test]
fn test_fixture_is_removed_on_drop() {
    let path = {
        let fixture = TempDirFixture::new().unwrap();
        fixture.write_file("a/b.txt", "x").unwrap();
        fixture.path().to_path_buf()
    };
    assert!(!path.exists());
}

#[test]
fn test_pipeline_on_real_filesystem() {
    let fixture = TempDirFixture::with_project("MyMod").unwrap();
    let staged = fixture
        .stage_root()
        .join("Windows/Pavlov/Plugins/MyMod/Content/Paks/Windows");
    let staged_for_effect = staged.clone();

    let process = MockProcessProvider::new().with_side_effect("-stage", move |_| {
        std::fs::create_dir_all(staged_for_effect.join("sub")).unwrap();
        std::fs::write(staged_for_effect.join("MyMod.pak"), "pak").unwrap();
        std::fs::write(staged_for_effect.join("sub/MyMod.utoc"), "toc").unwrap();
    });
    let session = CommandSession::new_with_providers(
        LiveFileSystemProvider,
        process,
        MockConfigProvider::new(AppConfig::default()),
    );
    let env = EnvironmentPaths {
        workdir: fixture.path().to_path_buf(),
        local_root: fixture.path().to_path_buf(),
        automation_tool: fixture.path().join("RunUAT.sh"),
    };
    let params = ParamSet::parse([
        "-PluginPath=Pavlov/Plugins/MyMod/MyMod.uplugin",
        "-Platform=Windows",
        "-PlatformDir=PC",
    ]);

    let outcome = BuildPipeline::new(&session, env).run(&params).unwrap();

    let mod_dir = fixture.stage_root().join("PC/MyMod");
    assert_eq!(outcome.mod_dir, mod_dir);
    assert!(mod_dir.join("MyMod.pak").is_file());
    assert!(mod_dir.join("sub/MyMod.utoc").is_file());
    assert!(!fixture.stage_root().join("Windows").exists());
    assert!(!fixture.stage_root().join("Temp").exists());
    assert!(!fixture.file_exists("Pavlov/Config/UserEditor.ini"));

    let archive_file = std::fs::File::open(fixture.stage_root().join("PC/MyMod.zip")).unwrap();
    let mut archive = zip::ZipArchive::new(archive_file).unwrap();
    let mut content = String::new();
    archive
        .by_name("sub/MyMod.utoc")
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    assert_eq!(content, "toc");
    assert!(archive.by_name("sub/").is_ok());
}
