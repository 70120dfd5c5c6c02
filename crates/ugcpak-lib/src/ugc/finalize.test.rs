use super::*;
use crate::application::session_mocks::MockFileSystemProvider;
use crate::ugc::PakErrorKind;
use std::io::{Cursor, Read};

fn read_archive(fs: &MockFileSystemProvider, path: &Path) -> Vec<(String, String)> {
    let bytes = fs.file_bytes(path).expect("archive written");
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut entries = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).unwrap();
        let mut content = String::new();
        if entry.is_file() {
            entry.read_to_string(&mut content).unwrap();
        }
        entries.push((entry.name().to_string(), content));
    }
    entries
}

#[test]
fn test_metadata_is_copied() {
    let fs = MockFileSystemProvider::new()
        .with_file("/tmp/meta.json", r#"{"name":"MyMod"}"#)
        .with_dir("/stage/PC/MyMod");

    let target = Finalizer::new(&fs)
        .copy_metadata(
            Path::new("/tmp/meta.json"),
            Path::new("/stage/PC/MyMod/metadata.json"),
        )
        .unwrap();

    assert_eq!(
        fs.file_content(&target).unwrap(),
        r#"{"name":"MyMod"}"#
    );
}

#[test]
fn test_metadata_never_overwrites() {
    let fs = MockFileSystemProvider::new()
        .with_file("/tmp/meta.json", "new")
        .with_file("/stage/MyMod/metadata.json", "old");

    let err = Finalizer::new(&fs)
        .copy_metadata(
            Path::new("/tmp/meta.json"),
            Path::new("/stage/MyMod/metadata.json"),
        )
        .unwrap_err();

    assert_eq!(err.kind(), PakErrorKind::FinalizationFailure);
    assert_eq!(
        fs.file_content(Path::new("/stage/MyMod/metadata.json")).unwrap(),
        "old"
    );
}

#[test]
fn test_missing_metadata_source_fails() {
    let fs = MockFileSystemProvider::new().with_dir("/stage/MyMod");
    let err = Finalizer::new(&fs)
        .copy_metadata(Path::new("/nope.json"), Path::new("/stage/MyMod/metadata.json"))
        .unwrap_err();
    assert_eq!(err.kind(), PakErrorKind::FinalizationFailure);
}

#[test]
fn test_archive_contains_every_file_with_relative_names() {
    let fs = MockFileSystemProvider::new()
        .with_file("/stage/PC/MyMod/MyMod.pak", "pak")
        .with_file("/stage/PC/MyMod/sub/deep/MyMod.utoc", "toc")
        .with_file("/stage/PC/MyMod/metadata.json", "{}");

    let archive = Finalizer::new(&fs)
        .compress(Path::new("/stage/PC/MyMod"), Path::new("/stage/PC/MyMod.zip"))
        .unwrap();

    assert_eq!(archive, PathBuf::from("/stage/PC/MyMod.zip"));
    let entries = read_archive(&fs, &archive);
    let names: Vec<_> = entries.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "MyMod.pak",
            "metadata.json",
            "sub/",
            "sub/deep/",
            "sub/deep/MyMod.utoc"
        ]
    );
    assert!(entries.contains(&("sub/deep/MyMod.utoc".to_string(), "toc".to_string())));
}

#[test]
fn test_archive_keeps_empty_directories() {
    let fs = MockFileSystemProvider::new()
        .with_file("/stage/PC/MyMod/MyMod.pak", "pak")
        .with_dir("/stage/PC/MyMod/Movies/Intro");

    let archive = Finalizer::new(&fs)
        .compress(Path::new("/stage/PC/MyMod"), Path::new("/stage/PC/MyMod.zip"))
        .unwrap();

    let entries = read_archive(&fs, &archive);
    let names: Vec<_> = entries.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["Movies/", "Movies/Intro/", "MyMod.pak"]);
}

#[test]
fn test_stale_archive_is_replaced() {
    let fs = MockFileSystemProvider::new()
        .with_file("/stage/PC/MyMod/MyMod.pak", "pak")
        .with_file("/stage/PC/MyMod.zip", "not a zip");

    Finalizer::new(&fs)
        .compress(Path::new("/stage/PC/MyMod"), Path::new("/stage/PC/MyMod.zip"))
        .unwrap();

    let entries = read_archive(&fs, Path::new("/stage/PC/MyMod.zip"));
    assert_eq!(entries, vec![("MyMod.pak".to_string(), "pak".to_string())]);
}

#[test]
fn test_unwritable_archive_location_fails() {
    let fs = MockFileSystemProvider::new()
        .with_file("/stage/PC/MyMod/MyMod.pak", "pak")
        .with_read_only("/stage/PC/MyMod.zip");

    let err = Finalizer::new(&fs)
        .compress(Path::new("/stage/PC/MyMod"), Path::new("/stage/PC/MyMod.zip"))
        .unwrap_err();
    assert_eq!(err.kind(), PakErrorKind::FinalizationFailure);
}

#[test]
fn test_entry_name_uses_forward_slashes() {
    let root = Path::new("/a");
    assert_eq!(
        entry_name(root, &root.join("b").join("c.pak")).as_deref(),
        Some("b/c.pak")
    );
    assert_eq!(entry_name(root, Path::new("/other/x")), None);
}
