use super::*;
use tempfile::TempDir;

fn seed(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

mod live_filesystem_tests {
    use super::*;

    #[test]
    fn it_refuses_to_overwrite_on_copy() {
        let temp = TempDir::new().unwrap();
        seed(temp.path(), "src.json", "{}");
        seed(temp.path(), "dst.json", "old");

        let fs_provider = LiveFileSystemProvider;
        let err = fs_provider
            .copy_file(&temp.path().join("src.json"), &temp.path().join("dst.json"))
            .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(
            fs::read_to_string(temp.path().join("dst.json")).unwrap(),
            "old"
        );
    }

    #[test]
    fn it_copies_into_new_file() {
        let temp = TempDir::new().unwrap();
        seed(temp.path(), "src.json", "{\"a\":1}");

        let fs_provider = LiveFileSystemProvider;
        fs_provider
            .copy_file(&temp.path().join("src.json"), &temp.path().join("dst.json"))
            .unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join("dst.json")).unwrap(),
            "{\"a\":1}"
        );
    }

    #[test]
    fn it_moves_directory_trees() {
        let temp = TempDir::new().unwrap();
        seed(temp.path(), "from/a.pak", "a");
        seed(temp.path(), "from/nested/b.pak", "b");

        let fs_provider = LiveFileSystemProvider;
        fs_provider
            .move_dir(&temp.path().join("from"), &temp.path().join("to"))
            .unwrap();

        assert!(!temp.path().join("from").exists());
        assert_eq!(
            fs::read_to_string(temp.path().join("to/nested/b.pak")).unwrap(),
            "b"
        );
    }

    #[test]
    fn it_refuses_to_move_onto_existing_directory() {
        let temp = TempDir::new().unwrap();
        seed(temp.path(), "from/a.pak", "a");
        fs::create_dir_all(temp.path().join("to")).unwrap();

        let fs_provider = LiveFileSystemProvider;
        let err = fs_provider
            .move_dir(&temp.path().join("from"), &temp.path().join("to"))
            .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert!(temp.path().join("from/a.pak").exists());
    }

    #[test]
    fn it_lists_files_recursively_sorted() {
        let temp = TempDir::new().unwrap();
        seed(temp.path(), "root/z.pak", "");
        seed(temp.path(), "root/a/b.utoc", "");
        fs::create_dir_all(temp.path().join("root/empty")).unwrap();

        let files = LiveFileSystemProvider
            .list_files(&temp.path().join("root"))
            .unwrap();

        assert_eq!(
            files,
            vec![
                temp.path().join("root/a/b.utoc"),
                temp.path().join("root/z.pak"),
            ]
        );
    }
}

#[cfg(unix)]
mod live_process_tests {
    use super::*;

    #[test]
    fn it_captures_exit_status_and_output() {
        let temp = TempDir::new().unwrap();
        let provider = LiveProcessProvider::new();

        let output = provider
            .execute(
                Path::new("sh"),
                &["-c".to_string(), "echo out; echo err >&2; exit 3".to_string()],
                temp.path(),
            )
            .unwrap();

        assert!(!output.success);
        assert_eq!(output.exit_code, Some(3));
        assert_eq!(output.stdout, "out");
        assert_eq!(output.stderr, "err");
    }

    #[test]
    fn it_reports_spawn_failures() {
        let temp = TempDir::new().unwrap();
        let provider = LiveProcessProvider::new();

        let result = provider.execute(
            &temp.path().join("does-not-exist"),
            &[],
            temp.path(),
        );

        assert!(result.is_err());
    }

    #[test]
    fn it_finds_programs_on_custom_path() {
        let temp = TempDir::new().unwrap();
        seed(temp.path(), "bin/RunUAT.sh", "#!/bin/sh\n");

        let provider =
            LiveProcessProvider::with_custom_path(temp.path().join("bin").display().to_string());

        assert_eq!(
            provider.which("RunUAT.sh"),
            Some(temp.path().join("bin/RunUAT.sh"))
        );
        assert_eq!(provider.which("missing-tool"), None);
    }

    #[test]
    fn it_lists_directories_including_empty_ones() {
        let temp = TempDir::new().unwrap();
        seed(temp.path(), "root/a/b.utoc", "");
        fs::create_dir_all(temp.path().join("root/empty")).unwrap();

        let dirs = LiveFileSystemProvider
            .list_dirs(&temp.path().join("root"))
            .unwrap();

        assert_eq!(
            dirs,
            vec![temp.path().join("root/a"), temp.path().join("root/empty")]
        );
    }
}
