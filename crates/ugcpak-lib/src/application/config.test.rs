use super::*;
use std::path::Path;

#[test]
fn test_default_config() {
    let config = AppConfig::default();
    assert_eq!(config.log_level, 2);
    assert_eq!(config.log_format, LogFormat::Text);
    assert_eq!(config.log_output, LogOutput::Stderr);
    assert_eq!(config.color, ColorChoice::Auto);
    assert!(config.workdir.is_none());
}

#[test]
fn test_environment_paths_default_to_workdir() {
    let config = AppConfig {
        workdir: Some(PathBuf::from("/build/root")),
        ..AppConfig::default()
    };

    let paths = config.environment_paths().unwrap();
    assert_eq!(paths.workdir, Path::new("/build/root"));
    assert_eq!(paths.local_root, Path::new("/build/root"));
    assert_eq!(
        paths.automation_tool,
        EnvironmentPaths::default_automation_tool(Path::new("/build/root"))
    );
}

#[test]
fn test_environment_paths_resolve_relative_overrides() {
    let config = AppConfig {
        workdir: Some(PathBuf::from("/build/root")),
        engine_root: Some(PathBuf::from("UE")),
        uat: Some(PathBuf::from("tools/RunUAT.sh")),
        ..AppConfig::default()
    };

    let paths = config.environment_paths().unwrap();
    assert_eq!(paths.local_root, Path::new("/build/root/UE"));
    assert_eq!(paths.automation_tool, Path::new("/build/root/tools/RunUAT.sh"));
}

#[test]
fn test_logger_config_respects_color_choice() {
    let config = AppConfig {
        color: ColorChoice::Never,
        log_level: 3,
        ..AppConfig::default()
    };
    let logger_config = config.to_logger_config();
    assert!(!logger_config.ansi);
    assert_eq!(logger_config.level, LogLevel::Debug);

    let config = AppConfig {
        color: ColorChoice::Always,
        ..AppConfig::default()
    };
    assert!(config.colors_enabled());
}

#[test]
fn test_validate_rejects_missing_workdir() {
    let mut config = AppConfig {
        workdir: Some(PathBuf::from("/definitely/not/a/real/dir")),
        ..AppConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidWorkDir { .. })
    ));
}

#[test]
fn test_validate_rejects_out_of_range_level() {
    let temp = tempfile::tempdir().unwrap();
    let mut config = AppConfig {
        workdir: Some(temp.path().to_path_buf()),
        log_level: 7,
        ..AppConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationFailed { .. })
    ));
}
