use super::*;
use clap::CommandFactory;

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_build_accepts_automation_style_params() {
    let cli = Cli::try_parse_from([
        "ugcpak",
        "build",
        "-PluginPath=/proj/Plugins/MyMod/MyMod.uplugin",
        "-Platform=Windows",
        "-PlatformDir=PC",
        "-Stage=True",
    ])
    .unwrap();

    match cli.command {
        Some(Commands::Build { params }) => {
            assert_eq!(params.len(), 4);
            assert_eq!(params[0], "-PluginPath=/proj/Plugins/MyMod/MyMod.uplugin");
            assert_eq!(params[3], "-Stage=True");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_global_options_precede_command() {
    let cli = Cli::try_parse_from([
        "ugcpak",
        "--log-level",
        "3",
        "--color",
        "never",
        "build",
        "-Platform=Linux",
    ])
    .unwrap();

    assert_eq!(cli.config.log_level, 3);
    assert_eq!(cli.config.color, crate::primitives::ColorChoice::Never);
    assert!(matches!(
        cli.command,
        Some(Commands::Build { ref params }) if params == &["-Platform=Linux"]
    ));
}

#[test]
fn test_no_command_is_allowed() {
    let cli = Cli::try_parse_from(["ugcpak"]).unwrap();
    assert!(cli.command.is_none());
}
