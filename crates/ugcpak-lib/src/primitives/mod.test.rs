use super::*;

macro_rules! test_enum_completeness {
    ($enum_type:ty, $test_name:ident) => {
        #[test]
        fn $test_name() {
            for variant in <$enum_type>::value_variants() {
                let possible_value = variant.to_possible_value();
                assert!(
                    possible_value.is_some(),
                    "PossibleValue should exist for all variants"
                );

                let possible_val = possible_value.unwrap();
                let primary_name = possible_val.get_name();
                let parsed: Result<$enum_type, _> = primary_name.parse();
                assert_eq!(
                    parsed.unwrap(),
                    *variant,
                    "Primary name '{}' should parse back to its variant",
                    primary_name
                );
            }
        }
    };
}

test_enum_completeness!(LogLevel, test_log_level_completeness);
test_enum_completeness!(LogFormat, test_log_format_completeness);
test_enum_completeness!(LogOutput, test_log_output_completeness);
test_enum_completeness!(ColorChoice, test_color_choice_completeness);

#[test]
fn test_aliases_resolve() {
    assert_eq!("yml".parse::<LogFormat>().unwrap(), LogFormat::Yaml);
    assert_eq!("verbose".parse::<LogLevel>().unwrap(), LogLevel::Trace);
    assert_eq!("off".parse::<ColorChoice>().unwrap(), ColorChoice::Never);
}

#[test]
fn test_invalid_value_reports_reason() {
    let err = "loud".parse::<LogLevel>().unwrap_err();
    match err {
        ConfigError::ParseError { value, reason } => {
            assert_eq!(value, "loud");
            assert_eq!(reason, "invalid log level");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_log_level_from_verbosity() {
    assert_eq!(LogLevel::from_verbosity(0), LogLevel::Error);
    assert_eq!(LogLevel::from_verbosity(2), LogLevel::Info);
    assert_eq!(LogLevel::from_verbosity(9), LogLevel::Trace);
    assert!(LogLevel::Warning.should_log(LogLevel::Debug));
    assert!(!LogLevel::Trace.should_log(LogLevel::Info));
}

#[test]
fn test_target_platform_parse() {
    assert_eq!(
        "Windows".parse::<TargetPlatform>().unwrap(),
        TargetPlatform::Windows
    );
    assert_eq!(
        "Android".parse::<TargetPlatform>().unwrap(),
        TargetPlatform::Android
    );
    assert_eq!(
        "Linux".parse::<TargetPlatform>().unwrap(),
        TargetPlatform::Linux
    );
    assert!("android".parse::<TargetPlatform>().is_err());
    assert!("LINUX".parse::<TargetPlatform>().is_err());
    assert!(" Windows".parse::<TargetPlatform>().is_err());
    assert!("Win64".parse::<TargetPlatform>().is_err());
    assert!("".parse::<TargetPlatform>().is_err());
}

#[test]
fn test_linux_uses_server_naming_only_when_staged() {
    let linux = TargetPlatform::Linux;
    assert_eq!(linux.automation_name(), "Linux");
    assert_eq!(linux.staged_name(), "LinuxServer");
    assert_eq!(linux.descriptor(), TargetDescriptor::Server);
}

#[test]
fn test_client_platforms() {
    assert_eq!(TargetPlatform::Windows.automation_name(), "Win64");
    assert_eq!(TargetPlatform::Windows.staged_name(), "Windows");
    assert_eq!(TargetPlatform::Android.staged_name(), "Android");
    assert_eq!(
        TargetPlatform::Android.descriptor(),
        TargetDescriptor::Client
    );
    assert_eq!(TargetPlatform::Windows.to_string(), "Windows");
}

#[test]
fn test_log_context_progress() {
    let mut context = LogContext::with_progress("cook", 5);
    assert_eq!(context.total_items, Some(5));
    assert_eq!(context.current_item, None);
    context.set_progress(1);
    assert_eq!(context.current_item, Some(1));
}
