use super::*;

#[test]
fn test_parses_hyphenated_pairs() {
    let params = ParamSet::parse(["-PluginPath=/proj/Plugins/MyMod/MyMod.uplugin", "-Platform=Linux"]);
    assert_eq!(
        params.value("PluginPath"),
        Some("/proj/Plugins/MyMod/MyMod.uplugin")
    );
    assert_eq!(params.value("Platform"), Some("Linux"));
    assert_eq!(params.len(), 2);
}

#[test]
fn test_keys_are_case_insensitive() {
    let params = ParamSet::parse(["-platformdir=PC"]);
    assert_eq!(params.value("PlatformDir"), Some("PC"));
    assert_eq!(params.value("PLATFORMDIR"), Some("PC"));
}

#[test]
fn test_last_occurrence_wins() {
    let params = ParamSet::parse(["-Version=1", "Version=2"]);
    assert_eq!(params.value("Version"), Some("2"));
}

#[test]
fn test_bare_flag_and_quoted_values() {
    let params = ParamSet::parse(["-Stage", "-CookDir=\"/Game/My Mod\"", "-Extra=a=b"]);
    assert_eq!(params.value("Stage"), Some(""));
    assert_eq!(params.value("CookDir"), Some("/Game/My Mod"));
    assert_eq!(params.value("Extra"), Some("a=b"));
}

#[test]
fn test_empty_tokens_ignored() {
    let params = ParamSet::parse(["", "-", "  "]);
    assert!(params.is_empty());
}

#[test]
fn test_is_true_requires_literal() {
    let params = ParamSet::new()
        .with("Stage", "True")
        .with("ModioUploader", "true")
        .with("Other", "1");
    assert!(params.is_true("Stage"));
    assert!(!params.is_true("ModioUploader"));
    assert!(!params.is_true("Other"));
    assert!(!params.is_true("Missing"));
}

#[test]
fn test_value_or_default() {
    let params = ParamSet::new();
    assert_eq!(params.value_or("Version", "NOVERSION"), "NOVERSION");
    assert!(!params.contains("Version"));
}
