use super::*;

fn env_with(
    no_color: Option<&str>,
    force_color: Option<&str>,
    clicolor: Option<&str>,
    ci: Option<&str>,
) -> EnvironmentConfig {
    EnvironmentConfig {
        no_color: no_color.map(String::from),
        force_color: force_color.map(String::from),
        clicolor: clicolor.map(String::from),
        ci: ci.map(String::from),
    }
}

#[test]
fn test_no_overrides_keep_choice() {
    let env = EnvironmentConfig::default();
    assert_eq!(env.apply_color_config(ColorChoice::Auto), ColorChoice::Auto);
    assert_eq!(
        env.apply_color_config(ColorChoice::Always),
        ColorChoice::Always
    );
}

#[test]
fn test_ci_disables_color() {
    let env = env_with(None, Some("1"), None, Some("true"));
    assert_eq!(
        env.apply_color_config(ColorChoice::Always),
        ColorChoice::Never
    );
}

#[test]
fn test_no_color_requires_non_empty_value() {
    assert_eq!(
        env_with(Some("1"), None, None, None).apply_color_config(ColorChoice::Auto),
        ColorChoice::Never
    );
    assert_eq!(
        env_with(Some(""), None, None, None).apply_color_config(ColorChoice::Auto),
        ColorChoice::Auto
    );
}

#[test]
fn test_force_color_beats_no_color() {
    let env = env_with(Some("1"), Some("true"), Some("0"), None);
    assert_eq!(env.apply_color_config(ColorChoice::Auto), ColorChoice::Always);
}

#[test]
fn test_invalid_force_color_ignored() {
    let env = env_with(None, Some("maybe"), None, None);
    assert_eq!(env.apply_color_config(ColorChoice::Auto), ColorChoice::Auto);
}
