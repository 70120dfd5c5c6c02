use super::*;

#[test]
fn test_filter_directive_scopes_crate_level() {
    let directive = filter_directive(LogLevel::Debug);
    assert!(directive.starts_with("warn,"));
    assert!(directive.contains("ugcpak=debug"));
    assert!(directive.contains("ugcpak_lib=debug"));
}

#[test]
fn test_filter_directive_parses() {
    for verbosity in 0..=4 {
        let directive = filter_directive(LogLevel::from_verbosity(verbosity));
        assert!(EnvFilter::try_new(&directive).is_ok(), "{directive}");
    }
}

#[test]
fn test_step_without_subscriber_is_harmless() {
    let mut context = LogContext::with_progress("cook", 5);
    context.set_progress(1);
    step("Cooking content", &context);
}

#[test]
fn test_logger_not_initialized_initially() {
    // Other tests in this binary never install the global subscriber
    assert!(!Logger::is_initialized() || Logger::global().is_some());
}
