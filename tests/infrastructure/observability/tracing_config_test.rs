use docsum::infrastructure::observability::TracingConfig;
use docsum::presentation::config::{Environment, LoggingSettings};

#[test]
fn given_logging_settings_when_building_config_then_copies_level_and_format() {
    let settings = LoggingSettings {
        level: "warn".to_string(),
        json: true,
    };

    let config = TracingConfig::new(&settings, Environment::Prod);

    assert_eq!(config.environment, Environment::Prod);
    assert!(config.json_format);
    assert_eq!(config.default_directive(), "warn,docsum=debug,tower_http=debug");
}

#[test]
fn given_default_logging_when_building_config_then_uses_info_text_output() {
    let config = TracingConfig::new(&LoggingSettings::default(), Environment::Local);

    assert!(!config.json_format);
    assert!(config.default_directive().starts_with("info,"));
}
