use deviation_analyzer::infrastructure::observability::TracingConfig;
use deviation_analyzer::presentation::config::{Environment, LoggingSettings};

#[test]
fn given_default_config_when_created_then_environment_is_set() {
    let config = TracingConfig::default();
    assert!(!config.environment.is_empty());
}

#[test]
fn given_logging_settings_when_building_config_then_level_and_environment_carry_over() {
    let logging = LoggingSettings {
        level: "warn".to_string(),
        enable_json: true,
    };

    let config = TracingConfig::from_settings(Environment::Prod, &logging);

    assert_eq!(config.environment, "Prod");
    assert_eq!(config.level, "warn");
    assert!(config.json_format);
}
