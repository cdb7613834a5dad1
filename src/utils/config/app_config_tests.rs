use super::app_config::{AppConfig, DbConfigOverride, DbDriver};
use crate::utils::errors::config_errors::ConfigError;
use std::collections::HashMap;

fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AppConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_when_nothing_is_set() {
    let config = config_from(&[]).unwrap();

    assert_eq!(config.db.driver, DbDriver::MySql);
    assert_eq!(config.db.host, "localhost");
    assert_eq!(config.db.port, 3306);
    assert_eq!(config.db.user, "root");
    assert_eq!(config.db.password, "");
    assert_eq!(config.db.database, "");
    assert_eq!(config.export_dir.to_str(), Some("static/exports"));
    assert_eq!(config.bind_addr.port(), 5000);
    assert_eq!(config.public_base_url, None);
    assert_eq!(config.log_level, "info");
}

#[test]
fn environment_values_are_used() {
    let config = config_from(&[
        ("DB_DRIVER", "SQLite"),
        ("DB_HOST", "db.internal"),
        ("DB_PORT", "3307"),
        ("DB_USER", "report"),
        ("DB_PASSWORD", "s3cret"),
        ("DB_NAME", "web"),
        ("EXPORT_DIR", "/var/exports"),
        ("BIND_ADDR", "127.0.0.1:8080"),
        ("PUBLIC_BASE_URL", "https://files.example.com/"),
    ])
    .unwrap();

    assert_eq!(config.db.driver, DbDriver::Sqlite);
    assert_eq!(config.db.host, "db.internal");
    assert_eq!(config.db.port, 3307);
    assert_eq!(config.db.user, "report");
    assert_eq!(config.db.password, "s3cret");
    assert_eq!(config.db.database, "web");
    assert_eq!(config.export_dir.to_str(), Some("/var/exports"));
    assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
    assert_eq!(
        config.public_base_url.as_deref(),
        Some("https://files.example.com")
    );
}

#[test]
fn bad_values_are_rejected() {
    match config_from(&[("DB_PORT", "not-a-port")]) {
        Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "DB_PORT"),
        other => panic!("expected InvalidValue, got {:?}", other),
    }
    match config_from(&[("DB_DRIVER", "oracle")]) {
        Err(ConfigError::UnknownDriver(name)) => assert_eq!(name, "oracle"),
        other => panic!("expected UnknownDriver, got {:?}", other),
    }
    assert!(config_from(&[("BIND_ADDR", "nowhere")]).is_err());
}

#[test]
fn overrides_replace_only_non_empty_fields() {
    let base = config_from(&[("DB_PASSWORD", "base-pass"), ("DB_NAME", "web")])
        .unwrap()
        .db;

    let overrides = DbConfigOverride {
        host: Some("10.0.0.5".to_string()),
        port: Some(0),
        user: Some(String::new()),
        password: None,
        database: Some("reports".to_string()),
    };
    let effective = base.with_overrides(&overrides);

    assert_eq!(effective.host, "10.0.0.5");
    assert_eq!(effective.port, 3306);
    assert_eq!(effective.user, "root");
    assert_eq!(effective.password, "base-pass");
    assert_eq!(effective.database, "reports");
    assert_eq!(effective.driver, base.driver);
}

#[test]
fn empty_override_is_identity() {
    let base = config_from(&[]).unwrap().db;
    assert_eq!(base.with_overrides(&DbConfigOverride::default()), base);
}

#[test]
fn debug_output_hides_password() {
    let config = config_from(&[("DB_PASSWORD", "hunter2")]).unwrap();
    let printed = format!("{:?}", config.db);
    assert!(!printed.contains("hunter2"));
}
