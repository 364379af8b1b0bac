// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the frosk configuration system.

use frosk_config::diagnostic::ConfigError;
use frosk_config::model::FroskConfig;
use frosk_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

#[test]
fn full_toml_deserializes() {
    let toml = r#"
[storage]
database_path = "/tmp/vault.db"
wal_mode = false
busy_timeout_ms = 250

[vault]
kdf_iterations = 10000
hash_time_cost = 4
hash_memory_cost = 65536
hash_parallelism = 2

[logging]
level = "debug"
file = "/tmp/frosk.log"
json = false
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.storage.database_path, "/tmp/vault.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.storage.busy_timeout_ms, 250);
    assert_eq!(config.vault.kdf_iterations, 10000);
    assert_eq!(config.vault.hash_time_cost, 4);
    assert_eq!(config.vault.hash_memory_cost, 65536);
    assert_eq!(config.vault.hash_parallelism, 2);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.file.as_deref(), Some("/tmp/frosk.log"));
    assert!(!config.logging.json);
}

#[test]
fn empty_toml_yields_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert_eq!(config, FroskConfig::default());
}

#[test]
fn partial_section_keeps_other_defaults() {
    let config = load_config_from_str("[vault]\nkdf_iterations = 20000\n").expect("should parse");
    assert_eq!(config.vault.kdf_iterations, 20000);
    assert_eq!(config.vault.hash_time_cost, 3);
    assert!(config.storage.wal_mode);
}

#[test]
fn unknown_section_is_rejected() {
    let err = load_config_from_str("[network]\nport = 1\n").expect_err("should reject");
    let msg = err.to_string();
    assert!(
        msg.contains("unknown field") || msg.contains("network"),
        "unexpected error: {msg}"
    );
}

#[test]
fn unknown_key_reports_suggestion_and_valid_keys() {
    let toml = r#"
[vault]
kdf_iteration = 5000
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "kdf_iteration"
                && suggestion.as_deref() == Some("kdf_iterations")
                && valid_keys.contains("hash_time_cost")
        })
    });
    assert!(found, "expected UnknownKey with suggestion, got: {errors:?}");
}

#[test]
fn invalid_type_is_reported() {
    let toml = r#"
[storage]
busy_timeout_ms = "soon"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject invalid type");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("busy_timeout_ms"))),
        "got: {errors:?}"
    );
}

#[test]
fn validation_runs_after_parse() {
    let toml = r#"
[vault]
kdf_iterations = 1

[logging]
level = "chatty"
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert_eq!(errors.len(), 2, "got: {errors:?}");
    assert!(errors.iter().all(|e| matches!(e, ConfigError::Validation { .. })));
}

#[test]
fn explicit_file_gets_source_span() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("frosk.toml");
    std::fs::write(&path, "[logging]\nlevle = \"debug\"\n").expect("write config");

    let errors = load_and_validate_path(&path).expect_err("should reject typo");
    let with_span = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, span: Some(_), src: Some(_), suggestion, .. }
            if key == "levle" && suggestion.as_deref() == Some("level"))
    });
    assert!(with_span, "expected a located UnknownKey, got: {errors:?}");
}

#[test]
fn explicit_file_values_are_used() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[storage]\ndatabase_path = \"/srv/frosk.db\"\n").expect("write");

    let config = load_and_validate_path(&path).expect("should load");
    assert_eq!(config.storage.database_path, "/srv/frosk.db");
}

#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "levle".to_string(),
        suggestion: Some("level".to_string()),
        valid_keys: "level, file, json".to_string(),
        span: None,
        src: None,
    };

    assert!(error.code().is_some());
    let help = error.help().expect("help text").to_string();
    assert!(help.contains("did you mean `level`"), "got: {help}");

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render");
    assert!(buf.contains("levle"));
}

#[test]
fn config_error_converts_into_core_error() {
    let err: frosk_core::FroskError = ConfigError::Other("boom".to_string()).into();
    assert_eq!(err.kind(), frosk_core::ErrorKind::Internal);
    assert!(err.to_string().contains("boom"));
}
