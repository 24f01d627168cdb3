//! Configuration loading from files and environment

use std::fs;

use agent_trace::domain::models::{LogFormat, RotationPolicy};
use agent_trace::{ConfigError, ConfigLoader, TraceLevel};
use tempfile::TempDir;

#[test]
fn test_defaults_without_files() {
    let temp_dir = TempDir::new().unwrap();

    let config = temp_env::with_vars_unset(
        ["AGENT_TRACE_TRACE__DEFAULT_LEVEL", "AGENT_TRACE_LOGGING__LEVEL"],
        || ConfigLoader::load_from_dir(temp_dir.path()).unwrap(),
    );

    assert_eq!(config.trace.default_level, TraceLevel::Info);
    assert!(config.trace.overrides.is_empty());
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.logging.rotation, RotationPolicy::Daily);
}

#[test]
fn test_env_overrides_files() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("trace.yaml"),
        "trace:\n  default_level: warning\n  overrides:\n    Worker: verbose\n",
    )
    .unwrap();

    let config = temp_env::with_vars(
        [
            ("AGENT_TRACE_TRACE__DEFAULT_LEVEL", Some("error")),
            ("AGENT_TRACE_LOGGING__LEVEL", Some("debug")),
        ],
        || ConfigLoader::load_from_dir(temp_dir.path()).unwrap(),
    );

    assert_eq!(config.trace.default_level, TraceLevel::Error);
    assert_eq!(config.trace.overrides["Worker"], TraceLevel::Verbose);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_local_file_overrides_project_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("trace.yaml"),
        "trace:\n  default_level: warning\nlogging:\n  format: pretty\n",
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("trace.local.yaml"),
        "trace:\n  default_level: verbose\n",
    )
    .unwrap();

    let config = temp_env::with_vars_unset(["AGENT_TRACE_TRACE__DEFAULT_LEVEL"], || {
        ConfigLoader::load_from_dir(temp_dir.path()).unwrap()
    });

    assert_eq!(config.trace.default_level, TraceLevel::Verbose);
    assert_eq!(config.logging.format, LogFormat::Pretty);
}

#[test]
fn test_invalid_env_level_is_rejected() {
    let temp_dir = TempDir::new().unwrap();

    let result = temp_env::with_var("AGENT_TRACE_TRACE__DEFAULT_LEVEL", Some("loud"), || {
        ConfigLoader::load_from_dir(temp_dir.path())
    });

    assert!(result.is_err());
}

#[test]
fn test_case_duplicate_overrides_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("custom.yaml");
    fs::write(
        &path,
        "trace:\n  overrides:\n    Worker: verbose\n    WORKER: \"off\"\n",
    )
    .unwrap();

    let err = ConfigLoader::load_from_file(&path).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::DuplicateOverride(_))
    ));
}
