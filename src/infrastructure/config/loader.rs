//! Hierarchical configuration loading (defaults, project file, local file, environment).

use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;

use crate::domain::errors::ConfigError;
use crate::domain::models::{Config, VerbositySetting};
use crate::infrastructure::logging::parse_log_level;

/// Directory holding project configuration
pub const CONFIG_DIR: &str = ".agent";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "AGENT_TRACE_";

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .agent/trace.yaml (project config)
    /// 3. .agent/trace.local.yaml (local overrides, optional)
    /// 4. Environment variables (AGENT_TRACE_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        Self::load_from_dir(CONFIG_DIR)
    }

    /// Same as [`load`](Self::load) with a different configuration directory
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Config> {
        let dir = dir.as_ref();
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(dir.join("trace.yaml")))
            .merge(Yaml::file(dir.join("trace.local.yaml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.as_ref().display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        // Overrides: non-empty and unique ignoring case
        VerbositySetting::new(
            config.trace.default_level,
            config.trace.overrides.iter().map(|(name, level)| (name, *level)),
        )?;

        if let Some(ref trace_file) = config.trace.trace_file {
            if trace_file.as_os_str().is_empty() {
                return Err(ConfigError::EmptyTraceFile);
            }
        }

        parse_log_level(&config.logging.level)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{LogFormat, TraceLevel};
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.trace.default_level, TraceLevel::Info);
        assert!(config.trace.overrides.is_empty());
        assert!(config.trace.trace_file.is_none());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Json);
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r#"
trace:
  default_level: warning
  overrides:
    JobRunner: verbose
    Worker: "off"
  trace_file: _diag/agent.log
logging:
  level: debug
  format: pretty
"#;

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.trace.default_level, TraceLevel::Warning);
        assert_eq!(config.trace.overrides["JobRunner"], TraceLevel::Verbose);
        assert_eq!(config.trace.overrides["Worker"], TraceLevel::Off);
        assert_eq!(config.trace.trace_file, Some(PathBuf::from("_diag/agent.log")));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Pretty);

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_duplicate_override() {
        let mut config = Config::default();
        config
            .trace
            .overrides
            .insert("Worker".to_string(), TraceLevel::Error);
        config
            .trace
            .overrides
            .insert("WORKER".to_string(), TraceLevel::Verbose);

        let result = ConfigLoader::validate(&config);
        assert!(matches!(result, Err(ConfigError::DuplicateOverride(_))));
    }

    #[test]
    fn test_validate_empty_override_name() {
        let mut config = Config::default();
        config
            .trace
            .overrides
            .insert(String::new(), TraceLevel::Error);

        assert_eq!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyOverrideName)
        );
    }

    #[test]
    fn test_validate_empty_trace_file() {
        let mut config = Config::default();
        config.trace.trace_file = Some(PathBuf::new());

        assert_eq!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyTraceFile)
        );
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();

        match ConfigLoader::validate(&config) {
            Err(ConfigError::InvalidLogLevel(level)) => assert_eq!(level, "invalid"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_from_file_rejects_unknown_level() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "trace:\n  default_level: loud").unwrap();
        file.flush().unwrap();

        assert!(ConfigLoader::load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_hierarchical_merging() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("trace.yaml"),
            "trace:\n  default_level: warning\n  overrides:\n    Worker: error\nlogging:\n  level: info\n  format: json\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("trace.local.yaml"),
            "trace:\n  default_level: verbose\nlogging:\n  level: debug\n",
        )
        .unwrap();

        let config = ConfigLoader::load_from_dir(dir.path()).unwrap();

        assert_eq!(config.trace.default_level, TraceLevel::Verbose, "Override should win");
        assert_eq!(
            config.trace.overrides.get("Worker"),
            Some(&TraceLevel::Error),
            "Base value should persist when not overridden"
        );
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }
}
