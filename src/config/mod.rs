//! Application configuration module
//!
//! Configuration is read from an optional `ahp-ranker.{yaml,toml,json}` file
//! and then from environment variables with the `AHP_RANKER` prefix. Nested
//! values use `__` as separator; environment values override the file.
//!
//! # Example
//!
//! ```no_run
//! use ahp_ranker::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod engine;
mod error;
mod server;

pub use engine::EngineConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::ranking::CategoryBands;

/// Default configuration file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "ahp-ranker";

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub engine: EngineConfig,

    /// Ordered decision bands and the fallback category
    #[serde(default)]
    pub categories: CategoryBands,

    /// YAML seed for the in-memory providers
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from `ahp-ranker.*` (if present) and the environment.
    ///
    /// # Environment Variable Format
    ///
    /// - `AHP_RANKER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `AHP_RANKER__ENGINE__CR_THRESHOLD=0.1` -> `engine.cr_threshold = 0.1`
    /// - `AHP_RANKER__SEED_PATH=data/seed.yaml` -> `seed_path`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::build(config::File::with_name(DEFAULT_CONFIG_FILE).required(false))
    }

    /// Load configuration from an explicit file, then the environment.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::build(config::File::from(path.as_ref()).required(true))
    }

    fn build<S>(file: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("AHP_RANKER")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation of all sections.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.engine.validate()?;
        self.categories
            .validate()
            .map_err(|e| ValidationError::InvalidCategories(e.to_string()))?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ranking::{BandThreshold, CategoryBand};
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "AHP_RANKER__SERVER__PORT",
        "AHP_RANKER__SERVER__ENVIRONMENT",
        "AHP_RANKER__ENGINE__CR_THRESHOLD",
        "AHP_RANKER__ENGINE__HISTORY_CAPACITY",
        "AHP_RANKER__SEED_PATH",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn yaml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_defaults_without_file_or_env() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.engine.cr_threshold, 0.1);
        assert_eq!(config.engine.history_capacity, 50);
        assert_eq!(config.categories, CategoryBands::default());
        assert!(config.seed_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_overrides_nested_values() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("AHP_RANKER__SERVER__PORT", "3000");
        env::set_var("AHP_RANKER__SERVER__ENVIRONMENT", "production");
        env::set_var("AHP_RANKER__ENGINE__CR_THRESHOLD", "0.2");
        env::set_var("AHP_RANKER__SEED_PATH", "data/seed.yaml");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
        assert_eq!(config.engine.cr_threshold, 0.2);
        assert_eq!(config.seed_path, Some(PathBuf::from("data/seed.yaml")));
    }

    #[test]
    fn file_configures_engine_and_bands() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let file = yaml_file(
            r#"
engine:
  fail_on_inconsistency: true
  history_capacity: 5
categories:
  bands:
    - name: Promote
      threshold: { kind: top_ranks, value: 2 }
    - name: Keep
      threshold: { kind: min_score, value: 0.4 }
  fallback: Review
"#,
        );

        let config = AppConfig::load_from(file.path()).unwrap();

        assert!(config.engine.fail_on_inconsistency);
        assert_eq!(config.engine.history_capacity, 5);
        assert_eq!(config.engine.max_iterations, 100);
        assert_eq!(
            config.categories.bands,
            vec![
                CategoryBand::new("Promote", BandThreshold::TopRanks(2)),
                CategoryBand::new("Keep", BandThreshold::MinScore(0.4)),
            ]
        );
        assert_eq!(config.categories.fallback, "Review");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_wins_over_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let file = yaml_file("engine:\n  history_capacity: 5\n");
        env::set_var("AHP_RANKER__ENGINE__HISTORY_CAPACITY", "7");
        let result = AppConfig::load_from(file.path());
        clear_env();

        assert_eq!(result.unwrap().engine.history_capacity, 7);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();

        let result = AppConfig::load_from(dir.path().join("absent.yaml"));

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn duplicate_band_names_fail_validation() {
        let config = AppConfig {
            categories: CategoryBands::new(
                vec![CategoryBand::new("Top", BandThreshold::MinScore(0.8))],
                "Top",
            ),
            ..Default::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidCategories(_))
        ));
    }
}
