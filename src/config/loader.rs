//! Configuration Loader
//!
//! Environment-aware configuration loading. Sources are layered in this
//! order, later sources winning:
//!
//! 1. Built-in defaults (any section missing from every source)
//! 2. `<config_dir>/matreq.toml`
//! 3. `<config_dir>/matreq.<environment>.toml`
//! 4. Environment variables `MATREQ_<SECTION>__<FIELD>`, for example
//!    `MATREQ_BUSINESS__DIVISION=02`
//!
//! Both files are optional, so an empty directory yields the defaults.

use super::error::{ConfigResult, ConfigurationError};
use super::MatreqConfig;
use config::{Config, Environment, File, FileFormat, Map};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

const CONFIG_FILE_STEM: &str = "matreq";
const ENV_PREFIX: &str = "MATREQ";

/// Loaded, validated configuration plus where it came from
#[derive(Debug)]
pub struct ConfigManager {
    config: Arc<MatreqConfig>,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment and directory auto-detection
    pub fn load() -> ConfigResult<ConfigManager> {
        let directory = env::var("MATREQ_CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"));
        Self::load_from_directory_with_env(&directory, &Self::detect_environment())
    }

    /// Load configuration from a specific directory with explicit environment
    pub fn load_from_directory_with_env(
        config_directory: &Path,
        environment: &str,
    ) -> ConfigResult<ConfigManager> {
        Self::load_layered(config_directory, environment, Self::environment_source())
    }

    /// Like [`Self::load_from_directory_with_env`], but the `MATREQ_*`
    /// overrides are read from `variables` instead of the process environment
    pub fn load_from_directory_with_overrides(
        config_directory: &Path,
        environment: &str,
        variables: Map<String, String>,
    ) -> ConfigResult<ConfigManager> {
        let source = Self::environment_source().source(Some(variables));
        Self::load_layered(config_directory, environment, source)
    }

    fn load_layered(
        config_directory: &Path,
        environment: &str,
        env_source: Environment,
    ) -> ConfigResult<ConfigManager> {
        if config_directory.exists() && !config_directory.is_dir() {
            return Err(ConfigurationError::DirectoryNotFound {
                path: config_directory.to_path_buf(),
            });
        }

        let base_file = config_directory.join(format!("{CONFIG_FILE_STEM}.toml"));
        let env_file = config_directory.join(format!("{CONFIG_FILE_STEM}.{environment}.toml"));

        debug!(
            environment = %environment,
            base_file = %base_file.display(),
            env_file = %env_file.display(),
            "Loading material request configuration"
        );

        let built = Config::builder()
            .add_source(File::from(base_file.as_path()).format(FileFormat::Toml).required(false))
            .add_source(File::from(env_file.as_path()).format(FileFormat::Toml).required(false))
            .add_source(env_source)
            .build()
            .map_err(|e| ConfigurationError::build_error(environment, e))?;

        let config = Self::finish(built)?;

        info!(
            environment = %environment,
            systems = config.systems.len(),
            plants = config.plants.len(),
            "Configuration loaded successfully"
        );

        Ok(ConfigManager {
            config: Arc::new(config),
            environment: environment.to_string(),
            config_directory: config_directory.to_path_buf(),
        })
    }

    /// Load configuration from an in-memory TOML document (no env overrides)
    pub fn load_from_toml(toml: &str) -> ConfigResult<ConfigManager> {
        let built = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .map_err(|e| ConfigurationError::invalid_toml("<inline>", e))?;

        Ok(ConfigManager {
            config: Arc::new(Self::finish(built)?),
            environment: "inline".to_string(),
            config_directory: PathBuf::new(),
        })
    }

    fn finish(built: Config) -> ConfigResult<MatreqConfig> {
        let config: MatreqConfig = built
            .try_deserialize()
            .map_err(ConfigurationError::deserialization_error)?;
        config.validate()?;
        Ok(config)
    }

    fn environment_source() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
    }

    /// Detect the current environment
    pub fn detect_environment() -> String {
        env::var("MATREQ_ENV")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string())
    }

    /// Shared handle to the loaded configuration
    pub fn config(&self) -> Arc<MatreqConfig> {
        Arc::clone(&self.config)
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }

    /// Configuration as JSON with credential-looking fields masked
    pub fn debug_config(&self) -> serde_json::Value {
        let mut value = serde_json::json!(self.config.as_ref());
        Self::sanitize_json_recursive(&mut value, &["password", "secret", "token", "credential"]);
        value
    }

    fn sanitize_json_recursive(value: &mut serde_json::Value, sensitive_patterns: &[&str]) {
        match value {
            serde_json::Value::Object(map) => {
                for (key, val) in map.iter_mut() {
                    let key_lower = key.to_lowercase();
                    if sensitive_patterns.iter().any(|p| key_lower.contains(p)) {
                        *val = serde_json::Value::String("[MASKED]".to_string());
                    } else {
                        Self::sanitize_json_recursive(val, sensitive_patterns);
                    }
                }
            }
            serde_json::Value::Array(items) => {
                for item in items {
                    Self::sanitize_json_recursive(item, sensitive_patterns);
                }
            }
            _ => {}
        }
    }
}
