//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/atelier/config.toml)
//! 3. Environment variables (ATELIER_* prefix)
//!
//! Environment variables take precedence over config file values. The project
//! and dataset identifiers are required; loading fails when either is absent.
//! The resulting [`Config`] is built once and passed to every component that
//! needs it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Environment variable prefix
const ENV_PREFIX: &str = "ATELIER";

/// Query API version used when none is configured
pub const DEFAULT_API_VERSION: &str = "2025-01-01";

/// Deployment environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Direct API access, query diagnostics logged
    #[default]
    Development,
    /// Cached CDN access, no query diagnostics
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Whether query text and parameters should be logged
    pub fn logs_queries(self) -> bool {
        !self.is_production()
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Some(Environment::Production),
            "development" | "dev" | "test" | "preview" => Some(Environment::Development),
            _ => None,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Store project identifier (required)
    #[serde(default)]
    pub project_id: String,

    /// Store dataset name (required)
    #[serde(default)]
    pub dataset: String,

    /// Query API version, a date like "2025-01-01"
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Deployment environment
    #[serde(default)]
    pub environment: Environment,

    /// Force CDN on or off; defaults to on in production
    #[serde(default)]
    pub use_cdn: Option<bool>,

    /// Override the query API base URL (e.g. a local proxy)
    #[serde(default)]
    pub api_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: String::new(),
            api_version: default_api_version(),
            environment: Environment::default(),
            use_cdn: None,
            api_url: None,
        }
    }
}

impl Config {
    /// Create a configuration for a project and dataset with defaults
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: dataset.into(),
            ..Self::default()
        }
    }

    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (ATELIER_PROJECT_ID, ATELIER_DATASET, ...)
    /// 2. Config file (~/.config/atelier/config.toml or ATELIER_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring an explicit path over the default one
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load_from_path(p),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self, ConfigError> {
        let mut config: Config =
            toml::from_str(toml_content).map_err(|source| ConfigError::Parse {
                path: PathBuf::from("<string>"),
                source,
            })?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(val) = env_value("PROJECT_ID") {
            self.project_id = val;
        }

        if let Some(val) = env_value("DATASET") {
            self.dataset = val;
        }

        if let Some(val) = env_value("API_VERSION") {
            self.api_version = val;
        }

        if let Some(val) = env_value("ENV") {
            self.environment = Environment::parse(&val).ok_or(ConfigError::Invalid {
                name: "environment",
                value: val,
            })?;
        }

        if let Some(val) = env_value("USE_CDN") {
            self.use_cdn = Some(val.eq_ignore_ascii_case("true") || val == "1");
        }

        if let Some(val) = env_value("API_URL") {
            self.api_url = Some(val);
        }

        Ok(())
    }

    /// Check that the required identifiers are present
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.project_id.trim().is_empty() {
            return Err(ConfigError::Missing {
                name: "project_id",
                env_var: format!("{}_PROJECT_ID", ENV_PREFIX),
            });
        }

        if self.dataset.trim().is_empty() {
            return Err(ConfigError::Missing {
                name: "dataset",
                env_var: format!("{}_DATASET", ENV_PREFIX),
            });
        }

        if self.project_id.contains(|c: char| !(c.is_ascii_alphanumeric() || c == '-')) {
            return Err(ConfigError::Invalid {
                name: "project_id",
                value: self.project_id.clone(),
            });
        }

        Ok(())
    }

    /// Whether queries go through the cached CDN host
    pub fn use_cdn(&self) -> bool {
        self.use_cdn.unwrap_or(self.environment.is_production())
    }

    /// Base URL of the query endpoint for this project and dataset
    pub fn query_url(&self) -> String {
        let base = match &self.api_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => {
                let host = if self.use_cdn() { "apicdn" } else { "api" };
                format!("https://{}.{}.sanity.io", self.project_id, host)
            }
        };

        let version = self.api_version.trim_start_matches('v');
        format!("{}/v{}/data/query/{}", base, version, self.dataset)
    }

    /// Get the config file path
    ///
    /// Can be overridden with ATELIER_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("atelier")
            .join("config.toml")
    }
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

/// Read a non-empty `ATELIER_*` variable
fn env_value(suffix: &str) -> Option<String> {
    std::env::var(format!("{}_{}", ENV_PREFIX, suffix))
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &[
        "ATELIER_PROJECT_ID",
        "ATELIER_DATASET",
        "ATELIER_API_VERSION",
        "ATELIER_ENV",
        "ATELIER_USE_CDN",
        "ATELIER_API_URL",
    ];

    #[test]
    fn test_default_config_is_invalid() {
        let config = Config::default();
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.environment, Environment::Development);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing {
                name: "project_id",
                ..
            })
        ));
    }

    #[test]
    fn test_missing_dataset() {
        let config = Config::new("abc123", "");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing { name: "dataset", .. })
        ));
    }

    #[test]
    fn test_invalid_project_id() {
        let config = Config::new("abc/../x", "production");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { name: "project_id", .. })
        ));
    }

    #[test]
    fn test_query_url_routing() {
        let mut config = Config::new("abc123", "production");
        assert_eq!(
            config.query_url(),
            "https://abc123.api.sanity.io/v2025-01-01/data/query/production"
        );

        config.environment = Environment::Production;
        assert!(config.use_cdn());
        assert_eq!(
            config.query_url(),
            "https://abc123.apicdn.sanity.io/v2025-01-01/data/query/production"
        );

        config.use_cdn = Some(false);
        assert!(config.query_url().starts_with("https://abc123.api.sanity.io"));

        config.api_url = Some("http://localhost:8080/".to_string());
        assert_eq!(
            config.query_url(),
            "http://localhost:8080/v2025-01-01/data/query/production"
        );
    }

    #[test]
    fn test_env_overrides() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("ATELIER_PROJECT_ID", "envproj");
        env::set_var("ATELIER_DATASET", "staging");
        env::set_var("ATELIER_ENV", "production");
        env::set_var("ATELIER_USE_CDN", "0");
        config.apply_env_overrides().unwrap();

        assert_eq!(config.project_id, "envproj");
        assert_eq!(config.dataset, "staging");
        assert!(config.environment.is_production());
        assert_eq!(config.use_cdn, Some(false));
        assert!(!config.use_cdn());
    }

    #[test]
    fn test_env_invalid_environment() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("ATELIER_ENV", "staging-ish");
        assert!(matches!(
            config.apply_env_overrides(),
            Err(ConfigError::Invalid { name: "environment", .. })
        ));
    }

    #[test]
    fn test_empty_env_value_is_ignored() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::new("fileproj", "production");
        env::set_var("ATELIER_PROJECT_ID", "  ");
        config.apply_env_overrides().unwrap();
        assert_eq!(config.project_id, "fileproj");
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            project_id = "4wgg11gp"
            dataset = "production"
            environment = "production"
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.project_id, "4wgg11gp");
        assert_eq!(config.dataset, "production");
        assert!(config.use_cdn());
    }

    #[test]
    fn test_load_from_str_missing_required() {
        let _guard = EnvGuard::new(ENV_VARS);

        let err = Config::load_from_str(r#"dataset = "production""#).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { name: "project_id", .. }));
    }

    #[test]
    fn test_load_from_path_missing_file_uses_env() {
        let _guard = EnvGuard::new(ENV_VARS);

        env::set_var("ATELIER_PROJECT_ID", "envonly");
        env::set_var("ATELIER_DATASET", "production");

        let path = PathBuf::from("/nonexistent/atelier/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.project_id, "envonly");
    }

    #[test]
    fn test_load_from_path_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "project_id = \"fileproj\"\ndataset = \"production\"\napi_version = \"v2024-06-01\"\n",
        )
        .unwrap();

        env::set_var("ATELIER_DATASET", "staging");
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.project_id, "fileproj");
        assert_eq!(config.dataset, "staging");
        assert!(config.query_url().contains("/v2024-06-01/"));
    }

    #[test]
    fn test_load_from_path_parse_error() {
        let _guard = EnvGuard::new(ENV_VARS);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "project_id = [unterminated").unwrap();

        let err = Config::load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_serialization() {
        let config = Config::new("abc123", "production");
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("project_id"));
        assert!(toml_str.contains("dataset"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }
}
