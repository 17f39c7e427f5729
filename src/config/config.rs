// SPDX-License-Identifier: GPL-3.0-only
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::registry::models::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite database path for the parking spot registry
    pub database_path: PathBuf,

    /// Maximum number of pooled database connections
    pub max_connections: u32,

    /// HTTP API bind address (e.g., "127.0.0.1:8080")
    pub api_bind: SocketAddr,

    /// Page size used when a listing request does not give one
    pub default_page_size: u32,

    /// Upper bound for the page size a caller may request
    pub max_page_size: u32,

    /// How long browsers may cache CORS preflight responses
    pub cors_max_age_secs: u64,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
}

impl Config {
    /// Load configuration from TOML file with environment variable overrides
    pub fn load() -> anyhow::Result<Self> {
        let config_path = std::env::var("PARKING_CONFIG")
            .unwrap_or_else(|_| "config.toml".to_string());

        let mut config = Self::from_file(Path::new(&config_path))?;
        config.apply_overrides(|key| std::env::var(key).ok())?;

        Ok(config)
    }

    /// Read a TOML file, falling back to defaults when it does not exist
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            Ok(Config::default())
        }
    }

    /// Apply `PARKING_*` overrides looked up through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("PARKING_DATABASE_PATH") {
            self.database_path = PathBuf::from(val);
        }
        if let Some(val) = lookup("PARKING_MAX_CONNECTIONS") {
            self.max_connections = val.parse()?;
        }
        if let Some(val) = lookup("PARKING_API_BIND") {
            self.api_bind = SocketAddr::from_str(&val)?;
        }
        if let Some(val) = lookup("PARKING_DEFAULT_PAGE_SIZE") {
            self.default_page_size = val.parse()?;
        }
        if let Some(val) = lookup("PARKING_MAX_PAGE_SIZE") {
            self.max_page_size = val.parse()?;
        }
        if let Some(val) = lookup("PARKING_CORS_MAX_AGE_SECS") {
            self.cors_max_age_secs = val.parse()?;
        }
        if let Some(val) = lookup("PARKING_LOG_LEVEL") {
            self.log_level = val;
        }
        if let Some(val) = lookup("PARKING_LOG_JSON") {
            self.log_json = val.parse()?;
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("parking.db"),
            max_connections: 5,
            api_bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            cors_max_age_secs: 3600,
            log_level: String::from("info"),
            log_json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::NamedTempFile;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.database_path, PathBuf::from("parking.db"));
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.api_bind, SocketAddr::from_str("127.0.0.1:8080").unwrap());
        assert_eq!(config.default_page_size, 10);
        assert_eq!(config.max_page_size, 2000);
        assert_eq!(config.cors_max_age_secs, 3600);
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let config = Config::from_file(Path::new("/nonexistent/parking/config.toml")).unwrap();
        assert_eq!(config.database_path, PathBuf::from("parking.db"));
        assert_eq!(config.api_bind, SocketAddr::from_str("127.0.0.1:8080").unwrap());
    }

    #[test]
    fn test_load_from_toml() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_content = r#"
database_path = "/var/lib/parking/parking.db"
max_connections = 8
api_bind = "0.0.0.0:9000"
default_page_size = 25
max_page_size = 100
cors_max_age_secs = 600
log_level = "debug"
log_json = true
"#;
        fs::write(temp_file.path(), config_content).unwrap();

        let config = Config::from_file(temp_file.path()).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/var/lib/parking/parking.db"));
        assert_eq!(config.max_connections, 8);
        assert_eq!(config.api_bind, SocketAddr::from_str("0.0.0.0:9000").unwrap());
        assert_eq!(config.default_page_size, 25);
        assert_eq!(config.max_page_size, 100);
        assert_eq!(config.cors_max_age_secs, 600);
        assert_eq!(config.log_level, "debug");
        assert!(config.log_json);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "log_level = \"warn\"\n").unwrap();

        let config = Config::from_file(temp_file.path()).unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.database_path, PathBuf::from("parking.db"));
        assert_eq!(config.max_page_size, 2000);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "api_bind = \"not an address\"\n").unwrap();

        assert!(Config::from_file(temp_file.path()).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_overrides(lookup_from(&[
                ("PARKING_DATABASE_PATH", "/env/parking.db"),
                ("PARKING_MAX_CONNECTIONS", "12"),
                ("PARKING_API_BIND", "192.168.1.1:9090"),
                ("PARKING_DEFAULT_PAGE_SIZE", "50"),
                ("PARKING_MAX_PAGE_SIZE", "500"),
                ("PARKING_CORS_MAX_AGE_SECS", "60"),
                ("PARKING_LOG_LEVEL", "trace"),
                ("PARKING_LOG_JSON", "true"),
            ]))
            .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/env/parking.db"));
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.api_bind, SocketAddr::from_str("192.168.1.1:9090").unwrap());
        assert_eq!(config.default_page_size, 50);
        assert_eq!(config.max_page_size, 500);
        assert_eq!(config.cors_max_age_secs, 60);
        assert_eq!(config.log_level, "trace");
        assert!(config.log_json);
    }

    #[test]
    fn test_no_overrides_leaves_config_untouched() {
        let mut config = Config::default();
        config.apply_overrides(lookup_from(&[])).unwrap();
        assert_eq!(config.database_path, PathBuf::from("parking.db"));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_invalid_override_is_error() {
        let mut config = Config::default();
        assert!(config.apply_overrides(lookup_from(&[("PARKING_API_BIND", "nowhere")])).is_err());

        let mut config = Config::default();
        assert!(config.apply_overrides(lookup_from(&[("PARKING_MAX_PAGE_SIZE", "-1")])).is_err());
    }
}
