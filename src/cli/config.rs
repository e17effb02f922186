//! Configuration file for the neodb CLI
//!
//! An optional JSON file; every field has a default and flags given on the
//! command line take precedence over file values.
//!
//! ```json
//! {
//!     "neofile": "data/neos.csv",
//!     "cadfile": "data/cad.json",
//!     "duplicate_policy": "last_wins",
//!     "log_level": "warn"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::index::{DuplicatePolicy, LinkOptions};
use crate::observability::{log_event_with_fields, Event, Severity};

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// NEO CSV file (optional, default "data/neos.csv")
    #[serde(default = "default_neofile")]
    pub neofile: PathBuf,

    /// Close approach JSON file (optional, default "data/cad.json")
    #[serde(default = "default_cadfile")]
    pub cadfile: PathBuf,

    /// Handling of NEOs sharing a lookup key (optional, default "last_wins")
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,

    /// Minimum log severity (optional, default "warn")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_neofile() -> PathBuf {
    PathBuf::from("data/neos.csv")
}
fn default_cadfile() -> PathBuf {
    PathBuf::from("data/cad.json")
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            neofile: default_neofile(),
            cadfile: default_cadfile(),
            duplicate_policy: DuplicatePolicy::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        let path_str = path.display().to_string();
        log_event_with_fields(Event::ConfigLoaded, &[("path", path_str.as_str())]);

        Ok(config)
    }

    /// Load from `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Replace file paths with the ones given on the command line
    pub fn with_overrides(mut self, neofile: Option<PathBuf>, cadfile: Option<PathBuf>) -> Self {
        if let Some(neofile) = neofile {
            self.neofile = neofile;
        }
        if let Some(cadfile) = cadfile {
            self.cadfile = cadfile;
        }
        self
    }

    fn validate(&self) -> CliResult<()> {
        if self.neofile.as_os_str().is_empty() {
            return Err(CliError::config_error("neofile must not be empty"));
        }

        if self.cadfile.as_os_str().is_empty() {
            return Err(CliError::config_error("cadfile must not be empty"));
        }

        self.severity()?;

        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level.parse::<Severity>().map_err(|_| {
            CliError::config_error(format!(
                "Invalid log_level: '{}'. Must be one of trace, info, warn, error.",
                self.log_level
            ))
        })
    }

    /// Link options derived from the configuration
    pub fn link_options(&self) -> LinkOptions {
        LinkOptions {
            duplicate_policy: self.duplicate_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_config(temp_dir: &TempDir, value: serde_json::Value) -> PathBuf {
        let config_path = temp_dir.path().join("neodb.json");
        fs::write(&config_path, value.to_string()).unwrap();
        config_path
    }

    #[test]
    fn test_config_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(&temp_dir, json!({}));

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.neofile, PathBuf::from("data/neos.csv"));
        assert_eq!(config.duplicate_policy, DuplicatePolicy::LastWins);
        assert_eq!(config.severity().unwrap(), Severity::Warn);
    }

    #[test]
    fn test_config_reject_policy() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(
            &temp_dir,
            json!({ "duplicate_policy": "reject", "log_level": "info" }),
        );

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.link_options(), LinkOptions::strict());
        assert_eq!(config.severity().unwrap(), Severity::Info);
    }

    #[test]
    fn test_config_validates_log_level() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(&temp_dir, json!({ "log_level": "verbose" }));

        let result = Config::load(&config_path);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_config_rejects_unknown_policy() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(&temp_dir, json!({ "duplicate_policy": "first_wins" }));

        assert!(Config::load(&config_path).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = Config::load(&temp_dir.path().join("absent.json"));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config = Config::default()
            .with_overrides(Some(PathBuf::from("other.csv")), None);
        assert_eq!(config.neofile, PathBuf::from("other.csv"));
        assert_eq!(config.cadfile, PathBuf::from("data/cad.json"));
    }
}
