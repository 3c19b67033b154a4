// File: ./src/config.rs
// Typed view of the settings file. Where the file lives (and any
// environment overrides) is the caller's business; this module only loads
// and validates an explicit path.
use crate::error::Error;
use crate::store::BoardStore;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

fn default_timezone() -> String {
    "UTC".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Config {
    /// Outline files to search, in order.
    #[serde(default)]
    pub files: Vec<PathBuf>,
    /// Alias -> canonical project name, fixed for the lifetime of the store.
    #[serde(default)]
    pub aliases: HashMap<String, String>,
    /// Zone designator applied to every date token (chrono-tz name).
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            aliases: HashMap::new(),
            timezone: default_timezone(),
        }
    }
}

impl Config {
    /// Load the configuration from an explicit TOML path.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;
        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;
        Ok(config)
    }

    /// Builds the resolver this config describes. Fails on an unknown
    /// timezone designator.
    pub fn into_store(self) -> Result<BoardStore, Error> {
        BoardStore::new(self.files, self.aliases, &self.timezone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_config() {
        let config: Config = toml::from_str(
            r#"
files = ["work.md", "home.md"]
timezone = "Europe/Brussels"

[aliases]
billing = "Billing System"
"#,
        )
        .unwrap();
        assert_eq!(config.files.len(), 2);
        assert_eq!(config.timezone, "Europe/Brussels");
        assert_eq!(config.aliases["billing"], "Billing System");
        assert!(config.into_store().is_ok());
    }

    #[test]
    fn defaults_apply_to_an_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.files.is_empty());
        assert!(config.aliases.is_empty());
        assert_eq!(config.timezone, "UTC");
    }

    #[test]
    fn unknown_timezone_fails_store_construction() {
        let config = Config {
            timezone: "Mars/Olympus".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.into_store(),
            Err(Error::UnknownTimezone { .. })
        ));
    }
}
