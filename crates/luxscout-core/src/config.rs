use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
///
/// Loaded from a TOML file under the platform config dir; CLI flags
/// override whatever is in here.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

impl Config {
    /// Load config from the default location, falling back to defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&contents)
                .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to disk
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::Config("Could not find config directory".into()))?
            .join("luxscout");
        Ok(config_dir.join("config.toml"))
    }

    /// Where the wishlist/enquiry database lives, unless overridden
    pub fn store_db_path(&self) -> crate::Result<PathBuf> {
        if let Some(path) = &self.store.db_path {
            return Ok(PathBuf::from(path));
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| crate::Error::Config("Could not find data directory".into()))?
            .join("luxscout");
        Ok(data_dir.join("store.db"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// Path to an alternative catalog JSON file; the embedded catalog is
    /// used when unset
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    /// Path to the SQLite store; defaults to the platform data dir
    pub db_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Delay between keystroke and recompute, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Show relevance scores next to search results
    #[serde(default)]
    pub show_scores: bool,
}

fn default_debounce_ms() -> u64 {
    200
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            show_scores: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.search.debounce_ms, 200);
        assert!(!config.search.show_scores);
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("debounce_ms"));

        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.search.debounce_ms, config.search.debounce_ms);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let parsed: Config = toml::from_str("[search]\nshow_scores = true\n").unwrap();
        assert!(parsed.search.show_scores);
        assert_eq!(parsed.search.debounce_ms, 200);
    }
}
