//! # Restman Configuration
//!
//! Where the restaurant keeps its files, and how much to reorder.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     RESTMAN_DATA_DIR=/srv/restman                                       │
//! │     RESTMAN_RESTOCK_QUANTITY=25                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/restman/restman.toml (Linux)                             │
//! │     ~/Library/Application Support/com.restman.restman/ (macOS)         │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     files in the platform data dir, restock 10                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # restman.toml
//! [paths]
//! snapshot = "/srv/restman/restaurant.json"
//! audit_log = "/srv/restman/log.txt"
//! requests = "/srv/restman/requests.txt"
//!
//! [inventory]
//! restock_quantity = 10   # whole units requested per low-stock signal
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use restman_core::Quantity;

use crate::error::{StoreError, StoreResult};

const SNAPSHOT_FILE: &str = "restaurant.json";
const AUDIT_LOG_FILE: &str = "log.txt";
const REQUESTS_FILE: &str = "requests.txt";
const CONFIG_FILE: &str = "restman.toml";

// =============================================================================
// Sections
// =============================================================================

/// File locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSettings {
    /// JSON snapshot of the whole restaurant.
    pub snapshot: PathBuf,
    /// Append-only audit trail.
    pub audit_log: PathBuf,
    /// Outstanding supplier requests.
    pub requests: PathBuf,
}

impl PathSettings {
    /// All three files inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        PathSettings {
            snapshot: dir.join(SNAPSHOT_FILE),
            audit_log: dir.join(AUDIT_LOG_FILE),
            requests: dir.join(REQUESTS_FILE),
        }
    }
}

impl Default for PathSettings {
    fn default() -> Self {
        let dir = directories::ProjectDirs::from("com", "restman", "restman")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        Self::in_dir(&dir)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySettings {
    /// Whole units requested each time stock falls to its threshold.
    #[serde(default = "default_restock_quantity")]
    pub restock_quantity: u32,
}

fn default_restock_quantity() -> u32 {
    10
}

impl Default for InventorySettings {
    fn default() -> Self {
        InventorySettings {
            restock_quantity: default_restock_quantity(),
        }
    }
}

// =============================================================================
// Restman Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestmanConfig {
    #[serde(default)]
    pub paths: PathSettings,

    #[serde(default)]
    pub inventory: InventorySettings,
}

impl RestmanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (restman.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading restman config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| StoreError::io(&path, e))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load restman config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file as pretty TOML.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| StoreError::io(&path, e))?;

        info!(?path, "Restman config saved");
        Ok(())
    }

    pub fn validate(&self) -> StoreResult<()> {
        if self.inventory.restock_quantity == 0 {
            return Err(StoreError::InvalidConfig(
                "restock_quantity must be greater than 0".into(),
            ));
        }

        let paths = [
            &self.paths.snapshot,
            &self.paths.audit_log,
            &self.paths.requests,
        ];
        if paths.iter().any(|p| p.as_os_str().is_empty()) {
            return Err(StoreError::InvalidConfig("file paths must not be empty".into()));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `RESTMAN_*` overrides from any key lookup.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Data dir first so the per-file overrides win
        if let Some(dir) = lookup("RESTMAN_DATA_DIR") {
            debug!(dir = %dir, "Overriding data dir from environment");
            self.paths = PathSettings::in_dir(Path::new(&dir));
        }

        if let Some(path) = lookup("RESTMAN_SNAPSHOT_PATH") {
            self.paths.snapshot = PathBuf::from(path);
        }

        if let Some(path) = lookup("RESTMAN_LOG_PATH") {
            self.paths.audit_log = PathBuf::from(path);
        }

        if let Some(path) = lookup("RESTMAN_REQUESTS_PATH") {
            self.paths.requests = PathBuf::from(path);
        }

        if let Some(quantity) = lookup("RESTMAN_RESTOCK_QUANTITY") {
            match quantity.parse::<u32>() {
                Ok(q) => {
                    debug!(restock_quantity = q, "Overriding restock quantity from environment");
                    self.inventory.restock_quantity = q;
                }
                Err(_) => warn!(value = %quantity, "Ignoring invalid RESTMAN_RESTOCK_QUANTITY"),
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "restman", "restman")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Restock amount as a ledger quantity.
    pub fn restock_quantity(&self) -> Quantity {
        Quantity::from_units(i64::from(self.inventory.restock_quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = RestmanConfig::default();
        assert_eq!(config.inventory.restock_quantity, 10);
        assert_eq!(config.restock_quantity(), Quantity::from_units(10));
        assert!(config.paths.audit_log.ends_with("log.txt"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = RestmanConfig::default();
        config.inventory.restock_quantity = 0;
        assert!(config.validate().is_err());

        let mut config = RestmanConfig::default();
        config.paths.requests = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("RESTMAN_DATA_DIR", "/srv/restman"),
            ("RESTMAN_LOG_PATH", "/var/log/restman.log"),
            ("RESTMAN_RESTOCK_QUANTITY", "25"),
        ]
        .into_iter()
        .collect();

        let mut config = RestmanConfig::default();
        config.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.paths.snapshot, PathBuf::from("/srv/restman/restaurant.json"));
        assert_eq!(config.paths.requests, PathBuf::from("/srv/restman/requests.txt"));
        assert_eq!(config.paths.audit_log, PathBuf::from("/var/log/restman.log"));
        assert_eq!(config.inventory.restock_quantity, 25);
    }

    #[test]
    fn test_invalid_restock_override_is_ignored() {
        let mut config = RestmanConfig::default();
        config.apply_overrides(|k| (k == "RESTMAN_RESTOCK_QUANTITY").then(|| "lots".to_string()));
        assert_eq!(config.inventory.restock_quantity, 10);
    }

    #[test]
    fn test_toml_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("restman.toml");

        let mut config = RestmanConfig::default();
        config.paths = PathSettings::in_dir(dir.path());
        config.inventory.restock_quantity = 12;
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[inventory]"));
        let parsed: RestmanConfig = toml::from_str(&contents).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let parsed: RestmanConfig = toml::from_str("[inventory]\n").unwrap();
        assert_eq!(parsed.inventory.restock_quantity, 10);
    }
}
