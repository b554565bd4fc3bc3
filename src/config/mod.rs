use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::errors::LedgerError;

const DEFAULT_DIR_NAME: &str = ".ledger_core";
const CONFIG_FILE: &str = "config.json";
const DATA_DIR: &str = "data";
const DATA_FILE: &str = "transactions.csv";

/// Returns the application data directory, defaulting to `~/.ledger_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("LEDGER_CORE_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Location of the CSV backing file.
    pub data_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: app_data_dir().join(DATA_DIR).join(DATA_FILE),
        }
    }
}

/// Loads and saves the JSON configuration under the app data directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            path: base.join(CONFIG_FILE),
        }
    }

    /// Reads the config file; a missing file yields the defaults.
    pub fn load(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            let data =
                fs::read_to_string(&self.path).map_err(|err| LedgerError::Load(err.to_string()))?;
            serde_json::from_str(&data).map_err(|err| LedgerError::Load(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| LedgerError::Persistence(err.to_string()))?;
        }
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| LedgerError::Persistence(err.to_string()))?;
        fs::write(&self.path, json).map_err(|err| LedgerError::Persistence(err.to_string()))?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf());
        let config = manager.load().expect("defaults");
        assert!(config.data_file.ends_with("transactions.csv"));
    }

    #[test]
    fn config_roundtrips_through_json() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf());
        let config = Config {
            data_file: temp.path().join("elsewhere.csv"),
        };
        manager.save(&config).expect("save config");
        let loaded = manager.load().expect("load config");
        assert_eq!(loaded.data_file, config.data_file);
    }

    #[test]
    fn malformed_config_is_a_load_error() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf());
        fs::write(manager.path(), "{not json").unwrap();
        assert!(matches!(manager.load(), Err(LedgerError::Load(_))));
    }
}
