use crate::error::{AddrBookError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_BOOK_FILENAME: &str = "addressbook.json";

/// Overrides the config directory (used by tests and portable setups).
pub const HOME_ENV: &str = "ADDRBOOK_HOME";

pub const KEYS: [&str; 2] = ["default-book", "confirm-delete"];

/// Configuration for addrbook, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddrBookConfig {
    /// Book opened when `--book` is not given
    #[serde(default)]
    pub default_book: Option<PathBuf>,

    /// Ask before deleting a person
    #[serde(default = "default_confirm_delete")]
    pub confirm_delete: bool,
}

fn default_confirm_delete() -> bool {
    true
}

impl Default for AddrBookConfig {
    fn default() -> Self {
        Self {
            default_book: None,
            confirm_delete: default_confirm_delete(),
        }
    }
}

impl AddrBookConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(AddrBookError::Io)?;
        let config: AddrBookConfig =
            serde_json::from_str(&content).map_err(AddrBookError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(AddrBookError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(AddrBookError::Serialization)?;
        fs::write(config_path, content).map_err(AddrBookError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "default-book" => Ok(self
                .default_book
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()),
            "confirm-delete" => Ok(self.confirm_delete.to_string()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default-book" => {
                self.default_book = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "confirm-delete" => {
                self.confirm_delete = match value {
                    "true" | "yes" | "on" => true,
                    "false" | "no" | "off" => false,
                    other => {
                        return Err(AddrBookError::Config(format!(
                            "confirm-delete expects true or false, got '{}'",
                            other
                        )))
                    }
                };
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }

    pub fn list_all(&self) -> Vec<(String, String)> {
        KEYS.iter()
            .map(|key| (key.to_string(), self.get(key).unwrap_or_default()))
            .collect()
    }

    /// Book to use when none is named on the command line.
    pub fn book_path(&self, config_dir: &Path) -> PathBuf {
        self.default_book
            .clone()
            .unwrap_or_else(|| config_dir.join(DEFAULT_BOOK_FILENAME))
    }
}

fn unknown_key(key: &str) -> AddrBookError {
    AddrBookError::Config(format!(
        "unknown key '{}' (known keys: {})",
        key,
        KEYS.join(", ")
    ))
}

/// `$ADDRBOOK_HOME` if set, otherwise the platform config directory.
pub fn config_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "addrbook", "addrbook")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| AddrBookError::Config("could not determine config directory".into()))
}
