use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::path::resolve_in;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub mod migrate; // use submodule at src/config/migrate.rs

/// Where transaction records live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// `records` table in the SQLite database
    #[default]
    Sqlite,
    /// Local spreadsheet file (CSV)
    Csv,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default)]
    pub backend: Backend,
    #[serde(default = "default_csv_file")]
    pub csv_file: String,
    #[serde(default)]
    pub current_user: Option<String>,
    #[serde(default = "default_decimals")]
    pub decimals: usize,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

/// Keys every up-to-date configuration file carries.
pub const CONFIG_KEYS: [&str; 6] = [
    "database",
    "backend",
    "csv_file",
    "current_user",
    "decimals",
    "separator_char",
];

fn default_csv_file() -> String {
    Config::config_dir()
        .join("rinventory.csv")
        .to_string_lossy()
        .to_string()
}
fn default_decimals() -> usize {
    2
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            backend: Backend::default(),
            csv_file: default_csv_file(),
            current_user: None,
            decimals: default_decimals(),
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rinventory")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rinventory")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rinventory.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rinventory.sqlite")
    }

    /// Load configuration from the standard file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, yaml)?;
        Ok(())
    }

    /// Separator used under table headers.
    pub fn separator(&self) -> char {
        self.separator_char.chars().next().unwrap_or('-')
    }

    /// Initialize configuration and database files.
    ///
    /// In test mode the configuration file is not written.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_db {
            Some(name) => resolve_in(&dir, &name),
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            config.save_to(&Self::config_file())?;
            success(format!("Config file: {:?}", Self::config_file()));
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        success(format!("Database:    {:?}", db_path));

        Ok(config)
    }
}
