use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable overriding the configured database path.
pub const DB_ENV: &str = "EMTRACK_DB";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

/// The error worth reporting from loading `.env`. A missing file is the
/// normal case and is not reported.
fn dotenv_problem(result: Result<PathBuf, dotenvy::Error>) -> Option<dotenvy::Error> {
    match result {
        Ok(path) => {
            debug!(path = %path.display(), "loaded .env");
            None
        }
        Err(dotenvy::Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => Some(e),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl Config {
    /// Return the configuration directory (`~/.emtrack`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".emtrack")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("emtrack.conf")
    }

    /// Return the default path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("emtrack.sqlite")
    }

    /// Load the effective configuration: `.env`, then the config file (or
    /// defaults when it does not exist), then environment overrides.
    pub fn load() -> AppResult<Self> {
        if let Some(problem) = dotenv_problem(dotenvy::dotenv()) {
            warn!(error = %problem, "ignoring unreadable .env file");
        }

        let path = Self::config_file();
        let cfg = if path.exists() {
            Self::load_from(&path)?
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };

        Ok(cfg.with_env_overrides(|key| env::var(key).ok()))
    }

    /// Parse a config file without applying any override.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        let mut cfg: Config = serde_yaml::from_str(&content)?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        Ok(cfg)
    }

    /// Apply environment overrides, looking variables up through `lookup`.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(db) = lookup(DB_ENV).filter(|v| !v.trim().is_empty()) {
            debug!(database = %db, "database overridden from {}", DB_ENV);
            self.set_database(&db);
        }
        self
    }

    pub fn set_database(&mut self, path: &str) {
        self.database = expand_tilde(path).to_string_lossy().to_string();
    }

    /// Write the config file at `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Initialize configuration directory and file.
    ///
    /// A relative `custom_db` is resolved inside the config directory. In
    /// test mode the config file is left untouched. Returns the database
    /// path the configuration points at.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        if !is_test {
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };
            config.save_to(&Self::config_file())?;
        }

        Ok(db_path)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(AppError::from)
    }
}
