//! Configuration file handling.
//!
//! The configuration file is optional. When present it lives at `$BUDGET_HOME/config.json` and
//! names the data file and the number of backup copies to keep. Without it the data file is
//! `$BUDGET_HOME/kulut.txt` and no backups are taken.

use crate::backup::Backup;
use crate::error::{ErrorType, IntoResult};
use crate::{fs, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "daily-budget";
const CONFIG_VERSION: u8 = 1;
const BACKUP_COPIES: u32 = 5;
const BACKUPS: &str = ".backups";
const CONFIG_JSON: &str = "config.json";
const DATA_FILE: &str = "kulut.txt";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$BUDGET_HOME` and from there it loads `$BUDGET_HOME/config.json` if it exists. It
/// provides the paths of the data file and the backups directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    backups: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    data_file: PathBuf,
}

impl Config {
    /// Creates the home directory, an initial `config.json` with default settings and the backups
    /// directory.
    ///
    /// # Errors
    /// - Returns an error if a `config.json` already exists in `dir`.
    /// - Returns an error if any file operations fail.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        Self::create_inner(dir.into()).pub_result(ErrorType::Config)
    }

    /// Loads `$BUDGET_HOME/config.json`, or uses the default settings when there is no such file.
    ///
    /// # Errors
    /// - Returns an error if `home` is not a directory.
    /// - Returns an error if the config file cannot be read or is invalid.
    pub fn load(home: impl Into<PathBuf>) -> Result<Self> {
        Self::load_inner(home.into()).pub_result(ErrorType::Config)
    }

    fn create_inner(root: PathBuf) -> anyhow::Result<Self> {
        fs::create_dir_all(&root).context("Unable to create the home directory")?;
        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!("A config file already exists at '{}'", config_path.display())
        }
        let config_file = ConfigFile {
            backup_copies: BACKUP_COPIES,
            ..ConfigFile::default()
        };
        config_file.save(&config_path)?;
        let config = Self::new(root, config_path, config_file);
        fs::create_dir_all(&config.backups)?;
        Ok(config)
    }

    fn load_inner(root: PathBuf) -> anyhow::Result<Self> {
        if !root.is_dir() {
            bail!("The home directory '{}' does not exist", root.display())
        }
        let config_path = root.join(CONFIG_JSON);
        let config_file = if config_path.is_file() {
            ConfigFile::load(&config_path)?
        } else {
            debug!(
                "No config file at '{}', using defaults",
                config_path.display()
            );
            ConfigFile::default()
        };
        Ok(Self::new(root, config_path, config_file))
    }

    fn new(root: PathBuf, config_path: PathBuf, config_file: ConfigFile) -> Self {
        let data_file = if config_file.data_file.is_absolute() {
            config_file.data_file.clone()
        } else {
            root.join(&config_file.data_file)
        };
        Self {
            backups: root.join(BACKUPS),
            root,
            config_path,
            config_file,
            data_file,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn backups(&self) -> &Path {
        &self.backups
    }

    /// The path of the records file, `$BUDGET_HOME/kulut.txt` by default.
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn backup_copies(&self) -> u32 {
        self.config_file.backup_copies
    }

    /// Creates a new `Backup` instance for managing backup files.
    pub fn backup(&self) -> Backup {
        Backup::new(self)
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "daily-budget",
///   "config_version": 1,
///   "data_file": "kulut.txt",
///   "backup_copies": 5
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "daily-budget"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Path to the records file, relative to the home directory or absolute
    #[serde(default = "default_data_file")]
    data_file: PathBuf,

    /// Number of backup copies to keep, 0 disables backups
    #[serde(default)]
    backup_copies: u32,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DATA_FILE)
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            data_file: default_data_file(),
            backup_copies: 0,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        fs::write_all(p, data).context("Unable to write config file")
    }
}
