use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, RwLock};

use crate::log::LogLevel;
use crate::{fplog, fplog_debug, Error, Result};

static CURRENT: OnceLock<RwLock<Arc<Config>>> = OnceLock::new();

fn default_detach() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Detach discarded operand futures (losing race side, `ap` sibling
    /// after a fail-fast) onto the ambient Tokio runtime instead of
    /// dropping them.
    #[serde(default = "default_detach")]
    pub detach_discarded: bool,
    #[serde(default)]
    pub log_level: LogLevel,
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            detach_discarded: default_detach(),
            log_level: LogLevel::default(),
            log_file: None,
        }
    }
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        Ok(dirs::config_dir().ok_or(Error::NoConfigDir)?.join("fpkit"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("fpkit.toml"))
    }

    /// Resolved log file path, tilde expanded.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.as_deref().map(expand_tilde)
    }

    /// Load from the default location, falling back to defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        fplog_debug!("Config::load path={}", path.display());
        if !path.exists() {
            fplog_debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config = Self::from_toml_str(&fs::read_to_string(path)?)?;
        fplog_debug!(
            "Config loaded: detach_discarded={}, log_level={:?}, log_file={:?}",
            config.detach_discarded,
            config.log_level,
            config.log_file
        );
        Ok(config)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(file) = &self.log_file {
            if file.trim().is_empty() {
                return Err(Error::Validation("log_file must not be empty".to_string()));
            }
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fplog_debug!("Creating config directory: {}", parent.display());
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        fplog_debug!("Config saved to {}", path.display());
        Ok(())
    }

    /// Publish this config process-wide; combinators read it through
    /// [`current`].
    pub fn install(self) -> Result<()> {
        self.validate()?;
        fplog!(
            "Config installed: detach_discarded={}, log_level={:?}",
            self.detach_discarded,
            self.log_level
        );
        let slot = CURRENT.get_or_init(|| RwLock::new(Arc::new(Config::default())));
        match slot.write() {
            Ok(mut guard) => *guard = Arc::new(self),
            Err(poisoned) => *poisoned.into_inner() = Arc::new(self),
        }
        Ok(())
    }
}

/// The installed config, or defaults when none was installed.
pub fn current() -> Arc<Config> {
    match CURRENT.get() {
        Some(slot) => match slot.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        },
        None => Arc::new(Config::default()),
    }
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
