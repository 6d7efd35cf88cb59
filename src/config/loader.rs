//! Configuration File Loading
//!
//! Finds configuration files in the usual places and reads them as TOML or
//! JSON. A missing file is not an error: defaults apply.

use super::ReplConfig;
use crate::error::{Error, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Base name of configuration files
const CONFIG_FILE_STEM: &str = "glassrepl";

/// Environment variable pointing at an explicit configuration file
const CONFIG_ENV_VAR: &str = "GLASSREPL_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    /// Format implied by a file extension; anything unknown is TOML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }

    fn extension(self) -> &'static str {
        match self {
            ConfigFormat::Toml => "toml",
            ConfigFormat::Json => "json",
        }
    }

    fn name(self) -> &'static str {
        match self {
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Json => "JSON",
        }
    }
}

/// Configuration file loader
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Directories searched, in order
    search_paths: Vec<PathBuf>,
    /// Path of the file actually loaded
    current_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader over the default search paths
    pub fn new() -> Self {
        Self {
            search_paths: Self::default_search_paths(),
            current_path: None,
        }
    }

    /// Loader over explicit directories
    pub fn with_search_paths(search_paths: Vec<PathBuf>) -> Self {
        Self {
            search_paths,
            current_path: None,
        }
    }

    /// Load from `$GLASSREPL_CONFIG` or the search paths, falling back to defaults
    pub fn load() -> Result<ReplConfig> {
        if let Ok(explicit) = env::var(CONFIG_ENV_VAR) {
            return Self::load_from_path(Path::new(&explicit));
        }
        let mut loader = Self::new();
        loader.load_or_default()
    }

    /// Search this loader's paths; defaults when nothing is found
    pub fn load_or_default(&mut self) -> Result<ReplConfig> {
        match self.find_and_load()? {
            Some((path, config)) => {
                info!("Configuration loaded from {}", path.display());
                self.current_path = Some(path);
                Ok(config)
            }
            None => {
                debug!("No configuration file found, using defaults");
                Ok(ReplConfig::default())
            }
        }
    }

    /// Load one specific file
    pub fn load_from_path(path: &Path) -> Result<ReplConfig> {
        if !path.exists() {
            return Err(Error::ConfigLoadFailed {
                path: path.to_path_buf(),
                reason: "Configuration file does not exist".to_string(),
            });
        }
        let content = fs::read_to_string(path)?;
        let format = ConfigFormat::from_path(path);

        let config: ReplConfig = match format {
            ConfigFormat::Toml => toml::from_str(&content).map_err(|e| Error::ConfigParseFailed {
                format: format.name().to_string(),
                reason: e.to_string(),
            })?,
            ConfigFormat::Json => {
                serde_json::from_str(&content).map_err(|e| Error::ConfigParseFailed {
                    format: format.name().to_string(),
                    reason: e.to_string(),
                })?
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Save to a specific path, format by extension
    pub fn save_to_path(config: &ReplConfig, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::ConfigSaveFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        }

        let format = ConfigFormat::from_path(path);
        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(config).map_err(|e| {
                Error::ConfigSerializationFailed {
                    format: format.name().to_string(),
                    reason: e.to_string(),
                }
            })?,
            ConfigFormat::Toml => config.to_toml_string()?,
        };

        fs::write(path, content).map_err(|e| Error::ConfigSaveFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Path of the file loaded by [`load_or_default`](Self::load_or_default)
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    fn find_and_load(&self) -> Result<Option<(PathBuf, ReplConfig)>> {
        for dir in &self.search_paths {
            for format in [ConfigFormat::Toml, ConfigFormat::Json] {
                let path = dir.join(format!("{}.{}", CONFIG_FILE_STEM, format.extension()));
                if !path.exists() {
                    continue;
                }
                match Self::load_from_path(&path) {
                    Ok(config) => return Ok(Some((path, config))),
                    Err(e) => {
                        // keep searching; a broken file should not hide a good one
                        warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }
        Ok(None)
    }

    fn default_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Ok(cwd) = env::current_dir() {
            paths.push(cwd);
        }
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join(CONFIG_FILE_STEM));
        }
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(format!(".{}", CONFIG_FILE_STEM)));
        }
        paths
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
