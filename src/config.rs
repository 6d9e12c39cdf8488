use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Top-level configuration for a copy run.
///
/// Names the raster driver used for the create-copy, the metadata domain
/// read from the source, and the literal pattern removed from keys when
/// stripping is requested.
///
/// # Loading
///
/// ```rust,no_run
/// use gtiff_metadata::config::Config;
///
/// // From a JSON file
/// let config = Config::load(Some("config.json".as_ref())).unwrap();
///
/// // Or use defaults and customize
/// let mut config = Config::default();
/// config.output.fail_on_write_error = true;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Short name of the GDAL driver used to write the copy.
    pub driver: String,
    /// Metadata domain read from the source dataset.
    pub source_domain: String,
    /// Literal pattern removed from every key when stripping.
    pub strip_pattern: String,
    /// Transcript and failure behavior.
    pub output: OutputConfig,
}

/// Output and behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Print the metadata domain listing of the source and of the copy.
    pub list_domains: bool,
    /// If `true`, any failed metadata write makes the run fail after cleanup.
    pub fail_on_write_error: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            driver: "GTiff".to_string(),
            source_domain: "EXIF".to_string(),
            strip_pattern: "EXIF_".to_string(),
            output: OutputConfig {
                list_domains: true,
                fail_on_write_error: false,
            },
        }
    }
}

impl Config {
    /// Resolve the config file path — same directory as the executable.
    pub fn config_path() -> Result<PathBuf> {
        let exe_path = std::env::current_exe().context("Failed to get executable path")?;
        let exe_dir = exe_path
            .parent()
            .context("Failed to get executable directory")?;
        Ok(exe_dir.join("config.json"))
    }

    /// Load config from the given path, or from the default location.
    ///
    /// A missing file is not an error: defaults are used instead.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            log::warn!(
                "Config file not found at {}. Using defaults.",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;
        let config: Config =
            serde_json::from_str(&contents).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given path, or to the default location.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, contents).context("Failed to write config file")?;
        log::info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Reject settings the copy run cannot work with.
    pub fn validate(&self) -> Result<(), Error> {
        if self.driver.trim().is_empty() {
            return Err(Error::Config("driver must not be empty".into()));
        }
        if self.source_domain.trim().is_empty() {
            return Err(Error::Config("source_domain must not be empty".into()));
        }
        // An empty pattern would match everywhere and never shrink the key.
        if self.strip_pattern.is_empty() {
            return Err(Error::Config("strip_pattern must not be empty".into()));
        }
        Ok(())
    }
}
