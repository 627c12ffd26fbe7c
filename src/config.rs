use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use compdoc_core::models::SiteSettings;

const APP_NAME: &str = "compdoc";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompdocConfig {
    /// Where metadata documents live when no path is given on the command line.
    pub metadata_dir: PathBuf,
    /// Site origin and guarantees page used when laying out pages.
    #[serde(flatten)]
    pub site: SiteSettings,
    /// Port for `compdoc serve`.
    pub port: u16,
}

impl Default for CompdocConfig {
    fn default() -> Self {
        Self {
            metadata_dir: PathBuf::from(".meta"),
            site: SiteSettings::default(),
            port: 3000,
        }
    }
}

impl CompdocConfig {
    /// Load configuration from `path`, or from the user's config directory.
    /// Returns default config if the file doesn't exist or fails to parse.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match get_config_path() {
                Ok(path) => path,
                Err(e) => {
                    tracing::warn!("{}, using defaults", e);
                    return Self::default();
                }
            },
        };

        match Self::try_load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;

        let config = serde_json::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }
}

fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
