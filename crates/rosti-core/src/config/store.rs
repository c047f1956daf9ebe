//! Config store for loading and saving rosti.toml.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use super::{RostiConfig, parser};

/// File name of the client configuration
pub const CONFIG_FILE_NAME: &str = "rosti.toml";

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    /// Store at `<config dir>/rosti/rosti.toml`
    pub fn from_default_location() -> anyhow::Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("rosti");

        Ok(Self::from_dir(&config_dir))
    }

    pub fn from_dir(config_dir: &Path) -> Self {
        Self::from_path(config_dir.join(CONFIG_FILE_NAME))
    }

    pub fn from_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load the config; a missing file yields the defaults.
    pub fn load(&self) -> anyhow::Result<RostiConfig> {
        if !self.config_path.exists() {
            debug!(path = %self.config_path.display(), "no config file, using defaults");
            return Ok(RostiConfig::new());
        }
        parser::parse_rosti_toml(&self.config_path)
    }

    pub fn save(&self, config: &RostiConfig) -> anyhow::Result<()> {
        let content = parser::to_toml(config).context("Failed to serialize config to TOML")?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        std::fs::write(&self.config_path, content).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;
        Ok(())
    }

    /// Persist `company_id` as the remembered company, keeping everything else.
    pub fn remember_company(&self, company_id: u32) -> anyhow::Result<RostiConfig> {
        let mut config = self.load()?;
        config.company_id = Some(company_id);
        self.save(&config)?;
        debug!(company_id, "remembered company");
        Ok(config)
    }
}
