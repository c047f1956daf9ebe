//! Application context for unified dependency injection.

use std::path::{Path, PathBuf};

use crate::api::RostiClient;
use crate::config::{ConfigStore, RostiConfig};
use crate::ssh::SshKeyLocator;

/// Paths shared by all commands.
///
/// The CLI creates this once and derives the services it needs from it.
#[derive(Debug, Clone)]
pub struct AppContext {
    home_dir: PathBuf,
    project_root: PathBuf,
    config_path: PathBuf,
}

impl AppContext {
    /// Create a new context with explicit paths.
    pub fn new(home_dir: PathBuf, project_root: PathBuf, config_path: PathBuf) -> Self {
        Self {
            home_dir,
            project_root,
            config_path,
        }
    }

    /// Context for the current user and working directory.
    pub fn with_defaults() -> anyhow::Result<Self> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
        let project_root = std::env::current_dir()?;
        let store = ConfigStore::from_default_location()?;

        Ok(Self::new(
            home_dir,
            project_root,
            store.config_path().to_path_buf(),
        ))
    }

    pub fn with_project_root(mut self, project_root: PathBuf) -> Self {
        self.project_root = project_root;
        self
    }

    pub fn with_config_path(mut self, config_path: PathBuf) -> Self {
        self.config_path = config_path;
        self
    }

    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn config_store(&self) -> ConfigStore {
        ConfigStore::from_path(self.config_path.clone())
    }

    /// Key locator over `<home>/.ssh` honouring the configured candidates.
    pub fn ssh_key_locator(&self, config: &RostiConfig) -> SshKeyLocator {
        SshKeyLocator::for_home(&self.home_dir).with_candidates(config.ssh_key_candidates.clone())
    }

    /// API client for the configured endpoint and token.
    pub fn catalog_client(&self, config: &RostiConfig) -> anyhow::Result<RostiClient> {
        Ok(RostiClient::new(config.api_url()?, config.token.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locator_uses_configured_candidates() {
        let ctx = AppContext::new(
            PathBuf::from("/home/dev"),
            PathBuf::from("/home/dev/shop"),
            PathBuf::from("/home/dev/.config/rosti/rosti.toml"),
        );
        let config = RostiConfig {
            ssh_key_candidates: vec!["id_ed25519".to_string(), "id_rsa".to_string()],
            ..RostiConfig::default()
        };

        let locator = ctx.ssh_key_locator(&config);
        assert_eq!(locator.ssh_dir(), Path::new("/home/dev/.ssh"));
        assert_eq!(locator.candidates()[0], "id_ed25519");
    }
}
