//! Configuration schema for rosti.toml
//!
//! Holds the API endpoint and credentials together with the session state
//! the client carries between invocations (the remembered company).

use anyhow::Context;
use serde::{Deserialize, Serialize};
use url::Url;

/// Production API root
pub const DEFAULT_API_URL: &str = "https://admin.rosti.cz/api/v1/";

/// Root configuration structure for rosti.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RostiConfig {
    /// API root URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// API token sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Company picked in an earlier session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<u32>,

    /// SSH key names tried in ~/.ssh, in order (defaults to `id_rsa`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ssh_key_candidates: Vec<String>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for RostiConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            company_id: None,
            ssh_key_candidates: Vec::new(),
        }
    }
}

impl RostiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parsed API root
    pub fn api_url(&self) -> anyhow::Result<Url> {
        let url = Url::parse(&self.api_url)
            .with_context(|| format!("Invalid api_url: '{}'", self.api_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("Invalid api_url: '{}' (expected http or https)", self.api_url);
        }
        Ok(url)
    }

    /// Remembered company, if any. A stored 0 counts as unset.
    pub fn remembered_company(&self) -> Option<u32> {
        self.company_id.filter(|id| *id != 0)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.api_url()?;

        if let Some(name) = self
            .ssh_key_candidates
            .iter()
            .find(|name| name.is_empty() || name.contains('/') || name.contains('\\'))
        {
            anyhow::bail!(
                "Invalid ssh_key_candidates entry '{}': expected a file name inside ~/.ssh",
                name
            );
        }

        Ok(())
    }
}
