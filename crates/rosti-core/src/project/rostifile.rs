//! Rostifile: the per-project deployment description.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// File name looked up in the project root
pub const ROSTIFILE_NAME: &str = "Rostifile";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rostifile {
    /// Application name; defaults to the project directory name
    #[serde(default)]
    pub app: Option<String>,

    /// Desired plan name
    #[serde(default)]
    pub plan: Option<String>,

    /// Desired runtime image
    #[serde(default)]
    pub runtime: Option<String>,

    #[serde(default)]
    pub domains: Vec<String>,
}

impl Rostifile {
    /// Read `<project_root>/Rostifile`.
    pub fn load(project_root: &Path) -> anyhow::Result<Self> {
        let path = project_root.join(ROSTIFILE_NAME);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read Rostifile: {}", path.display()))?;

        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse Rostifile: {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Application name, falling back to the project directory name
    pub fn app_name(&self, project_root: &Path) -> String {
        self.app
            .clone()
            .filter(|name| !name.trim().is_empty())
            .or_else(|| {
                project_root
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "app".to_string())
    }
}
