//! Catalog entities returned by the Rosti API.
//!
//! These are read-only snapshots; nothing in this crate mutates them.

use serde::{Deserialize, Serialize};

/// A company groups people around one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: u32,
    pub name: String,
}

/// Resource parameters and price of a hosting plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub id: u32,
    /// Human-facing lookup key, compared case-insensitively
    pub name: String,
    #[serde(default)]
    pub ram: u32,
    #[serde(default)]
    pub disk: u32,
    #[serde(default)]
    pub price: u32,
    #[serde(default)]
    pub cpu_quota: u32,
}

/// Environment the application runs in, keyed by its image name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Runtime {
    pub id: u32,
    pub image: String,
    /// Marked as the default runtime by the API
    #[serde(rename = "default", default)]
    pub is_default: bool,
    /// Shown in the administration
    #[serde(default)]
    pub show: bool,
}
