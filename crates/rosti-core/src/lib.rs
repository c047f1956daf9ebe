//! Rosti Core Library
//!
//! Resolution and packaging layer of the rosti deployment client: picks the
//! company, plan and runtime to deploy with, finds the local SSH key and
//! packs the project directory into a tar archive.

pub mod api;
pub mod archive;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod project;
pub mod select;
pub mod ssh;
pub mod types;

pub use error::{Error, Result};

/// Re-exports of commonly used types
pub mod prelude {
    // Catalog
    pub use crate::api::{ApiError, CatalogSource, RostiClient};
    pub use crate::types::{Company, Plan, Runtime};

    // Resolution
    pub use crate::select::{
        CompanySelection, PLACEHOLDER_PLAN, resolve_company, resolve_plan, resolve_runtime,
    };

    // Packaging
    pub use crate::archive::build_archive;
    pub use crate::ssh::{SshKeyLocator, SshKeyPair};

    // Configuration
    pub use crate::config::{ConfigStore, RostiConfig};
    pub use crate::project::Rostifile;

    // Commands
    pub use crate::commands::{DeployCommand, DeployOptions, DeployOutcome, DeploymentRequest};
    pub use crate::context::AppContext;
    pub use crate::error::{Error, Result};
}
