//! Deploy command implementation.
//!
//! Resolves everything a deployment needs: company, plan, runtime image,
//! the local public key, and an archive of the project directory.
//! Sending the request is left to the caller.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tracing::{info, warn};

use crate::api::CatalogSource;
use crate::archive::build_archive;
use crate::config::RostiConfig;
use crate::project::{ROSTIFILE_NAME, Rostifile};
use crate::select::{CompanySelection, PLACEHOLDER_PLAN, select_company, select_plan, select_runtime};
use crate::ssh::SshKeyLocator;
use crate::types::Company;

/// Options for the deploy command
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Project directory to package
    pub project_root: PathBuf,
    /// Company id given on the command line
    pub company: Option<u32>,
    /// Where to write the archive (defaults to the temp directory)
    pub archive_path: Option<PathBuf>,
}

impl DeployOptions {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            company: None,
            archive_path: None,
        }
    }

    /// Set the explicit company id
    pub fn with_company(mut self, company: u32) -> Self {
        self.company = Some(company);
        self
    }

    /// Set the archive destination
    pub fn with_archive_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.archive_path = Some(path.into());
        self
    }
}

/// Everything resolved for one deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentRequest {
    pub app: String,
    pub company_id: u32,
    /// `None` when the plan name matched nothing in the catalog
    pub plan_id: Option<u32>,
    pub runtime: String,
    pub domains: Vec<String>,
    pub ssh_public_key: String,
    pub archive_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// The account has several companies and none was selected.
    /// Nothing else was resolved and no archive was written.
    NeedsCompanyChoice { companies: Vec<Company> },
    Ready(DeploymentRequest),
}

pub struct DeployCommand<C: CatalogSource> {
    catalog: C,
    locator: SshKeyLocator,
    config: RostiConfig,
}

impl<C: CatalogSource> DeployCommand<C> {
    pub fn new(catalog: C, locator: SshKeyLocator, config: RostiConfig) -> Self {
        Self {
            catalog,
            locator,
            config,
        }
    }

    pub fn execute(&self, options: &DeployOptions) -> anyhow::Result<DeployOutcome> {
        let root = &options.project_root;
        let rostifile = load_rostifile(root)?;
        let app = rostifile.app_name(root);

        let (selection, companies) = select_company(
            &self.catalog,
            options.company,
            self.config.remembered_company(),
        )
        .context("Failed to select company")?;

        let company_id = match selection {
            CompanySelection::Selected(id) => id,
            CompanySelection::NeedsUserChoice => {
                return Ok(DeployOutcome::NeedsCompanyChoice { companies });
            }
        };
        info!(company_id, %app, "deploying");

        // The API cannot report the account's default plan yet, so every
        // deployment goes to the placeholder plan.
        if let Some(plan) = rostifile.plan.as_deref() {
            if !plan.eq_ignore_ascii_case(PLACEHOLDER_PLAN) {
                warn!(requested = plan, used = PLACEHOLDER_PLAN, "plan from Rostifile overridden");
            }
        }
        let plan_id = select_plan(&self.catalog, Some(PLACEHOLDER_PLAN))
            .context("Failed to load list of available plans")?;
        if plan_id.is_none() {
            warn!(plan = PLACEHOLDER_PLAN, "plan not found in catalog");
        }

        let runtime = select_runtime(&self.catalog, rostifile.runtime.as_deref())
            .context("Failed to load list of available runtimes")?;

        let ssh_public_key = self
            .locator
            .read_local_ssh_public_key()
            .context("Failed to read local SSH public key")?;

        let archive_path = options
            .archive_path
            .clone()
            .unwrap_or_else(|| default_archive_path(&app));
        build_archive(root, &archive_path).with_context(|| {
            format!(
                "Failed to archive {} into {}",
                root.display(),
                archive_path.display()
            )
        })?;
        info!(archive = %archive_path.display(), "project archived");

        Ok(DeployOutcome::Ready(DeploymentRequest {
            app,
            company_id,
            plan_id,
            runtime,
            domains: rostifile.domains,
            ssh_public_key: ssh_public_key.trim_end().to_string(),
            archive_path,
        }))
    }
}

fn load_rostifile(project_root: &Path) -> anyhow::Result<Rostifile> {
    if project_root.join(ROSTIFILE_NAME).exists() {
        Rostifile::load(project_root)
    } else {
        warn!(
            project = %project_root.display(),
            "no Rostifile found, using defaults"
        );
        Ok(Rostifile::default())
    }
}

/// `<temp>/rosti-<app>.tar`, with anything but `[A-Za-z0-9._-]` in the app
/// name replaced so the name stays a single path component
fn default_archive_path(app: &str) -> PathBuf {
    let name: String = app
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect();
    std::env::temp_dir().join(format!("rosti-{}.tar", name))
}
