//! Rosti - deployment client
//!
//! Usage:
//!   rosti deploy            # Resolve company, plan and runtime, pack the project
//!   rosti companies         # List companies of the account
//!   rosti company <ID>      # Remember the company to work with
//!   rosti ssh-key           # Print the local SSH public key

mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rosti_core::api::CatalogSource;
use rosti_core::archive::build_archive;
use rosti_core::commands::{DeployCommand, DeployOptions, DeployOutcome};
use rosti_core::context::AppContext;
use rosti_core::select::{CompanySelection, resolve_company};

#[derive(Parser)]
#[command(name = "rosti")]
#[command(about = "Deploy projects to Rosti", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.config/rosti/rosti.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prepare a deployment of the current project
    ///
    /// Picks the company, plan and runtime, reads the local SSH public key
    /// and packs the project directory into a tar archive.
    Deploy {
        /// Company ID (overrides the remembered company)
        #[arg(short, long)]
        company: Option<u32>,

        /// Project directory (defaults to the current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Archive destination (defaults to the temp directory)
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        archive: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// List companies you have access to
    Companies {
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Remember the company used by later commands
    Company {
        /// Company ID
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        id: u32,
    },

    /// List available plans
    Plans {
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// List available runtime images
    Runtimes {
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Print the local SSH public key
    SshKey,

    /// Pack a file or directory into a tar archive
    Archive {
        /// File or directory to pack
        source: PathBuf,
        /// Archive to create
        destination: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub(crate) enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rosti=info,rosti_core=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    run_cli(cli.command, || app_context(config))
}

/// Paths resolved from the user's home and config directories
fn app_context(config: Option<PathBuf>) -> Result<AppContext> {
    let mut ctx = AppContext::with_defaults()?;
    if let Some(path) = config {
        ctx = ctx.with_config_path(path);
    }
    tracing::debug!(config = %ctx.config_path().display(), "using config file");
    Ok(ctx)
}

/// Run one command; the context is only built for commands that use it.
fn run_cli(command: Commands, context: impl FnOnce() -> Result<AppContext>) -> Result<()> {
    match command {
        Commands::Deploy {
            company,
            path,
            archive,
            format,
        } => run_deploy(&context()?, company, path, archive, format),
        Commands::Companies { format } => {
            let client = catalog(&context()?)?;
            output::print_companies(&client.companies()?, format)
        }
        Commands::Company { id } => run_company(&context()?, id),
        Commands::Plans { format } => {
            let client = catalog(&context()?)?;
            output::print_plans(&client.plans()?, format)
        }
        Commands::Runtimes { format } => {
            let client = catalog(&context()?)?;
            output::print_runtimes(&client.runtimes()?, format)
        }
        Commands::SshKey => {
            let ctx = context()?;
            let config = ctx.config_store().load()?;
            let key = ctx.ssh_key_locator(&config).read_local_ssh_public_key()?;
            print!("{}", key);
            Ok(())
        }
        Commands::Archive {
            source,
            destination,
        } => {
            build_archive(&source, &destination)?;
            println!("Archive written to {}", destination.display());
            Ok(())
        }
    }
}

fn catalog(ctx: &AppContext) -> Result<impl CatalogSource + use<>> {
    let config = ctx.config_store().load()?;
    ctx.catalog_client(&config)
}

fn run_deploy(
    ctx: &AppContext,
    company: Option<u32>,
    path: Option<PathBuf>,
    archive: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let config = ctx.config_store().load()?;
    let client = ctx.catalog_client(&config)?;
    let locator = ctx.ssh_key_locator(&config);

    let project_root = path.unwrap_or_else(|| ctx.project_root().to_path_buf());
    let mut options = DeployOptions::new(project_root);
    if let Some(id) = company {
        options = options.with_company(id);
    }
    if let Some(archive) = archive {
        options = options.with_archive_path(archive);
    }

    let cmd = DeployCommand::new(client, locator, config);
    match cmd.execute(&options)? {
        DeployOutcome::NeedsCompanyChoice { companies } => {
            output::print_company_choice(&companies, format)
        }
        DeployOutcome::Ready(request) => output::print_deployment(&request, format),
    }
}

fn run_company(ctx: &AppContext, id: u32) -> Result<()> {
    let store = ctx.config_store();
    let config = store.load()?;
    let client = ctx.catalog_client(&config)?;

    let companies = client.companies()?;
    let selection = resolve_company(&companies, Some(id), None)?;
    if let CompanySelection::Selected(id) = selection {
        store
            .remember_company(id)
            .with_context(|| format!("Failed to save {}", store.config_path().display()))?;
        let name = companies
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
            .unwrap_or_default();
        println!("Using company {} ({})", id, name);
    }
    Ok(())
}
