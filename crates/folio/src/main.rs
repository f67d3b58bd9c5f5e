//! Folio CLI - documentation site generator.
//!
//! Provides commands for:
//! - `site`: Render the site of a project and its modules
//! - `stage`: Render and copy every module into one staging tree
//! - `deploy`: Render and publish to the distribution URL
//! - `run`: Preview the site with on-demand rendering
//! - `effective-site`: Print the assembled site model

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{DeployArgs, EffectiveSiteArgs, ProjectArgs, RunArgs, SiteArgs, StageArgs};
use error::CliError;
use output::Output;

/// Folio - documentation site generator.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the site.
    Site(SiteArgs),
    /// Render the site and stage it into one directory tree.
    Stage(StageArgs),
    /// Render the site and deploy it.
    Deploy(DeployArgs),
    /// Start the preview server.
    Run(RunArgs),
    /// Print the assembled site model as YAML.
    EffectiveSite(EffectiveSiteArgs),
}

impl Commands {
    fn project_args(&self) -> &ProjectArgs {
        match self {
            Self::Site(args) => &args.project,
            Self::Stage(args) => &args.project,
            Self::Deploy(args) => &args.project,
            Self::Run(args) => &args.project,
            Self::EffectiveSite(args) => &args.project,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.project_args().verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Site(args) => args.execute(),
        Commands::Stage(args) => args.execute(),
        Commands::Deploy(args) => block_on(args.execute()),
        Commands::Run(args) => block_on(args.execute()),
        Commands::EffectiveSite(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

fn block_on(future: impl Future<Output = Result<(), CliError>>) -> Result<(), CliError> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(future)
}
