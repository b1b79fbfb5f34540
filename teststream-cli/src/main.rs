//! TestStream - merge and publish test catalogs to an ecosystem server

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod project;

use project::ProjectManifest;

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "teststream",
    about = "Merge and publish test catalogs to an ecosystem server",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Set log level
    #[clap(long, default_value = "info", global = true)]
    log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Merge dependency test catalog fragments into one composite catalog
    Merge {
        /// Project manifest path
        #[clap(long, default_value = "teststream.yaml")]
        project: PathBuf,

        /// Repository directory the dependencies resolve against
        #[clap(long)]
        repository: Option<PathBuf>,

        /// Output directory for the catalog artifact
        #[clap(long, default_value = "target")]
        output: PathBuf,

        /// Build identifier recorded in the catalog
        #[clap(long)]
        build_job: Option<String>,

        /// Skip the merge entirely
        #[clap(long)]
        skip: bool,
    },

    /// Build the catalog fragment for a single bundle
    Build {
        /// Project manifest path
        #[clap(long, default_value = "teststream.yaml")]
        project: PathBuf,

        /// Output directory for the fragment artifact
        #[clap(long, default_value = "target")]
        output: PathBuf,

        /// Skip the build entirely
        #[clap(long)]
        skip: bool,
    },

    /// Deploy a merged catalog to the ecosystem server
    Deploy {
        /// Project manifest path
        #[clap(long, default_value = "teststream.yaml")]
        project: PathBuf,

        /// Catalog artifact to deploy (defaults to {output}/testcatalog.json)
        #[clap(long)]
        catalog: Option<PathBuf>,

        /// Output directory holding the catalog artifact
        #[clap(long, default_value = "target")]
        output: PathBuf,

        /// Bootstrap URL, overriding the manifest
        #[clap(long)]
        bootstrap: Option<String>,

        /// Stream name, overriding the manifest
        #[clap(long)]
        stream: Option<String>,

        /// Access token (refreshToken:clientId); optional, deploys anonymously if absent
        #[clap(long, env = "TESTSTREAM_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Skip the deploy entirely
        #[clap(long)]
        skip: bool,
    },
}

fn init_logging(level: &LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_filter_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Command::Merge {
            project,
            repository,
            output,
            build_job,
            skip,
        } => {
            let manifest = ProjectManifest::load(&project)?;
            commands::execute_merge(&manifest, repository, &output, build_job, skip)
        }
        Command::Build {
            project,
            output,
            skip,
        } => {
            let manifest = ProjectManifest::load(&project)?;
            commands::execute_build(&manifest, &output, skip)
        }
        Command::Deploy {
            project,
            catalog,
            output,
            bootstrap,
            stream,
            token,
            skip,
        } => {
            let manifest = ProjectManifest::load(&project)?;
            commands::execute_deploy(&manifest, catalog, &output, bootstrap, stream, token, skip)
                .await
        }
    }
}
