//! reporting-admin - operational CLI for the transit test-reporting backend
//!
//! Main entry point for the reporting-admin command-line tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use reporting_admin::cli::{self, data, deploy, integration, schema};
use reporting_admin::AdminError;

#[derive(Parser)]
#[command(name = "reporting-admin")]
#[command(about = "Operational tooling for the transit test-reporting database", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Database connection string (overrides the configuration file)
    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,

    /// Path to reporting-server.toml (searched for when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply migrations and list the tables
    Init,

    /// Show the columns of one table or every table
    Schema {
        /// Table name
        table: Option<String>,
    },

    /// Show the row count of every table
    Stats,

    /// Generate dummy data
    Seed {
        /// RNG seed for a reproducible dataset
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Delete rows from one table or every table
    Clear {
        /// Only clear this table
        #[arg(short, long)]
        table: Option<String>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Drop every table
    DropAll {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Check connectivity and print row counts
    CheckDb,

    /// Summarize test runs per source system and recent activity
    Integration {
        /// Only count runs whose source system contains this text
        #[arg(short, long)]
        source: Option<String>,
    },

    /// Check the configured deployment targets
    CheckDeployed {
        /// Also POST a sample test-run event to this reporting API base URL
        #[arg(long)]
        post_sample: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let mut config = cli::load_config(cli.config.as_deref())?;
    if let Some(url) = cli.database_url {
        config.database.url = url;
    }

    if let Commands::CheckDeployed { post_sample } = cli.command {
        deploy::handle_check_deployed(&config, post_sample).await?;
        return Ok(());
    }

    let db = cli::connect(&config.database.url).await?;
    let result = match cli.command {
        Commands::Init => schema::handle_init(&db).await,
        Commands::Schema { table } => schema::handle_schema(&db, table).await,
        Commands::Stats => schema::handle_stats(&db).await,
        Commands::Seed { seed } => data::handle_seed(&db, seed).await.map(|_| ()),
        Commands::Clear { table, yes } => data::handle_clear(&db, table, yes).await.map(|_| ()),
        Commands::DropAll { yes } => data::handle_drop_all(&db, yes).await.map(|_| ()),
        Commands::CheckDb => schema::handle_check_db(&db).await,
        Commands::Integration { source } => integration::handle_integration(&db, source).await,
        // Handled before connecting
        Commands::CheckDeployed { .. } => Ok(()),
    };
    db.close().await;

    match result {
        Err(AdminError::Aborted) => Ok(()),
        other => Ok(other?),
    }
}
