mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "hash-router")]
#[command(version, about = "Resolve hash locations against route files", long_about = None)]
struct Cli {
    /// Log resolution passes (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve locations and print the active routes
    Resolve {
        /// Route file (TOML)
        #[arg(short, long)]
        routes: PathBuf,

        /// Locations, resolved in order
        #[arg(required = true)]
        locations: Vec<String>,

        /// Print a table instead of JSON
        #[arg(long)]
        table: bool,
    },

    /// Read or rewrite hash query payloads
    Query {
        #[command(subcommand)]
        command: QueryCommands,
    },

    /// Compile every pattern of a route file
    Check {
        /// Route file (TOML)
        #[arg(short, long)]
        routes: PathBuf,
    },
}

#[derive(Subcommand)]
enum QueryCommands {
    /// Print the payload stored under a key
    Get {
        location: String,
        key: String,
    },

    /// Print the location with a new payload under a key
    Set {
        location: String,
        key: String,
        /// JSON value
        value: String,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("hash_router=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hash_router=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Resolve {
            routes,
            locations,
            table,
        } => {
            commands::resolve::execute(&routes, &locations, table)?;
        }
        Commands::Query { command } => {
            commands::query::execute(command)?;
        }
        Commands::Check { routes } => {
            commands::check::execute(&routes)?;
        }
    }

    Ok(())
}
