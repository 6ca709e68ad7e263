mod browse;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use newcomer_client::DirectoryClient;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "newcomer")]
#[command(about = "Browse the newcomer services directory from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List service categories with their location counts
    Services,
    /// List locations matching the given filters, one page at a time
    Locations {
        #[command(flatten)]
        filters: FilterArgs,
        /// Page to show (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// List provinces that have at least one location for a category
    Provinces {
        /// Category name or service id
        #[arg(long)]
        category: String,
        /// Ask the backend instead of deriving the list locally
        #[arg(long)]
        remote: bool,
    },
    /// List cities within a province for a category
    Cities {
        /// Category name or service id
        #[arg(long)]
        category: String,
        /// Province as stored on locations (e.g., ON)
        #[arg(long)]
        province: String,
        /// Ask the backend instead of deriving the list locally
        #[arg(long)]
        remote: bool,
    },
    /// Show full details for one location
    Location {
        /// Location id
        id: String,
    },
    /// Print the map viewport that fits the matching locations
    Map {
        #[command(flatten)]
        filters: FilterArgs,
    },
}

/// Filters shared by the list and map views.
#[derive(Debug, Clone, Default, Args)]
struct FilterArgs {
    /// Category name or service id; omit or pass "all" for every category
    #[arg(long)]
    category: Option<String>,
    /// Province (requires --category)
    #[arg(long)]
    province: Option<String>,
    /// City (requires --province)
    #[arg(long)]
    city: Option<String>,
    /// Case-insensitive text matched against name, city, address, and service
    #[arg(long, short = 'q')]
    query: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = newcomer_core::load_app_config().context("failed to load configuration")?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("newcomer: run with --help to see available commands");
        return Ok(());
    };

    let client =
        DirectoryClient::from_config(&config).context("failed to build directory client")?;
    tracing::debug!(env = %config.env, base_url = %config.api_base_url, "client ready");

    match command {
        Commands::Services => browse::run_services(&client).await,
        Commands::Locations { filters, page } => {
            browse::run_locations(&client, &config, &filters, page).await
        }
        Commands::Provinces { category, remote } => {
            browse::run_provinces(&client, &category, remote).await
        }
        Commands::Cities {
            category,
            province,
            remote,
        } => browse::run_cities(&client, &category, &province, remote).await,
        Commands::Location { id } => browse::run_location(&client, &id).await,
        Commands::Map { filters } => browse::run_map(&client, &filters).await,
    }
}
