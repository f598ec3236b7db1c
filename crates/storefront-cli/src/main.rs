mod browse;
mod cart;
mod filters;
mod render;

use clap::{Parser, Subcommand};
use storefront_client::CatalogClient;
use storefront_core::{FileStorage, Store};
use tracing_subscriber::EnvFilter;

use crate::{cart::CartCommands, filters::FilterCommands};

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "Browse the storefront catalog and manage the persisted cart")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List products through the saved filters
    Products,
    /// Show one product with its discount and related products
    Product {
        /// Product id
        id: String,
    },
    /// List the catalog's categories
    Categories,
    /// Look up products by name or description
    Search {
        /// Search text; blank clears the saved search
        #[arg(default_value = "")]
        query: String,
        /// Read queries from stdin line by line, debounced
        #[arg(long)]
        watch: bool,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// Manage the saved listing filters
    Filters {
        #[command(subcommand)]
        command: FilterCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = storefront_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("storefront: run with --help to see available commands");
        return Ok(());
    };

    let client = CatalogClient::from_config(&config)?;
    let mut store = Store::load(FileStorage::new(&config.state_dir));
    tracing::debug!(
        base_url = %config.base_url,
        state_dir = %config.state_dir.display(),
        "storefront cli ready"
    );

    match command {
        Commands::Products => browse::run_products(&client, &store).await,
        Commands::Product { id } => browse::run_product(&client, &id).await,
        Commands::Categories => browse::run_categories(&client).await,
        Commands::Search { query, watch } => {
            if watch {
                browse::run_search_watch(client, &mut store, config.search_debounce()).await?;
            } else {
                browse::run_search(&client, &mut store, &query).await;
            }
        }
        Commands::Cart { command } => cart::run_cart(&client, &mut store, command).await,
        Commands::Filters { command } => filters::run_filters(&mut store, command),
    }

    Ok(())
}
