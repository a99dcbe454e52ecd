//! `CloudMart` CLI - browse the catalog, manage the cart and place orders.
//!
//! # Usage
//!
//! ```bash
//! # Show categories, products and the cart
//! cloudmart browse
//!
//! # Only products of one category
//! cloudmart browse --category books
//!
//! # Add one unit of a product, remove a cart line
//! cloudmart add p1
//! cloudmart remove l1
//!
//! # Place an order from the cart
//! cloudmart checkout
//!
//! # Interactive session against a local API
//! cloudmart --base-url http://127.0.0.1:8000 shell
//! ```
//!
//! # Environment Variables
//!
//! - `CLOUDMART_API_BASE_URL` - API base URL (default `http://127.0.0.1:8000`)
//! - `CLOUDMART_USER_AGENT` - `User-Agent` header sent with every request
//! - `RUST_LOG` - log filter (default `cloudmart_cli=info,cloudmart_storefront=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "cloudmart")]
#[command(author, version, about = "CloudMart storefront in the terminal")]
struct Cli {
    /// API base URL, overriding `CLOUDMART_API_BASE_URL`
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the catalog and the cart
    Browse {
        /// Only show products of this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Add one unit of a product to the cart
    Add {
        /// Product ID
        product_id: String,
    },
    /// Remove a line from the cart
    Remove {
        /// Cart line ID
        line_id: String,
    },
    /// Place an order from the current cart
    Checkout,
    /// List past orders
    Orders,
    /// Check that the API is reachable
    Health,
    /// Interactive session
    Shell,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cloudmart_cli=info,cloudmart_storefront=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let session = commands::Session::connect(cli.base_url.as_deref())?;

    match cli.command {
        Commands::Browse { category } => session.browse(category.as_deref()).await?,
        Commands::Add { product_id } => session.add(&product_id).await?,
        Commands::Remove { line_id } => session.remove(&line_id).await?,
        Commands::Checkout => session.checkout().await?,
        Commands::Orders => commands::orders::list(session.api()).await?,
        Commands::Health => commands::orders::health(session.api()).await?,
        Commands::Shell => commands::shell::run(&session).await?,
    }
    Ok(())
}
