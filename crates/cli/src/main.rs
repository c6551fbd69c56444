//! ASO Cart CLI - Drive a file-backed storefront cart.
//!
//! # Usage
//!
//! ```bash
//! # Add a product (missing fields fall back like a bare product card)
//! aso-cart add --name "Caftan A" --price "MAD 1000" --image img/a.jpg
//!
//! # Change or drop a line item
//! aso-cart set-quantity k3j2h1x9z 3
//! aso-cart remove k3j2h1x9z
//!
//! # Inspect
//! aso-cart show
//! aso-cart show --json
//! aso-cart count
//! aso-cart count --html
//! aso-cart raw
//! ```
//!
//! # Commands
//!
//! - `add` - Add one unit of a product
//! - `remove` - Remove a line item by id
//! - `set-quantity` - Set a line item's quantity (zero or below removes it)
//! - `show` - List line items, total quantity and subtotal
//! - `count` - Print the cart count badge value
//! - `raw` - Print the persisted value exactly as stored

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use aso_cart_storefront::CartConfig;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "aso-cart")]
#[command(author, version, about = "ASO storefront cart tools")]
struct Cli {
    /// Storage file (overrides `ASO_CART_STORAGE_PATH`)
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a product to the cart
    Add {
        /// Product name as shown on the card
        #[arg(short, long)]
        name: Option<String>,

        /// Price text as shown on the card (e.g. "MAD 1,200")
        #[arg(short, long)]
        price: Option<String>,

        /// Product image URI
        #[arg(short, long)]
        image: Option<String>,
    },
    /// Remove a line item
    Remove {
        /// Line item id
        id: String,
    },
    /// Set a line item's quantity
    SetQuantity {
        /// Line item id
        id: String,

        /// New quantity; zero or below removes the line item
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Show the cart contents
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the total quantity
    Count {
        /// Print the rendered badge fragment instead
        #[arg(long)]
        html: bool,
    },
    /// Print the persisted value as stored
    Raw,
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "aso_cart=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> aso_cart_storefront::Result<()> {
    let mut config = CartConfig::from_env()?;
    if let Some(path) = cli.storage {
        config.storage_path = path;
    }

    let mut page = commands::cart::open_page(&config);

    match cli.command {
        Commands::Add { name, price, image } => {
            commands::cart::add(&mut page, name, price, image);
        }
        Commands::Remove { id } => commands::cart::remove(&mut page, &id),
        Commands::SetQuantity { id, quantity } => {
            commands::cart::set_quantity(&mut page, &id, quantity);
        }
        Commands::Show { json } => commands::cart::show(&page, json)?,
        Commands::Count { html } => commands::cart::count(&page, html)?,
        Commands::Raw => commands::cart::raw(&page)?,
    }
    Ok(())
}
