//! Handset CLI - catalog and settings management against the durable store.
//!
//! # Usage
//!
//! ```bash
//! # List products, optionally filtered
//! hs-cli products list --query pro --brand Apple
//!
//! # Brand selector options
//! hs-cli products brands
//!
//! # Append products from a YAML file
//! hs-cli products import new-arrivals.yaml
//!
//! # Delete a product (no-op if absent)
//! hs-cli products delete 1717171717171
//!
//! # Spec-by-spec comparison of two products
//! hs-cli compare 1 2
//!
//! # Show or change site settings
//! hs-cli settings show
//! hs-cli settings set --whatsapp 5511999990000 --site-name "Costa Phones"
//! ```
//!
//! The data directory defaults to `STOREFRONT_DATA_DIR`, then `data`. Stop
//! the storefront before editing: it only reads the store at startup and
//! its next admin save would overwrite CLI changes.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use handset_core::CurrencyCode;
use handset_storefront::store::{CatalogStore, FileStore};

mod commands;
mod error;

#[derive(Parser)]
#[command(name = "hs-cli")]
#[command(author, version, about = "Handset storefront CLI tools")]
struct Cli {
    /// Directory holding the catalog and settings records
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Currency used when printing prices
    #[arg(long, global = true, default_value = "BRL")]
    currency: CurrencyCode,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and edit the catalog
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Compare two products spec by spec
    Compare {
        /// First product ID
        a: String,
        /// Second product ID
        b: String,
    },
    /// Inspect and edit site settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products
    List {
        /// Case-insensitive name search
        #[arg(short, long, default_value = "")]
        query: String,

        /// Brand name, or `all`
        #[arg(short, long)]
        brand: Option<String>,
    },
    /// List brand selector options
    Brands,
    /// Append products from a YAML file
    Import {
        /// Path to a YAML list of products
        file: PathBuf,
    },
    /// Delete a product
    Delete {
        /// Product ID
        id: String,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the current settings
    Show,
    /// Change one or more settings
    Set(commands::settings::SettingsPatch),
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt().with_target(false).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> error::Result<()> {
    dotenvy::dotenv().ok();

    let data_dir = cli
        .data_dir
        .or_else(|| std::env::var_os("STOREFRONT_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("data"));
    let store = CatalogStore::new(Arc::new(FileStore::open(data_dir)?));
    let currency = cli.currency;

    match cli.command {
        Commands::Products { action } => match action {
            ProductAction::List { query, brand } => {
                commands::products::list(&store, &query, brand.as_deref(), currency);
            }
            ProductAction::Brands => commands::products::brands(&store),
            ProductAction::Import { file } => commands::products::import(&store, &file)?,
            ProductAction::Delete { id } => commands::products::delete(&store, &id)?,
        },
        Commands::Compare { a, b } => commands::compare::run(&store, &a, &b, currency)?,
        Commands::Settings { action } => match action {
            SettingsAction::Show => commands::settings::show(&store),
            SettingsAction::Set(patch) => commands::settings::set(&store, patch)?,
        },
    }
    Ok(())
}
