//! Glory CLI - inspect and edit the persisted storefront client state.
//!
//! # Usage
//!
//! ```bash
//! # Add two units of a product to the cart
//! glory cart add -k aurelius -t "Aurelius" -p 249 -q 2
//!
//! # Save a product from the catalog export
//! glory wishlist toggle --catalog products.json -k aurelius
//!
//! # Compare up to three products
//! glory compare add --catalog products.json -k meridian
//!
//! # Print the checkout request body
//! glory checkout
//! ```
//!
//! # Commands
//!
//! - `cart` - Add, update, remove and list cart lines
//! - `wishlist` - Save, toggle and list saved products
//! - `compare` - Manage the comparison list
//! - `checkout` - Build the checkout request for the current cart
//!
//! State lives under `GLORY_STORAGE_DIR` (or `--storage-dir`), one JSON file
//! per storage key. Set `RUST_LOG=debug` to trace every store operation and
//! `GLORY_LOG_FORMAT=json` for structured logs on stderr.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use glory_state::{ClientState, FileStorage, StateConfig};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod catalog;
mod commands;

use commands::cart::CartAction;
use commands::compare::CompareAction;
use commands::wishlist::WishlistAction;

#[derive(Parser)]
#[command(name = "glory")]
#[command(author, version, about = "Glory storefront client state tools")]
struct Cli {
    /// Directory holding the persisted state (overrides `GLORY_STORAGE_DIR`)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Manage the comparison list
    Compare {
        #[command(subcommand)]
        action: CompareAction,
    },
    /// Print the checkout request for the current cart
    Checkout {
        /// Override the success redirect URL
        #[arg(long)]
        success_url: Option<String>,

        /// Override the cancel redirect URL
        #[arg(long)]
        cancel_url: Option<String>,
    },
}

fn main() {
    // Defaults to warnings only if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());

    // Structured output for log collectors, text for humans
    let is_json = std::env::var("GLORY_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!is_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();

    let result = run(cli, &mut stdout);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = StateConfig::from_env()?;
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }

    let storage = Arc::new(FileStorage::new(config.storage_dir.clone()));
    let mut state = ClientState::hydrate(storage, &config);
    let currency = config.currency;

    match cli.command {
        Commands::Cart { action } => commands::cart::run(&mut state.cart, action, currency, out)?,
        Commands::Wishlist { action } => {
            commands::wishlist::run(&mut state.wishlist, action, currency, out)?;
        }
        Commands::Compare { action } => {
            commands::compare::run(&mut state.comparison, action, currency, out)?;
        }
        Commands::Checkout {
            success_url,
            cancel_url,
        } => commands::checkout::run(&state, success_url, cancel_url, out)?,
    }
    Ok(())
}
