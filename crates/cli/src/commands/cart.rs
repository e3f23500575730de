//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! glory cart add -k w1 -t "Aurelius" -p 249
//! glory cart add --catalog products.json -k w1 -q 2
//! glory cart update w1 0      # removes the line
//! glory cart show
//! ```

use std::io::Write;

use clap::Subcommand;
use glory_core::{CurrencyCode, format_amount};
use glory_state::{CartStore, KeyValueStorage};

use super::ProductArgs;

#[derive(Debug, Subcommand)]
pub enum CartAction {
    /// Add a product, merging with an existing line
    Add {
        #[command(flatten)]
        product: ProductArgs,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a line
    Remove {
        /// Product key
        key: String,
    },
    /// Set a line's quantity (zero or less removes it)
    Update {
        /// Product key
        key: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove every line
    Clear,
    /// Print the cart
    Show,
}

/// Apply `action` to the cart and print the result.
///
/// # Errors
///
/// Returns an error if the product arguments are invalid or output fails.
pub fn run<S: KeyValueStorage>(
    cart: &mut CartStore<S>,
    action: CartAction,
    currency: CurrencyCode,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CartAction::Add { product, quantity } => {
            let item = product.cart_item()?;
            cart.add_item(item, quantity);
        }
        CartAction::Remove { key } => cart.remove_item(key.trim()),
        CartAction::Update { key, quantity } => cart.update_quantity(key.trim(), quantity),
        CartAction::Clear => cart.clear(),
        CartAction::Show => {}
    }
    print(cart, currency, out)?;
    Ok(())
}

/// Print every line and the subtotal.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn print<S: KeyValueStorage>(
    cart: &CartStore<S>,
    currency: CurrencyCode,
    out: &mut impl Write,
) -> std::io::Result<()> {
    if cart.is_empty() {
        writeln!(out, "Cart is empty")?;
        return Ok(());
    }

    for line in cart.items() {
        writeln!(
            out,
            "{:<24} {:<16} x{:<4} {:>10} {:>12}",
            line.title,
            line.product_key,
            line.quantity(),
            line.unit_price.display(currency),
            format_amount(line.line_total(), currency),
        )?;
    }
    writeln!(
        out,
        "Subtotal: {} ({} items)",
        format_amount(cart.subtotal(), currency),
        cart.item_count()
    )
}
