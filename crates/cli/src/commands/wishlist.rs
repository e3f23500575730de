//! Wishlist commands.

use std::io::Write;

use clap::Subcommand;
use glory_core::CurrencyCode;
use glory_state::{KeyValueStorage, WishlistStore};

use super::ProductArgs;

#[derive(Debug, Subcommand)]
pub enum WishlistAction {
    /// Save a product (no-op if already saved)
    Add {
        #[command(flatten)]
        product: ProductArgs,
    },
    /// Save a product, or unsave it if already saved
    Toggle {
        #[command(flatten)]
        product: ProductArgs,
    },
    /// Unsave a product
    Remove {
        /// Product key
        key: String,
    },
    /// Report whether a product is saved
    Contains {
        /// Product key
        key: String,
    },
    /// Unsave every product
    Clear,
    /// Print saved products
    Show,
}

/// Apply `action` to the wishlist and print the result.
///
/// # Errors
///
/// Returns an error if the product arguments are invalid or output fails.
pub fn run<S: KeyValueStorage>(
    wishlist: &mut WishlistStore<S>,
    action: WishlistAction,
    currency: CurrencyCode,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        WishlistAction::Add { product } => wishlist.add_item(product.wishlist_entry()?),
        WishlistAction::Toggle { product } => {
            let entry = product.wishlist_entry()?;
            let title = entry.title.clone();
            if wishlist.toggle_wishlist(entry) {
                writeln!(out, "Saved {title}")?;
            } else {
                writeln!(out, "Removed {title}")?;
            }
        }
        WishlistAction::Remove { key } => wishlist.remove_item(key.trim()),
        WishlistAction::Contains { key } => {
            writeln!(out, "{}", wishlist.is_in_wishlist(key.trim()))?;
            return Ok(());
        }
        WishlistAction::Clear => wishlist.clear(),
        WishlistAction::Show => {}
    }
    print(wishlist, currency, out)?;
    Ok(())
}

/// Print saved products in the order they were saved.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn print<S: KeyValueStorage>(
    wishlist: &WishlistStore<S>,
    currency: CurrencyCode,
    out: &mut impl Write,
) -> std::io::Result<()> {
    if wishlist.is_empty() {
        return writeln!(out, "Wishlist is empty");
    }
    for entry in wishlist.items() {
        let rating = entry
            .rating
            .map_or_else(String::new, |rating| format!("  ★ {rating:.1}"));
        writeln!(
            out,
            "{:<24} {:<16} {:>10}{rating}",
            entry.title,
            entry.product_key,
            entry.price.display(currency),
        )?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use glory_state::MemoryStorage;

    use super::*;

    fn product(key: &str) -> ProductArgs {
        ProductArgs {
            key: key.to_owned(),
            catalog: None,
            title: Some(format!("Watch {key}")),
            price: Some("125".parse().unwrap()),
            image: None,
            category: None,
            rating: Some(4.5),
            description: None,
        }
    }

    fn run_action(wishlist: &mut WishlistStore<MemoryStorage>, action: WishlistAction) -> String {
        let mut out = Vec::new();
        run(wishlist, action, CurrencyCode::USD, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_toggle_twice() {
        let mut wishlist = WishlistStore::hydrate(MemoryStorage::new());
        let output = run_action(&mut wishlist, WishlistAction::Toggle { product: product("w1") });
        assert!(output.starts_with("Saved Watch w1"));
        assert!(output.contains("★ 4.5"));

        let output = run_action(&mut wishlist, WishlistAction::Toggle { product: product("w1") });
        assert!(output.starts_with("Removed Watch w1"));
        assert!(output.ends_with("Wishlist is empty\n"));
    }

    #[test]
    fn test_contains() {
        let mut wishlist = WishlistStore::hydrate(MemoryStorage::new());
        run_action(&mut wishlist, WishlistAction::Add { product: product("w1") });
        let output = run_action(&mut wishlist, WishlistAction::Contains { key: "w1".to_owned() });
        assert_eq!(output, "true\n");
        let output = run_action(&mut wishlist, WishlistAction::Contains { key: "w2".to_owned() });
        assert_eq!(output, "false\n");
    }
}
