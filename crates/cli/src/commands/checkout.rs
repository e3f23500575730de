//! Checkout request command.
//!
//! Prints the JSON body the storefront posts to its checkout endpoint. The
//! cart is left untouched; it is cleared once the order is confirmed.

use std::io::Write;

use glory_state::{ClientState, KeyValueStorage};
use tracing::info;

/// Print the checkout request for the current cart.
///
/// # Errors
///
/// Returns an error if the cart is empty or output fails.
pub fn run<S: KeyValueStorage>(
    state: &ClientState<S>,
    success_url: Option<String>,
    cancel_url: Option<String>,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut request = state.checkout_request()?;
    if let Some(url) = success_url {
        request = request.with_success_url(url);
    }
    if let Some(url) = cancel_url {
        request = request.with_cancel_url(url);
    }

    info!(
        lines = request.line_items.len(),
        total_minor_units = request.total_minor_units(),
        "Built checkout request"
    );
    writeln!(out, "{}", serde_json::to_string_pretty(&request)?)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use glory_core::{NewCartItem, ProductKey};
    use glory_state::{MemoryStorage, StateConfig};

    use super::*;

    fn state() -> ClientState<MemoryStorage> {
        let config = StateConfig::from_lookup(|_| None).unwrap();
        ClientState::hydrate(Arc::new(MemoryStorage::new()), &config)
    }

    #[test]
    fn test_empty_cart_fails() {
        let mut out = Vec::new();
        let err = run(&state(), None, None, &mut out).unwrap_err();
        assert_eq!(err.to_string(), "No items provided");
        assert!(out.is_empty());
    }

    #[test]
    fn test_prints_request() {
        let mut state = state();
        state.cart.add_item(
            NewCartItem::new(
                ProductKey::parse("w1").unwrap(),
                "Aurelius",
                "249".parse().unwrap(),
                None,
            ),
            2,
        );

        let mut out = Vec::new();
        run(&state, None, Some("https://shop.example.com/bag".to_owned()), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["currency"], "usd");
        assert_eq!(value["line_items"][0]["unit_amount"], 24_900);
        assert_eq!(value["line_items"][0]["quantity"], 2);
        assert_eq!(value["cancel_url"], "https://shop.example.com/bag");
        assert!(state.cart.contains("w1"));
    }
}
