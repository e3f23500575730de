//! Checkout request built from the current cart.
//!
//! The payment provider wants line items priced in minor units plus the
//! redirect URLs for success and cancellation. Creating the provider's
//! session is the server's job; this module only produces a consistent
//! snapshot of what the cart holds right now.

use glory_core::{CartLineItem, CurrencyCode, ProductKey};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::cart::CartStore;
use crate::storage::KeyValueStorage;

/// Placeholder the payment provider substitutes with its session id.
pub const SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

/// Errors that prevent building a checkout request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("No items provided")]
    EmptyCart,

    #[error("price of {0} is too large to charge")]
    AmountOutOfRange(ProductKey),
}

/// Where checkout redirects go and which currency is charged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    pub base_url: Url,
    pub currency: CurrencyCode,
}

impl CheckoutConfig {
    /// Default success redirect, carrying the provider's session id.
    #[must_use]
    pub fn default_success_url(&self) -> String {
        format!(
            "{}/order/confirmation?session_id={SESSION_ID_PLACEHOLDER}",
            self.base()
        )
    }

    /// Default cancel redirect, back to the cart page.
    #[must_use]
    pub fn default_cancel_url(&self) -> String {
        format!("{}/cart", self.base())
    }

    fn base(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }
}

/// One priced line as the payment provider expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLineItem {
    pub name: String,
    /// Unit price in minor units (cents).
    pub unit_amount: i64,
    pub quantity: u32,
}

/// Snapshot of the cart handed to the payment boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Lower-case ISO code, as payment providers expect.
    pub currency: String,
    pub line_items: Vec<CheckoutLineItem>,
    /// The cart lines, recorded with the pending order.
    pub items: Vec<CartLineItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub success_url: String,
    pub cancel_url: String,
}

impl CheckoutRequest {
    /// Build a request from the cart's current lines.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart has no lines and
    /// [`CheckoutError::AmountOutOfRange`] if a price cannot be expressed in
    /// minor units.
    pub fn from_cart<S: KeyValueStorage>(
        cart: &CartStore<S>,
        config: &CheckoutConfig,
    ) -> Result<Self, CheckoutError> {
        Self::from_lines(cart.snapshot(), config)
    }

    /// Build a request from explicit cart lines.
    ///
    /// # Errors
    ///
    /// See [`CheckoutRequest::from_cart`].
    pub fn from_lines(
        items: Vec<CartLineItem>,
        config: &CheckoutConfig,
    ) -> Result<Self, CheckoutError> {
        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let line_items = items
            .iter()
            .map(|line| -> Result<CheckoutLineItem, CheckoutError> {
                let unit_amount = line
                    .unit_price
                    .to_minor_units()
                    .ok_or_else(|| CheckoutError::AmountOutOfRange(line.product_key.clone()))?;
                Ok(CheckoutLineItem {
                    name: line.title.clone(),
                    unit_amount,
                    quantity: line.quantity(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let total = items
            .iter()
            .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.line_total()))
            .unwrap_or(Decimal::MAX);

        Ok(Self {
            currency: config.currency.code().to_ascii_lowercase(),
            line_items,
            items,
            total,
            success_url: config.default_success_url(),
            cancel_url: config.default_cancel_url(),
        })
    }

    /// Override the success redirect.
    #[must_use]
    pub fn with_success_url(mut self, url: impl Into<String>) -> Self {
        self.success_url = url.into();
        self
    }

    /// Override the cancel redirect.
    #[must_use]
    pub fn with_cancel_url(mut self, url: impl Into<String>) -> Self {
        self.cancel_url = url.into();
        self
    }

    /// Sum of `unit_amount * quantity` in minor units, saturating.
    #[must_use]
    pub fn total_minor_units(&self) -> i64 {
        self.line_items.iter().fold(0_i64, |acc, line| {
            acc.saturating_add(line.unit_amount.saturating_mul(i64::from(line.quantity)))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::num::NonZeroU32;

    use glory_core::{NewCartItem, Price};

    use super::*;
    use crate::storage::MemoryStorage;

    fn config() -> CheckoutConfig {
        CheckoutConfig {
            base_url: Url::parse("https://shop.example.com/").unwrap(),
            currency: CurrencyCode::USD,
        }
    }

    fn item(key: &str, price: Price) -> NewCartItem {
        NewCartItem::new(ProductKey::parse(key).unwrap(), key.to_uppercase(), price, None)
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let cart = CartStore::hydrate(MemoryStorage::new());
        let err = CheckoutRequest::from_cart(&cart, &config()).unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
        assert_eq!(err.to_string(), "No items provided");
    }

    #[test]
    fn test_request_mirrors_cart() {
        let mut cart = CartStore::hydrate(MemoryStorage::new());
        cart.add_item(item("w1", Price::from_cents(24_900).unwrap()), 3);
        cart.add_item(item("s1", Price::from_cents(1_999).unwrap()), 1);

        let request = CheckoutRequest::from_cart(&cart, &config()).unwrap();
        assert_eq!(request.currency, "usd");
        assert_eq!(
            request.line_items,
            vec![
                CheckoutLineItem {
                    name: "S1".to_owned(),
                    unit_amount: 1999,
                    quantity: 1
                },
                CheckoutLineItem {
                    name: "W1".to_owned(),
                    unit_amount: 24_900,
                    quantity: 3
                },
            ]
        );
        assert_eq!(request.total, cart.subtotal());
        assert_eq!(request.total_minor_units(), 76_699);
        assert_eq!(request.items, cart.items());
    }

    #[test]
    fn test_unit_amount_rounds() {
        let price = Price::new(Decimal::new(10_005, 3)).unwrap();
        let line = item("x", price).into_line(NonZeroU32::MIN);
        let request = CheckoutRequest::from_lines(vec![line], &config()).unwrap();
        assert_eq!(request.line_items[0].unit_amount, 1001);
    }

    #[test]
    fn test_default_urls() {
        let config = config();
        assert_eq!(
            config.default_success_url(),
            "https://shop.example.com/order/confirmation?session_id={CHECKOUT_SESSION_ID}"
        );
        assert_eq!(config.default_cancel_url(), "https://shop.example.com/cart");
    }

    #[test]
    fn test_url_overrides() {
        let mut cart = CartStore::hydrate(MemoryStorage::new());
        cart.add_one(item("w1", Price::from_cents(100).unwrap()));
        let request = CheckoutRequest::from_cart(&cart, &config())
            .unwrap()
            .with_success_url("https://pay.example.com/ok")
            .with_cancel_url("https://pay.example.com/back");
        assert_eq!(request.success_url, "https://pay.example.com/ok");
        assert_eq!(request.cancel_url, "https://pay.example.com/back");
    }

    #[test]
    fn test_serialized_shape() {
        let mut cart = CartStore::hydrate(MemoryStorage::new());
        cart.add_one(item("w1", Price::from_cents(24_900).unwrap()));
        let request = CheckoutRequest::from_cart(&cart, &config()).unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["line_items"][0]["unit_amount"], 24_900);
        assert_eq!(value["items"][0]["slug"], "w1");
        assert_eq!(value["total"].as_f64(), Some(249.0));
    }
}
