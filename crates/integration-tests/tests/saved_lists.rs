//! Integration tests for the wishlist, the comparison list and checkout.
//!
//! Products come from a catalog listing in the storefront's API shape and
//! state is shared through one `ClientState` per simulated session.

#![allow(clippy::unwrap_used)]

use std::path::Path;
use std::sync::Arc;

use glory_core::{CatalogListing, ComparisonEntry, NewCartItem, ProductRecord, WishlistEntry};
use glory_state::{AddOutcome, CheckoutError, ClientState, FileStorage, StateConfig};
use tempfile::TempDir;

const CATALOG: &str = r#"{"products":[
    {"_id":"p1","slug":"aurelius","title":"Aurelius","description":"Automatic","price":249,"images":["/a.jpg"],"inventory":4,"rating":4.5},
    {"_id":"p2","slug":"meridian","title":"Meridian","price":19.99,"category":"Dress","inventory":0},
    {"_id":"p3","slug":"solstice","title":"Solstice","price":1200,"inventory":1},
    {"_id":"p4","slug":"tempest","title":"Tempest","price":89.5,"inventory":9}
]}"#;

fn catalog() -> Vec<ProductRecord> {
    serde_json::from_str::<CatalogListing>(CATALOG)
        .unwrap()
        .into_products()
}

fn config(dir: &Path) -> StateConfig {
    let dir = dir.to_string_lossy().into_owned();
    StateConfig::from_lookup(|name| match name {
        "GLORY_STORAGE_DIR" => Some(dir.clone()),
        "GLORY_BASE_URL" => Some("https://shop.example.com/".to_owned()),
        _ => None,
    })
    .unwrap()
}

fn session(dir: &Path) -> ClientState<FileStorage> {
    let config = config(dir);
    ClientState::hydrate(Arc::new(FileStorage::new(config.storage_dir.clone())), &config)
}

#[test]
fn test_wishlist_toggle_survives_sessions() {
    let dir = TempDir::new().unwrap();
    let products = catalog();

    {
        let mut state = session(dir.path());
        assert!(state.wishlist.toggle_wishlist(WishlistEntry::from(&products[0])));
        assert!(state.wishlist.toggle_wishlist(WishlistEntry::from(&products[1])));
        state.wishlist.add_item(WishlistEntry::from(&products[0]));
        assert_eq!(state.wishlist.len(), 2);
    }

    let mut state = session(dir.path());
    assert!(state.wishlist.is_in_wishlist("aurelius"));
    let saved = &state.wishlist.items()[0];
    assert_eq!(saved.category.as_deref(), Some("Watches"));
    assert_eq!(saved.rating, Some(4.5));

    assert!(!state.wishlist.toggle_wishlist(WishlistEntry::from(&products[0])));
    assert!(!state.wishlist.is_in_wishlist("aurelius"));
    assert_eq!(session(dir.path()).wishlist.len(), 1);
}

#[test]
fn test_comparison_capacity_and_persistence() {
    let dir = TempDir::new().unwrap();
    let products = catalog();

    {
        let mut state = session(dir.path());
        let outcomes: Vec<AddOutcome> = products
            .iter()
            .map(|product| state.comparison.add(ComparisonEntry::from(product)))
            .collect();
        assert_eq!(
            outcomes,
            [
                AddOutcome::Added,
                AddOutcome::Added,
                AddOutcome::Added,
                AddOutcome::Full
            ]
        );
        assert_eq!(
            state.comparison.add(ComparisonEntry::from(&products[0])),
            AddOutcome::AlreadyPresent
        );
    }

    let mut state = session(dir.path());
    assert!(state.comparison.is_full());
    assert!(!state.comparison.is_comparing("tempest"));

    state.comparison.remove("meridian");
    assert_eq!(
        state.comparison.add(ComparisonEntry::from(&products[3])),
        AddOutcome::Added
    );
    let keys: Vec<&str> = state
        .comparison
        .items()
        .iter()
        .map(|entry| entry.product_key.as_str())
        .collect();
    assert_eq!(keys, ["aurelius", "solstice", "tempest"]);
}

#[test]
fn test_checkout_from_persisted_cart() {
    let dir = TempDir::new().unwrap();
    let products = catalog();

    {
        let mut state = session(dir.path());
        assert!(matches!(
            state.checkout_request(),
            Err(CheckoutError::EmptyCart)
        ));
        state.cart.add_item(NewCartItem::from(&products[1]), 3);
        state.cart.add_one(NewCartItem::from(&products[0]));
    }

    let state = session(dir.path());
    let request = state.checkout_request().unwrap();
    assert_eq!(request.currency, "usd");
    assert_eq!(request.line_items[0].name, "Aurelius");
    assert_eq!(request.line_items[0].unit_amount, 24_900);
    assert_eq!(request.line_items[1].unit_amount, 1_999);
    assert_eq!(request.line_items[1].quantity, 3);
    assert_eq!(request.total_minor_units(), 24_900 + 3 * 1_999);
    assert_eq!(
        request.success_url,
        "https://shop.example.com/order/confirmation?session_id={CHECKOUT_SESSION_ID}"
    );
    assert_eq!(request.cancel_url, "https://shop.example.com/cart");

    // Building the request leaves the cart intact.
    assert_eq!(session(dir.path()).cart.item_count(), 4);
}

#[test]
fn test_stores_do_not_share_blobs() {
    let dir = TempDir::new().unwrap();
    let products = catalog();

    let mut state = session(dir.path());
    state.cart.add_one(NewCartItem::from(&products[0]));
    state.wishlist.add_item(WishlistEntry::from(&products[1]));
    state.cart.clear();

    let state = session(dir.path());
    assert!(state.cart.is_empty());
    assert!(state.wishlist.is_in_wishlist("meridian"));
    assert!(state.comparison.is_empty());
}
