//! File-backed persistence across hub lifetimes.
//!
//! A new hub over the same data directory models a page reload (or a new
//! process): everything must come back from the JSON records alone.

#![allow(clippy::unwrap_used)]

use std::fs;

use rust_decimal::Decimal;

use mombabyshop_core::{ProductId, ProductRef, UserRole};
use mombabyshop_integration_tests::Context;
use mombabyshop_store::storage::file::JsonFileBackend;
use mombabyshop_store::{StoreHub, keys};

fn file_hub(dir: &std::path::Path) -> StoreHub {
    StoreHub::new(JsonFileBackend::new(dir))
}

fn stroller() -> ProductRef {
    ProductRef::new("1", "Xe đẩy em bé", Decimal::from(7_500_000), "/stroller.png").unwrap()
}

#[test]
fn state_survives_reload() {
    let dir = tempfile::tempdir().unwrap();

    {
        let ctx = Context::open(&file_hub(dir.path()));
        ctx.cart.add_item(stroller(), 2).unwrap();
        ctx.wishlist.toggle(stroller()).unwrap();
        ctx.auth
            .login("customer@example.com", "123456", UserRole::Customer)
            .unwrap();
    }

    let reloaded = Context::open(&file_hub(dir.path()));
    assert_eq!(reloaded.cart.total_item_count(), 2);
    assert_eq!(reloaded.cart.total_price(), Decimal::from(15_000_000));
    assert!(reloaded.wishlist.contains(&ProductId::from("1")));
    assert_eq!(
        reloaded.auth.current_profile().map(|p| p.role),
        Some(UserRole::Customer)
    );
}

#[test]
fn absent_records_mean_empty_state() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = Context::open(&file_hub(dir.path()));

    assert!(ctx.cart.lines().is_empty());
    assert!(ctx.wishlist.entries().is_empty());
    assert!(!ctx.auth.is_authenticated());
}

#[test]
fn corrupt_record_reads_like_never_written() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(format!("{}.json", keys::CART)), "{oops").unwrap();

    let ctx = Context::open(&file_hub(dir.path()));
    assert!(ctx.cart.lines().is_empty());

    // The next mutation replaces the corrupt record with a valid one.
    ctx.cart.add_item(stroller(), 1).unwrap();
    let reloaded = Context::open(&file_hub(dir.path()));
    assert_eq!(reloaded.cart.total_item_count(), 1);
}

#[test]
fn explicit_empty_and_never_written_are_indistinguishable() {
    let dir = tempfile::tempdir().unwrap();

    {
        let ctx = Context::open(&file_hub(dir.path()));
        ctx.cart.add_item(stroller(), 1).unwrap();
        ctx.cart.clear().unwrap();
    }

    let cleared = Context::open(&file_hub(dir.path()));
    let fresh_dir = tempfile::tempdir().unwrap();
    let fresh = Context::open(&file_hub(fresh_dir.path()));

    assert_eq!(cleared.cart.lines(), fresh.cart.lines());
}

#[test]
fn record_layout_matches_the_legacy_pages() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = Context::open(&file_hub(dir.path()));
    ctx.cart
        .add_item(stroller().with_color("Đen").with_brand("Chicco"), 2)
        .unwrap();

    let raw = fs::read_to_string(dir.path().join(format!("{}.json", keys::CART))).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    // Flat array of line objects, quantity inline with the product fields.
    assert_eq!(json[0]["id"], "1");
    assert_eq!(json[0]["name"], "Xe đẩy em bé");
    assert_eq!(json[0]["image"], "/stroller.png");
    assert_eq!(json[0]["color"], "Đen");
    assert_eq!(json[0]["brand"], "Chicco");
    assert_eq!(json[0]["quantity"], 2);
}

#[test]
fn logout_leaves_cart_and_wishlist_files_alone() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = Context::open(&file_hub(dir.path()));

    ctx.cart.add_item(stroller(), 1).unwrap();
    ctx.wishlist.toggle(stroller()).unwrap();
    ctx.auth
        .login("admin@example.com", "123456", UserRole::Admin)
        .unwrap();
    ctx.auth.logout().unwrap();

    assert!(!dir.path().join(format!("{}.json", keys::USER)).exists());
    assert!(!dir.path().join(format!("{}.json", keys::TOKEN)).exists());
    assert!(dir.path().join(format!("{}.json", keys::CART)).exists());
    assert!(dir.path().join(format!("{}.json", keys::WISHLIST)).exists());
}
