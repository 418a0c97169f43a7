//! End-to-end shopping scenario.
//!
//! Mirrors a session on the storefront: browse, heart a product, fill the
//! cart from several entry points, adjust at the cart page, log in at
//! checkout, clear after the order.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;

use mombabyshop_core::{LineKey, ProductId, ProductRef, UserRole};
use mombabyshop_integration_tests::{Context, memory_hub};
use mombabyshop_store::ToggleAction;

fn stroller(color: &str) -> ProductRef {
    ProductRef::new("1", "Xe đẩy em bé", Decimal::from(7_500_000), "/stroller.png")
        .unwrap()
        .with_color(color)
}

fn crib() -> ProductRef {
    ProductRef::new("2", "Nôi cũi", Decimal::from(4_200_000), "/crib.png").unwrap()
}

#[test]
fn browse_to_checkout() {
    let hub = memory_hub();
    let ctx = Context::open(&hub);

    // Heart the crib from a product card.
    let outcome = ctx.wishlist.toggle(crib()).unwrap();
    assert_eq!(outcome.action, ToggleAction::Added);

    // Detail page: two black strollers at once, then one more from the
    // listing page; same variant, one line.
    ctx.cart.add_item(stroller("Đen"), 2).unwrap();
    ctx.cart.add_item(stroller("Đen"), 1).unwrap();
    // A gray one is its own line.
    ctx.cart.add_item(stroller("Xám"), 1).unwrap();
    // The crib moves from wishlist interest to the cart.
    ctx.cart.add_item(crib(), 1).unwrap();

    assert_eq!(ctx.cart.lines().len(), 3);
    assert_eq!(ctx.cart.total_item_count(), 5);
    assert_eq!(
        ctx.cart.total_price(),
        Decimal::from(7_500_000 * 4 + 4_200_000)
    );

    // Cart page: drop the gray stroller, trim the black ones to two.
    let gray: LineKey = "1:Xám".parse().unwrap();
    ctx.cart.set_quantity(&gray, 0).unwrap();
    let black: LineKey = "1:Đen".parse().unwrap();
    ctx.cart.set_quantity(&black, 2).unwrap();

    assert_eq!(ctx.cart.total_item_count(), 3);
    assert_eq!(
        ctx.cart.total_price(),
        Decimal::from(7_500_000 * 2 + 4_200_000)
    );

    // Checkout requires a session.
    let profile = ctx
        .auth
        .login("customer@example.com", "123456", UserRole::Customer)
        .unwrap();
    assert_eq!(profile.role, UserRole::Customer);

    // Order placed: the cart is clearable; the wishlist is not an order
    // artifact and stays.
    ctx.cart.clear().unwrap();
    assert!(ctx.cart.lines().is_empty());
    assert_eq!(ctx.cart.total_price(), Decimal::ZERO);
    assert!(ctx.wishlist.contains(&ProductId::from("2")));
}
