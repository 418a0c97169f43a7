//! Multiple contexts sharing one durable store.
//!
//! Each context holds independent aggregate instances backed by the same
//! records; the store's subscription fan-out keeps them in sync without a
//! shared process assumption.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rust_decimal::Decimal;

use mombabyshop_core::{ProductId, ProductRef, UserRole};
use mombabyshop_integration_tests::{Context, memory_hub};

fn stroller() -> ProductRef {
    ProductRef::new("1", "Xe đẩy em bé", Decimal::from(7_500_000), "/stroller.png").unwrap()
}

fn crib() -> ProductRef {
    ProductRef::new("2", "Nôi cũi", Decimal::from(4_200_000), "/crib.png").unwrap()
}

#[test]
fn mutation_in_one_context_updates_the_other() {
    let hub = memory_hub();
    let a = Context::open(&hub);
    let b = Context::open(&hub);

    a.cart.add_item(stroller(), 2).unwrap();

    assert_eq!(b.cart.total_item_count(), 2);
    assert_eq!(b.cart.lines(), a.cart.lines());
}

#[test]
fn watcher_in_other_context_observes_persisted_state() {
    let hub = memory_hub();
    let a = Context::open(&hub);
    let b = Context::open(&hub);

    let observed = Arc::new(AtomicUsize::new(0));
    let observed_in_watcher = Arc::clone(&observed);
    b.cart.watch(move |lines| {
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 2);
        observed_in_watcher.fetch_add(1, Ordering::SeqCst);
    });

    a.cart.add_item(stroller(), 2).unwrap();
    assert_eq!(observed.load(Ordering::SeqCst), 1);
}

#[test]
fn own_mutations_do_not_echo_through_the_store() {
    let hub = memory_hub();
    let a = Context::open(&hub);

    let local = Arc::new(AtomicUsize::new(0));
    let local_in_watcher = Arc::clone(&local);
    a.cart.watch(move |_| {
        local_in_watcher.fetch_add(1, Ordering::SeqCst);
    });

    a.cart.add_item(stroller(), 1).unwrap();
    // Exactly one delivery: the local commit, not a second cross-context
    // echo of the same write.
    assert_eq!(local.load(Ordering::SeqCst), 1);
}

#[test]
fn last_write_wins_across_contexts() {
    let hub = memory_hub();
    let a = Context::open(&hub);
    let b = Context::open(&hub);

    a.cart.add_item(stroller(), 1).unwrap();
    // B observed A's write, so B's next mutation builds on it.
    b.cart.add_item(crib(), 1).unwrap();

    assert_eq!(a.cart.lines().len(), 2);
    assert_eq!(a.cart.lines(), b.cart.lines());
}

#[test]
fn wishlist_toggle_propagates_membership() {
    let hub = memory_hub();
    let a = Context::open(&hub);
    let b = Context::open(&hub);

    a.wishlist.toggle(crib()).unwrap();
    assert!(b.wishlist.contains(&ProductId::from("2")));

    b.wishlist.toggle(crib()).unwrap();
    assert!(!a.wishlist.contains(&ProductId::from("2")));
    assert!(a.wishlist.entries().is_empty());
}

#[test]
fn logout_elsewhere_ends_this_contexts_session() {
    let hub = memory_hub();
    let a = Context::open(&hub);
    let b = Context::open(&hub);

    a.auth
        .login("customer@example.com", "123456", UserRole::Customer)
        .unwrap();
    assert!(b.auth.is_authenticated());

    b.auth.logout().unwrap();
    assert!(!a.auth.is_authenticated());
}

#[test]
fn cart_and_wishlist_records_stay_independent() {
    let hub = memory_hub();
    let a = Context::open(&hub);
    let b = Context::open(&hub);

    a.cart.add_item(stroller(), 1).unwrap();
    a.wishlist.toggle(crib()).unwrap();
    b.cart.clear().unwrap();

    assert!(a.cart.lines().is_empty());
    assert!(a.wishlist.contains(&ProductId::from("2")));
}
