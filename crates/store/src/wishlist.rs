//! Wishlist aggregate.
//!
//! Owns the ordered list of favorited products and the
//! `mombabyshop-wishlist` record. Membership is keyed by product `id`
//! alone (a heart icon is either on or off for a product, regardless of
//! variant); toggle is the primary mutation.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use mombabyshop_core::{ProductId, ProductRef, WishlistEntry};

use crate::notifier::{ContextNotifier, UpdateMessage};
use crate::storage::{StorageError, StoreHandle, keys};

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    /// The product was absent and has been added.
    Added,
    /// The product was present and has been removed.
    Removed,
}

/// Result of a toggle: the action taken and the new wishlist.
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleOutcome {
    /// Whether the toggle added or removed the product.
    pub action: ToggleAction,
    /// Wishlist contents after the toggle.
    pub entries: Vec<WishlistEntry>,
}

/// Local change observer, invoked with the new snapshot after every
/// committed mutation.
type Watcher = Box<dyn Fn(&[WishlistEntry]) + Send + Sync>;

/// The wishlist.
pub struct Wishlist {
    store: StoreHandle,
    notifier: Arc<dyn ContextNotifier>,
    entries: Arc<Mutex<Vec<WishlistEntry>>>,
    watchers: Arc<Mutex<Vec<Watcher>>>,
}

impl Wishlist {
    /// Create a wishlist over the given store context.
    ///
    /// An absent, corrupt, or unreadable record starts it empty.
    #[must_use]
    pub fn new(store: StoreHandle, notifier: Arc<dyn ContextNotifier>) -> Self {
        let initial = match store.read::<Vec<WishlistEntry>>(keys::WISHLIST) {
            Ok(Some(entries)) => entries,
            Ok(None) => Vec::new(),
            Err(error) => {
                tracing::warn!(%error, "wishlist record unreadable; starting empty");
                Vec::new()
            }
        };

        let entries = Arc::new(Mutex::new(initial));
        let watchers: Arc<Mutex<Vec<Watcher>>> = Arc::new(Mutex::new(Vec::new()));

        let entries_in_handler = Arc::clone(&entries);
        let watchers_in_handler = Arc::clone(&watchers);
        store.subscribe(keys::WISHLIST, move |raw| {
            let next = raw.map_or_else(Vec::new, |text| match serde_json::from_str(text) {
                Ok(entries) => entries,
                Err(error) => {
                    tracing::warn!(%error, "ignoring corrupt wishlist update");
                    Vec::new()
                }
            });
            let snapshot = {
                let mut guard = entries_in_handler.lock();
                *guard = next;
                guard.clone()
            };
            for watcher in watchers_in_handler.lock().iter() {
                watcher(&snapshot);
            }
        });

        Self {
            store,
            notifier,
            entries,
            watchers,
        }
    }

    /// Add `product` if absent, remove it if present.
    ///
    /// The read-then-write sequence runs under the aggregate lock, so two
    /// rapid toggles of the same product can never leave a duplicate
    /// entry behind.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if persisting fails (wishlist unchanged).
    pub fn toggle(&self, product: ProductRef) -> Result<ToggleOutcome, StorageError> {
        let guard = self.entries.lock();
        let mut next = guard.clone();

        let action = if next.iter().any(|entry| entry.id == product.id) {
            next.retain(|entry| entry.id != product.id);
            ToggleAction::Removed
        } else {
            next.push(product);
            ToggleAction::Added
        };

        let entries = next.clone();
        self.commit(guard, next)?;
        Ok(ToggleOutcome { action, entries })
    }

    /// Whether the product is favorited.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.entries.lock().iter().any(|entry| entry.id == *id)
    }

    /// Remove the product without toggle semantics (the wishlist page's
    /// own remove button). Absent IDs are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if persisting fails (wishlist unchanged).
    pub fn remove(&self, id: &ProductId) -> Result<(), StorageError> {
        let guard = self.entries.lock();
        let mut next = guard.clone();
        next.retain(|entry| entry.id != *id);
        self.commit(guard, next)
    }

    /// Empty the wishlist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if persisting fails (wishlist unchanged).
    pub fn clear(&self) -> Result<(), StorageError> {
        let guard = self.entries.lock();
        self.commit(guard, Vec::new())
    }

    /// Snapshot of the current entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<WishlistEntry> {
        self.entries.lock().clone()
    }

    /// Register a local observer invoked after every committed change.
    pub fn watch(&self, watcher: impl Fn(&[WishlistEntry]) + Send + Sync + 'static) {
        self.watchers.lock().push(Box::new(watcher));
    }

    /// Persist `next`, commit it as the snapshot, then fan out. The
    /// entries lock is released before any notification runs; watchers may
    /// read the wishlist back.
    fn commit(
        &self,
        mut guard: MutexGuard<'_, Vec<WishlistEntry>>,
        next: Vec<WishlistEntry>,
    ) -> Result<(), StorageError> {
        self.store.write(keys::WISHLIST, &next)?;
        *guard = next;
        let snapshot = guard.clone();
        drop(guard);

        self.notifier.notify(&UpdateMessage::Wishlist {
            wishlist: snapshot.clone(),
        });
        for watcher in self.watchers.lock().iter() {
            watcher(&snapshot);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::notifier::NoopNotifier;
    use crate::storage::{StoreHub, memory::MemoryBackend};
    use rust_decimal::Decimal;

    fn crib() -> ProductRef {
        ProductRef::new("2", "Crib", Decimal::from(4_200_000), "y").unwrap()
    }

    fn blanket() -> ProductRef {
        ProductRef::new("3", "Blanket", Decimal::from(350_000), "z").unwrap()
    }

    fn wishlist_over_memory() -> Wishlist {
        let hub = StoreHub::new(MemoryBackend::new());
        Wishlist::new(hub.handle(), Arc::new(NoopNotifier))
    }

    #[test]
    fn test_toggle_reports_added_then_removed() {
        let wishlist = wishlist_over_memory();

        let first = wishlist.toggle(crib()).unwrap();
        assert_eq!(first.action, ToggleAction::Added);
        assert_eq!(first.entries.len(), 1);

        let second = wishlist.toggle(crib()).unwrap();
        assert_eq!(second.action, ToggleAction::Removed);
        assert!(second.entries.is_empty());
    }

    #[test]
    fn test_toggle_involution_preserves_other_entries() {
        let wishlist = wishlist_over_memory();
        wishlist.toggle(blanket()).unwrap();

        wishlist.toggle(crib()).unwrap();
        wishlist.toggle(crib()).unwrap();

        let entries = wishlist.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id.as_str(), "3");
    }

    #[test]
    fn test_membership_ignores_variant() {
        let wishlist = wishlist_over_memory();
        wishlist.toggle(crib().with_color("Xanh")).unwrap();

        assert!(wishlist.contains(&ProductId::from("2")));
        // Same id with a different color still toggles off.
        let outcome = wishlist.toggle(crib().with_color("Hồng")).unwrap();
        assert_eq!(outcome.action, ToggleAction::Removed);
    }

    #[test]
    fn test_remove_and_clear() {
        let wishlist = wishlist_over_memory();
        wishlist.toggle(crib()).unwrap();
        wishlist.toggle(blanket()).unwrap();

        wishlist.remove(&ProductId::from("2")).unwrap();
        assert!(!wishlist.contains(&ProductId::from("2")));
        assert!(wishlist.contains(&ProductId::from("3")));

        wishlist.clear().unwrap();
        assert!(wishlist.entries().is_empty());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let wishlist = wishlist_over_memory();
        wishlist.toggle(crib()).unwrap();
        wishlist.remove(&ProductId::from("missing")).unwrap();
        assert_eq!(wishlist.entries().len(), 1);
    }

    #[test]
    fn test_watcher_can_read_the_wishlist_back() {
        use std::sync::atomic::{AtomicBool, Ordering};

        // A heart icon re-checking membership inside the watcher must not
        // deadlock on the entries lock.
        let wishlist = Arc::new(wishlist_over_memory());
        let seen = Arc::new(AtomicBool::new(false));
        let wishlist_in_watcher = Arc::clone(&wishlist);
        let seen_in_watcher = Arc::clone(&seen);
        wishlist.watch(move |_| {
            seen_in_watcher.store(
                wishlist_in_watcher.contains(&ProductId::from("2")),
                Ordering::SeqCst,
            );
        });

        wishlist.toggle(crib()).unwrap();
        assert!(seen.load(Ordering::SeqCst));
    }

    #[test]
    fn test_persists_across_construction() {
        let hub = StoreHub::new(MemoryBackend::new());
        {
            let wishlist = Wishlist::new(hub.handle(), Arc::new(NoopNotifier));
            wishlist.toggle(crib()).unwrap();
        }

        let reloaded = Wishlist::new(hub.handle(), Arc::new(NoopNotifier));
        assert!(reloaded.contains(&ProductId::from("2")));
    }

    #[test]
    fn test_cross_context_toggle_visible() {
        let hub = StoreHub::new(MemoryBackend::new());
        let list_a = Wishlist::new(hub.handle(), Arc::new(NoopNotifier));
        let list_b = Wishlist::new(hub.handle(), Arc::new(NoopNotifier));

        list_a.toggle(crib()).unwrap();
        assert!(list_b.contains(&ProductId::from("2")));
    }
}
