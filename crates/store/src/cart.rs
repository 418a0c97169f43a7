//! Cart aggregate.
//!
//! Owns the ordered list of cart lines and the `mombabyshop-cart` record.
//! Line identity is `(id, color-if-present)`; adding an existing identity
//! accumulates quantity instead of appending. Order is insertion order and
//! stays stable across mutations so the UI renders consistently.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use rust_decimal::Decimal;

use mombabyshop_core::{CartLine, LineKey, ProductRef};

use crate::notifier::{ContextNotifier, UpdateMessage};
use crate::storage::{StorageError, StoreHandle, keys};

/// Errors from cart operations.
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    /// Caller requested a zero quantity on an operation that requires at
    /// least one unit.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// The durable store rejected the write; the cart is unchanged.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Local change observer (count badges, cart pages). Invoked after every
/// committed mutation, local or cross-context, with the new snapshot.
type Watcher = Box<dyn Fn(&[CartLine]) + Send + Sync>;

/// The shopping cart.
///
/// Construct once per context and pass by reference. State loads from the
/// durable store at construction and tracks writes from other contexts via
/// subscription, replacing the snapshot wholesale (last write wins).
pub struct Cart {
    store: StoreHandle,
    notifier: Arc<dyn ContextNotifier>,
    lines: Arc<Mutex<Vec<CartLine>>>,
    watchers: Arc<Mutex<Vec<Watcher>>>,
}

impl Cart {
    /// Create a cart over the given store context.
    ///
    /// An absent, corrupt, or unreadable record starts the cart empty;
    /// nothing here blocks the UI.
    #[must_use]
    pub fn new(store: StoreHandle, notifier: Arc<dyn ContextNotifier>) -> Self {
        let initial = read_lines_or_empty(&store);

        let lines = Arc::new(Mutex::new(initial));
        let watchers: Arc<Mutex<Vec<Watcher>>> = Arc::new(Mutex::new(Vec::new()));

        let lines_in_handler = Arc::clone(&lines);
        let watchers_in_handler = Arc::clone(&watchers);
        store.subscribe(keys::CART, move |raw| {
            let next = parse_lines_or_empty(raw);
            let snapshot = {
                let mut guard = lines_in_handler.lock();
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
            lines,
            watchers,
        }
    }

    /// Add `qty` units of `product`, merging into the existing line with
    /// the same identity key if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] if `qty` is zero and
    /// [`CartError::Storage`] if persisting fails (cart unchanged).
    pub fn add_item(&self, product: ProductRef, qty: u32) -> Result<(), CartError> {
        if qty == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let guard = self.lines.lock();
        let mut next = guard.clone();
        let key = product.line_key();
        match next.iter_mut().find(|line| line.key() == key) {
            Some(line) => line.quantity = line.quantity.saturating_add(qty),
            None => next.push(CartLine::new(product, qty)),
        }
        self.commit(guard, next)?;
        Ok(())
    }

    /// Remove the line with the given identity key. Absent keys are a
    /// no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if persisting fails (cart unchanged).
    pub fn remove_item(&self, key: &LineKey) -> Result<(), CartError> {
        let guard = self.lines.lock();
        let mut next = guard.clone();
        next.retain(|line| line.key() != *key);
        self.commit(guard, next)?;
        Ok(())
    }

    /// Overwrite the quantity of the line with the given identity key.
    /// A zero quantity removes the line; an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if persisting fails (cart unchanged).
    pub fn set_quantity(&self, key: &LineKey, qty: u32) -> Result<(), CartError> {
        if qty == 0 {
            return self.remove_item(key);
        }

        let guard = self.lines.lock();
        let mut next = guard.clone();
        if let Some(line) = next.iter_mut().find(|line| line.key() == *key) {
            line.quantity = qty;
        }
        self.commit(guard, next)?;
        Ok(())
    }

    /// Empty the cart (e.g., after a successful checkout).
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if persisting fails (cart unchanged).
    pub fn clear(&self) -> Result<(), CartError> {
        let guard = self.lines.lock();
        self.commit(guard, Vec::new())?;
        Ok(())
    }

    /// Sum of all line quantities; backs the badge count.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.lines
            .lock()
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum()
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines.lock().iter().map(CartLine::line_total).sum()
    }

    /// Snapshot of the current lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.lines.lock().clone()
    }

    /// Register a local observer invoked after every committed change.
    pub fn watch(&self, watcher: impl Fn(&[CartLine]) + Send + Sync + 'static) {
        self.watchers.lock().push(Box::new(watcher));
    }

    /// Persist `next`, then commit it as the in-memory snapshot and fan
    /// out notifications. On persist failure the snapshot is untouched, so
    /// memory never runs ahead of durable state. The lines lock is
    /// released before any notification runs; watchers may read the cart
    /// back.
    fn commit(
        &self,
        mut guard: MutexGuard<'_, Vec<CartLine>>,
        next: Vec<CartLine>,
    ) -> Result<(), StorageError> {
        self.store.write(keys::CART, &next)?;
        *guard = next;
        let snapshot = guard.clone();
        drop(guard);

        self.notifier.notify(&UpdateMessage::Cart {
            cart: snapshot.clone(),
        });
        for watcher in self.watchers.lock().iter() {
            watcher(&snapshot);
        }
        Ok(())
    }
}

fn read_lines_or_empty(store: &StoreHandle) -> Vec<CartLine> {
    match store.read::<Vec<CartLine>>(keys::CART) {
        Ok(Some(lines)) => lines,
        Ok(None) => Vec::new(),
        Err(error) => {
            tracing::warn!(%error, "cart record unreadable; starting empty");
            Vec::new()
        }
    }
}

fn parse_lines_or_empty(raw: Option<&str>) -> Vec<CartLine> {
    raw.map_or_else(Vec::new, |text| match serde_json::from_str(text) {
        Ok(lines) => lines,
        Err(error) => {
            tracing::warn!(%error, "ignoring corrupt cart update");
            Vec::new()
        }
    })
}
