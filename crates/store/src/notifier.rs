//! Cross-context notification.
//!
//! After every cart or wishlist mutation the owning aggregate broadcasts
//! the new state to an embedding parent context, if one exists. The
//! broadcast is fire-and-forget and at most once per mutation; receivers
//! must tolerate and ignore message shapes they do not recognize.
//!
//! Which implementation runs is an explicit configuration decision
//! ([`NotifierMode`]), never sniffed from the environment.

use std::sync::Arc;
use std::sync::mpsc;

use serde::{Deserialize, Serialize};

use mombabyshop_core::{CartLine, WishlistEntry};

/// Structured message sent to the embedding context.
///
/// Wire form matches the legacy `postMessage` envelope:
/// `{"type":"cart-update","cart":[...]}` and
/// `{"type":"wishlist-update","wishlist":[...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UpdateMessage {
    /// The cart changed; payload is the full new cart.
    #[serde(rename = "cart-update")]
    Cart {
        /// New cart contents.
        cart: Vec<CartLine>,
    },
    /// The wishlist changed; payload is the full new wishlist.
    #[serde(rename = "wishlist-update")]
    Wishlist {
        /// New wishlist contents.
        wishlist: Vec<WishlistEntry>,
    },
}

/// Outbound channel to the embedding context.
pub trait ContextNotifier: Send + Sync {
    /// Broadcast `message`. Best-effort: failures are logged, never
    /// returned, and never retried.
    fn notify(&self, message: &UpdateMessage);
}

/// Notifier for non-embedded contexts; drops every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl ContextNotifier for NoopNotifier {
    fn notify(&self, _message: &UpdateMessage) {}
}

/// Notifier for embedded contexts: serializes each message and sends it
/// over a channel whose receiving end the embedding parent owns.
pub struct ParentNotifier {
    sender: mpsc::Sender<String>,
}

impl ParentNotifier {
    /// Create a notifier over an existing sender.
    #[must_use]
    pub const fn new(sender: mpsc::Sender<String>) -> Self {
        Self { sender }
    }

    /// Create a notifier together with the receiver the embedding parent
    /// should poll.
    #[must_use]
    pub fn channel() -> (Self, mpsc::Receiver<String>) {
        let (sender, receiver) = mpsc::channel();
        (Self::new(sender), receiver)
    }
}

impl ContextNotifier for ParentNotifier {
    fn notify(&self, message: &UpdateMessage) {
        let envelope = match serde_json::to_string(message) {
            Ok(json) => json,
            Err(error) => {
                tracing::debug!(%error, "could not encode update message");
                return;
            }
        };

        if self.sender.send(envelope).is_err() {
            tracing::debug!("parent context gone; dropping update");
        }
    }
}

/// How this context relates to an embedding parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifierMode {
    /// Running inside an embedding parent that wants updates.
    Embedded,
    /// Top-level context; nothing to notify.
    Standalone,
}

impl NotifierMode {
    /// Build the notifier for this mode. Embedded mode also yields the
    /// receiver the parent context must hold on to.
    #[must_use]
    pub fn build(self) -> (Arc<dyn ContextNotifier>, Option<mpsc::Receiver<String>>) {
        match self {
            Self::Embedded => {
                let (notifier, receiver) = ParentNotifier::channel();
                (Arc::new(notifier), Some(receiver))
            }
            Self::Standalone => (Arc::new(NoopNotifier), None),
        }
    }
}
