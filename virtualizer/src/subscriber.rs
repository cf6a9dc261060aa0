use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::store::VirtualStore;

/// A change notification callback.
///
/// The `bool` argument is the `sync` hint: `true` when the mutation that triggered this
/// notification is large enough (or otherwise time-sensitive enough) that the subscriber should
/// prefer a synchronous/flushed re-render over a batched one.
pub type Subscriber = Arc<dyn Fn(&VirtualStore, bool) + Send + Sync>;

/// Opaque handle returned by [`VirtualStore::subscribe`], used to unsubscribe later.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(pub(crate) u64);

pub(crate) struct Subscription {
    pub(crate) id: SubscriptionId,
    pub(crate) interest: u8,
    pub(crate) callback: Subscriber,
}

#[derive(Default)]
pub(crate) struct SubscriberList {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl SubscriberList {
    pub(crate) fn subscribe(&mut self, interest: u8, callback: Subscriber) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            interest,
            callback,
        });
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Invokes every subscriber whose interest mask intersects `mutated`, passing `sync`.
    ///
    /// Not re-entrant: a subscriber must not call back into the store synchronously. The store
    /// does not guard against this; doing so is undefined behavior at the reducer level (it is
    /// free to reuse its own borrowed state across the callback).
    pub(crate) fn notify(&self, store: &VirtualStore, mutated: u8, sync: bool) {
        for s in &self.subscriptions {
            if s.interest & mutated != 0 {
                (s.callback)(store, sync);
            }
        }
    }
}

impl core::fmt::Debug for SubscriberList {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SubscriberList")
            .field("count", &self.subscriptions.len())
            .finish()
    }
}
