use std::any::Any;
use std::rc::{Rc, Weak};

type CallbackRc<E> = Rc<dyn Fn(&E)>;
type CallbackWeak<E> = Weak<dyn Fn(&E)>;

/// Subscriber list for state-change notifications.
///
/// Subscribers are held weakly; the [`Subscription`] returned from [`Observers::subscribe`] keeps
/// the callback alive. Notification runs in registration order and prunes dropped subscribers.
pub struct Observers<E> {
    subscribers: Vec<CallbackWeak<E>>,
}

/// Guard keeping a subscriber callback registered. Dropping it unsubscribes.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    _guard: Box<dyn Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }
}

impl<E> std::fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("subscriber_count", &self.subscribers.len())
            .finish()
    }
}

impl<E: 'static> Observers<E> {
    /// Create an empty subscriber list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback`; it stays registered while the returned guard is alive.
    pub fn subscribe(&mut self, callback: impl Fn(&E) + 'static) -> Subscription {
        let strong: CallbackRc<E> = Rc::new(callback);
        self.subscribers.push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Deliver `event` to every live subscriber.
    pub fn notify(&mut self, event: &E) {
        self.subscribers.retain(|w| w.strong_count() > 0);
        let live: Vec<CallbackRc<E>> = self.subscribers.iter().filter_map(Weak::upgrade).collect();
        for cb in live {
            cb(event);
        }
    }

    /// Number of registered subscribers, including dropped ones not yet pruned.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Return `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/observe.rs"]
mod tests;
