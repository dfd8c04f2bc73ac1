//! Synchronous multicast notification.
//!
//! [`Notifier`] is a callback registry: subscribers are invoked in
//! registration order, on the dispatching caller's own thread, with no
//! deferred or async delivery. Subscriptions are released explicitly by
//! id, never by finalization timing.
//!
//! The registry stores callbacks behind [`Arc`] and clones the list before
//! invoking, so a handler may subscribe or unsubscribe without deadlocking
//! the registry lock. A dispatch-in-progress flag is exposed so the
//! provider can reject re-entrant mutation from inside a handler instead
//! of silently tolerating it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

/// Identifies one registered subscriber for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Registry<T> {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Callback<T>)>,
}

/// A synchronous multicast channel for one event type.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use lingo_store::Notifier;
///
/// let notifier: Notifier<String> = Notifier::new();
/// let seen = Arc::new(AtomicUsize::new(0));
///
/// let counter = Arc::clone(&seen);
/// let id = notifier.subscribe(move |_event| {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// notifier.dispatch(&"hello".to_owned());
/// assert_eq!(seen.load(Ordering::SeqCst), 1);
///
/// assert!(notifier.unsubscribe(id));
/// notifier.dispatch(&"ignored".to_owned());
/// assert_eq!(seen.load(Ordering::SeqCst), 1);
/// ```
pub struct Notifier<T> {
    registry: Mutex<Registry<T>>,
    dispatch_depth: AtomicUsize,
}

/// Tracks dispatch nesting; decrements on drop so a panicking subscriber
/// cannot leave the flag stuck.
struct DispatchGuard<'a>(&'a AtomicUsize);

impl<'a> DispatchGuard<'a> {
    fn enter(depth: &'a AtomicUsize) -> Self {
        depth.fetch_add(1, Ordering::SeqCst);
        Self(depth)
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<T> std::fmt::Debug for Notifier<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.subscriber_count())
            .field("dispatching", &self.is_dispatching())
            .finish()
    }
}

impl<T> Default for Notifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Notifier<T> {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            registry: Mutex::new(Registry {
                next_id: 0,
                subscribers: Vec::new(),
            }),
            dispatch_depth: AtomicUsize::new(0),
        }
    }

    /// Registers a subscriber and returns its id.
    ///
    /// Subscribers are invoked in registration order.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock();
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry.subscribers.push((id, Arc::new(callback)));
        id
    }

    /// Removes a subscriber; returns `false` if the id was not registered.
    ///
    /// Removal is deterministic: once this returns, the callback will not
    /// be invoked by any *subsequent* dispatch.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry.lock();
        let before = registry.subscribers.len();
        registry.subscribers.retain(|(sid, _)| *sid != id);
        registry.subscribers.len() != before
    }

    /// Returns the number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.registry.lock().subscribers.len()
    }

    /// Returns `true` while a dispatch is executing on some thread.
    ///
    /// Nested dispatches count; the flag stays set until the outermost
    /// one finishes.
    #[inline]
    #[must_use]
    pub fn is_dispatching(&self) -> bool {
        self.dispatch_depth.load(Ordering::SeqCst) > 0
    }

    /// Delivers one event to all current subscribers, in order, on the
    /// caller's thread.
    pub fn dispatch(&self, event: &T) {
        let callbacks: Vec<Callback<T>> = {
            let registry = self.registry.lock();
            registry
                .subscribers
                .iter()
                .map(|(_, cb)| Arc::clone(cb))
                .collect()
        };
        if callbacks.is_empty() {
            return;
        }

        let _guard = DispatchGuard::enter(&self.dispatch_depth);
        for callback in callbacks {
            callback(event);
        }
    }

    /// Delivers a batch of events, each to all current subscribers.
    pub fn dispatch_all(&self, events: &[T]) {
        for event in events {
            self.dispatch(event);
        }
    }
}
