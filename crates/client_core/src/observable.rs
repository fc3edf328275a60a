//! Observable sequence containers.
//!
//! An [`Observable`] holds a `Vec<T>` and a list of subscribers. Every
//! replacement or in-place mutation notifies the subscribers synchronously,
//! on the calling thread, in the order they subscribed.
//!
//! The value is kept behind an `Arc` snapshot. The internal lock is only held
//! long enough to swap or copy that snapshot, never while user code runs, so
//! callbacks and [`Observable::with`] closures may freely access the same
//! container.

use std::{collections::BTreeMap, fmt, sync::Arc};

use parking_lot::Mutex;

type Callback<T> = Arc<dyn Fn(&[T]) + Send + Sync>;

/// Handle returned by [`Observable::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

struct Inner<T> {
    value: Arc<Vec<T>>,
    // Ids are handed out in increasing order, so key order is subscription order.
    subscribers: BTreeMap<u64, Callback<T>>,
    next_id: u64,
}

/// A shared, observable `Vec<T>`.
///
/// Clones are handles to the same value and subscriber list.
pub struct Observable<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for Observable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Observable<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (value, subscribers) = {
            let guard = self.inner.lock();
            (Arc::clone(&guard.value), guard.subscribers.len())
        };
        f.debug_struct("Observable")
            .field("value", &value)
            .field("subscribers", &subscribers)
            .finish()
    }
}

impl<T> Observable<T> {
    /// Creates a container holding an empty sequence.
    pub fn new() -> Self {
        Self::with_value(Vec::new())
    }

    pub fn with_value(value: Vec<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                value: Arc::new(value),
                subscribers: BTreeMap::new(),
                next_id: 0,
            })),
        }
    }

    /// Registers `callback`, invoked with the new value on every later
    /// [`set`](Self::set) or [`update`](Self::update). It is not invoked with
    /// the current value.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&[T]) + Send + Sync + 'static,
    {
        let mut guard = self.inner.lock();
        let id = guard.next_id;
        guard.next_id += 1;
        guard.subscribers.insert(id, Arc::new(callback));
        SubscriptionId(id)
    }

    /// Removes a subscriber. Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.lock().subscribers.remove(&id.0).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }

    /// Runs `f` on the current value without cloning it.
    ///
    /// `f` sees the value as of the call; writes made from inside `f` are
    /// visible to later reads, not to `f`.
    pub fn with<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        let snapshot = self.snapshot();
        f(&snapshot)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().value.is_empty()
    }

    fn snapshot(&self) -> Arc<Vec<T>> {
        Arc::clone(&self.inner.lock().value)
    }

    fn subscribers_of(inner: &Inner<T>) -> Vec<(u64, Callback<T>)> {
        inner
            .subscribers
            .iter()
            .map(|(id, callback)| (*id, Arc::clone(callback)))
            .collect()
    }

    fn notify(&self, value: &[T], subscribers: &[(u64, Callback<T>)]) {
        for (id, callback) in subscribers {
            // An earlier callback may have unsubscribed this one.
            if !self.inner.lock().subscribers.contains_key(id) {
                continue;
            }
            callback(value);
        }
    }
}

impl<T> Observable<T>
where
    T: Clone,
{
    pub fn get(&self) -> Vec<T> {
        self.snapshot().as_ref().clone()
    }

    /// Replaces the value and notifies every subscriber once.
    pub fn set(&self, value: Vec<T>) {
        let value = Arc::new(value);
        let subscribers = {
            let mut guard = self.inner.lock();
            guard.value = Arc::clone(&value);
            Self::subscribers_of(&guard)
        };
        self.notify(&value, &subscribers);
    }

    /// Mutates the value in place and notifies every subscriber once.
    ///
    /// `f` runs under the container lock and must not access this container.
    pub fn update<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> R {
        let (result, snapshot, subscribers) = {
            let mut guard = self.inner.lock();
            let result = f(Arc::make_mut(&mut guard.value));
            (result, Arc::clone(&guard.value), Self::subscribers_of(&guard))
        };
        self.notify(&snapshot, &subscribers);
        result
    }
}

#[cfg(test)]
#[path = "tests/observable_tests.rs"]
mod tests;
