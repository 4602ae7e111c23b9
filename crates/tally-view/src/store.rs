//! State containers.
//!
//! A [`Store`] owns one value of some [`Reducer`] type. The only way to change
//! that value is [`Store::apply`], which reduces an action into the state and
//! then calls every subscriber with a snapshot of the result before returning.
//!
//! Subscribers are registered with [`Store::subscribe`], which hands back a
//! [`Subscription`]. The subscriber stays registered for exactly as long as the
//! subscription is alive.
//!
//! ```rust
//! use tally_view::store::{Reducer, Store};
//!
//! #[derive(Clone, Debug, Default)]
//! struct Total(i32);
//!
//! impl Reducer for Total {
//!     type Action = i32;
//!
//!     fn reduce(&mut self, action: i32) {
//!         self.0 += action;
//!     }
//! }
//!
//! let store = Store::new(Total::default());
//! let seen = std::rc::Rc::new(std::cell::Cell::new(0));
//! let subscription = store.subscribe({
//!     let seen = seen.clone();
//!     move |total: &Total| seen.set(total.0)
//! });
//!
//! store.apply(3);
//! assert_eq!(seen.get(), 3);
//!
//! drop(subscription);
//! store.apply(4);
//! assert_eq!(seen.get(), 3);
//! assert_eq!(store.get().0, 7);
//! ```
use std::{
    cell::RefCell,
    collections::VecDeque,
    rc::{Rc, Weak},
};

/// State that changes in response to actions.
pub trait Reducer {
    type Action: std::fmt::Debug;

    /// Apply the action to the state, in place.
    fn reduce(&mut self, action: Self::Action);
}

type Listener<S> = Rc<RefCell<dyn FnMut(&S)>>;

struct Inner<S: Reducer> {
    state: S,
    next_id: usize,
    listeners: Vec<(usize, Listener<S>)>,
    dispatching: bool,
    pending: VecDeque<S::Action>,
}

impl<S: Reducer> Inner<S> {
    fn is_subscribed(&self, id: usize) -> bool {
        self.listeners.iter().any(|(k, _)| *k == id)
    }
}

/// Owns a state value and notifies subscribers of every change.
///
/// Clones share the same state and subscribers.
///
/// A `Store` is single-threaded. All actions and notifications happen on the
/// thread that owns it.
pub struct Store<S: Reducer> {
    inner: Rc<RefCell<Inner<S>>>,
}

impl<S: Reducer> Clone for Store<S> {
    fn clone(&self) -> Self {
        Store {
            inner: self.inner.clone(),
        }
    }
}

impl<S: Reducer + std::fmt::Debug> std::fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct(&format!("Store<{}>", std::any::type_name::<S>()))
            .field("state", &inner.state)
            .field("subscribers", &inner.listeners.len())
            .field("pending", &inner.pending.len())
            .finish()
    }
}

impl<S: Reducer + Clone + std::fmt::Debug + Default + 'static> Default for Store<S> {
    fn default() -> Self {
        Store::new(S::default())
    }
}

impl<S: Reducer + Clone + std::fmt::Debug + 'static> Store<S> {
    /// Create a new store holding `state`.
    pub fn new(state: S) -> Self {
        Store {
            inner: Rc::new(RefCell::new(Inner {
                state,
                next_id: 0,
                listeners: vec![],
                dispatching: false,
                pending: VecDeque::new(),
            })),
        }
    }

    /// A snapshot of the current state.
    pub fn get(&self) -> S {
        self.inner.borrow().state.clone()
    }

    /// The number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Reduce `action` into the state and notify all subscribers.
    ///
    /// Subscribers are called in the order they subscribed, each with the same
    /// snapshot, before this function returns.
    ///
    /// Actions applied by a subscriber while a notification is running are
    /// queued. They are reduced and notified in order once the current round
    /// is over, so every subscriber sees the states in the order they were
    /// produced and ends on the current one. A queued `apply` returns the
    /// state as it was when the action was queued.
    ///
    /// Returns the new state.
    pub fn apply(&self, action: S::Action) -> S {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.dispatching {
                log::trace!("queueing {action:?} behind the running notification");
                inner.pending.push_back(action);
                return inner.state.clone();
            }
            inner.dispatching = true;
            inner.pending.push_back(action);
        }
        let _dispatch = Dispatch(&self.inner);

        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                match inner.pending.pop_front() {
                    Some(action) => {
                        log::trace!("applying {action:?} to {:?}", inner.state);
                        inner.state.reduce(action);
                        let listeners = inner
                            .listeners
                            .iter()
                            .map(|(id, listener)| (*id, listener.clone()))
                            .collect::<Vec<_>>();
                        Some((inner.state.clone(), listeners))
                    }
                    None => None,
                }
            };
            let Some((snapshot, listeners)) = next else {
                break;
            };
            log::trace!(
                "new state {snapshot:?}, notifying {} subscribers",
                listeners.len()
            );

            for (id, listener) in listeners {
                // An earlier subscriber may have unsubscribed this one.
                if !self.inner.borrow().is_subscribed(id) {
                    continue;
                }
                (&mut *listener.borrow_mut())(&snapshot);
            }
        }

        self.get()
    }

    /// Register `f` to be called with every new state.
    ///
    /// `f` is not called with the current state, only with states produced by
    /// later calls to [`Store::apply`].
    pub fn subscribe(&self, f: impl FnMut(&S) + 'static) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            let listener: Listener<S> = Rc::new(RefCell::new(f));
            inner.listeners.push((id, listener));
            id
        };
        log::trace!("subscriber {id} added");

        let weak: Weak<RefCell<Inner<S>>> = Rc::downgrade(&self.inner);
        Subscription {
            id,
            remove: Some(Box::new(move |id| {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().listeners.retain(|(k, _)| *k != id);
                    log::trace!("subscriber {id} removed");
                }
            })),
        }
    }
}

/// Ends a dispatch round, even if a subscriber panics.
struct Dispatch<'a, S: Reducer>(&'a RefCell<Inner<S>>);

impl<S: Reducer> Drop for Dispatch<'_, S> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.0.try_borrow_mut() {
            inner.dispatching = false;
            inner.pending.clear();
        }
    }
}

/// A live registration with a [`Store`].
///
/// Dropping the subscription unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: usize,
    remove: Option<Box<dyn FnOnce(usize)>>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove(self.id);
        }
    }
}

impl Subscription {
    /// Stop receiving updates.
    ///
    /// Same as dropping the subscription. Does nothing if the store is gone.
    pub fn unsubscribe(self) {
        drop(self)
    }
}

#[cfg(test)]
mod test {
    use std::cell::Cell;

    use super::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Total(i32);

    #[derive(Debug)]
    enum Change {
        Add(i32),
        Sub(i32),
    }

    impl Reducer for Total {
        type Action = Change;

        fn reduce(&mut self, action: Change) {
            match action {
                Change::Add(n) => self.0 += n,
                Change::Sub(n) => self.0 -= n,
            }
        }
    }

    fn recorder() -> (Rc<RefCell<Vec<String>>>, impl Fn(&'static str) -> Box<dyn FnMut(&Total)>) {
        let log: Rc<RefCell<Vec<String>>> = Default::default();
        let make = {
            let log = log.clone();
            move |name: &'static str| -> Box<dyn FnMut(&Total)> {
                let log = log.clone();
                Box::new(move |total: &Total| log.borrow_mut().push(format!("{name}:{}", total.0)))
            }
        };
        (log, make)
    }

    #[test]
    fn apply_returns_the_new_state() {
        let store = Store::new(Total(10));
        assert_eq!(store.apply(Change::Add(5)), Total(15));
        assert_eq!(store.apply(Change::Sub(20)), Total(-5));
        assert_eq!(store.get(), Total(-5));
    }

    #[test]
    fn subscribers_are_notified_in_order() {
        let store = Store::<Total>::default();
        let (log, make) = recorder();
        let _a = store.subscribe(make("a"));
        let _b = store.subscribe(make("b"));

        store.apply(Change::Add(1));
        store.apply(Change::Add(1));

        assert_eq!(
            log.borrow().as_slice(),
            &["a:1", "b:1", "a:2", "b:2"]
        );
    }

    #[test]
    fn subscribing_does_not_replay_the_current_state() {
        let store = Store::new(Total(3));
        let calls = Rc::new(Cell::new(0));
        let _sub = store.subscribe({
            let calls = calls.clone();
            move |_: &Total| calls.set(calls.get() + 1)
        });
        assert_eq!(calls.get(), 0);
        store.apply(Change::Add(0));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn dropped_subscriptions_are_not_notified() {
        let store = Store::<Total>::default();
        let (log, make) = recorder();
        let a = store.subscribe(make("a"));
        let b = store.subscribe(make("b"));
        assert_eq!(store.subscriber_count(), 2);

        drop(a);
        assert_eq!(store.subscriber_count(), 1);
        store.apply(Change::Add(1));

        b.unsubscribe();
        assert_eq!(store.subscriber_count(), 0);
        store.apply(Change::Add(1));

        assert_eq!(log.borrow().as_slice(), &["b:1"]);
        assert_eq!(store.get(), Total(2));
    }

    #[test]
    fn clones_share_state_and_subscribers() {
        let store = Store::<Total>::default();
        let other = store.clone();
        let (log, make) = recorder();
        let _sub = store.subscribe(make("a"));

        other.apply(Change::Sub(1));
        assert_eq!(store.get(), Total(-1));
        assert_eq!(log.borrow().as_slice(), &["a:-1"]);
    }

    #[test]
    fn unsubscribing_after_the_store_is_gone() {
        let store = Store::<Total>::default();
        let sub = store.subscribe(|_| {});
        drop(store);
        sub.unsubscribe();
    }

    #[test]
    fn subscriber_removed_mid_notification_is_skipped() {
        let store = Store::<Total>::default();
        let (log, make) = recorder();
        let victim: Rc<RefCell<Option<Subscription>>> = Default::default();
        let _killer = store.subscribe({
            let victim = victim.clone();
            move |_: &Total| {
                victim.borrow_mut().take();
            }
        });
        *victim.borrow_mut() = Some(store.subscribe(make("victim")));

        store.apply(Change::Add(1));
        assert!(log.borrow().is_empty());
        assert_eq!(store.subscriber_count(), 1);
    }

    #[test]
    fn nested_actions_are_applied_in_order() {
        let store = Store::<Total>::default();
        let (log, make) = recorder();
        let _echo = store.subscribe({
            let store = store.clone();
            let mut record = make("echo");
            move |total: &Total| {
                record(total);
                if total.0 == 1 {
                    // Queued until "after" has seen 1.
                    assert_eq!(store.apply(Change::Add(10)), Total(1));
                }
            }
        });
        let _after = store.subscribe(make("after"));

        assert_eq!(store.apply(Change::Add(1)), Total(11));

        assert_eq!(store.get(), Total(11));
        assert_eq!(
            log.borrow().as_slice(),
            &["echo:1", "after:1", "echo:11", "after:11"]
        );
    }

    #[test]
    fn chained_nested_actions_drain_before_returning() {
        let store = Store::<Total>::default();
        let (log, make) = recorder();
        let _countdown = store.subscribe({
            let store = store.clone();
            move |total: &Total| {
                if total.0 > 0 {
                    store.apply(Change::Sub(1));
                }
            }
        });
        let _last = store.subscribe(make("last"));

        assert_eq!(store.apply(Change::Add(3)), Total(0));
        assert_eq!(
            log.borrow().as_slice(),
            &["last:3", "last:2", "last:1", "last:0"]
        );
    }

    #[test]
    fn a_panicking_subscriber_does_not_wedge_the_store() {
        let store = Store::<Total>::default();
        let sub = store.subscribe(|total: &Total| {
            if total.0 == 1 {
                panic!("boom");
            }
        });
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            store.apply(Change::Add(1));
        }));
        assert!(result.is_err());
        drop(sub);

        let (log, make) = recorder();
        let _a = store.subscribe(make("a"));
        store.apply(Change::Add(1));
        assert_eq!(log.borrow().as_slice(), &["a:2"]);
    }
}
