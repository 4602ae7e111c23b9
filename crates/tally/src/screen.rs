//! The counter screen's lifecycle.
use std::future::Future;

use tally_view::prelude::*;

use crate::{
    state::{Action, CounterState, CounterStore},
    view::{CounterInterface, CounterView},
};

fn forward(store: &CounterStore, action: Action) -> CounterState {
    log::debug!("activated '{}'", action.symbol());
    store.apply(action)
}

/// A [`CounterView`] bound to a [`CounterStore`].
///
/// While the screen is visible it holds exactly one subscription to the store,
/// which keeps the label in step with the state. Hiding the screen releases
/// the subscription, so a hidden label never changes.
pub struct CounterScreen<V: View> {
    view: CounterView<V>,
    store: CounterStore,
    subscription: Option<Subscription>,
}

impl<V: View> CounterScreen<V> {
    /// Create a hidden screen for `store`.
    pub fn new(store: CounterStore) -> Self {
        let view = CounterView::new(&store.get());
        CounterScreen {
            view,
            store,
            subscription: None,
        }
    }

    pub fn view(&self) -> &CounterView<V> {
        &self.view
    }

    pub fn store(&self) -> &CounterStore {
        &self.store
    }

    pub fn is_visible(&self) -> bool {
        self.subscription.is_some()
    }

    /// Show the current state and start following the store.
    ///
    /// Does nothing if the screen is already visible.
    pub fn appear(&mut self) {
        if self.is_visible() {
            log::trace!("counter screen is already visible");
            return;
        }
        let view = self.view.clone();
        view.label().set_text(self.store.get().label());
        self.subscription = Some(self.store.subscribe(move |state: &CounterState| {
            view.label().set_text(state.label());
        }));
        log::info!("counter screen appeared");
    }

    /// Stop following the store.
    ///
    /// Does nothing if the screen is already hidden.
    pub fn disappear(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
            log::info!("counter screen disappeared");
        }
    }

    /// Forward one control activation to the store.
    pub fn activate(&self, action: Action) -> CounterState {
        forward(&self.store, action)
    }

    /// Forward every control activation to the store, forever.
    ///
    /// The returned loop owns its own handles to the view and the store, so it
    /// can be spawned while the caller keeps the screen to hide or unmount it.
    pub fn run(&self) -> impl Future<Output = ()> + 'static {
        let view = self.view.clone();
        let store = self.store.clone();
        async move {
            log::info!("running the counter loop");
            loop {
                let action = view.next_action().await;
                forward(&store, action);
            }
        }
    }

    /// Add the view to `parent` and show it.
    pub fn mount(&mut self, parent: &V::Element) {
        parent.append_child(&self.view);
        self.appear();
    }

    /// Hide the view and remove it from `parent`.
    pub fn unmount(&mut self, parent: &V::Element) {
        self.disappear();
        parent.remove_child(&self.view);
    }
}
