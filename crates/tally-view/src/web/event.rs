//! Awaitable DOM event callbacks.
use std::{cell::RefCell, future::Future, ops::DerefMut, pin::Pin, rc::Rc, task::Waker};

use wasm_bindgen::{JsCast, JsValue, prelude::Closure};

use crate::str::Str;

type Callback = Rc<Closure<dyn FnMut(JsValue)>>;

#[derive(Clone, Default)]
struct FutureEventOccurrence {
    event: Rc<RefCell<Option<web_sys::Event>>>,
    wakers: Rc<RefCell<Vec<Waker>>>,
}

impl Future for FutureEventOccurrence {
    type Output = web_sys::Event;

    fn poll(
        self: Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Self::Output> {
        if let Some(event) = self.event.borrow().as_ref() {
            std::task::Poll::Ready(event.clone())
        } else {
            self.wakers.borrow_mut().push(cx.waker().clone());
            std::task::Poll::Pending
        }
    }
}

/// Listens for one named event on one DOM target.
///
/// The browser callback is removed when the last clone is dropped.
#[derive(Clone)]
pub struct EventListener {
    target: web_sys::EventTarget,
    event_name: Str,
    callback: Rc<RefCell<Option<Callback>>>,
    /// The occurrence that pending `.await` points are waiting on.
    events: Rc<RefCell<FutureEventOccurrence>>,
}

impl Drop for EventListener {
    fn drop(&mut self) {
        if Rc::strong_count(&self.callback) != 1 {
            return;
        }
        let Some(rc_callback) = self.callback.take() else {
            return;
        };
        if let Ok(callback) = Rc::try_unwrap(rc_callback) {
            if self
                .target
                .remove_event_listener_with_callback(
                    self.event_name.as_str(),
                    callback.as_ref().unchecked_ref(),
                )
                .is_err()
            {
                log::warn!("could not remove the '{}' listener", self.event_name);
            }
            log::trace!("dropped listener for '{}'", self.event_name);
        }
    }
}

impl EventListener {
    pub fn new(target: impl AsRef<web_sys::EventTarget>, event_name: impl Into<Str>) -> Self {
        let event_name = event_name.into();
        let events: Rc<RefCell<FutureEventOccurrence>> = Default::default();
        let callback = Closure::wrap({
            let events = events.clone();
            Box::new(move |val: JsValue| {
                // UNCHECKED: event callbacks are only ever called with an `Event`.
                let ev: web_sys::Event = val.unchecked_into();
                // Take the current occurrence, leaving a fresh one for the next
                // event, then fill it and wake everything awaiting it.
                let event = std::mem::take(events.borrow_mut().deref_mut());
                *event.event.borrow_mut() = Some(ev);
                let wakers = std::mem::take(event.wakers.borrow_mut().deref_mut());
                for waker in wakers.into_iter() {
                    waker.wake();
                }
            }) as Box<dyn FnMut(JsValue)>
        });

        let target = target.as_ref().clone();
        if target
            .add_event_listener_with_callback(
                event_name.as_str(),
                callback.as_ref().unchecked_ref(),
            )
            .is_err()
        {
            log::error!("could not add the '{event_name}' listener");
        }

        Self {
            target,
            event_name,
            callback: Rc::new(RefCell::new(Some(Rc::new(callback)))),
            events,
        }
    }

    pub fn next(&self) -> impl Future<Output = web_sys::Event> {
        self.events.borrow().clone()
    }
}
