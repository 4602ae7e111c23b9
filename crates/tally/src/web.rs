//! Browser entry point.
use futures_lite::future;
use tally_view::web::{self, Web};
use wasm_bindgen::{JsCast, prelude::*};

use crate::{
    config::CounterConfig,
    screen::CounterScreen,
    state::{CounterState, CounterStore},
};

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// A counter mounted by [`main`].
///
/// Dropping the handle (or calling `free` from JS) stops the counter loop and
/// releases the label's subscription, but leaves the widgets on the page.
#[wasm_bindgen]
pub struct CounterHandle {
    screen: CounterScreen<Web>,
    parent: web_sys::HtmlElement,
    // Closing the channel ends the spawned loop.
    _stop: async_channel::Sender<()>,
}

#[wasm_bindgen]
impl CounterHandle {
    /// The count currently held by the store.
    pub fn count(&self) -> i64 {
        self.screen.store().get().count
    }

    /// Remove the counter from the page and stop it.
    pub fn unmount(mut self) {
        self.screen.unmount(&self.parent);
        log::info!("counter unmounted");
    }
}

/// Mount a counter screen and run it.
///
/// The screen is added to the element with id `parent_id`, or to the body.
/// `config` is an optional JSON [`CounterConfig`].
#[wasm_bindgen]
pub fn main(parent_id: Option<String>, config: Option<String>) -> Result<CounterHandle, JsValue> {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));

    let config = match config {
        Some(json) => CounterConfig::from_json(&json).map_err(js_error)?,
        None => CounterConfig::default(),
    };
    if let Some(level) = config.log_level.to_level() {
        // Another counter on the page may have installed the logger already.
        let _ = console_log::init_with_level(level);
    }

    let parent = match parent_id {
        Some(id) => web::document()
            .get_element_by_id(&id)
            .ok_or_else(|| js_error(format!("no element with id '{id}'")))?
            .dyn_into::<web_sys::HtmlElement>()
            .map_err(JsValue::from)?,
        None => web::body(),
    };

    let store = CounterStore::new(CounterState::new(config.initial_count));
    let mut screen = CounterScreen::<Web>::new(store);
    screen.mount(&parent);

    let (stop, stopped) = async_channel::bounded::<()>(1);
    let run = screen.run();
    wasm_bindgen_futures::spawn_local(async move {
        future::or(run, async {
            // Only ever closed, never sent to.
            let _ = stopped.recv().await;
        })
        .await;
        log::info!("counter loop stopped");
    });

    Ok(CounterHandle {
        screen,
        parent,
        _stop: stop,
    })
}
