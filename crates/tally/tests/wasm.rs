//! The counter screen in a browser.
#![cfg(all(target_arch = "wasm32", feature = "web"))]

use tally::{Action, CounterInterface, CounterScreen, CounterStore};
use tally_view::{prelude::*, web::Web};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
async fn clicking_plus_updates_the_dom() {
    let parent = <web_sys::HtmlElement as ViewParent<Web>>::new("div");
    let mut screen = CounterScreen::<Web>::new(CounterStore::default());
    screen.mount(&parent);
    let label = parent
        .query_selector(".counter-label")
        .unwrap()
        .expect("label is missing");
    assert_eq!(label.text_content().as_deref(), Some("0"));

    let (action, ()) = futures_lite::future::zip(
        screen.view().next_action(),
        async { screen.view().increment.click() },
    )
    .await;
    screen.activate(action);
    assert_eq!(label.text_content().as_deref(), Some("1"));

    screen.unmount(&parent);
    screen.store().apply(Action::Increment);
    assert_eq!(label.text_content().as_deref(), Some("1"));
    assert!(parent.query_selector(".counter-label").unwrap().is_none());
}

#[wasm_bindgen_test]
async fn main_returns_a_handle_that_unmounts() {
    let parent = <web_sys::HtmlElement as ViewParent<Web>>::new("div");
    parent.set_id("counter-parent");
    tally_view::web::body().append_child(&parent);

    let handle = tally::web::main(
        Some("counter-parent".to_string()),
        Some(r#"{"initial_count": 4}"#.to_string()),
    )
    .unwrap();
    assert_eq!(handle.count(), 4);
    let label = parent
        .query_selector(".counter-label")
        .unwrap()
        .expect("label is missing");
    assert_eq!(label.text_content().as_deref(), Some("4"));

    handle.unmount();
    assert!(parent.query_selector(".counter-label").unwrap().is_none());
    tally_view::web::body().remove_child(&parent);
}
