//! Browser DOM views through `web-sys`.
use std::future::Future;

use wasm_bindgen::{JsCast, UnwrapThrowExt};

use crate::{str::Str, view::*};

pub mod event;

pub use event::EventListener;

pub mod prelude {
    pub use super::{EventListener, Web};
    pub use crate::prelude::*;
}

#[derive(Clone, Copy)]
pub struct Web;

impl View for Web {
    type Element = web_sys::HtmlElement;
    type Text = web_sys::Text;
    type Node = web_sys::Node;
    type EventListener = EventListener;
}

impl ViewText for web_sys::Text {
    fn new(text: impl Into<Str>) -> Self {
        web_sys::Text::new_with_data(text.into().as_str()).unwrap_throw()
    }

    fn set_text(&self, text: impl Into<Str>) {
        self.set_data(text.into().as_str());
    }

    fn get_text(&self) -> Str {
        self.data().into()
    }
}

impl ViewChild<Web> for web_sys::Text {
    fn as_node(&self) -> web_sys::Node {
        let node: &web_sys::Node = self.as_ref();
        node.clone()
    }
}

impl ViewChild<Web> for web_sys::HtmlElement {
    fn as_node(&self) -> web_sys::Node {
        let node: &web_sys::Node = self.as_ref();
        node.clone()
    }
}

impl ViewParent<Web> for web_sys::HtmlElement {
    fn new(name: impl AsRef<str>) -> Self {
        document()
            .create_element(name.as_ref())
            .unwrap_throw()
            .dyn_into::<web_sys::HtmlElement>()
            .unwrap_throw()
    }

    fn append_node(&self, node: web_sys::Node) {
        if web_sys::Node::append_child(self, &node).is_err() {
            log::error!("could not append a child to <{}>", self.tag_name());
        }
    }

    fn remove_node(&self, node: &web_sys::Node) {
        let _ = web_sys::Node::remove_child(self, node);
    }
}

impl ViewProperties for web_sys::HtmlElement {
    fn set_property(&self, key: impl AsRef<str>, value: impl AsRef<str>) {
        let _ = self.set_attribute(key.as_ref(), value.as_ref());
    }

    fn set_style(&self, key: impl AsRef<str>, value: impl AsRef<str>) {
        let _ = self.style().set_property(key.as_ref(), value.as_ref());
    }
}

impl ViewEventTarget<Web> for web_sys::HtmlElement {
    fn listen(&self, event_name: impl Into<Str>) -> EventListener {
        EventListener::new(self, event_name)
    }
}

impl ViewEventListener for EventListener {
    type Event = web_sys::Event;

    fn next(&self) -> impl Future<Output = Self::Event> {
        EventListener::next(self)
    }
}

thread_local! {
    pub static WINDOW: web_sys::Window = web_sys::window().unwrap_throw();
    pub static DOCUMENT: web_sys::Document = WINDOW.with(|w| w.document().unwrap_throw());
}

/// Return the DOM [`web_sys::Window`].
/// #### Panics
/// Panics when the window cannot be returned.
pub fn window() -> web_sys::Window {
    WINDOW.with(|w| w.clone())
}

/// Return the document JsDom object [`web_sys::Document`]
/// #### Panics
/// Panics on non-wasm32 or when the document cannot be returned.
pub fn document() -> web_sys::Document {
    DOCUMENT.with(|d| d.clone())
}

/// Return the body Dom object.
///
/// ## Panics
/// Panics on wasm32 if the body cannot be returned.
pub fn body() -> web_sys::HtmlElement {
    DOCUMENT.with(|d| d.body().expect("document does not have a body"))
}
