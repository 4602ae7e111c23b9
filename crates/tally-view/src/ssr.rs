//! Server-side rendered views.
//!
//! [`Ssr`] is an in-memory view platform. Its nodes can be rendered to an HTML
//! string at any time, and its events are fired by hand, which makes it the
//! platform of choice for pre-rendering and for tests.
use std::future::Future;

use crate::{str::Str, sync::Shared, view::*};

pub mod prelude {
    pub use super::{Ssr, SsrElement, SsrEventListener, SsrNode, SsrText};
    pub use crate::prelude::*;
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[derive(Clone)]
pub struct SsrText {
    pub text: Shared<Str>,
}

impl PartialEq for SsrText {
    fn eq(&self, other: &Self) -> bool {
        self.text.ptr_eq(&other.text)
    }
}

impl ViewText for SsrText {
    fn new(text: impl Into<Str>) -> Self {
        SsrText {
            text: Shared::new(text.into()),
        }
    }

    fn set_text(&self, text: impl Into<Str>) {
        self.text.set(text.into());
    }

    fn get_text(&self) -> Str {
        self.text.get().clone()
    }
}

impl ViewChild<Ssr> for SsrText {
    fn as_node(&self) -> SsrNode {
        SsrNode::Text(self.clone())
    }
}

/// An element in the server-side tree.
#[derive(Clone)]
pub struct SsrElement {
    pub name: Str,
    pub attributes: Shared<Vec<(Str, Option<Str>)>>,
    pub styles: Shared<Vec<(Str, Str)>>,
    pub events: Shared<Vec<SsrEventListener>>,
    pub children: Shared<Vec<SsrNode>>,
}

impl PartialEq for SsrElement {
    fn eq(&self, other: &Self) -> bool {
        self.children.ptr_eq(&other.children)
    }
}

impl ViewParent<Ssr> for SsrElement {
    fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().to_owned().into(),
            attributes: Default::default(),
            styles: Default::default(),
            events: Default::default(),
            children: Default::default(),
        }
    }

    fn append_node(&self, node: SsrNode) {
        self.children.get_mut().push(node);
    }

    fn remove_node(&self, node: &SsrNode) {
        self.children.get_mut().retain(|child| child != node);
    }
}

impl ViewChild<Ssr> for SsrElement {
    fn as_node(&self) -> SsrNode {
        SsrNode::Element(self.clone())
    }
}

impl ViewProperties for SsrElement {
    fn set_property(&self, key: impl AsRef<str>, value: impl AsRef<str>) {
        let mut attributes = self.attributes.get_mut();
        let (k, v): (Str, Str) = (
            key.as_ref().to_owned().into(),
            value.as_ref().to_owned().into(),
        );
        for (k_prev, v_prev) in attributes.iter_mut() {
            if k_prev == &k {
                *v_prev = Some(v);
                return;
            }
        }
        attributes.push((k, Some(v)));
    }

    fn set_style(&self, key: impl AsRef<str>, value: impl AsRef<str>) {
        let mut styles = self.styles.get_mut();
        let key: Str = key.as_ref().to_owned().into();
        let value: Str = value.as_ref().to_owned().into();
        for (pkey, pval) in styles.iter_mut() {
            if pkey == &key {
                *pval = value;
                return;
            }
        }
        styles.push((key, value));
    }
}

impl ViewEventTarget<Ssr> for SsrElement {
    fn listen(&self, event_name: impl Into<Str>) -> SsrEventListener {
        let event_listener = SsrEventListener::new(event_name);
        self.events.get_mut().push(event_listener.clone());
        event_listener
    }
}

impl SsrElement {
    /// Returns the first listener registered on this element for `event_name`.
    pub fn listener(&self, event_name: impl AsRef<str>) -> Option<SsrEventListener> {
        self.events
            .get()
            .iter()
            .find(|listener| listener.name.as_str() == event_name.as_ref())
            .cloned()
    }

    pub fn html_string(&self) -> String {
        // Only "void" elements may be written as <tag /> when they have no
        // children. Writing any other element that way changes how the
        // document parses.
        // See https://html.spec.whatwg.org/multipage/syntax.html#void-elements
        fn tag_is_voidable(tag: &str) -> bool {
            matches!(
                tag,
                "area"
                    | "base"
                    | "br"
                    | "col"
                    | "embed"
                    | "hr"
                    | "img"
                    | "input"
                    | "link"
                    | "meta"
                    | "source"
                    | "track"
                    | "wbr"
            )
        }
        let name = &self.name;
        let styles = self.styles.get();
        let children = self.children.get();

        let mut attributes = self.attributes.get().clone();
        if !styles.is_empty() {
            let styles = styles
                .iter()
                .map(|(k, v)| format!("{}: {};", k, v))
                .collect::<Vec<_>>()
                .join(" ");

            let mut style_added = false;
            for (key, value) in attributes.iter_mut() {
                if key.as_str() == "style" {
                    if let Some(prev_style) = value.take() {
                        *value = Some(format!("{prev_style} {styles}").into());
                        style_added = true;
                        break;
                    }
                }
            }
            if !style_added {
                attributes.push(("style".into(), Some(styles.into())));
            }
        }

        let atts = attributes
            .iter()
            .map(|(key, may_val)| {
                if let Some(val) = may_val {
                    format!(r#"{}="{}""#, key, val)
                } else {
                    key.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");

        if children.is_empty() {
            if attributes.is_empty() {
                if tag_is_voidable(name) {
                    format!("<{} />", name)
                } else {
                    format!("<{}></{}>", name, name)
                }
            } else if tag_is_voidable(name) {
                format!("<{} {} />", name, atts)
            } else {
                format!("<{} {}></{}>", name, atts, name)
            }
        } else {
            let kids = children
                .iter()
                .map(|kid| match kid {
                    SsrNode::Element(element) => element.html_string(),
                    SsrNode::Text(text) => escape(text.text.get().as_str()),
                })
                .collect::<Vec<_>>()
                .join(" ");
            if attributes.is_empty() {
                format!("<{}>{}</{}>", name, kids, name)
            } else {
                format!("<{} {}>{}</{}>", name, atts, kids, name)
            }
        }
    }
}

#[derive(Clone, PartialEq)]
pub enum SsrNode {
    Element(SsrElement),
    Text(SsrText),
}

impl From<SsrText> for SsrNode {
    fn from(value: SsrText) -> Self {
        SsrNode::Text(value)
    }
}

impl From<SsrElement> for SsrNode {
    fn from(value: SsrElement) -> Self {
        SsrNode::Element(value)
    }
}

/// An event listener whose events are fired by hand.
///
/// Clones share one channel, so firing any clone wakes whichever clone is
/// awaiting [`ViewEventListener::next`].
#[derive(Clone)]
pub struct SsrEventListener {
    pub name: Str,
    channel: (async_channel::Sender<()>, async_channel::Receiver<()>),
}

impl ViewEventListener for SsrEventListener {
    type Event = ();

    fn next(&self) -> impl Future<Output = Self::Event> {
        let rx = self.channel.1.clone();
        async move {
            if rx.recv().await.is_err() {
                // The listener owns both ends, so the channel never closes.
                std::future::pending::<()>().await
            }
        }
    }
}

impl SsrEventListener {
    pub fn new(name: impl Into<Str>) -> Self {
        SsrEventListener {
            name: name.into(),
            channel: async_channel::bounded(1),
        }
    }

    /// Fire an event occurence to a waiting listener.
    ///
    /// Resolves once the occurrence has been received by a pending
    /// [`ViewEventListener::next`]. Something must be awaiting `next`
    /// concurrently (on the same executor or another thread), otherwise this
    /// never resolves.
    pub async fn fire(&self) {
        let tx = &self.channel.0;
        log::trace!("firing '{}'", self.name);
        if tx.send(()).await.is_err() {
            return;
        }
        while !tx.is_empty() {
            futures_lite::future::yield_now().await;
        }
    }
}

#[derive(Clone, Copy)]
pub struct Ssr;

impl View for Ssr {
    type Element = SsrElement;
    type Text = SsrText;
    type Node = SsrNode;
    type EventListener = SsrEventListener;
}
