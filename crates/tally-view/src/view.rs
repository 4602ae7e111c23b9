//! Traits for building cross-platform views.
use std::future::Future;

use crate::str::Str;

/// A text node.
pub trait ViewText {
    fn new(text: impl Into<Str>) -> Self;

    fn set_text(&self, text: impl Into<Str>);

    fn get_text(&self) -> Str;
}

/// An element that may contain child nodes.
pub trait ViewParent<V: View> {
    /// Create a new element with the given tag name.
    fn new(name: impl AsRef<str>) -> Self;

    fn append_node(&self, node: V::Node);

    fn remove_node(&self, node: &V::Node);

    fn append_child(&self, child: &impl ViewChild<V>) {
        self.append_node(child.as_node());
    }

    fn remove_child(&self, child: &impl ViewChild<V>) {
        self.remove_node(&child.as_node());
    }
}

/// Anything that can be appended to a [`ViewParent`].
pub trait ViewChild<V: View> {
    fn as_node(&self) -> V::Node;
}

/// Attributes and styles of an element.
pub trait ViewProperties {
    /// Add an attribute.
    fn set_property(&self, key: impl AsRef<str>, value: impl AsRef<str>);

    /// Add a style property.
    fn set_style(&self, key: impl AsRef<str>, value: impl AsRef<str>);
}

/// Occurrences of one named event on one target.
pub trait ViewEventListener {
    type Event;

    /// Resolves at the next occurrence of the event.
    fn next(&self) -> impl Future<Output = Self::Event>;
}

pub trait ViewEventTarget<V: View> {
    fn listen(&self, event_name: impl Into<Str>) -> V::EventListener;
}

/// A view platform.
pub trait View: Sized + 'static {
    type Element: ViewParent<Self>
        + ViewChild<Self>
        + ViewProperties
        + ViewEventTarget<Self>
        + Clone
        + 'static;
    type Text: ViewText + ViewChild<Self> + Clone + 'static;
    type Node: Clone + 'static;
    type EventListener: ViewEventListener + Clone + 'static;
}
