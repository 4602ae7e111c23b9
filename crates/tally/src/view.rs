//! The counter's view layer.
use std::future::Future;

use tally_view::{prelude::*, ssr::Ssr};

use crate::state::{Action, CounterState};

/// What the counter logic needs from a view, on any platform.
pub trait CounterInterface {
    /// The text node showing the count.
    fn label(&self) -> &impl ViewText;

    /// Resolves when either control is activated.
    fn next_action(&self) -> impl Future<Output = Action>;
}

/// The counter's widgets: a label and the "+" and "-" buttons.
///
/// ```html
/// <div id="counter">
///   <span class="counter-label">0</span>
///   <button class="counter-increment">+</button>
///   <button class="counter-decrement">-</button>
/// </div>
/// ```
pub struct CounterView<V: View> {
    pub wrapper: V::Element,
    label: V::Text,
    pub increment: V::Element,
    pub decrement: V::Element,
    pub increment_click: V::EventListener,
    pub decrement_click: V::EventListener,
}

impl<V: View> Clone for CounterView<V> {
    fn clone(&self) -> Self {
        CounterView {
            wrapper: self.wrapper.clone(),
            label: self.label.clone(),
            increment: self.increment.clone(),
            decrement: self.decrement.clone(),
            increment_click: self.increment_click.clone(),
            decrement_click: self.decrement_click.clone(),
        }
    }
}

fn control<V: View>(action: Action) -> (V::Element, V::EventListener) {
    let button = V::Element::new("button");
    button.set_property("class", action.class_name());
    button.set_style("cursor", "pointer");
    let text = V::Text::new(action.symbol());
    button.append_child(&text);
    let click = button.listen("click");
    (button, click)
}

impl<V: View> CounterView<V> {
    /// Build the widgets showing `state`.
    pub fn new(state: &CounterState) -> Self {
        let wrapper = V::Element::new("div");
        wrapper.set_property("id", "counter");

        let label_wrapper = V::Element::new("span");
        label_wrapper.set_property("class", "counter-label");
        let label = V::Text::new(state.label());
        label_wrapper.append_child(&label);
        wrapper.append_child(&label_wrapper);

        let (increment, increment_click) = control::<V>(Action::Increment);
        wrapper.append_child(&increment);
        let (decrement, decrement_click) = control::<V>(Action::Decrement);
        wrapper.append_child(&decrement);

        CounterView {
            wrapper,
            label,
            increment,
            decrement,
            increment_click,
            decrement_click,
        }
    }

    /// Build the widgets by hydrating previously rendered markup.
    ///
    /// Counter views can only be built fresh with [`CounterView::new`], so
    /// this always fails with an unsupported error.
    pub fn from_markup(markup: &str) -> Result<Self, Error> {
        log::error!(
            "refusing to build a counter view from {} bytes of markup",
            markup.len()
        );
        Err(Error::unsupported("building a counter view from markup"))
    }

    /// The text currently shown by the label.
    pub fn label_text(&self) -> Str {
        self.label().get_text()
    }
}

impl<V: View> ViewChild<V> for CounterView<V> {
    fn as_node(&self) -> V::Node {
        self.wrapper.as_node()
    }
}

impl<V: View> CounterInterface for CounterView<V> {
    fn label(&self) -> &impl ViewText {
        &self.label
    }

    async fn next_action(&self) -> Action {
        futures_lite::future::or(
            async {
                self.increment_click.next().await;
                Action::Increment
            },
            async {
                self.decrement_click.next().await;
                Action::Decrement
            },
        )
        .await
    }
}

impl CounterView<Ssr> {
    pub fn html_string(&self) -> String {
        self.wrapper.html_string()
    }

    /// Click the control for `action`.
    ///
    /// See [`SsrEventListener::fire`](tally_view::ssr::SsrEventListener::fire).
    pub async fn tap(&self, action: Action) {
        match action {
            Action::Increment => self.increment_click.fire().await,
            Action::Decrement => self.decrement_click.fire().await,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn renders_the_label_and_controls() {
        let view = CounterView::<Ssr>::new(&CounterState::new(-4));
        assert_eq!(
            view.html_string(),
            concat!(
                r#"<div id="counter">"#,
                r#"<span class="counter-label">-4</span> "#,
                r#"<button class="counter-increment" style="cursor: pointer;">+</button> "#,
                r#"<button class="counter-decrement" style="cursor: pointer;">-</button>"#,
                "</div>"
            )
        );
        assert_eq!(view.label_text(), "-4");
    }

    #[test]
    fn controls_listen_for_clicks() {
        let view = CounterView::<Ssr>::new(&CounterState::default());
        assert!(view.increment.listener("click").is_some());
        assert!(view.decrement.listener("click").is_some());
    }

    #[test]
    fn next_action_matches_the_control() {
        let view = CounterView::<Ssr>::new(&CounterState::default());
        let actions = futures_lite::future::block_on(async {
            let mut actions = vec![];
            for tap in [Action::Decrement, Action::Increment] {
                let (action, ()) =
                    futures_lite::future::zip(view.next_action(), view.tap(tap)).await;
                actions.push(action);
            }
            actions
        });
        assert_eq!(actions, vec![Action::Decrement, Action::Increment]);
    }

    #[test]
    fn hydrating_from_markup_is_unsupported() {
        let markup = CounterView::<Ssr>::new(&CounterState::default()).html_string();
        let err = match CounterView::<Ssr>::from_markup(&markup) {
            Ok(_) => panic!("hydration must be refused"),
            Err(err) => err,
        };
        assert!(err.is_unsupported());
        assert_eq!(
            err.to_string(),
            "building a counter view from markup is not supported"
        );
    }
}
