//! The counter model.
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tally_view::store::{Reducer, Store};

/// The state behind the counter screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CounterState {
    pub count: i64,
}

impl CounterState {
    pub fn new(count: i64) -> Self {
        CounterState { count }
    }

    /// The text shown by the counter's label.
    pub fn label(&self) -> String {
        self.count.to_string()
    }
}

/// A request to change the counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Increment,
    Decrement,
}

impl Action {
    /// The text on the control that sends this action.
    pub fn symbol(&self) -> &'static str {
        match self {
            Action::Increment => "+",
            Action::Decrement => "-",
        }
    }

    pub(crate) fn class_name(&self) -> &'static str {
        match self {
            Action::Increment => "counter-increment",
            Action::Decrement => "counter-decrement",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseActionError(String);

impl std::fmt::Display for ParseActionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' is not an action, expected '+' or '-'", self.0)
    }
}

impl std::error::Error for ParseActionError {}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" => Ok(Action::Increment),
            "-" => Ok(Action::Decrement),
            other => Err(ParseActionError(other.to_string())),
        }
    }
}

impl Reducer for CounterState {
    type Action = Action;

    // Both transitions are total: the count wraps at the ends of `i64`.
    fn reduce(&mut self, action: Action) {
        self.count = match action {
            Action::Increment => self.count.wrapping_add(1),
            Action::Decrement => self.count.wrapping_sub(1),
        };
    }
}

/// The state container for one counter screen.
pub type CounterStore = Store<CounterState>;
