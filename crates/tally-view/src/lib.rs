//! Views for tally.
//!
//! ## Impetus
//!
//! A UI element should be defined once and then rendered on different
//! platforms while behaving the same way on each of them.
//!
//! The counter is the running example: a label showing a number and two
//! buttons that change it. We want it live in the browser, and we also want it
//! rendered to a string after applying some number of artificial clicks, which
//! is how it gets tested.
//!
//! We accomplish this by splitting the element into a model, a store and a view
//! interface:
//!
//! ### Model
//! Some concrete data, like `struct CounterState { count: i64 }`. The type of
//! the model does not change from platform to platform. It implements
//! [`Reducer`](store::Reducer), which says how an action transitions it.
//!
//! ### Store
//! The [`Store`](store::Store) owns the model. Actions go in through
//! [`Store::apply`](store::Store::apply), and every subscriber is told about the
//! new state right away. Data only flows one way: views never mutate the model.
//!
//! ### View Interface
//! A trait for interacting with the view in a cross-platform way. The logic
//! reads events through it and writes text through it.
//!
//! ### View
//! The view itself is responsible for rendering and providing events to the
//! logic. Its type changes with the platform, see [`View`](view::View),
//! [`ssr::Ssr`] and `web::Web`.
pub mod error;
#[cfg(feature = "ssr")]
pub mod ssr;
pub mod store;
pub mod str;
pub mod sync;
pub mod view;
#[cfg(feature = "web")]
pub mod web;

pub mod prelude {
    //! Re-exports for convenience.
    pub use super::error::Error;
    pub use super::store::{Reducer, Store, Subscription};
    pub use super::str::Str;
    pub use super::sync::Shared;
    pub use super::view::*;
}
