//! A counter screen with one-way data flow.
//!
//! The screen shows a number and two buttons. Pressing "+" or "-" sends an
//! [`Action`] to the [`CounterStore`], the store updates its [`CounterState`]
//! and tells its subscribers, and the screen's subscription rewrites the label.
//! The view never changes the state itself.
//!
//! The same [`CounterScreen`] runs in the browser (with the `web` feature) and
//! server side, where [`ssr::render_taps`] renders it after a scripted series of
//! taps.
pub mod config;
pub mod screen;
pub mod ssr;
pub mod state;
pub mod view;
#[cfg(feature = "web")]
pub mod web;

pub use config::CounterConfig;
pub use screen::CounterScreen;
pub use state::{Action, CounterState, CounterStore, ParseActionError};
pub use view::{CounterInterface, CounterView};
