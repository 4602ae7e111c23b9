//! Server-side rendering of the counter screen.
use futures_lite::future;
use tally_view::ssr::Ssr;

use crate::{
    config::CounterConfig,
    screen::CounterScreen,
    state::{Action, CounterState, CounterStore},
};

/// HTML of the counter screen before and after a series of taps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendered {
    pub initial: String,
    pub last: String,
    pub state: CounterState,
}

/// Render a visible counter screen, tap its controls in order, and render it
/// again.
///
/// Taps go through the buttons' click listeners, exactly as clicks would.
pub fn render_taps(config: &CounterConfig, taps: &[Action]) -> Rendered {
    let store = CounterStore::new(CounterState::new(config.initial_count));
    let mut screen = CounterScreen::<Ssr>::new(store);
    screen.appear();
    let initial = screen.view().html_string();

    future::block_on(future::or(screen.run(), async {
        for tap in taps {
            log::debug!("tapping '{}'", tap.symbol());
            screen.view().tap(*tap).await;
        }
    }));

    Rendered {
        initial,
        last: screen.view().html_string(),
        state: screen.store().get(),
    }
}
