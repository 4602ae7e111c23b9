//! Server-side rendering of the counter screen.
//!
//! ```text
//! tally-ssr + + + -
//! ```
use anyhow::Context;
use clap::Parser;
use tally::{Action, CounterConfig, ssr::render_taps};

/// Render the counter screen, tap its buttons and render it again.
#[derive(Debug, Parser)]
#[command(name = "tally-ssr")]
struct Cli {
    /// The starting count. Overrides the configuration.
    #[arg(long, allow_hyphen_values = true)]
    initial: Option<i64>,

    /// Configuration as JSON, eg '{"initial_count": 3}'.
    #[arg(long)]
    config: Option<String>,

    /// Log level. Overrides the configuration.
    #[arg(long)]
    log_level: Option<log::LevelFilter>,

    /// Buttons to tap, in order: '+' or '-'.
    #[arg(allow_hyphen_values = true)]
    taps: Vec<Action>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config.as_deref() {
        Some(json) => CounterConfig::from_json(json)?,
        None => CounterConfig::default(),
    };
    if let Some(initial) = cli.initial {
        config.initial_count = initial;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    simplelog::TermLogger::init(
        config.log_level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .context("could not start logging")?;
    log::info!("rendering with {config:?}");

    let rendered = render_taps(&config, &cli.taps);
    println!("init: {}", rendered.initial);
    println!();
    println!("final: {}", rendered.last);
    Ok(())
}
