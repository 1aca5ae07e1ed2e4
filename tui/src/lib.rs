//! `playbill-tui` — terminal front end for the walkthrough player.
//!
//! Drives a [`playbill_player::Player`] from keyboard input and renders
//! its view models with ratatui: transcript and activity panes in
//! executive mode, the full table in sequence mode, a breadcrumb
//! header, and a glossary overlay. Scenarios are loaded up front (from
//! a content directory or over HTTP from the content server) so the
//! event loop itself never blocks on I/O.

pub mod app;
pub mod source;
pub mod terminal;
pub mod views;

use std::time::{Duration, Instant};

use crossterm::event::{self, Event};

use crate::app::App;
use crate::source::ScenarioSource;

/// Reveal-tick cadence; also bounds input latency.
const TICK_INTERVAL: Duration = Duration::from_millis(150);

/// Load scenarios from the source, then run the event loop until the
/// user quits.
pub fn run(source: ScenarioSource) -> anyhow::Result<()> {
    let loaded = source.load_all()?;
    let mut app = App::new(loaded);

    let mut terminal = terminal::init()?;
    let result = event_loop(&mut terminal, &mut app);
    terminal::restore()?;
    result
}

fn event_loop(
    terminal: &mut ratatui::Terminal<impl ratatui::backend::Backend>,
    app: &mut App,
) -> anyhow::Result<()> {
    let mut last_tick = Instant::now();
    while !app.should_quit() {
        terminal.draw(|frame| views::draw(frame, app))?;

        let timeout = TICK_INTERVAL.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        if last_tick.elapsed() >= TICK_INTERVAL {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
    Ok(())
}
