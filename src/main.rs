//! gameid-tui - A terminal viewer for GameID CSV lists
//!
//! Entry point. Uses the Component Architecture pattern from ratatui: events
//! become Actions, the App applies them, and the screen is redrawn.

mod action;
mod app;
mod component;
mod components;
mod config;
mod error;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::tui::Tui;
use anyhow::Result;
use crossterm::event::Event;
use std::time::Duration;
use tracing::{error, info};

fn main() -> Result<()> {
    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = logging::init();
    info!(version = env!("CARGO_PKG_VERSION"), "Starting gameid-tui");

    let config = Config::load();
    let tick_rate = Duration::from_millis(config.tick_rate_ms);

    let mut tui = Tui::new()?.with_tick_rate(tick_rate);
    tui.enter()?;

    let mut app = App::new(config);
    app.init()?;

    let result = run_app(&mut tui, &mut app);

    tui.exit()?;

    if let Err(err) = result {
        error!(error = %format!("{:#}", err), "Exiting after error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    info!("Exiting");
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            let area = frame.area();
            if let Err(e) = app.draw(frame, area) {
                error!(error = %e, "Draw failed");
            }
        })?;

        if let Some(event) = tui.next_event()? {
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Mouse(mouse) => app.handle_mouse_event(mouse)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // An action may produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        } else {
            // No event - tick so finished loads get committed
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}
