//! Runtime: terminal lifecycle and the unified event loop.
//!
//! One `tokio::select!` loop multiplexes four sources:
//! - terminal input from Crossterm's async `EventStream`,
//! - controller messages (debounce firings and search responses),
//! - outward lookup events (selection and notifications),
//! - a ticker that drives the throbber and toast expiry.
//!
//! The ticker runs fast only while something animates and falls back to a
//! slow interval otherwise. Frames are drawn only when a handler reports a
//! visible change.

use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::StreamExt;
use lookup_types::LookupEvent;
use ratatui::{Terminal, prelude::*};
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, warn};

use crate::app::App;
use crate::ui::lookup_view;
use crate::ui::theme::{NordTheme, Theme};

const FAST_INTERVAL: Duration = Duration::from_millis(100);
const IDLE_INTERVAL: Duration = Duration::from_millis(5000);

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableFocusChange)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &App, theme: &dyn Theme) -> Result<()> {
    terminal.draw(|frame| lookup_view::draw(frame, frame.area(), app, theme))?;
    Ok(())
}

fn ticker_for(interval: Duration) -> time::Interval {
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// Entry point for the TUI runtime: sets up the terminal, runs the event loop
/// and restores the terminal on exit. Returns the last selected id.
pub async fn run_app(mut app: App, mut lookup_events: mpsc::UnboundedReceiver<LookupEvent>) -> Result<Option<String>> {
    let theme = NordTheme::default();
    let mut input = EventStream::new();
    let mut terminal = setup_terminal()?;

    app.controller.mount();
    app.controller.focus();

    let mut current_interval = IDLE_INTERVAL;
    let mut ticker = ticker_for(current_interval);

    let outcome = async {
        render(&mut terminal, &app, &theme)?;
        loop {
            let needs_animation = app.controller.state().is_loading() || app.toast().is_some();
            let target_interval = if needs_animation { FAST_INTERVAL } else { IDLE_INTERVAL };
            if target_interval != current_interval {
                current_interval = target_interval;
                ticker = ticker_for(current_interval);
            }

            let needs_render = tokio::select! {
                maybe_event = input.next() => match maybe_event {
                    Some(Ok(event)) => app.handle_terminal_event(event),
                    Some(Err(error)) => {
                        warn!("Failed to read terminal event: {}", error);
                        break;
                    }
                    None => break,
                },
                Some(msg) = app.controller.next_message() => {
                    app.controller.process_message(msg);
                    true
                }
                Some(event) = lookup_events.recv() => {
                    app.handle_lookup_event(event);
                    true
                }
                _ = ticker.tick() => app.tick(Instant::now()),
                _ = signal::ctrl_c() => break,
            };

            if app.should_exit() {
                break;
            }
            if needs_render {
                render(&mut terminal, &app, &theme)?;
            }
        }
        anyhow::Ok(())
    }
    .await;

    cleanup_terminal(&mut terminal)?;
    outcome?;

    let selected = app.last_selected().map(str::to_string);
    debug!(selected = ?selected, "lookup runtime exiting");
    Ok(selected)
}
