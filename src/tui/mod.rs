//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop only draws when something changed: an
//! input event arrived, or the queue announced a change through its
//! subscription. Between events it sleeps up to 250ms in `poll`.

mod component;
mod components;
mod event;
mod ui;

use std::cell::Cell;
use std::io::stdout;
use std::rc::Rc;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use log::{debug, info};

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::keys::action_for_char;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{HistoryState, MenuEvent, MenuState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const POLL_TIMEOUT: std::time::Duration = std::time::Duration::from_millis(250);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub history: HistoryState,
    /// Menu overlay (None = hidden)
    pub menu: Option<MenuState>,
    pub show_connections: bool,
    /// Transcript picked from the menu, printed once the terminal is restored
    pub staged_export: Option<String>,
}

impl TuiState {
    pub fn new(show_connections: bool) -> Self {
        Self {
            history: HistoryState::new(),
            menu: None,
            show_connections,
            staged_export: None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, Hide)?;
        info!("Terminal modes enabled (mouse, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show);
    }
}

/// Runs the interactive calculator until the user quits.
///
/// Returns the transcript to print after the terminal is restored: the one
/// copied from the menu, or the full history when `export_on_exit` is set.
pub fn run(config: ResolvedConfig) -> std::io::Result<Option<String>> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new(config.show_connections);

    let mut terminal = ratatui::init();
    let terminal_mode_guard = TerminalModeGuard::new();

    // The queue tells us when any line changed
    let dirty = Rc::new(Cell::new(true));
    let listener = {
        let dirty = Rc::clone(&dirty);
        app.queue.subscribe(move || dirty.set(true))
    };

    let result = event_loop(&mut terminal, &mut app, &mut tui, &dirty);

    app.queue.unsubscribe(listener);
    drop(terminal_mode_guard);
    ratatui::restore();
    result?;

    let export = match tui.staged_export.take() {
        Some(transcript) => Some(transcript),
        None if config.export_on_exit => Some(app.queue.export()),
        None => None,
    };
    Ok(export.filter(|transcript| !transcript.is_empty()))
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
    dirty: &Cell<bool>,
) -> std::io::Result<()> {
    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw || dirty.get() {
            terminal.draw(|f| ui::draw_ui(f, app, tui))?;
            needs_redraw = false;
            dirty.set(false);
        }

        let first_event = poll_event_timeout(POLL_TIMEOUT);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(app, tui, event) == Effect::Quit {
                info!("Quit requested");
                return Ok(());
            }
        }
    }
}

/// Routes one terminal event. Returns `Effect::Quit` when the loop should end.
fn handle_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    match event {
        // Resize just needs a redraw (already flagged by the caller)
        TuiEvent::Resize => return Effect::None,
        TuiEvent::ForceQuit => return update(app, Action::Quit),
        _ => {}
    }

    // While the menu is open it receives everything
    if let Some(menu) = tui.menu.as_mut() {
        if let Some(menu_event) = menu.handle_event(&event) {
            apply_menu_event(app, tui, menu_event);
        }
        return Effect::None;
    }

    let action = match event {
        TuiEvent::ToggleMenu => {
            tui.menu = Some(MenuState::new());
            return Effect::None;
        }
        TuiEvent::Escape | TuiEvent::InputChar('q') => Action::Quit,
        TuiEvent::InputChar(c) => match action_for_char(c) {
            Some(action) => action,
            None => {
                debug!("Ignoring key {:?}", c);
                return Effect::None;
            }
        },
        TuiEvent::Backspace => Action::Backspace,
        TuiEvent::Delete => Action::Clear,
        TuiEvent::Submit => Action::Submit,
        TuiEvent::CursorUp
        | TuiEvent::CursorDown
        | TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToBottom => {
            tui.history.handle_event(&event);
            return Effect::None;
        }
        TuiEvent::Resize | TuiEvent::ForceQuit => return Effect::None,
    };

    // Any edit brings the line being typed back into view
    if !matches!(action, Action::Quit) {
        tui.history.stick_to_bottom = true;
    }
    update(app, action)
}

fn apply_menu_event(app: &mut App, tui: &mut TuiState, event: MenuEvent) {
    match event {
        MenuEvent::CopyTranscript => {
            if let Effect::Export(transcript) = update(app, Action::Export)
                && !transcript.is_empty()
            {
                tui.staged_export = Some(transcript);
            }
        }
        MenuEvent::ToggleConnections => {
            tui.show_connections = !tui.show_connections;
            app.status_message = format!(
                "Connections {}",
                if tui.show_connections { "on" } else { "off" }
            );
            return;
        }
        MenuEvent::ClearHistory => {
            update(app, Action::ClearHistory);
        }
        MenuEvent::Dismiss => {}
    }
    tui.menu = None;
}
