//! # Menu Component
//!
//! Side panel overlay with the less frequent commands. Opened and closed
//! with Tab, dismissed with Esc.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `MenuState` lives in `TuiState` while the panel is open
//! - `Menu` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Menu entries, top to bottom.
const ENTRIES: [MenuEvent; 3] = [
    MenuEvent::CopyTranscript,
    MenuEvent::ToggleConnections,
    MenuEvent::ClearHistory,
];

const PANEL_WIDTH: u16 = 28;

/// Events emitted by the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    CopyTranscript,
    ToggleConnections,
    ClearHistory,
    Dismiss,
}

/// Persistent state for the menu overlay.
pub struct MenuState {
    pub selected: usize,
    pub list_state: ListState,
}

impl Default for MenuState {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            list_state: ListState::default().with_selected(Some(0)),
        }
    }
}

impl EventHandler for MenuState {
    type Event = MenuEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<MenuEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::ToggleMenu => Some(MenuEvent::Dismiss),
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::CursorDown => {
                self.selected = (self.selected + 1).min(ENTRIES.len() - 1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::Submit => ENTRIES.get(self.selected).copied(),
            _ => None,
        }
    }
}

/// Transient render wrapper for the menu overlay.
pub struct Menu<'a> {
    state: &'a mut MenuState,
    show_connections: bool,
}

impl<'a> Menu<'a> {
    pub fn new(state: &'a mut MenuState, show_connections: bool) -> Self {
        Self {
            state,
            show_connections,
        }
    }

    fn label(&self, entry: MenuEvent) -> String {
        match entry {
            MenuEvent::CopyTranscript => "Copy transcript".to_string(),
            MenuEvent::ToggleConnections => format!(
                "Connections: {}",
                if self.show_connections { "on" } else { "off" }
            ),
            MenuEvent::ClearHistory => "Clear history".to_string(),
            MenuEvent::Dismiss => "Close".to_string(),
        }
    }
}

impl Component for Menu<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [panel, _] =
            Layout::horizontal([Constraint::Length(PANEL_WIDTH), Constraint::Min(0)]).areas(area);

        frame.render_widget(Clear, panel);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Menu ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Select  Esc Back ").centered())
            .padding(Padding::horizontal(1));

        let items: Vec<ListItem> = ENTRIES
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::styled(self.label(*entry), style))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, panel, &mut self.state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_navigation_clamps() {
        let mut state = MenuState::new();
        assert_eq!(state.handle_event(&TuiEvent::CursorUp), None);
        assert_eq!(state.selected, 0);
        for _ in 0..5 {
            state.handle_event(&TuiEvent::CursorDown);
        }
        assert_eq!(state.selected, ENTRIES.len() - 1);
        assert_eq!(state.list_state.selected(), Some(ENTRIES.len() - 1));
    }

    #[test]
    fn test_submit_emits_selected_entry() {
        let mut state = MenuState::new();
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(MenuEvent::CopyTranscript)
        );
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(MenuEvent::ToggleConnections)
        );
    }

    #[test]
    fn test_escape_and_tab_dismiss() {
        let mut state = MenuState::new();
        assert_eq!(state.handle_event(&TuiEvent::Escape), Some(MenuEvent::Dismiss));
        assert_eq!(state.handle_event(&TuiEvent::ToggleMenu), Some(MenuEvent::Dismiss));
        assert_eq!(state.handle_event(&TuiEvent::InputChar('7')), None);
    }

    #[test]
    fn test_render_shows_connection_setting() {
        let backend = TestBackend::new(40, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = MenuState::new();
        terminal
            .draw(|f| {
                Menu::new(&mut state, false).render(f, f.area());
            })
            .unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Connections: off"));
        assert!(text.contains("Copy transcript"));
    }
}
