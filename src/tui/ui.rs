use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{History, Keypad, Menu, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let keypad_height = Keypad::required_height(frame.area().width);
    let layout = Layout::vertical([Length(1), Min(0), Length(keypad_height)]);
    let [title_area, history_area, keypad_area] = layout.areas(frame.area());

    TitleBar::new(
        app.status_message.clone(),
        app.error.clone(),
        app.queue.len(),
        app.queue.size_limit(),
        tui.show_connections,
    )
    .render(frame, title_area);

    History::new(&mut tui.history, &app.queue, tui.show_connections).render(frame, history_area);

    Keypad.render(frame, keypad_area);

    // Overlay last so it covers the history
    if let Some(menu) = tui.menu.as_mut() {
        let [_, overlay_area] = Layout::vertical([Length(1), Min(0)]).areas(frame.area());
        Menu::new(menu, tui.show_connections).render(frame, overlay_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::app_from_keys;
    use crate::tui::components::MenuState;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(80, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                draw_ui(f, app, tui);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_draw_ui() {
        let app = app_from_keys("12+30=");
        let mut tui = TuiState::new(true);
        let text = screen(&app, &mut tui);
        assert!(text.contains("Tally | Ready"));
        assert!(text.contains("12+30=42"));
        assert!(text.contains("quit"));
    }

    #[test]
    fn test_draw_ui_with_menu_open() {
        let app = app_from_keys("1+1=");
        let mut tui = TuiState::new(true);
        tui.menu = Some(MenuState::new());
        let text = screen(&app, &mut tui);
        assert!(text.contains("Copy transcript"));
        assert!(text.contains("Connections: on"));
    }
}
