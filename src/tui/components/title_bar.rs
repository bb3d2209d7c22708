//! # TitleBar Component
//!
//! Top status bar: app name and status on the left, history usage and the
//! connections indicator on the right.
//!
//! Stateless: every field is a prop copied from `App` or `TuiState` for the
//! frame being drawn.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

pub struct TitleBar {
    pub status_message: String,
    /// Last evaluation failure, shown instead of the status when present
    pub error: Option<String>,
    pub line_count: usize,
    pub history_limit: usize,
    pub show_connections: bool,
}

impl TitleBar {
    pub fn new(
        status_message: String,
        error: Option<String>,
        line_count: usize,
        history_limit: usize,
        show_connections: bool,
    ) -> Self {
        Self {
            status_message,
            error,
            line_count,
            history_limit,
            show_connections,
        }
    }

    fn right_text(&self) -> String {
        let links = if self.show_connections { "links on" } else { "links off" };
        format!("{}/{} | {}", self.line_count, self.history_limit, links)
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let left = match &self.error {
            Some(error) => Span::styled(format!("Tally | {error}"), Style::default().fg(Color::Red)),
            None if self.status_message.is_empty() => Span::raw("Tally"),
            None => Span::raw(format!("Tally | {}", self.status_message)),
        };
        let right = self.right_text();

        // Pad between the halves so the indicator sits flush right
        let used = left.content.width() + right.width();
        let gap = (area.width as usize).saturating_sub(used).max(1);

        let line = Line::from(vec![
            left,
            Span::raw(" ".repeat(gap)),
            Span::styled(right, Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(line, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(60, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
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
    fn test_title_bar_with_status_message() {
        let mut title_bar = TitleBar::new("Ready".to_string(), None, 3, 32, true);
        let text = rendered(&mut title_bar);
        assert!(text.starts_with("Tally | Ready"));
        assert!(text.trim_end().ends_with("3/32 | links on"));
    }

    #[test]
    fn test_title_bar_error_wins() {
        let mut title_bar = TitleBar::new(
            "Ready".to_string(),
            Some("cannot evaluate: boom".to_string()),
            0,
            32,
            false,
        );
        let text = rendered(&mut title_bar);
        assert!(text.contains("cannot evaluate: boom"));
        assert!(!text.contains("Ready"));
        assert!(text.contains("links off"));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let mut title_bar = TitleBar::new(String::new(), None, 0, 32, true);
        let text = rendered(&mut title_bar);
        assert!(text.starts_with("Tally "));
        assert!(!text.starts_with("Tally |"));
    }
}
