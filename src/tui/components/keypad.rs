//! # Keypad Legend
//!
//! Bordered strip at the bottom listing the keys. Stateless.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::tui::component::Component;

const KEYS: &[(&str, &str)] = &[
    ("0-9 .", "number"),
    ("+ - * /", "operator"),
    ("= ⏎", "equals"),
    ("n", "±"),
    ("%", "percent"),
    ("⌫", "back"),
    ("c Del", "clear"),
    ("Tab", "menu"),
    ("q", "quit"),
];

pub struct Keypad;

impl Keypad {
    /// Rows needed at `width`, borders included.
    pub fn required_height(width: u16) -> u16 {
        let paragraph = Paragraph::new(legend()).wrap(Wrap { trim: true });
        paragraph.line_count(width.saturating_sub(2)) as u16 + 2
    }
}

impl Component for Keypad {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(legend())
            .block(Block::bordered().border_style(Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

fn legend() -> Line<'static> {
    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(Color::Gray);

    let mut spans = Vec::with_capacity(KEYS.len() * 3);
    for (i, (key, label)) in KEYS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(format!(" {label}"), label_style));
    }
    Line::from(spans)
}
