//! # History Component
//!
//! Scrollable view of the equation queue, one line per equation, right
//! aligned like a desk calculator's paper roll.
//!
//! ## Architecture
//!
//! `History` is a transient component (created each frame) that wraps
//! `&'a mut HistoryState` (persistent scroll state) and the queue (props).
//!
//! ## Linked values
//!
//! With connections enabled, numbers that carry the same value across two
//! consecutive lines share a colour and are underlined. Pairs come from
//! `core::links`; the colour comes from the value, so a result and every
//! reappearance of it below match.

use std::collections::HashMap;

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::element::{Element, Operator, value_key};
use crate::core::links::links;
use crate::core::queue::EquationQueue;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const LINK_PALETTE: [Color; 6] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::LightGreen,
    Color::LightBlue,
    Color::LightRed,
];

/// Scroll state for the history view.
/// Must be persisted in the parent TuiState.
pub struct HistoryState {
    pub scroll_state: ScrollViewState,
    /// When true, follow the line being typed
    pub stick_to_bottom: bool,
    /// Last known viewport height (for re-pinning between frames)
    pub viewport_height: u16,
    /// Last rendered number of lines
    pub content_height: u16,
}

impl Default for HistoryState {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true,
            viewport_height: 0,
            content_height: 0,
        }
    }

    /// Re-engage auto-scroll once the user scrolls back down to the end.
    fn repin_if_at_bottom(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

impl EventHandler for HistoryState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp | TuiEvent::CursorUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown | TuiEvent::CursorDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
            }
            _ => {}
        }
        None
    }
}

/// Transient render wrapper for the history view.
pub struct History<'a> {
    state: &'a mut HistoryState,
    queue: &'a EquationQueue,
    show_connections: bool,
}

impl<'a> History<'a> {
    pub fn new(state: &'a mut HistoryState, queue: &'a EquationQueue, show_connections: bool) -> Self {
        Self {
            state,
            queue,
            show_connections,
        }
    }

    fn link_colors(&self) -> HashMap<(usize, usize), Color> {
        let mut colors = HashMap::new();
        if !self.show_connections {
            return colors;
        }
        for link in links(self.queue) {
            let value = self
                .queue
                .get(link.line)
                .and_then(|line| line.elements().get(link.from))
                .and_then(Element::as_number)
                .map(|number| number.value());
            let Some(value) = value else {
                continue;
            };
            let color = LINK_PALETTE[(value_key(value) % LINK_PALETTE.len() as u64) as usize];
            colors.insert((link.line, link.from), color);
            colors.insert((link.line + 1, link.to), color);
        }
        colors
    }

    fn build_lines(&self) -> Vec<Line<'static>> {
        let colors = self.link_colors();
        let last = self.queue.len().saturating_sub(1);

        let mut lines: Vec<Line<'static>> = self
            .queue
            .equations()
            .enumerate()
            .map(|(row, equation)| {
                let base = if row == last {
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let spans: Vec<Span<'static>> = equation
                    .elements()
                    .iter()
                    .enumerate()
                    .map(|(column, element)| {
                        let style = match colors.get(&(row, column)) {
                            Some(color) => base.fg(*color).add_modifier(Modifier::UNDERLINED),
                            None => base,
                        };
                        Span::styled(display_text(element), style)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        if lines.last().is_none_or(|line| line.spans.is_empty()) {
            // Empty current line: show the idle zero
            lines.pop();
            lines.push(Line::from(Span::styled(
                "0",
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines
    }
}

impl Component for History<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = self.build_lines();
        let content_width = area.width.saturating_sub(1);
        let widest = lines
            .iter()
            .map(|line| line.width() as u16)
            .max()
            .unwrap_or(0);
        let canvas_width = content_width.max(widest);
        let canvas_height = (lines.len() as u16).max(area.height);

        self.state.viewport_height = area.height;
        self.state.content_height = lines.len() as u16;

        let mut scroll_view = ScrollView::new(Size::new(canvas_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        // Bottom-align short histories like a paper roll
        let top = canvas_height - lines.len() as u16;
        for (row, line) in lines.into_iter().enumerate() {
            let rect = Rect::new(0, top + row as u16, canvas_width, 1);
            scroll_view.render_widget(Paragraph::new(line).alignment(Alignment::Right), rect);
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.set_offset(Position {
                x: canvas_width.saturating_sub(content_width),
                y: canvas_height.saturating_sub(area.height),
            });
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// On-screen form of an element: glyphs for `*` and `/`, negative numbers
/// wrapped in parentheses so `3-(-2)` reads correctly.
pub fn display_text(element: &Element) -> String {
    match element {
        Element::Operator(Operator::Multiply) => "×".to_string(),
        Element::Operator(Operator::Divide) => "÷".to_string(),
        Element::Operator(op) => op.symbol().to_string(),
        Element::Number(number) => {
            let text = number.text();
            if text.len() > 1 && text.starts_with('-') {
                format!("({text})")
            } else {
                text.to_string()
            }
        }
    }
}
