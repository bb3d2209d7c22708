//! # Equation Queue
//!
//! The scrollback: a bounded, chronological run of equations, oldest first.
//! All edits go to the last line; a new line is opened when there is none or
//! the last one is completed.
//!
//! ```text
//! front                                   back
//! ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌─────────┐
//! │ 2+2=4    │ │ 4*2=8    │ │ 8-1=7    │ │ 7+      │ ◀── edits
//! └──────────┘ └──────────┘ └──────────┘ └─────────┘
//!  evicted first once len > size_limit
//! ```
//!
//! Each applied edit ends with eviction and then exactly one change
//! notification. Refused edits change nothing and notify nobody.

use std::collections::VecDeque;

use log::debug;

use crate::core::element::{Number, Operator};
use crate::core::equation::Equation;
use crate::core::error::CalcError;
use crate::core::notify::{ListenerId, Notifier};

pub const DEFAULT_SIZE_LIMIT: usize = 32;

#[derive(Debug)]
pub struct EquationQueue {
    equations: VecDeque<Equation>,
    size_limit: usize,
    notifier: Notifier,
}

impl Default for EquationQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EquationQueue {
    pub fn new() -> Self {
        Self::with_size_limit(DEFAULT_SIZE_LIMIT)
    }

    /// A limit of 0 is treated as 1: the line being edited is always kept.
    pub fn with_size_limit(size_limit: usize) -> Self {
        Self {
            equations: VecDeque::new(),
            size_limit: size_limit.max(1),
            notifier: Notifier::new(),
        }
    }

    pub fn size_limit(&self) -> usize {
        self.size_limit
    }

    pub fn len(&self) -> usize {
        self.equations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }

    pub fn equations(&self) -> impl Iterator<Item = &Equation> {
        self.equations.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Equation> {
        self.equations.get(index)
    }

    pub fn back(&self) -> Option<&Equation> {
        self.equations.back()
    }

    /// Subscribes to the queue-wide change notification.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut() + 'static,
    {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Subscribes to in-place edits of a single number.
    pub fn subscribe_element<F>(&mut self, line: usize, index: usize, listener: F) -> Option<ListenerId>
    where
        F: FnMut() + 'static,
    {
        self.equations
            .get_mut(line)?
            .subscribe_element(index, listener)
    }

    // ── Edits ───────────────────────────────────────────────────────────────

    pub fn append_digit(&mut self, digit: u8) -> bool {
        self.edit_last(false, |line| Ok(line.append_digit(digit)))
            .unwrap_or(false)
    }

    pub fn append_decimal(&mut self) -> bool {
        self.edit_last(false, |line| Ok(line.append_decimal()))
            .unwrap_or(false)
    }

    /// After a completed line, the operator opens a new line seeded with the
    /// previous result: `2+2=4` then `*` gives `4*`.
    pub fn append_operator(&mut self, op: Operator) -> Result<bool, CalcError> {
        self.edit_last(true, |line| line.append_operator(op))
    }

    /// Backspace within the current line only; never hops back into history.
    pub fn try_pop_last_character(&mut self) -> bool {
        let Some(line) = self.equations.back_mut() else {
            return false;
        };
        if line.is_completed() || line.is_empty() || !line.try_pop_character() {
            return false;
        }
        self.notifier.notify();
        true
    }

    /// Sign flip on the trailing number. A completed result is carried into
    /// a new line first.
    pub fn negate_last(&mut self) -> bool {
        self.edit_last(true, |line| Ok(line.last_number_mut().is_some_and(Number::negate)))
            .unwrap_or(false)
    }

    /// Divides the trailing number by 100. A completed result is carried into
    /// a new line first.
    pub fn percent_last(&mut self) -> bool {
        self.edit_last(true, |line| Ok(line.last_number_mut().is_some_and(Number::percent)))
            .unwrap_or(false)
    }

    /// Drops the whole history.
    pub fn clear_history(&mut self) -> bool {
        if self.equations.is_empty() {
            return false;
        }
        self.equations.clear();
        debug!("History cleared");
        self.notifier.notify();
        true
    }

    /// Abandons the line being typed. Completed lines are history and are
    /// left alone.
    pub fn clear_current(&mut self) -> bool {
        let Some(line) = self.equations.back_mut() else {
            return false;
        };
        if line.is_completed() || !line.clear() {
            return false;
        }
        self.notifier.notify();
        true
    }

    /// Opens an empty line under a completed one.
    pub fn start_new_line(&mut self) -> bool {
        if !self.equations.back().is_some_and(Equation::is_completed) {
            return false;
        }
        self.equations.push_back(Equation::new());
        self.commit();
        true
    }

    // ── Export ──────────────────────────────────────────────────────────────

    /// Every line's text; completed lines end with a newline.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for equation in &self.equations {
            text.push_str(&equation.text());
            if equation.is_completed() {
                text.push('\n');
            }
        }
        text
    }

    /// [`text`](Self::text) with trailing whitespace trimmed, as copied out.
    pub fn export(&self) -> String {
        self.text().trim_end().to_string()
    }

    // ── Internals ───────────────────────────────────────────────────────────

    /// Runs `edit` on the line being built, or on a fresh line that is only
    /// kept if the edit applies.
    fn edit_last<F>(&mut self, carry_result: bool, edit: F) -> Result<bool, CalcError>
    where
        F: FnOnce(&mut Equation) -> Result<bool, CalcError>,
    {
        let building = self.equations.back().is_some_and(|line| !line.is_completed());
        if building {
            let Some(line) = self.equations.back_mut() else {
                return Ok(false);
            };
            if !edit(line)? {
                return Ok(false);
            }
        } else {
            let mut line = self.fresh_line(carry_result);
            if !edit(&mut line)? {
                return Ok(false);
            }
            self.equations.push_back(line);
        }
        self.commit();
        Ok(true)
    }

    fn fresh_line(&self, carry_result: bool) -> Equation {
        match self.equations.back().and_then(Equation::result) {
            Some(result) if carry_result => Equation::seeded(result.detached()),
            _ => Equation::new(),
        }
    }

    fn commit(&mut self) {
        while self.equations.len() > self.size_limit {
            self.equations.pop_front();
            debug!("Evicted oldest equation (limit {})", self.size_limit);
        }
        self.notifier.notify();
    }
}
