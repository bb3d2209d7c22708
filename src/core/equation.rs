//! # Equation
//!
//! One line of the calculator: an ordered run of elements edited key by key,
//! from the first digit through `= result`.
//!
//! ```text
//! Building ──append_operator(=) ok──▶ Completed (no further edits)
//! ```
//!
//! While building, the elements always read `Number (Operator Number)*`,
//! possibly followed by one dangling operator. A completed equation reads
//! `N0 op1 N1 ... opk Nk = R` with `k >= 1`.

use log::{debug, warn};

use crate::core::element::{Element, Number, Operator};
use crate::core::error::CalcError;
use crate::core::notify::ListenerId;

/// `N op N =` is the shortest sequence the evaluator accepts.
pub const MIN_ELEMENTS_TO_CALCULATE: usize = 4;

#[derive(Debug, Default)]
pub struct Equation {
    elements: Vec<Element>,
    completed: bool,
}

/// Evaluation stack slot.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Value(f64),
    Op(Operator),
}

impl Equation {
    pub fn new() -> Self {
        Self::default()
    }

    /// A line that starts from an existing number (a carried result).
    pub fn seeded(number: Number) -> Self {
        Self {
            elements: vec![Element::Number(number)],
            completed: false,
        }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// The final result, once completed.
    pub fn result(&self) -> Option<&Number> {
        if !self.completed {
            return None;
        }
        self.elements.last().and_then(Element::as_number)
    }

    /// The trailing number, if the line currently ends in one.
    pub fn last_number_mut(&mut self) -> Option<&mut Number> {
        self.elements.last_mut().and_then(Element::as_number_mut)
    }

    /// Listens for in-place edits of one element. `None` for operators and
    /// out-of-range indices.
    pub fn subscribe_element<F>(&mut self, index: usize, listener: F) -> Option<ListenerId>
    where
        F: FnMut() + 'static,
    {
        self.elements.get_mut(index)?.subscribe(listener)
    }

    pub fn append_digit(&mut self, digit: u8) -> bool {
        if self.completed || digit > 9 {
            return false;
        }
        match self.last_number_mut() {
            Some(number) => number.append_digit(digit),
            None => {
                self.elements
                    .push(Element::Number(Number::new(f64::from(digit))));
                true
            }
        }
    }

    /// A decimal point on an operator (or nothing) starts a new `"0."`.
    pub fn append_decimal(&mut self) -> bool {
        if self.completed {
            return false;
        }
        match self.last_number_mut() {
            Some(number) => number.append_decimal(),
            None => {
                let mut number = Number::new(0.0);
                number.append_decimal();
                self.elements.push(Element::Number(number));
                true
            }
        }
    }

    /// Pushes `op`. For `=` the line is evaluated and, on success, the result
    /// is appended and the equation is completed.
    ///
    /// `Ok(false)` means the operator was refused: empty line, completed line,
    /// two operators in a row, or `=` without a right-hand side. An `Err`
    /// leaves the equation exactly as it was.
    pub fn append_operator(&mut self, op: Operator) -> Result<bool, CalcError> {
        match self.elements.last() {
            None | Some(Element::Operator(_)) => return Ok(false),
            Some(Element::Number(_)) if self.completed => return Ok(false),
            Some(Element::Number(_)) => {}
        }
        if op.is_terminator() && self.elements.len() < MIN_ELEMENTS_TO_CALCULATE - 1 {
            return Ok(false);
        }

        self.elements.push(Element::Operator(op));
        if !op.is_terminator() {
            return Ok(true);
        }

        match self.calculate() {
            Ok(result) => {
                debug!("Evaluated {} -> {}", self.text(), result);
                self.elements.push(Element::Number(Number::new(result)));
                self.completed = true;
                Ok(true)
            }
            Err(e) => {
                self.elements.pop();
                warn!("Evaluation failed for {:?}: {}", self.text(), e);
                Err(e)
            }
        }
    }

    /// Backspace. Removes a trailing operator, or one character of the
    /// trailing number; a number left empty or unparsable is removed whole.
    /// A completed line is left untouched.
    pub fn try_pop_character(&mut self) -> bool {
        if self.completed {
            return false;
        }

        let Some(last) = self.elements.last_mut() else {
            return false;
        };
        match last {
            Element::Operator(_) => {
                self.elements.pop();
            }
            Element::Number(number) => {
                let mut text = number.text().to_string();
                text.pop();
                if text.is_empty() || !number.try_set_text(&text) {
                    self.elements.pop();
                }
            }
        }
        true
    }

    /// Drops every element and returns to the building state.
    pub fn clear(&mut self) -> bool {
        if self.elements.is_empty() && !self.completed {
            return false;
        }
        self.elements.clear();
        self.completed = false;
        true
    }

    /// Every element's text, concatenated.
    pub fn text(&self) -> String {
        self.elements.iter().map(Element::text).collect()
    }

    /// Folds the line with `*` and `/` ahead of `+` and `-`, equal precedence
    /// left to right.
    ///
    /// The line must already end in `=` (or `= R` once completed) and hold at
    /// least two operands.
    pub fn calculate(&self) -> Result<f64, CalcError> {
        if self.elements.len() < MIN_ELEMENTS_TO_CALCULATE {
            return Err(malformed("an equation needs two operands and '='"));
        }
        let end = if self.completed {
            self.elements.len() - 2
        } else {
            self.elements.len() - 1
        };
        if self.elements[end].as_operator() != Some(Operator::Equals) {
            return Err(malformed("the equation is not terminated by '='"));
        }
        let tokens = &self.elements[..end];

        // Pass 1: fold * and / eagerly, defer + and -.
        let mut stack: Vec<Slot> = Vec::with_capacity(tokens.len());
        let Some(first) = tokens[0].as_number() else {
            return Err(malformed("the equation must start with a number"));
        };
        stack.push(Slot::Value(first.value()));

        for element in &tokens[1..] {
            let number = match element {
                Element::Operator(op) => {
                    stack.push(Slot::Op(*op));
                    continue;
                }
                Element::Number(number) => number.value(),
            };
            match stack.last() {
                Some(Slot::Op(op)) if op.is_high_precedence() => {
                    let op = *op;
                    stack.pop();
                    let Some(Slot::Value(left)) = stack.pop() else {
                        return Err(malformed("operator without a left operand"));
                    };
                    stack.push(Slot::Value(op.apply(left, number)?));
                }
                _ => stack.push(Slot::Value(number)),
            }
        }

        // Pass 2: only + and - remain.
        let mut slots = stack.into_iter();
        let mut result = match slots.next() {
            Some(Slot::Value(value)) => value,
            _ => return Err(malformed("the equation must start with a number")),
        };
        while let Some(slot) = slots.next() {
            let Slot::Op(op) = slot else {
                return Err(malformed("two numbers without an operator between them"));
            };
            let Some(Slot::Value(right)) = slots.next() else {
                return Err(malformed("operator without a right operand"));
            };
            result = op.apply(result, right)?;
        }
        Ok(result)
    }
}

fn malformed(reason: &str) -> CalcError {
    CalcError::MalformedEvaluation(reason.to_string())
}
