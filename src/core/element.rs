//! # Elements
//!
//! The tokens an equation is built from: a [`Number`] that grows key by key,
//! or an immutable [`Operator`].
//!
//! Numbers are edited on their text form, not on the parsed `f64`, so that
//! what the user typed survives (a trailing `.` for instance). The text is
//! always something `f64::from_str` accepts; edits that would break that are
//! refused and leave the number as it was.

use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::str::FromStr;

use log::debug;

use crate::core::error::CalcError;
use crate::core::notify::{ListenerId, Notifier};

/// Significant digits kept when a value is turned back into text.
/// Results can still lose precision relative to the binary double.
pub const SIGNIFICANT_DIGITS: usize = 15;

// ── Operator ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// Terminator. Appending it triggers evaluation.
    Equals,
}

impl Operator {
    pub const BINARY: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Equals => "=",
        }
    }

    /// Accepts the ASCII symbols plus the `×` and `÷` glyphs.
    pub fn from_symbol(symbol: &str) -> Result<Self, CalcError> {
        match symbol {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "*" | "×" => Ok(Operator::Multiply),
            "/" | "÷" => Ok(Operator::Divide),
            "=" => Ok(Operator::Equals),
            other => Err(CalcError::UnknownOperator(other.to_string())),
        }
    }

    /// `*` and `/` are folded before `+` and `-`.
    pub fn is_high_precedence(self) -> bool {
        matches!(self, Operator::Multiply | Operator::Divide)
    }

    pub fn is_terminator(self) -> bool {
        self == Operator::Equals
    }

    /// IEEE semantics: dividing by zero yields an infinity or NaN, not an error.
    pub fn apply(self, left: f64, right: f64) -> Result<f64, CalcError> {
        match self {
            Operator::Add => Ok(left + right),
            Operator::Subtract => Ok(left - right),
            Operator::Multiply => Ok(left * right),
            Operator::Divide => Ok(left / right),
            Operator::Equals => Err(CalcError::MalformedEvaluation(
                "'=' is not a binary operator".to_string(),
            )),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::from_symbol(s)
    }
}

// ── Number ──────────────────────────────────────────────────────────────────

/// A numeric literal under construction.
///
/// Every applied edit fires the number's own change notification once.
/// Edits that change nothing or would leave unparsable text return `false`
/// and notify nobody.
#[derive(Debug)]
pub struct Number {
    text: String,
    notifier: Notifier,
}

impl Number {
    pub fn new(value: f64) -> Self {
        Self {
            text: format_value(value),
            notifier: Notifier::new(),
        }
    }

    /// Builds a number from already-valid text, e.g. `"0."`.
    pub fn parse(text: &str) -> Option<Self> {
        is_number_in_progress(text).then(|| Self {
            text: text.to_string(),
            notifier: Notifier::new(),
        })
    }

    /// Same text, no listeners. Used when a result is carried into a new line
    /// so that editing the new line never touches the history line.
    pub fn detached(&self) -> Self {
        Self {
            text: self.text.clone(),
            notifier: Notifier::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> f64 {
        self.text.parse().unwrap_or(f64::NAN)
    }

    pub fn set_value(&mut self, value: f64) -> bool {
        self.replace_text(format_value(value))
    }

    /// Replaces the text if it still parses as a number.
    pub fn try_set_text(&mut self, text: &str) -> bool {
        if !is_number_in_progress(text) {
            debug!("Rejected numeric edit: {:?} -> {:?}", self.text, text);
            return false;
        }
        self.replace_text(text.to_string())
    }

    /// Decimal-digit concatenation: appending 3 to "12" gives "123".
    pub fn append_digit(&mut self, digit: u8) -> bool {
        if digit > 9 {
            return false;
        }
        let candidate = format!("{}{}", self.text, digit);
        self.try_set_text(&candidate)
    }

    /// Refused when the number already has a decimal point.
    pub fn append_decimal(&mut self) -> bool {
        let candidate = format!("{}.", self.text);
        self.try_set_text(&candidate)
    }

    /// Sign flip on the text, so "0." stays "-0." rather than becoming "-0".
    pub fn negate(&mut self) -> bool {
        let flipped = match self.text.strip_prefix('-') {
            Some(rest) => rest.to_string(),
            None => format!("-{}", self.text),
        };
        self.try_set_text(&flipped)
    }

    pub fn percent(&mut self) -> bool {
        self.set_value(self.value() / 100.0)
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut() + 'static,
    {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.notifier.unsubscribe(id)
    }

    fn replace_text(&mut self, text: String) -> bool {
        if self.text == text {
            return false;
        }
        self.text = text;
        self.notifier.notify();
        true
    }
}

/// Numbers compare by value within `f64::EPSILON`, not by text: `"4"` and
/// `"4.0"` are the same result.
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.value(), other.value())
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// ── Element ─────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum Element {
    Number(Number),
    Operator(Operator),
}

impl Element {
    pub fn text(&self) -> &str {
        match self {
            Element::Number(number) => number.text(),
            Element::Operator(op) => op.symbol(),
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Element::Number(number) => Some(number),
            Element::Operator(_) => None,
        }
    }

    pub fn as_number_mut(&mut self) -> Option<&mut Number> {
        match self {
            Element::Number(number) => Some(number),
            Element::Operator(_) => None,
        }
    }

    pub fn as_operator(&self) -> Option<Operator> {
        match self {
            Element::Operator(op) => Some(*op),
            Element::Number(_) => None,
        }
    }

    /// Operators never change, so only numbers accept listeners.
    pub fn subscribe<F>(&mut self, listener: F) -> Option<ListenerId>
    where
        F: FnMut() + 'static,
    {
        self.as_number_mut().map(|number| number.subscribe(listener))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

/// True when `text` is a number the evaluator can read.
pub fn is_number_in_progress(text: &str) -> bool {
    !text.is_empty() && text.parse::<f64>().is_ok()
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() < f64::EPSILON
}

/// Stable key for a value; identical values share it. Views use it to pick
/// link colours.
pub fn value_key(value: f64) -> u64 {
    let normalized = if value == 0.0 { 0.0 } else { value };
    let mut hasher = DefaultHasher::new();
    normalized.to_bits().hash(&mut hasher);
    hasher.finish()
}

/// General (`%g`-style) formatting with [`SIGNIFICANT_DIGITS`] digits:
/// fixed notation for moderate exponents, scientific otherwise, trailing
/// zeros dropped.
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
