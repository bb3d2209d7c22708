//! # Calculation Errors
//!
//! Only failures that must reach the caller live here. A rejected numeric
//! edit (second decimal point, digit appended to `inf`, ...) is not an error:
//! the edit methods simply return `false` and leave the number untouched.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// The evaluator was asked to fold a sequence that is not
    /// `N0 op1 N1 ... opk Nk =` with `k >= 1`.
    MalformedEvaluation(String),
    /// A symbol outside `+ - * / =` was turned into an operator.
    UnknownOperator(String),
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::MalformedEvaluation(reason) => write!(f, "cannot evaluate: {reason}"),
            CalcError::UnknownOperator(symbol) => write!(f, "unknown operator '{symbol}'"),
        }
    }
}

impl std::error::Error for CalcError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = CalcError::MalformedEvaluation("too few elements".into());
        assert_eq!(err.to_string(), "cannot evaluate: too few elements");

        let err = CalcError::UnknownOperator("^".into());
        assert_eq!(err.to_string(), "unknown operator '^'");
    }
}
