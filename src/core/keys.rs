//! # Key Mapping
//!
//! Typed characters → core actions. Shared by the TUI and the headless
//! `--keys` replay so both behave identically.

use log::debug;

use crate::core::action::{Action, Effect, update};
use crate::core::element::Operator;
use crate::core::state::App;

pub fn action_for_char(c: char) -> Option<Action> {
    let action = match c {
        '0'..='9' => Action::Digit(c as u8 - b'0'),
        '.' | ',' => Action::Decimal,
        '+' => Action::Operator(Operator::Add),
        '-' => Action::Operator(Operator::Subtract),
        '*' | 'x' | '×' => Action::Operator(Operator::Multiply),
        '/' | '÷' => Action::Operator(Operator::Divide),
        '=' => Action::Operator(Operator::Equals),
        'n' => Action::Negate,
        '%' => Action::Percent,
        'c' => Action::Clear,
        _ => return None,
    };
    Some(action)
}

/// Feeds every mapped character of `keys` through [`update`].
/// Returns how many characters were mapped to an action.
pub fn replay(app: &mut App, keys: &str) -> usize {
    let mut mapped = 0;
    for c in keys.chars() {
        let Some(action) = action_for_char(c) else {
            if !c.is_whitespace() {
                debug!("Skipping unmapped key {:?}", c);
            }
            continue;
        };
        mapped += 1;
        if update(app, action) == Effect::Quit {
            break;
        }
    }
    mapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_char_mapping() {
        assert_eq!(action_for_char('7'), Some(Action::Digit(7)));
        assert_eq!(action_for_char(','), Some(Action::Decimal));
        assert_eq!(
            action_for_char('x'),
            Some(Action::Operator(Operator::Multiply))
        );
        assert_eq!(action_for_char('÷'), Some(Action::Operator(Operator::Divide)));
        assert_eq!(action_for_char('%'), Some(Action::Percent));
        assert_eq!(action_for_char('q'), None);
    }

    #[test]
    fn test_replay_skips_unknown_characters() {
        let mut app = test_app();
        let mapped = replay(&mut app, "2 + 3 * 4 = ?");
        assert_eq!(mapped, 6);
        assert_eq!(app.queue.export(), "2+3*4=14");
    }

    #[test]
    fn test_replay_negate_and_percent() {
        let mut app = test_app();
        replay(&mut app, "50%n+1=");
        assert_eq!(app.queue.export(), "-0.5+1=0.5");
    }
}
