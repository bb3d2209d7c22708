//! # Actions
//!
//! Everything the user can do to the calculator becomes an `Action`.
//! Key `7`? That's `Action::Digit(7)`. Enter? That's `Action::Submit`.
//!
//! The `update()` function applies an action to the `App` and returns an
//! `Effect` the adapter has to carry out (quitting, exporting). No I/O here.
//!
//! ```text
//! App + Action  →  update()  →  App' + Effect
//! ```

use log::{debug, warn};

use crate::core::element::Operator;
use crate::core::state::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Digit(u8),
    Decimal,
    /// Binary operators and `=`.
    Operator(Operator),
    Backspace,
    /// Context-sensitive clear, see [`update`].
    Clear,
    ClearHistory,
    /// Enter: `=` on a line being built, clear on a completed one.
    Submit,
    Negate,
    Percent,
    Export,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// The trimmed transcript, for the adapter to hand out.
    Export(String),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("Action: {:?}", action);

    let applied = match action {
        Action::Digit(digit) => app.queue.append_digit(digit),
        Action::Decimal => app.queue.append_decimal(),
        Action::Operator(op) => apply_operator(app, op),
        Action::Backspace => app.queue.try_pop_last_character(),
        Action::Clear => clear(app),
        Action::ClearHistory => app.queue.clear_history(),
        Action::Submit => {
            if app.queue.back().is_some_and(|line| line.is_completed()) {
                clear(app)
            } else {
                apply_operator(app, Operator::Equals)
            }
        }
        Action::Negate => app.queue.negate_last(),
        Action::Percent => app.queue.percent_last(),
        Action::Export => {
            let transcript = app.queue.export();
            app.status_message = if transcript.is_empty() {
                String::from("Nothing to copy")
            } else {
                String::from("Transcript copied")
            };
            return Effect::Export(transcript);
        }
        Action::Quit => return Effect::Quit,
    };

    if applied {
        app.error = None;
    }
    Effect::None
}

fn apply_operator(app: &mut App, op: Operator) -> bool {
    match app.queue.append_operator(op) {
        Ok(applied) => applied,
        Err(e) => {
            warn!("Operator {} rejected: {}", op, e);
            app.error = Some(e.to_string());
            false
        }
    }
}

/// Empty history: nothing. Empty current line: wipe the history.
/// Completed current line: open a fresh line. Otherwise: abandon the line.
fn clear(app: &mut App) -> bool {
    let Some((empty, completed)) = app
        .queue
        .back()
        .map(|line| (line.is_empty(), line.is_completed()))
    else {
        return false;
    };
    if empty {
        app.queue.clear_history()
    } else if completed {
        app.queue.start_new_line()
    } else {
        app.queue.clear_current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{app_from_keys, test_app};

    #[test]
    fn test_digits_and_equals() {
        let mut app = test_app();
        update(&mut app, Action::Digit(6));
        update(&mut app, Action::Operator(Operator::Divide));
        update(&mut app, Action::Digit(4));
        update(&mut app, Action::Submit);
        assert_eq!(app.queue.text(), "6/4=1.5\n");
    }

    #[test]
    fn test_submit_on_completed_opens_new_line() {
        let mut app = app_from_keys("1+1=");
        assert_eq!(update(&mut app, Action::Submit), Effect::None);
        assert_eq!(app.queue.len(), 2);
        assert!(app.queue.back().unwrap().is_empty());
    }

    #[test]
    fn test_clear_cycle() {
        let mut app = app_from_keys("1+1=3*");
        // Abandon "3*".
        update(&mut app, Action::Clear);
        assert_eq!(app.queue.text(), "1+1=2\n");
        // Current line is empty now: wipe everything.
        update(&mut app, Action::Clear);
        assert!(app.queue.is_empty());
        // Nothing left.
        update(&mut app, Action::Clear);
        assert!(app.queue.is_empty());
    }

    #[test]
    fn test_clear_on_completed_line() {
        let mut app = app_from_keys("9-1=");
        update(&mut app, Action::Clear);
        assert_eq!(app.queue.len(), 2);
        assert_eq!(app.queue.get(0).unwrap().text(), "9-1=8");
    }

    #[test]
    fn test_export_effect() {
        let mut app = app_from_keys("2*3=4");
        let effect = update(&mut app, Action::Export);
        assert_eq!(effect, Effect::Export("2*3=6\n4".to_string()));
        assert_eq!(app.status_message, "Transcript copied");

        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Export), Effect::Export(String::new()));
        assert_eq!(app.status_message, "Nothing to copy");
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }

    #[test]
    fn test_clear_history_action() {
        let mut app = app_from_keys("1+2=3+4=");
        update(&mut app, Action::ClearHistory);
        assert!(app.queue.is_empty());
    }
}
