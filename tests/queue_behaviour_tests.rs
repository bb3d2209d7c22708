//! Calculator behaviour through the public library API.
//!
//! These drive `EquationQueue` and `update()` the way the TUI and the
//! headless `--keys` replay do, and check the transcript that comes out.

use std::cell::Cell;
use std::rc::Rc;

use tally::core::action::{Action, Effect, update};
use tally::core::element::{Number, Operator};
use tally::core::equation::Equation;
use tally::core::keys;
use tally::core::links::{Link, links};
use tally::core::queue::EquationQueue;
use tally::core::state::App;

fn app(keys_typed: &str) -> App {
    let mut app = App::new(32);
    keys::replay(&mut app, keys_typed);
    app
}

fn type_number(queue: &mut EquationQueue, text: &str) {
    for c in text.chars() {
        match c {
            '.' => assert!(queue.append_decimal()),
            _ => assert!(queue.append_digit(c as u8 - b'0')),
        }
    }
}

#[test]
fn digits_accumulate_into_one_number() {
    let mut queue = EquationQueue::new();
    type_number(&mut queue, "123");
    let line = queue.back().unwrap();
    assert_eq!(line.len(), 1);
    assert_eq!(line.elements()[0].as_number().unwrap().value(), 123.0);
}

#[test]
fn multiply_binds_tighter_than_add() {
    assert_eq!(app("2+3*4=").queue.export(), "2+3*4=14");
}

#[test]
fn equal_precedence_folds_left_to_right() {
    assert_eq!(app("10/4*2=").queue.export(), "10/4*2=5");
    assert_eq!(app("10-4-3=").queue.export(), "10-4-3=3");
}

#[test]
fn division_by_zero_is_infinity() {
    let app = app("5/0=");
    assert!(app.error.is_none());
    let result = app.queue.back().unwrap().result().unwrap();
    assert_eq!(result.value(), f64::INFINITY);
    assert_eq!(app.queue.export(), "5/0=inf");
}

#[test]
fn operator_after_result_carries_it() {
    let mut queue = EquationQueue::new();
    type_number(&mut queue, "2");
    queue.append_operator(Operator::Add).unwrap();
    type_number(&mut queue, "2");
    queue.append_operator(Operator::Equals).unwrap();
    queue.append_operator(Operator::Multiply).unwrap();
    type_number(&mut queue, "2");
    queue.append_operator(Operator::Equals).unwrap();

    assert_eq!(queue.len(), 2);
    let second = queue.get(1).unwrap();
    assert_eq!(second.elements()[0].as_number().unwrap().value(), 4.0);
    assert_eq!(queue.text(), "2+2=4\n4*2=8\n");
}

#[test]
fn editing_carried_value_leaves_history_alone() {
    let mut app = app("2+2=*");
    assert!(update(&mut app, Action::Backspace) == Effect::None);
    // Pops the operator, then the carried "4"
    update(&mut app, Action::Backspace);
    update(&mut app, Action::Digit(9));
    assert_eq!(app.queue.export(), "2+2=4\n9");
}

#[test]
fn backspace_rules() {
    // Completed line: nothing happens
    let mut done = app("1+1=");
    let before = done.queue.text();
    update(&mut done, Action::Backspace);
    assert_eq!(done.queue.text(), before);

    let mut queue = EquationQueue::new();
    type_number(&mut queue, "12");
    assert!(queue.try_pop_last_character());
    assert_eq!(queue.text(), "1");
    assert!(queue.try_pop_last_character());
    assert!(queue.back().unwrap().is_empty());
    assert!(!queue.try_pop_last_character());
}

#[test]
fn second_decimal_point_is_refused() {
    let mut queue = EquationQueue::new();
    type_number(&mut queue, "1");
    assert!(queue.append_decimal());
    assert!(!queue.append_decimal());
    assert_eq!(queue.text(), "1.");
}

#[test]
fn rejected_edits_do_not_notify() {
    let mut queue = EquationQueue::new();
    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);
    queue.subscribe(move || counter.set(counter.get() + 1));

    assert_eq!(queue.append_operator(Operator::Add), Ok(false));
    assert!(!queue.try_pop_last_character());
    assert_eq!(hits.get(), 0);

    type_number(&mut queue, "7");
    assert_eq!(hits.get(), 1);
    assert_eq!(queue.append_operator(Operator::Equals), Ok(false));
    assert_eq!(hits.get(), 1);
}

#[test]
fn eviction_drops_oldest_lines() {
    let mut app = App::new(2);
    keys::replay(&mut app, "1+1=2+2=3+3=");
    assert_eq!(app.queue.len(), 2);
    let transcript = app.queue.export();
    assert_eq!(transcript, "2+2=4\n3+3=6");
    assert!(!transcript.contains("1+1"));
}

#[test]
fn number_listener_sees_in_place_edits() {
    let mut queue = EquationQueue::new();
    type_number(&mut queue, "5");
    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);
    queue
        .subscribe_element(0, 0, move || counter.set(counter.get() + 1))
        .unwrap();

    assert!(queue.append_digit(0));
    assert!(queue.negate_last());
    assert!(queue.percent_last());
    assert_eq!(hits.get(), 3);
    assert_eq!(queue.text(), "-0.5");
}

#[test]
fn clear_is_context_sensitive() {
    // Line being typed: abandon it, keep history
    let mut typing = app("1+1=2+");
    update(&mut typing, Action::Clear);
    assert_eq!(typing.queue.export(), "1+1=2");

    // Completed line: open a fresh one
    let mut done = app("1+1=");
    update(&mut done, Action::Clear);
    assert_eq!(done.queue.len(), 2);
    assert!(done.queue.back().unwrap().is_empty());

    // Fresh empty line: wipe everything
    update(&mut done, Action::Clear);
    assert!(done.queue.is_empty());
}

#[test]
fn carried_result_is_linked() {
    let app = app("3*3=-1=");
    assert_eq!(links(&app.queue), vec![Link { line: 0, from: 4, to: 0 }]);
}

#[test]
fn seeded_equation_compares_by_value() {
    let seed = Number::parse("4.0").unwrap();
    let line = Equation::seeded(seed);
    assert_eq!(line.elements()[0].as_number(), Some(&Number::new(4.0)));
}
