//! # Linked Results
//!
//! Which numbers on consecutive lines show the same value. The view draws
//! these as connectors; this module only decides the pairs.
//!
//! Numbers of the upper line are visited right to left, and for each one the
//! lower line is scanned right to left. A lower number takes at most one
//! incoming link; an upper number may feed several.

use crate::core::element::{Element, Number};
use crate::core::equation::Equation;
use crate::core::queue::EquationQueue;

/// `line` is the upper line's index; `from`/`to` are element indices in
/// lines `line` and `line + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub line: usize,
    pub from: usize,
    pub to: usize,
}

pub fn links_between(upper: &Equation, lower: &Equation) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    let mut taken = vec![false; lower.len()];

    for (from, upper_number) in numbers_right_to_left(upper.elements()) {
        for (to, lower_number) in numbers_right_to_left(lower.elements()) {
            if !taken[to] && upper_number == lower_number {
                taken[to] = true;
                pairs.push((from, to));
            }
        }
    }
    pairs
}

/// Links for every pair of consecutive lines in the queue.
pub fn links(queue: &EquationQueue) -> Vec<Link> {
    let lines: Vec<&Equation> = queue.equations().collect();
    lines
        .windows(2)
        .enumerate()
        .flat_map(|(line, pair)| {
            links_between(pair[0], pair[1])
                .into_iter()
                .map(move |(from, to)| Link { line, from, to })
        })
        .collect()
}

fn numbers_right_to_left(elements: &[Element]) -> impl Iterator<Item = (usize, &Number)> {
    elements
        .iter()
        .enumerate()
        .rev()
        .filter_map(|(index, element)| element.as_number().map(|number| (index, number)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::queue_from_keys;

    #[test]
    fn test_carried_result_links_to_seed() {
        let queue = queue_from_keys("2+2=*3=");
        // "2+2=4" / "4*3=12": result 4 (index 4) feeds the seed (index 0).
        assert_eq!(links(&queue), vec![Link { line: 0, from: 4, to: 0 }]);
    }

    #[test]
    fn test_lower_number_takes_one_link() {
        let queue = queue_from_keys("5*1=5");
        // Both 5s of line 0 match the lone 5 below; the rightmost wins.
        let upper = queue.get(0).unwrap();
        let lower = queue.get(1).unwrap();
        assert_eq!(links_between(upper, lower), vec![(4, 0)]);
    }

    #[test]
    fn test_upper_number_can_feed_several() {
        let queue = queue_from_keys("0+7=7*7");
        let pairs = links_between(queue.get(0).unwrap(), queue.get(1).unwrap());
        assert_eq!(pairs, vec![(4, 2), (4, 0)]);
    }

    #[test]
    fn test_values_compare_not_text() {
        let queue = queue_from_keys("1.5+2.5=4.0");
        let pairs = links_between(queue.get(0).unwrap(), queue.get(1).unwrap());
        assert_eq!(pairs, vec![(4, 0)]);
    }

    #[test]
    fn test_no_links_for_single_line() {
        let queue = queue_from_keys("1+2=");
        assert!(links(&queue).is_empty());
    }
}
