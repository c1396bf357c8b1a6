//! Anytime Weighted A*.
//!
//! Runs a weighted search that reports a first solution quickly, then keeps
//! going with the same weight, pruning against the incumbent and reopening
//! states reached more cheaply, until open is empty. At that point the
//! incumbent is optimal.

use super::engine::{BestFirst, Strategy};
use super::{SearchError, Solution};
use crate::config::{Problem, Weight};
use crate::heuristic::Heuristic;

pub fn search(
    problem: &Problem,
    heuristic: Heuristic,
    weight: Weight,
) -> Result<Solution, SearchError> {
    let mut engine = BestFirst::new(problem, heuristic, Strategy::ANYTIME_WEIGHTED, weight);
    engine.run_pass();
    match engine.incumbent() {
        Some(incumbent) => Ok(engine.finish(incumbent, None)),
        None => Err(engine.exhausted()),
    }
}
