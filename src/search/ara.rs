//! Anytime Repairing A*.
//!
//! Each pass is a weighted search that stops as soon as the incumbent is no
//! worse than anything left in open. States closed during a pass but reached
//! more cheaply are parked in incons instead of being reopened. Between passes
//! the weight drops by a fixed step, incons is merged back into open and the
//! next pass starts with empty closed and incons sets.

use tracing::info;

use super::engine::{BestFirst, Strategy};
use super::{SearchError, Solution};
use crate::config::{Problem, Step, Weight};
use crate::heuristic::Heuristic;
use crate::stats::PassSummary;

pub fn search(
    problem: &Problem,
    heuristic: Heuristic,
    weight: Weight,
    step: Step,
) -> Result<Solution, SearchError> {
    let mut engine = BestFirst::new(problem, heuristic, Strategy::ARA, weight);

    loop {
        engine.run_pass();
        let Some(incumbent) = engine.incumbent() else {
            return Err(engine.exhausted());
        };

        let cost = engine.cost_of(incumbent);
        let bound = suboptimality_bound(engine.weight(), cost, engine.min_f_open_and_incons());
        engine.record_pass(PassSummary {
            weight: engine.weight().get(),
            incumbent_cost: cost,
            bound,
        });
        info!(weight = %engine.weight(), cost, bound, "ARA* pass finished");

        if bound <= 1.0 {
            return Ok(engine.finish(incumbent, Some(bound)));
        }
        engine.lower_weight(engine.weight().decreased_by(step));
    }
}

/// `min(w, cost / min_f)`: how far the incumbent can be from optimal.
///
/// With open and incons both empty nothing can undercut the incumbent, so
/// the bound is exactly 1.
fn suboptimality_bound(weight: Weight, incumbent_cost: u32, min_f: Option<u32>) -> f64 {
    match min_f {
        None => 1.0,
        Some(min_f) => weight.get().min(f64::from(incumbent_cost) / f64::from(min_f)),
    }
}
