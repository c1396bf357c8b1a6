//! Search algorithms over sliding-tile boards.
//!
//! A*, Anytime WA* and ARA* are the same best-first engine under different
//! [`Strategy`] values; IDA* is a separate depth-first loop. [`solve`] picks
//! the right one for a [`SearchConfig`].

pub mod anytime;
pub mod ara;
pub mod astar;
mod engine;
pub mod ida;

use tracing::{info, warn};

use crate::board::{Board, Direction};
use crate::config::{Algorithm, Problem, SearchConfig};
use crate::stats::SearchStats;

pub use engine::{ExpansionGuard, GoalTest, OrderKey, ReopenPolicy, Strategy, Termination};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("search space exhausted after {expanded} expansions without reaching the goal")]
    ExhaustedSearchSpace { expanded: usize },
}

/// A path from the start board to the goal, with what it took to find it.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    /// Boards from start to goal, both included.
    pub path: Vec<Board>,
    /// Number of moves, `path.len() - 1`.
    pub cost: u32,
    /// Final suboptimality bound, for ARA* only.
    pub bound: Option<f64>,
    pub stats: SearchStats,
}

impl Solution {
    pub fn moves(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// The blank's direction at every step.
    pub fn directions(&self) -> Vec<Direction> {
        self.path
            .windows(2)
            .filter_map(|pair| pair[0].direction_to(&pair[1]))
            .collect()
    }
}

/// Runs the configured algorithm on `problem`.
pub fn solve(problem: &Problem, config: &SearchConfig) -> Result<Solution, SearchError> {
    let kind = config.algorithm.kind();
    info!(
        algorithm = %kind,
        heuristic = %config.heuristic,
        weight = %config.algorithm.initial_weight(),
        dimension = problem.start().dimension(),
        "starting search"
    );

    let result = match config.algorithm {
        Algorithm::AStar => astar::search(problem, config.heuristic),
        Algorithm::AnytimeWeighted { weight } => {
            anytime::search(problem, config.heuristic, weight)
        }
        Algorithm::Ara { weight, step } => ara::search(problem, config.heuristic, weight, step),
        Algorithm::IdaStar => ida::search(problem, config.heuristic),
    };

    match &result {
        Ok(solution) => info!(
            algorithm = %kind,
            cost = solution.cost,
            expanded = solution.stats.expanded,
            elapsed_ms = solution.stats.elapsed.as_millis() as u64,
            "search finished"
        ),
        Err(err) => warn!(algorithm = %kind, %err, "search failed"),
    }
    result
}
