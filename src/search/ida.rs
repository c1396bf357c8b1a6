//! Iterative-deepening A*.
//!
//! Repeated depth-first probes, each bounded by an `f` threshold. A probe that
//! fails reports the smallest `f` it pruned, which becomes the next threshold.
//! Memory stays linear in the solution depth; the stack is explicit so deep
//! probes cannot overflow the call stack.

use std::time::Instant;

use tracing::{debug, trace};

use super::{SearchError, Solution};
use crate::board::{Board, Direction};
use crate::config::Problem;
use crate::heuristic::{Evaluator, Heuristic};
use crate::stats::SearchStats;

/// One board on the current probe path and the moves not yet tried from it.
struct Frame {
    board: Board,
    g: u32,
    pending: Vec<(Direction, Board)>,
}

impl Frame {
    fn new(board: Board, g: u32, arrived_by: Option<Direction>) -> Self {
        let undo = arrived_by.map(Direction::inverse);
        let mut pending: Vec<_> = board
            .moves()
            .filter(|(direction, _)| Some(*direction) != undo)
            .collect();
        // popped from the back, so try moves in generation order
        pending.reverse();
        Self { board, g, pending }
    }
}

enum Probe {
    Found(Vec<Board>),
    /// Nothing within the threshold; carries the smallest pruned `f`.
    Deeper(u32),
    /// Nothing was pruned, so no threshold can ever succeed.
    Exhausted,
}

pub fn search(problem: &Problem, heuristic: Heuristic) -> Result<Solution, SearchError> {
    let started = Instant::now();
    let evaluator = Evaluator::new(heuristic, problem.goal().clone());
    let root = problem.start();
    let mut stats = SearchStats::default();
    let mut threshold = evaluator.estimate(root);

    loop {
        stats.thresholds.push(threshold);
        debug!(
            threshold,
            heuristic = %evaluator.heuristic(),
            expanded = stats.expanded,
            "IDA* iteration"
        );

        match probe(root, &evaluator, threshold, &mut stats) {
            Probe::Found(path) => {
                debug_assert_eq!(path.last(), Some(evaluator.goal()));
                let cost = (path.len() - 1) as u32;
                stats.incumbents.push(cost);
                stats.elapsed = started.elapsed();
                return Ok(Solution {
                    path,
                    cost,
                    bound: None,
                    stats,
                });
            }
            Probe::Deeper(next) => {
                debug_assert!(next > threshold);
                threshold = next;
            }
            Probe::Exhausted => {
                return Err(SearchError::ExhaustedSearchSpace {
                    expanded: stats.expanded,
                })
            }
        }
    }
}

/// Depth-first search of every path whose `f` stays within `threshold`.
fn probe(root: &Board, evaluator: &Evaluator, threshold: u32, stats: &mut SearchStats) -> Probe {
    if evaluator.is_goal(root) {
        return Probe::Found(vec![root.clone()]);
    }

    let mut next_threshold: Option<u32> = None;
    let mut stack = vec![Frame::new(root.clone(), 0, None)];
    stats.expanded += 1;
    stats.observe_stored(stack.len());

    while let Some(frame) = stack.last_mut() {
        let Some((direction, child)) = frame.pending.pop() else {
            stack.pop();
            continue;
        };
        let g = frame.g + 1;
        let f = g + evaluator.estimate(&child);

        if f > threshold {
            next_threshold = Some(next_threshold.map_or(f, |smallest| smallest.min(f)));
            continue;
        }
        if evaluator.is_goal(&child) {
            let mut path: Vec<Board> = stack.into_iter().map(|frame| frame.board).collect();
            path.push(child);
            return Probe::Found(path);
        }

        trace!(g, f, "descending");
        stack.push(Frame::new(child, g, Some(direction)));
        stats.expanded += 1;
        stats.observe_stored(stack.len());
    }

    next_threshold.map_or(Probe::Exhausted, Probe::Deeper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{bfs_distance, board, scramble};

    #[test]
    fn test_goal_start() {
        let problem = Problem::with_canonical_goal(board("1 2 3\n4 5 6\n7 8 0"));
        let solution = search(&problem, Heuristic::Manhattan).unwrap();
        assert_eq!(solution.cost, 0);
        assert_eq!(solution.path.len(), 1);
        assert_eq!(solution.stats.thresholds, vec![0]);
    }

    #[test]
    fn test_single_move_first_threshold_is_root_estimate() {
        let problem = Problem::with_canonical_goal(board("1 2 3\n4 5 6\n7 0 8"));
        let solution = search(&problem, Heuristic::MisplacedTiles).unwrap();
        assert_eq!(solution.cost, 1);
        assert_eq!(solution.stats.thresholds, vec![1]);
    }

    #[test]
    fn test_thresholds_rise_to_the_optimal_cost() {
        let goal = Board::canonical_goal(3).unwrap();
        let evaluator = Evaluator::new(Heuristic::Manhattan, goal.clone());
        for seed in 0..6 {
            let start = scramble(&goal, 40, seed);
            let expected = bfs_distance(&start, &goal).unwrap();
            let problem = Problem::new(start.clone(), goal.clone()).unwrap();
            let solution = search(&problem, Heuristic::Manhattan).unwrap();

            assert_eq!(solution.cost, expected);
            let thresholds = &solution.stats.thresholds;
            assert_eq!(thresholds[0], evaluator.estimate(&start));
            assert!(thresholds.windows(2).all(|pair| pair[0] < pair[1]));
            assert_eq!(thresholds.last(), Some(&expected));
            assert!(solution.stats.max_stored <= expected as usize);
        }
    }

    #[test]
    fn test_path_never_undoes_a_move() {
        let goal = Board::canonical_goal(3).unwrap();
        let problem = Problem::new(scramble(&goal, 30, 17), goal).unwrap();
        let path = search(&problem, Heuristic::Manhattan).unwrap().path;
        for window in path.windows(3) {
            assert_ne!(window[0], window[2]);
        }
    }
}
