//! Plain A*: expand in `f` order, stop at the first goal popped.

use super::engine::{BestFirst, PassEnd, Strategy};
use super::{SearchError, Solution};
use crate::config::{Problem, Weight};
use crate::heuristic::Heuristic;

/// Finds an optimal solution, given an admissible and consistent heuristic.
pub fn search(problem: &Problem, heuristic: Heuristic) -> Result<Solution, SearchError> {
    let mut engine = BestFirst::new(problem, heuristic, Strategy::A_STAR, Weight::ONE);
    match engine.run_pass() {
        PassEnd::Goal(goal) => Ok(engine.finish(goal, None)),
        PassEnd::Stopped | PassEnd::Exhausted => Err(engine.exhausted()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::testing::{all_distances, bfs_distance, board, scramble};

    #[test]
    fn test_single_move() {
        let problem = Problem::with_canonical_goal(board("1 2 3\n4 5 6\n7 0 8"));
        let solution = search(&problem, Heuristic::Manhattan).unwrap();
        assert_eq!(solution.cost, 1);
        assert_eq!(solution.path.len(), 2);
        assert_eq!(solution.path.last(), Some(problem.goal()));
    }

    #[test]
    fn test_optimal_on_every_2x2_state() {
        let goal = Board::canonical_goal(2).unwrap();
        for (start, distance) in all_distances(&goal) {
            let problem = Problem::new(start, goal.clone()).unwrap();
            for heuristic in [Heuristic::MisplacedTiles, Heuristic::Manhattan] {
                let solution = search(&problem, heuristic).unwrap();
                assert_eq!(solution.cost, distance, "{heuristic} on\n{}", problem.start());
            }
        }
    }

    #[test]
    fn test_optimal_on_3x3_scrambles() {
        let goal = Board::canonical_goal(3).unwrap();
        for seed in 0..6 {
            let start = scramble(&goal, 40, seed);
            let expected = bfs_distance(&start, &goal).unwrap();
            let problem = Problem::new(start, goal.clone()).unwrap();
            let solution = search(&problem, Heuristic::Manhattan).unwrap();
            assert_eq!(solution.cost, expected);
            assert_eq!(solution.stats.incumbents, vec![expected]);
        }
    }

    #[test]
    fn test_unsolvable_2x2_exhausts() {
        let problem = Problem::with_canonical_goal(board("2 1\n3 0"));
        let err = search(&problem, Heuristic::Manhattan).unwrap_err();
        // half of the 24 arrangements are reachable
        assert_eq!(err, SearchError::ExhaustedSearchSpace { expanded: 12 });
    }
}
