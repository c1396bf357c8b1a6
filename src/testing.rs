//! Shared helpers for unit tests: board literals, seeded scrambles and a
//! breadth-first oracle for true distances.

use std::collections::VecDeque;

use rand::{rngs::StdRng, Rng, SeedableRng};
use rustc_hash::FxHashMap;

use crate::board::Board;

/// Parses a board literal, panicking on malformed input.
pub(crate) fn board(text: &str) -> Board {
    text.parse()
        .unwrap_or_else(|e| panic!("bad board literal {text:?}: {e}"))
}

/// Random walk of `steps` moves from `start` that never undoes its last move.
///
/// Every board produced this way is reachable from `start`.
pub(crate) fn scramble(start: &Board, steps: usize, seed: u64) -> Board {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut current = start.clone();
    let mut last = None;

    for _ in 0..steps {
        let options: Vec<_> = current
            .moves()
            .filter(|(direction, _)| Some(direction.inverse()) != last)
            .collect();
        let (direction, next) = options[rng.gen_range(0..options.len())].clone();
        current = next;
        last = Some(direction);
    }

    current
}

/// Exact move count from `start` to `goal`, by breadth-first search.
pub(crate) fn bfs_distance(start: &Board, goal: &Board) -> Option<u32> {
    let mut depth: FxHashMap<Board, u32> = FxHashMap::default();
    let mut queue = VecDeque::new();
    depth.insert(start.clone(), 0);
    queue.push_back(start.clone());

    while let Some(current) = queue.pop_front() {
        let distance = depth[&current];
        if &current == goal {
            return Some(distance);
        }
        for (next, _) in current.neighbors() {
            if !depth.contains_key(&next) {
                depth.insert(next.clone(), distance + 1);
                queue.push_back(next);
            }
        }
    }

    None
}

/// Every board reachable from `start`, with its distance from `start`.
pub(crate) fn all_distances(start: &Board) -> FxHashMap<Board, u32> {
    let mut depth: FxHashMap<Board, u32> = FxHashMap::default();
    let mut queue = VecDeque::new();
    depth.insert(start.clone(), 0);
    queue.push_back(start.clone());

    while let Some(current) = queue.pop_front() {
        let distance = depth[&current];
        for (next, _) in current.neighbors() {
            if !depth.contains_key(&next) {
                depth.insert(next.clone(), distance + 1);
                queue.push_back(next);
            }
        }
    }

    depth
}
