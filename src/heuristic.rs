//! Admissible estimates of the remaining move count towards a fixed goal.
//!
//! Both estimates ignore the blank, which makes them consistent: a single
//! move relocates exactly one tile by one cell, so neither value can change
//! by more than one between neighbouring boards.

use std::fmt;

use crate::board::{index_to_position, Board, Position, BLANK};

/// Which lower bound to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Heuristic {
    /// Count of tiles not on their goal cell.
    #[value(name = "misplaced")]
    MisplacedTiles,
    /// Sum over tiles of the grid distance to their goal cell.
    #[default]
    Manhattan,
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heuristic::MisplacedTiles => f.write_str("misplaced tiles"),
            Heuristic::Manhattan => f.write_str("manhattan distance"),
        }
    }
}

/// A heuristic bound to one goal board.
///
/// The goal never changes for the lifetime of the evaluator, so the goal
/// cell of every tile is looked up once up front.
#[derive(Clone, Debug)]
pub struct Evaluator {
    heuristic: Heuristic,
    goal: Board,
    /// Goal cell of each tile value.
    goal_positions: Box<[Position]>,
}

impl Evaluator {
    pub fn new(heuristic: Heuristic, goal: Board) -> Self {
        let goal_positions = goal.positions_by_value().into_boxed_slice();
        Self {
            heuristic,
            goal,
            goal_positions,
        }
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    pub fn goal(&self) -> &Board {
        &self.goal
    }

    #[inline]
    pub fn is_goal(&self, board: &Board) -> bool {
        *board == self.goal
    }

    /// Lower bound on the moves needed to turn `board` into the goal.
    pub fn estimate(&self, board: &Board) -> u32 {
        debug_assert_eq!(board.dimension(), self.goal.dimension());
        match self.heuristic {
            Heuristic::MisplacedTiles => misplaced_tiles(board, &self.goal),
            Heuristic::Manhattan => manhattan_distance(board, &self.goal_positions),
        }
    }
}

fn misplaced_tiles(board: &Board, goal: &Board) -> u32 {
    board
        .tiles()
        .iter()
        .zip(goal.tiles())
        .filter(|&(&tile, &wanted)| tile != BLANK && tile != wanted)
        .count() as u32
}

fn manhattan_distance(board: &Board, goal_positions: &[Position]) -> u32 {
    let dimension = board.dimension();
    board
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(_, &tile)| tile != BLANK)
        .map(|(index, &tile)| {
            index_to_position(index, dimension).manhattan_distance(goal_positions[tile as usize])
        })
        .sum::<usize>() as u32
}
