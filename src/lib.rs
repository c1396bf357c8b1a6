//! Sliding-tile puzzle solver library.
//!
//! Solves N×N sliding-tile puzzles (the 8-puzzle, the 15-puzzle and their
//! relatives) with A*, Anytime Weighted A*, ARA* and IDA*, guided by the
//! misplaced-tiles or Manhattan-distance heuristic.

pub mod board;
pub mod config;
pub mod frontier;
pub mod heuristic;
pub mod node;
pub mod persistence;
pub mod search;
pub mod stats;

#[cfg(test)]
mod testing;

pub use board::{Board, BoardError, Direction, Position};
pub use config::{Algorithm, AlgorithmKind, ConfigError, Problem, SearchConfig, Step, Weight};
pub use heuristic::{Evaluator, Heuristic};
pub use search::{solve, SearchError, Solution};
pub use stats::SearchStats;
