//! File I/O for puzzle boards and solution reports.
//!
//! Board files hold one row per line, tiles separated by whitespace and `0`
//! for the blank. Reports are plain text:
//! - every board on the solution path, numbered from step 0, one blank line
//!   between boards
//! - the move count and the blank's direction at each move
//! - the run statistics for the algorithm used

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::board::{Board, BoardError};
use crate::config::AlgorithmKind;
use crate::search::Solution;

#[derive(thiserror::Error, Debug)]
pub enum PersistenceError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed board in {}", .path.display())]
    Board {
        path: PathBuf,
        #[source]
        source: BoardError,
    },
}

/// Reads and parses a board file.
pub fn load_board(path: &Path) -> Result<Board, PersistenceError> {
    let text = fs::read_to_string(path).map_err(|source| PersistenceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    text.parse().map_err(|source| PersistenceError::Board {
        path: path.to_path_buf(),
        source,
    })
}

/// The text report for a finished run.
#[derive(Clone, Copy, Debug)]
pub struct Report<'a> {
    solution: &'a Solution,
    kind: AlgorithmKind,
}

impl<'a> Report<'a> {
    pub fn new(solution: &'a Solution, kind: AlgorithmKind) -> Self {
        Self { solution, kind }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let solution = self.solution;
        for (step, board) in solution.path.iter().enumerate() {
            writeln!(f, "Step {}:\n{}\n", step, board)?;
        }

        writeln!(f, "Solution length: {}", solution.moves())?;
        let directions: Vec<String> = solution
            .directions()
            .iter()
            .map(ToString::to_string)
            .collect();
        if !directions.is_empty() {
            writeln!(f, "Blank moves: {}", directions.join(" "))?;
        }
        if let Some(bound) = solution.bound {
            writeln!(f, "Suboptimality bound: {:.3}", bound)?;
        }
        writeln!(f)?;
        write!(f, "{}", solution.stats.summary(self.kind))
    }
}

/// Renders the full report for a finished run.
pub fn format_report(solution: &Solution, kind: AlgorithmKind) -> String {
    Report::new(solution, kind).to_string()
}

/// Writes the report for `solution` to `path`.
pub fn save_report(
    path: &Path,
    solution: &Solution,
    kind: AlgorithmKind,
) -> Result<(), PersistenceError> {
    let wrap = |source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = BufWriter::new(File::create(path).map_err(wrap)?);
    write!(file, "{}", Report::new(solution, kind)).map_err(wrap)?;
    file.flush().map_err(wrap)
}
