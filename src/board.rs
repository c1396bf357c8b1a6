//! Board representation and move generation for N×N sliding-tile puzzles.
//!
//! The grid is stored as a flat row-major array where each cell holds a tile
//! value in `0..N²`, with 0 standing for the blank. Boards are frozen once
//! built: successor generation clones the tiles, swaps the blank with a
//! neighbour, and hands back a new board.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Tile value marking the blank cell.
pub const BLANK: u8 = 0;

/// Largest supported dimension; every tile value must fit in a `u8`.
pub const MAX_DIMENSION: usize = 15;

/// Reasons a grid cannot be turned into a [`Board`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("board has no tiles")]
    Empty,
    #[error("board has {rows} rows but row {row} has {len} entries")]
    NotSquare { rows: usize, row: usize, len: usize },
    #[error("{0} tiles cannot be laid out as a square grid")]
    NotPerfectSquare(usize),
    #[error("dimension {dimension} exceeds the maximum of {max}", max = MAX_DIMENSION)]
    TooLarge { dimension: usize },
    #[error("tiles are not a permutation of 0..{cells}: {value} is out of range or repeated")]
    NotPermutation { value: u32, cells: usize },
    #[error("invalid tile {token:?}")]
    InvalidToken { token: String },
}

/// A (row, column) cell on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Number of orthogonal steps between two cells.
    #[inline]
    pub fn manhattan_distance(self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True when the cells share an edge (diagonals and the cell itself excluded).
    #[inline]
    pub fn is_adjacent(self, other: Position) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Converts a position to its row-major cell index.
#[inline(always)]
pub const fn position_to_index(position: Position, dimension: usize) -> usize {
    position.row * dimension + position.col
}

/// Converts a row-major cell index to a position.
#[inline(always)]
pub const fn index_to_position(index: usize, dimension: usize) -> Position {
    Position::new(index / dimension, index % dimension)
}

/// Direction the blank travels during a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four orthogonal directions, in move-generation order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The move that undoes this one.
    pub const fn inverse(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// An N×N puzzle configuration.
///
/// Equality and hashing look at the tile grid only, so two boards built along
/// different routes are the same state.
#[derive(Clone, Debug)]
pub struct Board {
    dimension: usize,
    tiles: Box<[u8]>,
    /// Cell index of the blank, cached for move generation.
    blank: usize,
}

impl Board {
    /// Builds a board from a flattened row-major list of N² values.
    pub fn from_tiles(values: &[u32]) -> Result<Self, BoardError> {
        if values.is_empty() {
            return Err(BoardError::Empty);
        }
        let dimension = exact_square_root(values.len())
            .ok_or(BoardError::NotPerfectSquare(values.len()))?;
        Self::build(dimension, values)
    }

    /// Builds a board from a list of rows, each of which must be N long.
    pub fn from_rows(rows: &[Vec<u32>]) -> Result<Self, BoardError> {
        if rows.is_empty() {
            return Err(BoardError::Empty);
        }
        let dimension = rows.len();
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != dimension {
                return Err(BoardError::NotSquare {
                    rows: dimension,
                    row,
                    len: cells.len(),
                });
            }
        }
        let values: Vec<u32> = rows.iter().flatten().copied().collect();
        Self::build(dimension, &values)
    }

    /// The conventional goal: tiles 1..N² in reading order, blank last.
    pub fn canonical_goal(dimension: usize) -> Result<Self, BoardError> {
        if dimension == 0 {
            return Err(BoardError::Empty);
        }
        if dimension > MAX_DIMENSION {
            return Err(BoardError::TooLarge { dimension });
        }
        Ok(Self::canonical(dimension))
    }

    /// The canonical goal with this board's dimension.
    pub fn goal_like(&self) -> Self {
        Self::canonical(self.dimension)
    }

    fn canonical(dimension: usize) -> Self {
        let cells = dimension * dimension;
        let tiles: Box<[u8]> = (1..cells)
            .map(|value| value as u8)
            .chain(std::iter::once(BLANK))
            .collect();
        Self {
            dimension,
            tiles,
            blank: cells - 1,
        }
    }

    /// Validates that `values` is a permutation of `0..dimension²`.
    fn build(dimension: usize, values: &[u32]) -> Result<Self, BoardError> {
        if dimension > MAX_DIMENSION {
            return Err(BoardError::TooLarge { dimension });
        }
        let cells = dimension * dimension;
        debug_assert_eq!(values.len(), cells);

        let mut seen = vec![false; cells];
        let mut blank = 0;
        for (index, &value) in values.iter().enumerate() {
            let slot = seen
                .get_mut(value as usize)
                .filter(|slot| !**slot)
                .ok_or(BoardError::NotPermutation { value, cells })?;
            *slot = true;
            if value == u32::from(BLANK) {
                blank = index;
            }
        }

        Ok(Self {
            dimension,
            tiles: values.iter().map(|&value| value as u8).collect(),
            blank,
        })
    }

    /// Side length N.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Tile values in row-major order.
    #[inline]
    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    /// Tile value at `position`.
    #[inline]
    pub fn tile(&self, position: Position) -> u8 {
        self.tiles[position_to_index(position, self.dimension)]
    }

    /// Position of the blank.
    #[inline]
    pub fn blank(&self) -> Position {
        index_to_position(self.blank, self.dimension)
    }

    /// Position of `value`, or `None` if the value is not on this board.
    pub fn position_of(&self, value: u8) -> Option<Position> {
        self.tiles
            .iter()
            .position(|&tile| tile == value)
            .map(|index| index_to_position(index, self.dimension))
    }

    /// Where every value sits, indexed by value.
    pub fn positions_by_value(&self) -> Vec<Position> {
        let mut positions = vec![Position::new(0, 0); self.tiles.len()];
        for (index, &tile) in self.tiles.iter().enumerate() {
            positions[tile as usize] = index_to_position(index, self.dimension);
        }
        positions
    }

    /// Cell the blank would move into, if it stays on the board.
    fn target(&self, direction: Direction) -> Option<Position> {
        let Position { row, col } = self.blank();
        let last = self.dimension - 1;
        match direction {
            Direction::Up => row.checked_sub(1).map(|row| Position::new(row, col)),
            Direction::Down => (row < last).then(|| Position::new(row + 1, col)),
            Direction::Left => col.checked_sub(1).map(|col| Position::new(row, col)),
            Direction::Right => (col < last).then(|| Position::new(row, col + 1)),
        }
    }

    /// Copies the grid and swaps the blank with `target`.
    fn swapped(&self, target: Position) -> Board {
        let target_index = position_to_index(target, self.dimension);
        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, target_index);
        Board {
            dimension: self.dimension,
            tiles,
            blank: target_index,
        }
    }

    /// Moves the blank one cell in `direction`; `None` at the edge.
    pub fn slide(&self, direction: Direction) -> Option<Board> {
        self.target(direction).map(|target| self.swapped(target))
    }

    /// Swaps the blank with the tile at `target`.
    ///
    /// Returns `None` unless `target` is on the board and orthogonally
    /// adjacent to the blank.
    pub fn swap_blank_with(&self, target: Position) -> Option<Board> {
        let on_board = target.row < self.dimension && target.col < self.dimension;
        if !on_board || !self.blank().is_adjacent(target) {
            return None;
        }
        Some(self.swapped(target))
    }

    /// Every board one move away, paired with the blank's new position.
    ///
    /// Yields 2 boards with the blank in a corner, 3 on an edge, 4 inside.
    pub fn neighbors(&self) -> Vec<(Board, Position)> {
        Direction::ALL
            .iter()
            .filter_map(|&direction| self.target(direction))
            .map(|target| (self.swapped(target), target))
            .collect()
    }

    /// Every legal move together with the board it produces.
    pub fn moves(&self) -> impl Iterator<Item = (Direction, Board)> + '_ {
        Direction::ALL.into_iter().filter_map(move |direction| {
            self.slide(direction).map(|board| (direction, board))
        })
    }

    /// The direction that turns `self` into `next`, if they are one move apart.
    pub fn direction_to(&self, next: &Board) -> Option<Direction> {
        self.moves()
            .find(|(_, board)| board == next)
            .map(|(direction, _)| direction)
    }

    /// Parity test for whether `goal` is reachable from this board.
    ///
    /// Tiles are ranked by their index in `goal`, so the goal itself has zero
    /// inversions. A horizontal move never changes the inversion count; a
    /// vertical move changes it by N-1, so for even N the blank's row
    /// distance to its goal row must make up the difference.
    pub fn is_solvable_towards(&self, goal: &Board) -> bool {
        if self.dimension != goal.dimension {
            return false;
        }

        let mut goal_rank = vec![0usize; self.tiles.len()];
        for (index, &tile) in goal.tiles.iter().enumerate() {
            goal_rank[tile as usize] = index;
        }
        let ranks: Vec<usize> = self
            .tiles
            .iter()
            .filter(|&&tile| tile != BLANK)
            .map(|&tile| goal_rank[tile as usize])
            .collect();

        let mut inversions = 0usize;
        for (i, &earlier) in ranks.iter().enumerate() {
            inversions += ranks[i + 1..].iter().filter(|&&later| later < earlier).count();
        }

        let row_shift = if self.dimension % 2 == 0 {
            self.blank().row.abs_diff(goal.blank().row)
        } else {
            0
        };
        (inversions + row_shift) % 2 == 0
    }
}

/// Returns `n` such that `n * n == cells`.
fn exact_square_root(cells: usize) -> Option<usize> {
    let root = (cells as f64).sqrt().round() as usize;
    (root * root == cells).then_some(root)
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.tiles == other.tiles
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tiles.hash(state);
    }
}

impl fmt::Display for Board {
    /// Rows of space-separated tiles, right-aligned to the widest value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.tiles.len() - 1).to_string().len();
        for (row_index, row) in self.tiles.chunks(self.dimension).enumerate() {
            if row_index > 0 {
                writeln!(f)?;
            }
            for (col, tile) in row.iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{:>width$}", tile, width = width)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses whitespace-separated integers, one row per line.
    ///
    /// Blank lines are skipped; the grid must be square and a permutation.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let rows = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.split_whitespace()
                    .map(|token| {
                        token.parse::<u32>().map_err(|_| BoardError::InvalidToken {
                            token: token.to_string(),
                        })
                    })
                    .collect::<Result<Vec<u32>, BoardError>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Board::from_rows(&rows)
    }
}
