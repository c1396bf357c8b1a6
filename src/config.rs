//! Run configuration: which algorithm, which heuristic, and the weights.
//!
//! A configuration is an immutable value handed to the engine at
//! construction, so independent runs never share settings.

use std::fmt;

use crate::board::Board;
use crate::heuristic::Heuristic;

/// Initial heuristic weight when none is given for a weighted algorithm.
pub const DEFAULT_WEIGHT: f64 = 2.0;

/// Per-pass weight decrease for ARA* when none is given.
pub const DEFAULT_STEP: f64 = 0.5;

/// Configuration mistakes caught before a search starts.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("start board is {start}x{start} but goal board is {goal}x{goal}")]
    DimensionMismatch { start: usize, goal: usize },
    #[error("weight must be a finite number of at least 1, got {0}")]
    InvalidWeight(f64),
    #[error("weight decrease step must be a finite number above 0, got {0}")]
    InvalidStep(f64),
    #[error("{0} does not take a weight")]
    UnexpectedWeight(AlgorithmKind),
    #[error("{0} does not take a weight decrease step")]
    UnexpectedStep(AlgorithmKind),
    #[error("the goal board cannot be reached from the start board")]
    Unsolvable,
}

/// Heuristic multiplier `w` in `f' = g + w·h`; always at least 1.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Weight(f64);

impl Weight {
    pub const ONE: Weight = Weight(1.0);

    pub fn new(value: f64) -> Result<Self, ConfigError> {
        if value.is_finite() && value >= 1.0 {
            Ok(Self(value))
        } else {
            Err(ConfigError::InvalidWeight(value))
        }
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }

    /// The next weight down, never below 1.
    pub fn decreased_by(self, step: Step) -> Weight {
        Weight((self.0 - step.get()).max(1.0))
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Amount ARA* lowers the weight by between passes; always positive.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Step(f64);

impl Step {
    pub fn new(value: f64) -> Result<Self, ConfigError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(ConfigError::InvalidStep(value))
        }
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

/// Algorithm selector without its parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum AlgorithmKind {
    #[default]
    AStar,
    AnytimeWeighted,
    Ara,
    IdaStar,
}

impl AlgorithmKind {
    fn takes_weight(self) -> bool {
        matches!(self, AlgorithmKind::AnytimeWeighted | AlgorithmKind::Ara)
    }

    fn takes_step(self) -> bool {
        self == AlgorithmKind::Ara
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlgorithmKind::AStar => "A*",
            AlgorithmKind::AnytimeWeighted => "Anytime WA*",
            AlgorithmKind::Ara => "ARA*",
            AlgorithmKind::IdaStar => "IDA*",
        };
        f.write_str(name)
    }
}

/// Algorithm selector together with the parameters it needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Algorithm {
    AStar,
    AnytimeWeighted { weight: Weight },
    Ara { weight: Weight, step: Step },
    IdaStar,
}

impl Algorithm {
    pub fn kind(&self) -> AlgorithmKind {
        match self {
            Algorithm::AStar => AlgorithmKind::AStar,
            Algorithm::AnytimeWeighted { .. } => AlgorithmKind::AnytimeWeighted,
            Algorithm::Ara { .. } => AlgorithmKind::Ara,
            Algorithm::IdaStar => AlgorithmKind::IdaStar,
        }
    }

    /// Weight the search starts with; 1 for the unweighted algorithms.
    pub fn initial_weight(&self) -> Weight {
        match *self {
            Algorithm::AnytimeWeighted { weight } | Algorithm::Ara { weight, .. } => weight,
            Algorithm::AStar | Algorithm::IdaStar => Weight::ONE,
        }
    }
}

/// Everything a run needs apart from the boards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    pub heuristic: Heuristic,
}

impl SearchConfig {
    pub fn new(algorithm: Algorithm, heuristic: Heuristic) -> Self {
        Self {
            algorithm,
            heuristic,
        }
    }

    /// Assembles a configuration from loose settings, as a CLI collects them.
    ///
    /// Parameters an algorithm does not use are rejected rather than ignored;
    /// missing ones fall back to [`DEFAULT_WEIGHT`] and [`DEFAULT_STEP`].
    pub fn from_parts(
        kind: AlgorithmKind,
        heuristic: Heuristic,
        weight: Option<f64>,
        step: Option<f64>,
    ) -> Result<Self, ConfigError> {
        if weight.is_some() && !kind.takes_weight() {
            return Err(ConfigError::UnexpectedWeight(kind));
        }
        if step.is_some() && !kind.takes_step() {
            return Err(ConfigError::UnexpectedStep(kind));
        }

        let weight = Weight::new(weight.unwrap_or(DEFAULT_WEIGHT));
        let algorithm = match kind {
            AlgorithmKind::AStar => Algorithm::AStar,
            AlgorithmKind::AnytimeWeighted => Algorithm::AnytimeWeighted { weight: weight? },
            AlgorithmKind::Ara => Algorithm::Ara {
                weight: weight?,
                step: Step::new(step.unwrap_or(DEFAULT_STEP))?,
            },
            AlgorithmKind::IdaStar => Algorithm::IdaStar,
        };

        Ok(Self::new(algorithm, heuristic))
    }
}

/// A start board and the goal it should be turned into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Problem {
    start: Board,
    goal: Board,
}

impl Problem {
    pub fn new(start: Board, goal: Board) -> Result<Self, ConfigError> {
        if start.dimension() != goal.dimension() {
            return Err(ConfigError::DimensionMismatch {
                start: start.dimension(),
                goal: goal.dimension(),
            });
        }
        Ok(Self { start, goal })
    }

    /// Targets the canonical goal of the start board's size.
    pub fn with_canonical_goal(start: Board) -> Self {
        let goal = start.goal_like();
        Self { start, goal }
    }

    pub fn start(&self) -> &Board {
        &self.start
    }

    pub fn goal(&self) -> &Board {
        &self.goal
    }

    pub fn is_solvable(&self) -> bool {
        self.start.is_solvable_towards(&self.goal)
    }

    /// Rejects problems whose goal lies in the other parity class.
    ///
    /// A* and the anytime searches would exhaust half of the state space
    /// before giving up, and IDA* would never stop.
    pub fn ensure_solvable(&self) -> Result<(), ConfigError> {
        if self.is_solvable() {
            Ok(())
        } else {
            Err(ConfigError::Unsolvable)
        }
    }
}
