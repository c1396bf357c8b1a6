//! Counters collected while a search runs.

use std::fmt;
use std::time::Duration;

use crate::config::AlgorithmKind;

/// Outcome of one ARA* improvement pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PassSummary {
    /// Weight the pass ran with.
    pub weight: f64,
    /// Cost of the incumbent when the pass ended.
    pub incumbent_cost: u32,
    /// Proven suboptimality bound after the pass.
    pub bound: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchStats {
    /// Insertions of new states into open.
    pub opened: usize,
    /// Nodes expanded (moved to closed, or entered by IDA*).
    pub expanded: usize,
    /// Largest number of nodes held at once across open, closed and incons
    /// (for IDA*, the deepest stack).
    pub max_stored: usize,
    /// Largest size reached by incons.
    pub max_incons: usize,
    /// Closed states moved back to open after a cheaper path turned up.
    pub reopened: usize,
    /// Cost of every accepted incumbent, in discovery order.
    pub incumbents: Vec<u32>,
    /// One entry per ARA* pass.
    pub passes: Vec<PassSummary>,
    /// IDA* cost threshold of every iteration.
    pub thresholds: Vec<u32>,
    pub elapsed: Duration,
}

impl SearchStats {
    /// Tracks the peak of the combined structure sizes.
    #[inline]
    pub(crate) fn observe_stored(&mut self, stored: usize) {
        self.max_stored = self.max_stored.max(stored);
    }

    #[inline]
    pub(crate) fn observe_incons(&mut self, incons: usize) {
        self.max_incons = self.max_incons.max(incons);
    }

    /// Human-readable summary with the counters relevant to `kind`.
    pub fn summary(&self, kind: AlgorithmKind) -> Summary<'_> {
        Summary { stats: self, kind }
    }
}

/// `label : value` report of a [`SearchStats`], one counter per line.
#[derive(Clone, Copy, Debug)]
pub struct Summary<'a> {
    stats: &'a SearchStats,
    kind: AlgorithmKind,
}

fn line(f: &mut fmt::Formatter<'_>, label: &str, value: impl fmt::Display) -> fmt::Result {
    writeln!(f, "{:<32}: {}", label, value)
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats;
        match self.kind {
            AlgorithmKind::AStar => {
                line(f, "Size of closed list", stats.expanded)?;
                line(f, "Size of open list", stats.opened)?;
                line(f, "Max size of open & closed", stats.max_stored)?;
            }
            AlgorithmKind::AnytimeWeighted => {
                line(f, "Size of closed list", stats.expanded)?;
                line(f, "Size of open list", stats.opened)?;
                line(f, "Max size of open & closed", stats.max_stored)?;
                line(f, "Nodes moved from closed to open", stats.reopened)?;
                line(f, "Incumbents found", stats.incumbents.len())?;
            }
            AlgorithmKind::Ara => {
                line(f, "Size of closed list", stats.expanded)?;
                line(f, "Size of open list", stats.opened)?;
                line(f, "Max size of incons list", stats.max_incons)?;
                line(f, "Max size of open, closed & incons", stats.max_stored)?;
                for (index, pass) in stats.passes.iter().enumerate() {
                    let text = format!(
                        "weight {}, cost {}, bound {:.3}",
                        pass.weight, pass.incumbent_cost, pass.bound
                    );
                    line(f, &format!("Pass {}", index + 1), text)?;
                }
            }
            AlgorithmKind::IdaStar => {
                line(f, "Nodes expanded", stats.expanded)?;
                line(f, "Max search depth", stats.max_stored)?;
                let thresholds: Vec<String> =
                    stats.thresholds.iter().map(u32::to_string).collect();
                line(f, "Thresholds", thresholds.join(", "))?;
            }
        }
        line(
            f,
            "Run time (s)",
            format_args!("{:.3}", stats.elapsed.as_secs_f64()),
        )
    }
}
