//! The best-first engine shared by A*, Anytime WA* and ARA*.
//!
//! One loop pops the best open node and expands it; a [`Strategy`] decides
//! the ordering key, whether a popped node may be expanded, what happens to
//! successors of already-closed states, where goals are detected and when a
//! pass stops.

use std::time::Instant;

use tracing::{debug, trace};

use super::{SearchError, Solution};
use crate::config::{Problem, Weight};
use crate::frontier::{OpenList, Priority, StateTable};
use crate::heuristic::{Evaluator, Heuristic};
use crate::node::{NodeArena, NodeId, SearchNode};
use crate::stats::{PassSummary, SearchStats};

/// Value the open list is sorted by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderKey {
    /// `g + h`.
    F,
    /// `g + w·h` under the engine's current weight.
    WeightedF,
}

/// Whether a popped node is worth expanding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpansionGuard {
    Always,
    /// Only nodes whose `f` is below the incumbent's can lead to a better
    /// solution; everything else is dropped on pop.
    BelowIncumbent,
}

/// What to do when a cheaper path reaches a state that is already closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReopenPolicy {
    /// Discard it. Sound only with a consistent heuristic, where the first
    /// expansion of a state already used its cheapest path.
    Never,
    /// Take the state out of closed and queue it again.
    ToOpen,
    /// Park it in incons until the next pass.
    ToIncons,
}

/// Where goal boards are recognised.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoalTest {
    /// When the goal is popped from open.
    OnPop,
    /// As soon as the goal is generated as a successor.
    OnGeneration,
}

/// When a pass stops popping nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// At the first goal popped, or when open runs dry.
    FirstGoal,
    /// Only when open runs dry.
    OpenExhausted,
    /// When open runs dry or the incumbent's key is no worse than open's best.
    IncumbentBeatsOpen,
}

/// The policy bundle that turns the shared engine into a specific algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Strategy {
    pub order: OrderKey,
    pub guard: ExpansionGuard,
    pub reopen: ReopenPolicy,
    pub goal_test: GoalTest,
    pub termination: Termination,
}

impl Strategy {
    pub const A_STAR: Strategy = Strategy {
        order: OrderKey::F,
        guard: ExpansionGuard::Always,
        reopen: ReopenPolicy::Never,
        goal_test: GoalTest::OnPop,
        termination: Termination::FirstGoal,
    };

    pub const ANYTIME_WEIGHTED: Strategy = Strategy {
        order: OrderKey::WeightedF,
        guard: ExpansionGuard::BelowIncumbent,
        reopen: ReopenPolicy::ToOpen,
        goal_test: GoalTest::OnGeneration,
        termination: Termination::OpenExhausted,
    };

    pub const ARA: Strategy = Strategy {
        order: OrderKey::WeightedF,
        guard: ExpansionGuard::Always,
        reopen: ReopenPolicy::ToIncons,
        goal_test: GoalTest::OnPop,
        termination: Termination::IncumbentBeatsOpen,
    };
}

/// How a call to [`BestFirst::run_pass`] ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PassEnd {
    /// A goal was popped under [`Termination::FirstGoal`].
    Goal(NodeId),
    /// The termination predicate fired with nodes still open.
    Stopped,
    /// Open ran dry.
    Exhausted,
}

#[inline]
fn ordering_key(order: OrderKey, weight: Weight, node: &SearchNode) -> f64 {
    match order {
        OrderKey::F => f64::from(node.f()),
        OrderKey::WeightedF => node.weighted_f(weight),
    }
}

/// All state owned by one best-first run.
pub(crate) struct BestFirst {
    strategy: Strategy,
    evaluator: Evaluator,
    weight: Weight,
    arena: NodeArena,
    open: OpenList,
    closed: StateTable,
    incons: StateTable,
    incumbent: Option<NodeId>,
    stats: SearchStats,
    started: Instant,
}

impl BestFirst {
    pub(crate) fn new(
        problem: &Problem,
        heuristic: Heuristic,
        strategy: Strategy,
        weight: Weight,
    ) -> Self {
        let evaluator = Evaluator::new(heuristic, problem.goal().clone());
        let start = problem.start().clone();
        let h = evaluator.estimate(&start);
        let root_is_goal = evaluator.is_goal(&start);

        let mut engine = Self {
            strategy,
            evaluator,
            weight,
            arena: NodeArena::new(),
            open: OpenList::new(),
            closed: StateTable::new(),
            incons: StateTable::new(),
            incumbent: None,
            stats: SearchStats::default(),
            started: Instant::now(),
        };

        let root = engine.arena.insert(SearchNode::root(start, h));
        if root_is_goal && strategy.goal_test == GoalTest::OnGeneration {
            // the root is never generated as a successor, so test it here
            engine.offer_incumbent(root);
        } else {
            engine.enqueue(root);
            engine.stats.opened += 1;
        }
        engine
    }

    #[inline]
    fn key(&self, node: &SearchNode) -> f64 {
        ordering_key(self.strategy.order, self.weight, node)
    }

    pub(crate) fn weight(&self) -> Weight {
        self.weight
    }

    pub(crate) fn incumbent(&self) -> Option<NodeId> {
        self.incumbent
    }

    pub(crate) fn cost_of(&self, id: NodeId) -> u32 {
        self.arena[id].g()
    }

    /// Smallest `f` among the nodes in open and incons.
    pub(crate) fn min_f_open_and_incons(&self) -> Option<u32> {
        self.open
            .nodes()
            .chain(self.incons.nodes())
            .map(|id| self.arena[id].f())
            .min()
    }

    pub(crate) fn record_pass(&mut self, pass: PassSummary) {
        self.stats.passes.push(pass);
    }

    /// Pops and expands nodes until the strategy's termination predicate holds.
    pub(crate) fn run_pass(&mut self) -> PassEnd {
        loop {
            if self.should_stop() {
                return if self.open.is_empty() {
                    PassEnd::Exhausted
                } else {
                    PassEnd::Stopped
                };
            }
            let Some(id) = self.open.pop() else {
                return PassEnd::Exhausted;
            };

            if self.strategy.goal_test == GoalTest::OnPop
                && self.evaluator.is_goal(self.arena[id].board())
            {
                self.offer_incumbent(id);
                if self.strategy.termination == Termination::FirstGoal {
                    return PassEnd::Goal(id);
                }
                // nothing past the goal can beat it; close without expanding
                self.close(id);
                continue;
            }

            if self.may_expand(id) {
                self.expand(id);
            }
        }
    }

    fn should_stop(&self) -> bool {
        match self.strategy.termination {
            Termination::FirstGoal | Termination::OpenExhausted => self.open.is_empty(),
            Termination::IncumbentBeatsOpen => match (self.incumbent, self.open.peek_key()) {
                (_, None) => true,
                (Some(incumbent), Some(best)) => self.key(&self.arena[incumbent]) <= best,
                (None, Some(_)) => false,
            },
        }
    }

    fn may_expand(&self, id: NodeId) -> bool {
        match (self.strategy.guard, self.incumbent) {
            (ExpansionGuard::BelowIncumbent, Some(incumbent)) => {
                self.arena[id].f() < self.arena[incumbent].f()
            }
            _ => true,
        }
    }

    fn close(&mut self, id: NodeId) {
        self.closed.insert(self.arena[id].board().clone(), id);
        self.stats.expanded += 1;
    }

    fn expand(&mut self, id: NodeId) {
        self.close(id);
        let board = self.arena[id].board().clone();
        trace!(g = self.arena[id].g(), h = self.arena[id].h(), "expanding");

        for (next, _) in board.neighbors() {
            let h = self.evaluator.estimate(&next);
            let child = SearchNode::child(id, &self.arena[id], next, h);
            self.process_successor(child);

            let stored = self.open.len() + self.closed.len() + self.incons.len();
            self.stats.observe_stored(stored);
            self.stats.observe_incons(self.incons.len());
        }
    }

    fn process_successor(&mut self, child: SearchNode) {
        match self.strategy.reopen {
            ReopenPolicy::Never => {
                if !self.closed.contains(child.board()) {
                    self.insert_or_improve(child);
                }
            }
            ReopenPolicy::ToOpen => self.process_anytime_successor(child),
            ReopenPolicy::ToIncons => self.process_repairing_successor(child),
        }
    }

    /// Queues an unseen state, or lowers the key of one already open.
    fn insert_or_improve(&mut self, child: SearchNode) {
        let key = self.key(&child);
        match self.open.get(child.board()) {
            Some(existing) if key < existing.key() => {
                let board = child.board().clone();
                let h = child.h();
                let id = self.arena.insert(child);
                self.open.replace(&board, Priority::new(key, h, id));
            }
            Some(_) => {}
            None => {
                let id = self.arena.insert(child);
                self.enqueue(id);
                self.stats.opened += 1;
            }
        }
    }

    /// Anytime WA*: prune against the incumbent, take goals as incumbents,
    /// reopen closed states reached more cheaply.
    fn process_anytime_successor(&mut self, child: SearchNode) {
        if let Some(incumbent) = self.incumbent {
            if child.f() >= self.arena[incumbent].f() {
                return;
            }
        }

        if self.evaluator.is_goal(child.board()) {
            let id = self.arena.insert(child);
            self.offer_incumbent(id);
            return;
        }

        if let Some(closed_id) = self.closed.get(child.board()) {
            if child.f() < self.arena[closed_id].f() {
                self.closed.remove(child.board());
                let id = self.arena.insert(child);
                self.enqueue(id);
                self.stats.reopened += 1;
                debug!(g = self.arena[id].g(), "reopened closed state");
            }
            return;
        }

        self.insert_or_improve(child);
    }

    /// ARA*: closed states reached more cheaply wait in incons for the next pass.
    fn process_repairing_successor(&mut self, child: SearchNode) {
        let Some(closed_id) = self.closed.get(child.board()) else {
            self.insert_or_improve(child);
            return;
        };

        let key = self.key(&child);
        let improves = match self.incons.get(child.board()) {
            Some(parked) => key < self.key(&self.arena[parked]),
            None => key < self.key(&self.arena[closed_id]),
        };
        if improves {
            let board = child.board().clone();
            let id = self.arena.insert(child);
            self.incons.insert(board, id);
        }
    }

    fn enqueue(&mut self, id: NodeId) {
        let node = &self.arena[id];
        let priority = Priority::new(self.key(node), node.h(), id);
        let board = node.board().clone();
        self.open.push(board, priority);
    }

    /// Makes `id` the incumbent if it is cheaper than the current one.
    fn offer_incumbent(&mut self, id: NodeId) {
        let cost = self.arena[id].g();
        if let Some(current) = self.incumbent {
            if self.arena[current].g() <= cost {
                return;
            }
        }
        self.incumbent = Some(id);
        self.stats.incumbents.push(cost);
        debug!(cost, "new incumbent");
    }

    /// Prepares the next ARA* pass under a smaller weight.
    ///
    /// Incons joins open, every open key is recomputed for the new weight,
    /// and closed and incons start out empty.
    pub(crate) fn lower_weight(&mut self, weight: Weight) {
        self.weight = weight;

        let parked: Vec<(_, _)> = self.incons.drain().collect();
        for (board, id) in parked {
            // incons only ever holds closed states, which are never open
            debug_assert!(!self.open.contains(&board));
            let node = &self.arena[id];
            let priority = Priority::new(self.key(node), node.h(), id);
            self.open.push(board, priority);
            self.stats.opened += 1;
        }

        let arena = &self.arena;
        let order = self.strategy.order;
        self.open.rebuild(|id| {
            let node = &arena[id];
            Priority::new(ordering_key(order, weight, node), node.h(), id)
        });
        self.closed.clear();
    }

    pub(crate) fn exhausted(&self) -> SearchError {
        SearchError::ExhaustedSearchSpace {
            expanded: self.stats.expanded,
        }
    }

    /// Ends the run, keeping only the path to `terminal` and the counters.
    pub(crate) fn finish(mut self, terminal: NodeId, bound: Option<f64>) -> Solution {
        self.stats.elapsed = self.started.elapsed();
        Solution {
            path: self.arena.path_to(terminal),
            cost: self.arena[terminal].g(),
            bound,
            stats: self.stats,
        }
    }
}
