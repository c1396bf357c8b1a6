//! Open, closed and incons bookkeeping for the best-first searches.
//!
//! The open list is an indexed heap keyed by board, so membership tests,
//! lookups and priority changes are all cheap. Closed and incons are plain
//! hash maps from board to the node that claimed it.

use std::cmp::Ordering;
use std::fmt;

use ordered_float::OrderedFloat;
use priority_queue::PriorityQueue;
use rustc_hash::{FxBuildHasher, FxHashMap};

use crate::board::Board;
use crate::node::NodeId;

/// Open-list priority: the smallest key pops first.
///
/// Ties prefer the smaller `h` (closer to the goal), then the older node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Priority {
    key: OrderedFloat<f64>,
    h: u32,
    node: NodeId,
}

impl Priority {
    pub fn new(key: f64, h: u32, node: NodeId) -> Self {
        Self {
            key: OrderedFloat(key),
            h,
            node,
        }
    }

    #[inline]
    pub fn key(&self) -> f64 {
        self.key.into_inner()
    }

    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }
}

impl Ord for Priority {
    // PriorityQueue pops the greatest priority, so every comparison is reversed
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Discovered states waiting for expansion, one entry per board.
pub struct OpenList {
    queue: PriorityQueue<Board, Priority, FxBuildHasher>,
}

// FxBuildHasher has no Debug impl, so the queue cannot be derived through
impl fmt::Debug for OpenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenList")
            .field("len", &self.len())
            .field("best", &self.queue.peek().map(|(_, priority)| priority))
            .finish()
    }
}

impl Default for OpenList {
    fn default() -> Self {
        Self {
            queue: PriorityQueue::with_default_hasher(),
        }
    }
}

impl OpenList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn contains(&self, board: &Board) -> bool {
        self.queue.get_priority(board).is_some()
    }

    /// The entry currently holding `board`.
    pub fn get(&self, board: &Board) -> Option<Priority> {
        self.queue.get_priority(board).copied()
    }

    /// Adds `board`, or overwrites its priority if it is already queued.
    pub fn push(&mut self, board: Board, priority: Priority) {
        self.queue.push(board, priority);
    }

    /// Points an existing entry at a new node and priority.
    ///
    /// Returns `false` when `board` is not queued.
    pub fn replace(&mut self, board: &Board, priority: Priority) -> bool {
        self.queue.change_priority(board, priority).is_some()
    }

    pub fn pop(&mut self) -> Option<NodeId> {
        self.queue.pop().map(|(_, priority)| priority.node())
    }

    /// Smallest key in the list.
    pub fn peek_key(&self) -> Option<f64> {
        self.queue.peek().map(|(_, priority)| priority.key())
    }

    /// Nodes currently queued, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.queue.iter().map(|(_, priority)| priority.node())
    }

    /// Recomputes every priority, for when the ordering key itself changes.
    pub fn rebuild(&mut self, mut priority_of: impl FnMut(NodeId) -> Priority) {
        let entries = std::mem::take(&mut self.queue);
        for (board, old) in entries {
            self.queue.push(board, priority_of(old.node()));
        }
    }
}

/// Board-to-node map used for both the closed and the incons sets.
#[derive(Debug, Default)]
pub struct StateTable {
    entries: FxHashMap<Board, NodeId>,
}

impl StateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, board: &Board) -> bool {
        self.entries.contains_key(board)
    }

    pub fn get(&self, board: &Board) -> Option<NodeId> {
        self.entries.get(board).copied()
    }

    /// Records `node` for `board`, returning the node it displaced.
    pub fn insert(&mut self, board: Board, node: NodeId) -> Option<NodeId> {
        self.entries.insert(board, node)
    }

    pub fn remove(&mut self, board: &Board) -> Option<NodeId> {
        self.entries.remove(board)
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.values().copied()
    }

    /// Empties the table, yielding its entries.
    pub fn drain(&mut self) -> impl Iterator<Item = (Board, NodeId)> + '_ {
        self.entries.drain()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Direction;
    use crate::node::{NodeArena, SearchNode};
    use crate::testing::board;

    /// Three distinct boards registered in an arena, for their ids.
    fn fixture() -> (NodeArena, Vec<(Board, NodeId)>) {
        let mut arena = NodeArena::new();
        let start = board("1 2 3\n4 0 5\n6 7 8");
        let root = arena.insert(SearchNode::root(start.clone(), 0));
        let mut entries = vec![(start.clone(), root)];
        for direction in [Direction::Up, Direction::Left] {
            let next = start.slide(direction).unwrap();
            let id = arena.insert(SearchNode::child(root, &arena[root], next.clone(), 0));
            entries.push((next, id));
        }
        (arena, entries)
    }

    #[test]
    fn test_pops_smallest_key_first() {
        let (_, entries) = fixture();
        let mut open = OpenList::new();
        open.push(entries[0].0.clone(), Priority::new(5.0, 1, entries[0].1));
        open.push(entries[1].0.clone(), Priority::new(2.5, 1, entries[1].1));
        open.push(entries[2].0.clone(), Priority::new(4.0, 1, entries[2].1));

        assert_eq!(open.peek_key(), Some(2.5));
        assert_eq!(open.pop(), Some(entries[1].1));
        assert_eq!(open.pop(), Some(entries[2].1));
        assert_eq!(open.pop(), Some(entries[0].1));
        assert!(open.pop().is_none());
    }

    #[test]
    fn test_ties_prefer_smaller_h_then_older_node() {
        let (_, entries) = fixture();
        let mut open = OpenList::new();
        open.push(entries[2].0.clone(), Priority::new(3.0, 2, entries[2].1));
        open.push(entries[1].0.clone(), Priority::new(3.0, 2, entries[1].1));
        open.push(entries[0].0.clone(), Priority::new(3.0, 3, entries[0].1));

        assert_eq!(open.pop(), Some(entries[1].1));
        assert_eq!(open.pop(), Some(entries[2].1));
        assert_eq!(open.pop(), Some(entries[0].1));
    }

    #[test]
    fn test_membership_and_replace() {
        let (_, entries) = fixture();
        let mut open = OpenList::new();
        let (board, id) = entries[1].clone();
        open.push(board.clone(), Priority::new(6.0, 2, id));

        assert!(open.contains(&board));
        assert!(!open.contains(&entries[0].0));
        assert!(open.replace(&board, Priority::new(1.0, 0, entries[2].1)));
        assert!(!open.replace(&entries[0].0, Priority::new(1.0, 0, id)));
        assert_eq!(open.len(), 1);
        assert_eq!(open.get(&board).map(|p| p.node()), Some(entries[2].1));
        assert_eq!(open.peek_key(), Some(1.0));
    }

    #[test]
    fn test_rebuild_reorders() {
        let (_, entries) = fixture();
        let mut open = OpenList::new();
        for (rank, (board, id)) in entries.iter().enumerate() {
            open.push(board.clone(), Priority::new(rank as f64, 0, *id));
        }
        // invert the order
        open.rebuild(|node| {
            let rank = entries.iter().position(|(_, id)| *id == node).unwrap();
            Priority::new(10.0 - rank as f64, 0, node)
        });

        assert_eq!(open.pop(), Some(entries[2].1));
        assert_eq!(open.peek_key(), Some(9.0));
        assert_eq!(open.nodes().count(), 2);
    }

    #[test]
    fn test_debug_shows_size_and_best_entry() {
        let (_, entries) = fixture();
        let mut open = OpenList::new();
        assert_eq!(format!("{open:?}"), "OpenList { len: 0, best: None }");

        open.push(entries[0].0.clone(), Priority::new(4.0, 1, entries[0].1));
        open.push(entries[1].0.clone(), Priority::new(2.0, 1, entries[1].1));
        let rendered = format!("{open:?}");
        assert!(rendered.starts_with("OpenList { len: 2, best: Some(Priority {"));
        assert!(rendered.contains(&format!("node: {:?}", entries[1].1)));
    }

    #[test]
    fn test_state_table() {
        let (_, entries) = fixture();
        let mut closed = StateTable::new();
        let (board, first) = entries[0].clone();

        assert_eq!(closed.insert(board.clone(), first), None);
        assert_eq!(closed.insert(board.clone(), entries[1].1), Some(first));
        assert_eq!(closed.get(&board), Some(entries[1].1));
        assert_eq!(closed.len(), 1);

        closed.insert(entries[2].0.clone(), entries[2].1);
        let drained: Vec<_> = closed.drain().collect();
        assert_eq!(drained.len(), 2);
        assert!(closed.is_empty());
    }
}
