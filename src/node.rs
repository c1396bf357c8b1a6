//! Search nodes and the arena that owns them.
//!
//! Nodes refer to their parent by index into a [`NodeArena`], so a whole
//! search tree is one `Vec` that is dropped in bulk when the run ends.

use std::hash::{Hash, Hasher};
use std::ops::Index;

use crate::board::Board;
use crate::config::Weight;

/// Index of a node inside its [`NodeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A board reached along some path, with that path's cost bookkeeping.
///
/// Identity is the board alone: two nodes holding the same board are the same
/// state even when their costs or parents differ.
#[derive(Clone, Debug)]
pub struct SearchNode {
    board: Board,
    g: u32,
    h: u32,
    parent: Option<NodeId>,
}

impl SearchNode {
    pub fn root(board: Board, h: u32) -> Self {
        Self {
            board,
            g: 0,
            h,
            parent: None,
        }
    }

    /// A node one move beyond `parent`.
    pub fn child(parent_id: NodeId, parent: &SearchNode, board: Board, h: u32) -> Self {
        Self {
            board,
            g: parent.g + 1,
            h,
            parent: Some(parent_id),
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Moves taken from the root.
    #[inline]
    pub fn g(&self) -> u32 {
        self.g
    }

    /// Heuristic estimate of the moves still needed.
    #[inline]
    pub fn h(&self) -> u32 {
        self.h
    }

    /// `g + h`, a lower bound on any solution through this node.
    #[inline]
    pub fn f(&self) -> u32 {
        self.g + self.h
    }

    /// `g + w·h`, the ordering key of the weighted searches.
    #[inline]
    pub fn weighted_f(&self, weight: Weight) -> f64 {
        f64::from(self.g) + weight.get() * f64::from(self.h)
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
    }
}

impl Eq for SearchNode {}

impl Hash for SearchNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.board.hash(state);
    }
}

/// Dense store of every node created during one run.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: SearchNode) -> NodeId {
        debug_assert!(
            node.parent.map_or(true, |parent| self[parent].g < node.g),
            "g must increase along parent links"
        );
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Boards from the root to `id`, inclusive.
    pub fn path_to(&self, id: NodeId) -> Vec<Board> {
        let mut path = Vec::with_capacity(self[id].g as usize + 1);
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = &self[current];
            path.push(node.board.clone());
            cursor = node.parent;
        }
        path.reverse();
        path
    }
}

impl Index<NodeId> for NodeArena {
    type Output = SearchNode;

    fn index(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.index()]
    }
}
