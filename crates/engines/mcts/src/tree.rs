//! Search memory: per-position statistics keyed by canonical board.
//!
//! Canonical boards make transpositions share statistics, and since a board
//! is always seen from the side to move, a single table serves both sides.

use std::collections::HashMap;
use std::hash::Hash;

/// Statistics for one action out of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeStats {
    /// Times this action was taken during search
    pub visits: u32,
    /// Mean value for the side to move at the parent
    pub q: f32,
}

/// Statistics for one canonical position.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStats {
    /// Times the search passed through this node (leaf expansion excluded)
    pub visits: u32,
    /// Terminal value from the side to move, 0.0 while running
    pub terminal: f32,
    /// Legality mask cached at expansion
    pub valid: Vec<bool>,
    /// One entry per action, indexed like the action space
    pub edges: Vec<EdgeStats>,
}

impl NodeStats {
    pub fn new(terminal: f32, valid: Vec<bool>) -> Self {
        let edges = vec![EdgeStats::default(); valid.len()];
        Self {
            visits: 0,
            terminal,
            valid,
            edges,
        }
    }

    pub fn legal_count(&self) -> usize {
        self.valid.iter().filter(|&&v| v).count()
    }
}

/// Search tree stored as a transposition table.
#[derive(Debug, Clone)]
pub struct SearchTree<B: Hash + Eq> {
    nodes: HashMap<B, NodeStats>,
}

impl<B: Hash + Eq> SearchTree<B> {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    #[inline]
    pub fn get(&self, board: &B) -> Option<&NodeStats> {
        self.nodes.get(board)
    }

    #[inline]
    pub fn get_mut(&mut self, board: &B) -> Option<&mut NodeStats> {
        self.nodes.get_mut(board)
    }

    pub fn insert(&mut self, board: B, node: NodeStats) {
        self.nodes.insert(board, node);
    }

    /// Number of positions stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Sum of node visits over the whole table.
    pub fn total_visits(&self) -> u64 {
        self.nodes.values().map(|n| n.visits as u64).sum()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl<B: Hash + Eq> Default for SearchTree<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Hash + Eq> PartialEq for SearchTree<B> {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}
