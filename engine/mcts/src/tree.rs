//! Transposition table holding all search statistics of one engine.
//!
//! The search builds an implicit game tree: every node is addressed by the
//! [`StateKey`] of its canonical board rather than by parent/child links, so
//! transpositions reached through different move orders share statistics.

use games_gomoku::StateKey;
use rustc_hash::FxHashMap;

use crate::node::SearchNode;

/// Map from canonical-board fingerprint to node statistics.
#[derive(Debug, Default)]
pub struct SearchTable {
    nodes: FxHashMap<StateKey, SearchNode>,
}

/// Summary of a table's contents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStats {
    pub total_nodes: usize,
    pub terminal_nodes: usize,
    /// N(s) at the root, 0 if the root is not in the table.
    pub root_visits: u32,
    /// Visit-weighted mean Q over the root's edges.
    pub root_value: f32,
}

impl SearchTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, key: &StateKey) -> Option<&SearchNode> {
        self.nodes.get(key)
    }

    #[inline]
    pub fn get_mut(&mut self, key: &StateKey) -> Option<&mut SearchNode> {
        self.nodes.get_mut(key)
    }

    #[inline]
    pub fn contains(&self, key: &StateKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn insert(&mut self, key: StateKey, node: SearchNode) {
        self.nodes.insert(key, node);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn stats(&self, root: &StateKey) -> TableStats {
        let terminal_nodes = self.nodes.values().filter(|n| n.is_terminal()).count();
        let (root_visits, root_value) = match self.nodes.get(root) {
            Some(node) if node.visits > 0 => {
                let weighted: f32 = node
                    .edges
                    .iter()
                    .map(|e| e.q * e.visits as f32)
                    .sum();
                (node.visits, weighted / node.visits as f32)
            }
            Some(node) => (node.visits, 0.0),
            None => (0, 0.0),
        };

        TableStats {
            total_nodes: self.nodes.len(),
            terminal_nodes,
            root_visits,
            root_value,
        }
    }
}
