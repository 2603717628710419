//! Arena-backed storage for reconstructed search trees.
//!
//! All nodes of one table live in a generational arena; parent/child links
//! are arena indices, so a node can sit in the id map and in its parent's
//! child list without shared-ownership plumbing.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::row::FieldValue;

/// Node identifier within one table.
pub type NodeId = i64;

/// One node of a reconstructed branch-and-bound tree.
#[derive(Debug, Clone)]
pub struct BranchNode {
    /// Name of the table the node was loaded from. Provenance only.
    pub source: String,
    /// Id of this node within its table.
    pub id: NodeId,
    /// Feature payload attached to the node's row, fixed at construction.
    pub features: BTreeMap<String, FieldValue>,
    /// Bound value reported by the solver.
    pub value: f64,
    /// Arena indices of resolved children, in row order.
    pub children: Vec<Index>,
}

impl BranchNode {
    pub fn new(
        source: impl Into<String>,
        id: NodeId,
        features: BTreeMap<String, FieldValue>,
        value: f64,
    ) -> Self {
        Self {
            source: source.into(),
            id,
            features,
            value,
            children: Vec::new(),
        }
    }

    /// Append a child link. Ordering is the caller's (row) order.
    pub fn add_child(&mut self, child: Index) {
        self.children.push(child);
    }

    /// A node that branched: it has at least one child.
    pub fn is_internal(&self) -> bool {
        !self.children.is_empty()
    }
}

impl fmt::Display for BranchNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} value={}", self.id, self.value)
    }
}

/// Every node reconstructed from one table, addressable by node id.
#[derive(Debug, Default)]
pub struct SearchTree {
    arena: Arena<BranchNode>,
    index: HashMap<NodeId, Index>,
}

impl SearchTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node and index it under its id.
    ///
    /// Callers are expected to reject duplicate ids beforehand; a repeated
    /// id would re-point the index entry while the first node stays in the
    /// arena.
    #[instrument(level = "trace", skip(self, node))]
    pub fn insert_node(&mut self, node: BranchNode) -> Index {
        let id = node.id;
        let idx = self.arena.insert(node);
        self.index.insert(id, idx);
        idx
    }

    /// Append `child` to `parent`'s child list. Unknown indices are ignored.
    #[instrument(level = "trace", skip(self))]
    pub fn add_child(&mut self, parent: Index, child: Index) {
        if let Some(parent) = self.arena.get_mut(parent) {
            parent.add_child(child);
        }
    }

    pub fn lookup(&self, id: NodeId) -> Option<Index> {
        self.index.get(&id).copied()
    }

    pub fn node(&self, idx: Index) -> Option<&BranchNode> {
        self.arena.get(idx)
    }

    pub fn get(&self, id: NodeId) -> Option<&BranchNode> {
        self.lookup(id).and_then(|idx| self.node(idx))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The full id → index mapping, ordered by id.
    #[instrument(level = "trace", skip(self))]
    pub fn entries(&self) -> BTreeMap<NodeId, Index> {
        self.index.iter().map(|(&id, &idx)| (id, idx)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &BranchNode)> {
        self.index
            .iter()
            .filter_map(move |(&id, &idx)| self.arena.get(idx).map(|node| (id, node)))
    }

    /// Indices of nodes that are nobody's child, ordered by node id.
    ///
    /// Covers true roots and orphan subtree roots whose parent was pruned
    /// from the table.
    #[instrument(level = "debug", skip(self))]
    pub fn roots(&self) -> Vec<Index> {
        let children: HashSet<Index> = self
            .arena
            .iter()
            .flat_map(|(_, node)| node.children.iter().copied())
            .collect();

        self.entries()
            .into_values()
            .filter(|idx| !children.contains(idx))
            .collect()
    }
}

/// Per-table result handed to callers: the full reconstruction plus the
/// ids of the nodes that branched.
///
/// Leaves stay reachable through their retained parents but never appear
/// as top-level entries.
#[derive(Debug)]
pub struct InternalNodes {
    tree: SearchTree,
    internal: BTreeMap<NodeId, Index>,
}

impl InternalNodes {
    pub fn new(tree: SearchTree, internal: BTreeMap<NodeId, Index>) -> Self {
        Self { tree, internal }
    }

    /// The underlying reconstruction, including leaves.
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// The retained id → index mapping.
    pub fn internal(&self) -> &BTreeMap<NodeId, Index> {
        &self.internal
    }

    /// Look up a retained node by id. Leaves resolve to `None`.
    pub fn get(&self, id: NodeId) -> Option<&BranchNode> {
        self.internal.get(&id).and_then(|&idx| self.tree.node(idx))
    }

    pub fn len(&self) -> usize {
        self.internal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.internal.is_empty()
    }

    /// Retained nodes in id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &BranchNode)> {
        self.internal
            .iter()
            .filter_map(move |(&id, &idx)| self.tree.node(idx).map(|node| (id, node)))
    }
}
