//! Tree builder: reconstructs search trees from flat node tables.

use std::collections::{BTreeMap, HashSet};

use generational_arena::Index;
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::domain::error::DomainError;
use crate::domain::row::{
    FieldValue, Row, NODE_ID_FIELD, PARENT_ID_FIELD, RESERVED_FIELDS, VALUE_FIELD,
};
use crate::domain::tree::{BranchNode, InternalNodes, NodeId, SearchTree};

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;

/// Reconstructs a tree (or forest) per table and filters it down to the
/// nodes where branching happened.
pub struct TreeBuilder {
    reserved: HashSet<&'static str>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            reserved: RESERVED_FIELDS.into_iter().collect(),
        }
    }

    /// Reconstruct every node of one table.
    ///
    /// Two passes over `rows`: the first constructs a [`BranchNode`] per row
    /// and records the declared parent id, the second links each node into
    /// its parent's child list in the same row order. A parent id that
    /// matches no node in the table marks a root (or a subtree whose parent
    /// was pruned from the dump) and is skipped.
    ///
    /// Duplicate node ids and rows missing one of the reserved fields are
    /// rejected. A row that names itself as parent is accepted and yields a
    /// node that is its own child; anything that walks such a tree
    /// child-first will not terminate.
    #[instrument(level = "debug", skip(self, rows))]
    pub fn build(&self, rows: &[Row], source_name: &str) -> TreeResult<SearchTree> {
        let mut tree = SearchTree::new();
        let mut declared_parents: Vec<(NodeId, NodeId)> = Vec::with_capacity(rows.len());

        // Pass 1: construct all nodes, no links yet.
        for row in rows {
            let id = self.require_int(row, NODE_ID_FIELD, source_name)?;
            let parent_id = self.require_int(row, PARENT_ID_FIELD, source_name)?;
            let value = self.require_float(row, VALUE_FIELD, source_name)?;

            if tree.contains(id) {
                return Err(DomainError::DuplicateNodeId {
                    table: source_name.to_string(),
                    id,
                });
            }

            let features: BTreeMap<String, FieldValue> = row
                .fields()
                .filter(|(name, _)| !self.reserved.contains(name))
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect();

            tree.insert_node(BranchNode::new(source_name, id, features, value));
            declared_parents.push((id, parent_id));
        }

        // Pass 2: link children, same order as pass 1.
        for (id, parent_id) in declared_parents {
            if let (Some(child_idx), Some(parent_idx)) = (tree.lookup(id), tree.lookup(parent_id)) {
                tree.add_child(parent_idx, child_idx);
            }
        }

        debug!(source = source_name, nodes = tree.len(), "reconstructed table");
        Ok(tree)
    }

    /// Keep only the mapping entries whose node has at least one child.
    ///
    /// Pure: neither `tree` nor any node is mutated, so applying the filter
    /// to its own output returns the same mapping.
    #[instrument(level = "debug", skip(self, tree, nodes))]
    pub fn filter_internal(
        &self,
        tree: &SearchTree,
        nodes: &BTreeMap<NodeId, Index>,
    ) -> BTreeMap<NodeId, Index> {
        nodes
            .iter()
            .filter(|(_, &idx)| tree.node(idx).is_some_and(BranchNode::is_internal))
            .map(|(&id, &idx)| (id, idx))
            .collect()
    }

    /// Unit of work per table: build, then keep the branching nodes.
    #[instrument(level = "debug", skip(self, rows))]
    pub fn process_source(&self, rows: &[Row], source_name: &str) -> TreeResult<InternalNodes> {
        let tree = self.build(rows, source_name)?;
        let internal = self.filter_internal(&tree, &tree.entries());
        Ok(InternalNodes::new(tree, internal))
    }

    /// Process every table independently, one result per table name.
    ///
    /// Tables share no node-id space and no state, so they are processed in
    /// parallel. The first failing table aborts the whole call.
    #[instrument(level = "debug", skip(self, sources))]
    pub fn process_all(
        &self,
        sources: &BTreeMap<String, Vec<Row>>,
    ) -> TreeResult<BTreeMap<String, InternalNodes>> {
        sources
            .par_iter()
            .map(|(name, rows)| Ok((name.clone(), self.process_source(rows, name)?)))
            .collect()
    }

    fn require<'a>(
        &self,
        row: &'a Row,
        field: &'static str,
        source: &str,
    ) -> TreeResult<&'a FieldValue> {
        row.get(field).ok_or_else(|| DomainError::MissingField {
            table: source.to_string(),
            field,
        })
    }

    fn require_int(&self, row: &Row, field: &'static str, source: &str) -> TreeResult<NodeId> {
        let value = self.require(row, field, source)?;
        value.as_int().ok_or_else(|| DomainError::FieldType {
            table: source.to_string(),
            field,
            expected: "an integer",
            found: value.to_string(),
        })
    }

    fn require_float(&self, row: &Row, field: &'static str, source: &str) -> TreeResult<f64> {
        let value = self.require(row, field, source)?;
        value.as_float().ok_or_else(|| DomainError::FieldType {
            table: source.to_string(),
            field,
            expected: "numeric",
            found: value.to_string(),
        })
    }
}
