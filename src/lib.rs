//! Reconstruct branch-and-bound search trees from tabular node dumps.
//!
//! Each CSV file describes one solved optimization instance, one row per
//! search-tree node. The domain layer rebuilds the parent/child structure
//! and keeps the nodes where branching happened; the infrastructure layer
//! turns directories of dumps into rows.

use std::collections::BTreeMap;
use std::path::Path;

pub mod cli;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{
    BranchNode, DomainError, FieldValue, InternalNodes, NodeId, Row, SearchTree, TreeBuilder,
};
pub use infrastructure::{CsvDirectorySource, InfraError, InfraResult, RowSource};

/// Load every node table under `dir` and keep the branching nodes of each.
///
/// One entry per table, keyed by the table's path relative to `dir`. Tables
/// are independent and processed in parallel.
pub fn load_forests(dir: impl AsRef<Path>) -> InfraResult<BTreeMap<String, InternalNodes>> {
    let tables = CsvDirectorySource::new(dir.as_ref()).load()?;
    let builder = TreeBuilder::new();
    Ok(builder.process_all(&tables)?)
}
