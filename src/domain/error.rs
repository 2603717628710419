//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::tree::NodeId;

/// Domain errors represent violations of the node-table contract.
/// These are independent of how the table was loaded.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("missing required field '{field}' in table {table}")]
    MissingField { table: String, field: &'static str },

    #[error("field '{field}' in table {table} is not {expected}: '{found}'")]
    FieldType {
        table: String,
        field: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("duplicate node id {id} in table {table}")]
    DuplicateNodeId { table: String, id: NodeId },
}
