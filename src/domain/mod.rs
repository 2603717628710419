//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI).

pub mod builder;
pub mod error;
pub mod row;
pub mod tree;

pub use builder::{TreeBuilder, TreeResult};
pub use error::DomainError;
pub use row::{FieldValue, Row, NODE_ID_FIELD, PARENT_ID_FIELD, RESERVED_FIELDS, VALUE_FIELD};
pub use tree::{BranchNode, InternalNodes, NodeId, SearchTree};
