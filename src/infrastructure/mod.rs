//! Infrastructure layer: row-source implementations
//!
//! This layer turns on-disk node dumps into the rows the domain consumes.

pub mod error;
pub mod source;

pub use error::{InfraError, InfraResult};
pub use source::{load_table, CsvDirectorySource, RowSource};
