//! Row sources: where node tables come from.
//!
//! The domain layer only ever sees materialized [`Row`]s; enumeration,
//! encodings, and tabular decoding all live here.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::domain::{FieldValue, Row};
use crate::infrastructure::error::{InfraError, InfraResult};
use crate::util::path::PathExt;

/// Delivers named node tables, one ordered row sequence per table.
pub trait RowSource: Send + Sync {
    /// Load every table this source knows about.
    fn load(&self) -> InfraResult<BTreeMap<String, Vec<Row>>>;
}

/// Real row source: a directory of CSV node dumps, one file per solved
/// instance.
///
/// The header row names the fields; cells are type-inferred (integer, then
/// float, then text). Table names are paths relative to the root, so dumps
/// in subdirectories cannot shadow each other.
#[derive(Debug, Clone)]
pub struct CsvDirectorySource {
    root: PathBuf,
}

impl CsvDirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[instrument(level = "debug", skip(self))]
    fn scan(&self) -> InfraResult<BTreeMap<String, Vec<Row>>> {
        let mut tables = BTreeMap::new();

        for entry in WalkDir::new(&self.root) {
            let entry = entry.map_err(|e| {
                let reason = e.to_string();
                match e.into_io_error() {
                    Some(io) => {
                        InfraError::io(format!("scanning {}", self.root.display()), io)
                    }
                    None => InfraError::InvalidSource {
                        path: self.root.clone(),
                        reason,
                    },
                }
            })?;

            if entry.file_type().is_file() && entry.path().is_node_table() {
                let name = table_name(&self.root, entry.path());
                let rows = load_table(entry.path())?;
                debug!(table = %name, rows = rows.len(), "loaded node table");
                tables.insert(name, rows);
            }
        }

        Ok(tables)
    }
}

impl RowSource for CsvDirectorySource {
    fn load(&self) -> InfraResult<BTreeMap<String, Vec<Row>>> {
        if !self.root.exists() {
            return Err(InfraError::DirectoryNotFound(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(InfraError::InvalidSource {
                path: self.root.clone(),
                reason: "not a directory".to_string(),
            });
        }

        self.scan()
    }
}

/// Read one CSV node table into rows, in file order.
#[instrument(level = "debug")]
pub fn load_table(path: &Path) -> InfraResult<Vec<Row>> {
    if !path.is_file() {
        return Err(InfraError::FileNotFound(path.to_path_buf()));
    }

    let mut reader = csv::Reader::from_path(path).map_err(|e| InfraError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let headers = reader
        .headers()
        .map_err(|e| InfraError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| InfraError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut row = Row::new();
        for (name, cell) in headers.iter().zip(record.iter()) {
            row.insert(name, FieldValue::parse(cell));
        }
        rows.push(row);
    }

    Ok(rows)
}

fn table_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}
