//! Row contract shared between the domain layer and row sources.
//!
//! A row source delivers one `Row` per tree node. Three field names are
//! reserved for tree construction; every other field rides along as a
//! feature of the node.

use std::collections::BTreeMap;
use std::fmt;

/// Column holding the node's own id.
pub const NODE_ID_FIELD: &str = "node_number";
/// Column holding the id the row declares as its parent.
pub const PARENT_ID_FIELD: &str = "parent_node_number";
/// Column holding the node's bound value.
pub const VALUE_FIELD: &str = "value";

/// Field names consumed by tree construction itself.
pub const RESERVED_FIELDS: [&str; 3] = [NODE_ID_FIELD, PARENT_ID_FIELD, VALUE_FIELD];

/// A single cell as delivered by a row source.
///
/// Sources infer the narrowest type that parses: integer, then float,
/// then text.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Parse a raw cell into its narrowest type.
    pub fn parse(raw: &str) -> Self {
        if let Ok(i) = raw.parse::<i64>() {
            return FieldValue::Int(i);
        }
        if let Ok(f) = raw.parse::<f64>() {
            return FieldValue::Float(f);
        }
        FieldValue::Text(raw.to_string())
    }

    /// Integer view of the cell. Floats with no fractional part qualify,
    /// since some writers emit id columns as floats.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            FieldValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    /// Numeric view of the cell.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Int(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            FieldValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One record of a node table: named fields, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: BTreeMap<String, FieldValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from `(name, value)` pairs. Later duplicates win.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, FieldValue)>,
        K: Into<String>,
    {
        let mut row = Self::new();
        for (name, value) in pairs {
            row.insert(name, value);
        }
        row
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// All fields, in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Every field not in [`RESERVED_FIELDS`]: the node's feature payload.
    pub fn feature_fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields()
            .filter(|(name, _)| !RESERVED_FIELDS.contains(name))
    }
}
