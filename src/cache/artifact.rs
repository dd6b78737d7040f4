//! Cached artifact payloads and the validity predicate
//!
//! The cache treats artifacts as opaque. The only thing it ever asks of one is
//! whether it is *usable*: see [`is_valid`], which every tier query goes
//! through.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Tabular payload: named columns and rows of cells
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Artifact>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row
    pub fn with_row(mut self, row: Vec<Artifact>) -> Self {
        self.rows.push(row);
        self
    }

    /// A table without columns or without rows holds nothing
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.rows.is_empty()
    }
}

/// A pipeline stage output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Artifact {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Artifact>),
    Map(BTreeMap<String, Artifact>),
    Table(Table),
}

impl Artifact {
    /// Whether this value counts as a finished stage result.
    ///
    /// Only containers are checked for emptiness; scalars are usable
    /// regardless of value, so `Int(0)` and `Text("")` both count.
    pub fn is_usable(&self) -> bool {
        match self {
            Self::Null => false,
            Self::List(items) => !items.is_empty(),
            Self::Map(entries) => !entries.is_empty(),
            Self::Table(table) => !table.is_empty(),
            Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::Text(_) => true,
        }
    }

    /// Whether every float in the artifact, however deeply nested, is finite.
    ///
    /// JSON cannot carry NaN or infinities, so only finite artifacts persist.
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Float(f) => f.is_finite(),
            Self::List(items) => items.iter().all(Self::is_finite),
            Self::Map(entries) => entries.values().all(Self::is_finite),
            Self::Table(table) => table.rows.iter().flatten().all(Self::is_finite),
            Self::Null | Self::Bool(_) | Self::Int(_) | Self::Text(_) => true,
        }
    }

    /// Short name of the variant, for listings
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Table(_) => "table",
        }
    }

    /// Build an artifact from a plain JSON document.
    ///
    /// Integral numbers become `Int`, every other number `Float`.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => n.as_f64().map_or(Self::Null, Self::Float),
            },
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from_json).collect()),
            Value::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Render as a plain JSON document. Tables become `{columns, rows}`.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Self::Text(s) => Value::String(s.clone()),
            Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Self::Table(table) => serde_json::json!({
                "columns": table.columns,
                "rows": table
                    .rows
                    .iter()
                    .map(|row| row.iter().map(Self::to_json).collect::<Vec<_>>())
                    .collect::<Vec<_>>(),
            }),
        }
    }
}

/// The single validity predicate shared by every tier query.
///
/// Absent values are invalid; present values defer to [`Artifact::is_usable`].
pub fn is_valid(value: Option<&Artifact>) -> bool {
    value.is_some_and(Artifact::is_usable)
}

impl From<bool> for Artifact {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Artifact {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Artifact {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Artifact {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Artifact {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<Artifact>> for Artifact {
    fn from(items: Vec<Artifact>) -> Self {
        Self::List(items)
    }
}

impl From<BTreeMap<String, Artifact>> for Artifact {
    fn from(entries: BTreeMap<String, Artifact>) -> Self {
        Self::Map(entries)
    }
}

impl From<Table> for Artifact {
    fn from(table: Table) -> Self {
        Self::Table(table)
    }
}
