//! Column, schema, and row value model.
//!
//! A table's schema is inferred fresh on every read by inspecting the
//! content; nothing here is cached or persisted. Row position `i` always
//! corresponds to schema column `i` for the duration of one read.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of primitive types a column can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Text,
    Integer,
    Float,
    Boolean,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Text => "text",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// A single dynamically typed cell value.
///
/// `Null` is a value, not a type: any column may hold it (a structured
/// record with a missing field, a short delimited record).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl Value {
    /// The declared type this value satisfies, or `None` for `Null`.
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Value::Null => None,
            Value::Text(_) => Some(ValueType::Text),
            Value::Integer(_) => Some(ValueType::Integer),
            Value::Float(_) => Some(ValueType::Float),
            Value::Boolean(_) => Some(ValueType::Boolean),
        }
    }
}

/// One produced row; same length and order as the schema it was read under.
pub type Row = Vec<Value>;

/// A named, typed column. The name is stored as given and matched
/// case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub value_type: ValueType,
}

impl Column {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Ordered column list inferred from a table's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TableSchema {
    columns: Vec<Column>,
}

impl TableSchema {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of the first column whose name matches case-insensitively.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.matches(name))
    }
}

/// What a projection consumer asks for: a column by name, with the type it
/// expects that column to carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnReference {
    pub name: String,
    pub value_type: ValueType,
}

impl ColumnReference {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_of_is_case_insensitive_and_first_match_wins() {
        let schema = TableSchema::new(vec![
            Column::new("Id", ValueType::Integer),
            Column::new("name", ValueType::Text),
            Column::new("NAME", ValueType::Text),
        ]);

        assert_eq!(schema.index_of("id"), Some(0));
        assert_eq!(schema.index_of("Name"), Some(1));
        assert_eq!(schema.index_of("missing"), None);
    }

    #[test]
    fn column_names_are_stored_as_given() {
        let column = Column::new("MixedCase", ValueType::Text);
        assert_eq!(column.name, "MixedCase");
        assert!(column.matches("mixedcase"));
    }

    #[test]
    fn null_satisfies_no_declared_type() {
        assert_eq!(Value::Null.value_type(), None);
        assert_eq!(Value::Integer(3).value_type(), Some(ValueType::Integer));
    }
}
