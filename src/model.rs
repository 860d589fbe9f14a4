//! Core data model: tables, fields, relations, positions.
//!
//! Field names use their JavaScript spellings on the wire (`isPrimary`,
//! `sourceField`, ...) so the embedding UI consumes snapshots without a
//! mapping layer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reference from a foreign-key column to the table and field it points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRef {
    pub table: String,
    pub field: String,
}

/// One column of a table, as parsed from its CREATE TABLE statement.
///
/// Immutable once parsed; identified by `name` within its owning table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    /// Type text as written, parameters reassembled: `varchar(255)`,
    /// `decimal(10,2)`.
    #[serde(rename = "type")]
    pub typ: String,
    pub is_primary: bool,
    pub is_foreign: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<FieldRef>,
}

/// A table and its ordered fields, produced by one parser invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub fields: Vec<Field>,
}

/// Directed foreign-key edge: `source` holds the key, `target` is referenced.
///
/// Multiple edges between the same pair of tables are allowed, one per
/// foreign-key column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub source: String,
    pub target: String,
    pub source_field: String,
    pub target_field: String,
    #[serde(rename = "isFK")]
    pub is_fk: bool,
}

/// Top-left corner of a table box in model space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Positions keyed by table name. A table with no entry is not rendered.
pub type PositionMap = HashMap<String, Position>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_wire_format() {
        let field = Field {
            name: "user_id".to_string(),
            typ: "int".to_string(),
            is_primary: false,
            is_foreign: true,
            references: Some(FieldRef {
                table: "users".to_string(),
                field: "id".to_string(),
            }),
        };
        let json = serde_json::to_value(&field).unwrap();

        assert_eq!(json["type"], "int");
        assert_eq!(json["isPrimary"], false);
        assert_eq!(json["isForeign"], true);
        assert_eq!(json["references"]["table"], "users");
    }

    #[test]
    fn test_references_omitted_when_absent() {
        let field = Field {
            name: "id".to_string(),
            typ: "int".to_string(),
            is_primary: true,
            is_foreign: false,
            references: None,
        };
        let json = serde_json::to_value(&field).unwrap();

        assert!(json.get("references").is_none());
    }

    #[test]
    fn test_relation_wire_format() {
        let rel = Relation {
            source: "orders".to_string(),
            target: "users".to_string(),
            source_field: "user_id".to_string(),
            target_field: "id".to_string(),
            is_fk: true,
        };
        let json = serde_json::to_value(&rel).unwrap();

        assert_eq!(json["sourceField"], "user_id");
        assert_eq!(json["targetField"], "id");
        assert_eq!(json["isFK"], true);
    }
}
