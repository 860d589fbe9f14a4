//! Schema snapshot assembly: the relation extractor and the applicability
//! filter consumed by layout and rendering.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::model::{Relation, Table};
use crate::sql::parse_create_table;

/// One table's `SHOW CREATE TABLE` output, as the schema source supplies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DdlStatement {
    pub table_name: String,
    #[serde(rename = "createSQL")]
    pub create_sql: String,
}

/// The immutable product of one schema-learning cycle.
///
/// `relations` holds every foreign-key edge in table processing order, then
/// declaration order within a table, with no de-duplication. Edges naming a
/// table outside the snapshot stay recorded here; consumers go through
/// [`Snapshot::applicable_relations`], which excludes them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tables: Vec<Table>,
    pub relations: Vec<Relation>,
}

impl Snapshot {
    /// Parse all statements of a schema into one snapshot.
    ///
    /// A statement the parser rejects outright skips that table; the rest of
    /// the snapshot is unaffected. A table parsing to zero fields is kept.
    pub fn learn(statements: &[DdlStatement]) -> Self {
        let mut tables = Vec::new();
        let mut relations = Vec::new();

        for stmt in statements {
            match parse_create_table(&stmt.table_name, &stmt.create_sql) {
                Ok((table, rels)) => {
                    if table.fields.is_empty() {
                        warn!("table `{}` parsed with no fields", table.name);
                    }
                    tables.push(table);
                    relations.extend(rels);
                }
                Err(e) => {
                    warn!("skipping table `{}`: {}", stmt.table_name, e);
                }
            }
        }

        Snapshot { tables, relations }
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.tables.iter().any(|t| t.name == name)
    }

    /// Relations whose endpoints are both present in the snapshot. These are
    /// the only edges layout and rendering may consume; the rest are
    /// structural records of dangling references.
    pub fn applicable_relations(&self) -> Vec<&Relation> {
        let names: HashSet<&str> = self.tables.iter().map(|t| t.name.as_str()).collect();
        self.relations
            .iter()
            .filter(|r| names.contains(r.source.as_str()) && names.contains(r.target.as_str()))
            .collect()
    }
}
