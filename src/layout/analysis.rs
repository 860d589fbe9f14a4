//! Connectivity analysis over the snapshot's relation graph.

use std::collections::HashMap;

use crate::graph::Snapshot;

/// Undirected view of the applicable relations, used to seed placement.
///
/// Neighbor lists are insertion-ordered and de-duplicated per partner;
/// connection counts tally every incident relation endpoint, so a table pair
/// joined by two foreign keys counts twice on each side.
#[derive(Debug, Default)]
pub struct Connectivity {
    pub neighbors: HashMap<String, Vec<String>>,
    pub connection_count: HashMap<String, usize>,
    /// Tables with at least one edge, sorted by descending connection count
    /// (stable: snapshot order breaks ties).
    pub connected: Vec<String>,
    /// Tables with no edges, in the same sorted order.
    pub unconnected: Vec<String>,
}

impl Connectivity {
    pub fn build(snapshot: &Snapshot) -> Self {
        let mut neighbors: HashMap<String, Vec<String>> = HashMap::new();
        let mut connection_count: HashMap<String, usize> = HashMap::new();

        for table in &snapshot.tables {
            neighbors.insert(table.name.clone(), Vec::new());
            connection_count.insert(table.name.clone(), 0);
        }

        for relation in snapshot.applicable_relations() {
            push_unique(neighbors.get_mut(&relation.source), &relation.target);
            push_unique(neighbors.get_mut(&relation.target), &relation.source);
            *connection_count.entry(relation.source.clone()).or_insert(0) += 1;
            *connection_count.entry(relation.target.clone()).or_insert(0) += 1;
        }

        let mut sorted: Vec<String> = snapshot.tables.iter().map(|t| t.name.clone()).collect();
        sorted.sort_by_key(|name| std::cmp::Reverse(connection_count[name]));

        let (connected, unconnected) = sorted
            .into_iter()
            .partition(|name| connection_count[name] > 0);

        Self {
            neighbors,
            connection_count,
            connected,
            unconnected,
        }
    }
}

fn push_unique(list: Option<&mut Vec<String>>, name: &str) {
    if let Some(list) = list {
        if !list.iter().any(|n| n == name) {
            list.push(name.to_string());
        }
    }
}
