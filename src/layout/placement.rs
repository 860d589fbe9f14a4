//! Recursive cluster placement and the wrapping grid for isolated tables.

use std::collections::HashSet;

use super::analysis::Connectivity;
use super::{CHILD_SPACING, LEVEL_INDENT, SPACING, TABLE_HEIGHT, TABLE_WIDTH};
use crate::model::{Position, PositionMap};

/// Place every connected table, one cluster at a time, seeds in connectivity
/// order. Returns the y cursor below the last cluster.
pub fn place_connected(conn: &Connectivity, positions: &mut PositionMap) -> f64 {
    let mut placed: HashSet<String> = HashSet::new();
    let mut cursor_y = SPACING;

    for name in &conn.connected {
        if placed.contains(name) {
            continue;
        }
        cursor_y = place_subtree(name, 0, cursor_y, conn, &mut placed, positions) + SPACING;
    }

    cursor_y
}

/// Place `name` at the given level, then its unplaced neighbors one level to
/// the right, stacked down a running y cursor. Already-placed tables are
/// never moved or revisited, which also breaks relation cycles. Returns the
/// lowest y the subtree consumed, at least one table height past `start_y`.
fn place_subtree(
    name: &str,
    level: usize,
    start_y: f64,
    conn: &Connectivity,
    placed: &mut HashSet<String>,
    positions: &mut PositionMap,
) -> f64 {
    if placed.contains(name) {
        return start_y;
    }
    placed.insert(name.to_string());

    positions.insert(
        name.to_string(),
        Position {
            x: level as f64 * LEVEL_INDENT + SPACING,
            y: start_y,
        },
    );

    let mut max_y = start_y;
    let mut child_y = start_y;

    if let Some(neighbors) = conn.neighbors.get(name) {
        for neighbor in neighbors {
            if placed.contains(neighbor) {
                continue;
            }
            child_y = place_subtree(neighbor, level + 1, child_y, conn, placed, positions);
            max_y = max_y.max(child_y);
            child_y += TABLE_HEIGHT + CHILD_SPACING;
        }
    }

    max_y.max(start_y + TABLE_HEIGHT)
}

/// Lay out unconnected tables in a left-to-right grid below the clusters,
/// wrapping before the row would overflow the container.
pub fn place_unconnected(
    conn: &Connectivity,
    cluster_bottom: f64,
    container_width: f64,
    positions: &mut PositionMap,
) {
    let mut x = SPACING;
    let mut y = cluster_bottom + SPACING * 2.0;

    for name in &conn.unconnected {
        if x + TABLE_WIDTH > container_width - SPACING {
            x = SPACING;
            y += TABLE_HEIGHT + CHILD_SPACING;
        }

        positions.insert(name.clone(), Position { x, y });
        x += TABLE_WIDTH + SPACING;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DdlStatement, Snapshot};
    use crate::model::PositionMap;

    fn snapshot(statements: &[(&str, &str)]) -> Snapshot {
        let stmts: Vec<DdlStatement> = statements
            .iter()
            .map(|(name, sql)| DdlStatement {
                table_name: name.to_string(),
                create_sql: sql.to_string(),
            })
            .collect();
        Snapshot::learn(&stmts)
    }

    #[test]
    fn test_seed_and_child_levels() {
        let snap = snapshot(&[
            ("users", "CREATE TABLE users (id INT PRIMARY KEY)"),
            (
                "orders",
                "CREATE TABLE orders (id INT PRIMARY KEY, user_id INT, FOREIGN KEY (user_id) REFERENCES users(id))",
            ),
        ]);

        let conn = Connectivity::build(&snap);
        let mut positions = PositionMap::new();
        place_connected(&conn, &mut positions);

        // Tie on connection count, so snapshot order seeds with users
        let users = positions["users"];
        let orders = positions["orders"];
        assert_eq!(users.x, SPACING);
        assert_eq!(orders.x, LEVEL_INDENT + SPACING);
        assert_eq!(users.y, orders.y);
    }

    #[test]
    fn test_siblings_stack_below_first_child() {
        let snap = snapshot(&[
            ("users", "CREATE TABLE users (id INT PRIMARY KEY)"),
            (
                "orders",
                "CREATE TABLE orders (id INT PRIMARY KEY, user_id INT, FOREIGN KEY (user_id) REFERENCES users(id))",
            ),
            (
                "reviews",
                "CREATE TABLE reviews (id INT PRIMARY KEY, user_id INT, FOREIGN KEY (user_id) REFERENCES users(id))",
            ),
        ]);

        let conn = Connectivity::build(&snap);
        let mut positions = PositionMap::new();
        place_connected(&conn, &mut positions);

        let orders = positions["orders"];
        let reviews = positions["reviews"];
        assert_eq!(orders.x, reviews.x);
        assert_eq!(reviews.y, orders.y + TABLE_HEIGHT + CHILD_SPACING);
    }

    #[test]
    fn test_cycle_terminates_and_places_once() {
        let snap = snapshot(&[
            (
                "a",
                "CREATE TABLE a (id INT PRIMARY KEY, b_id INT, FOREIGN KEY (b_id) REFERENCES b(id))",
            ),
            (
                "b",
                "CREATE TABLE b (id INT PRIMARY KEY, a_id INT, FOREIGN KEY (a_id) REFERENCES a(id))",
            ),
        ]);

        let conn = Connectivity::build(&snap);
        let mut positions = PositionMap::new();
        place_connected(&conn, &mut positions);

        assert_eq!(positions.len(), 2);
        assert_ne!(positions["a"].x, positions["b"].x);
    }

    #[test]
    fn test_clusters_separated_vertically() {
        let snap = snapshot(&[
            ("a", "CREATE TABLE a (id INT PRIMARY KEY)"),
            (
                "b",
                "CREATE TABLE b (id INT PRIMARY KEY, a_id INT, FOREIGN KEY (a_id) REFERENCES a(id))",
            ),
            ("x", "CREATE TABLE x (id INT PRIMARY KEY)"),
            (
                "y",
                "CREATE TABLE y (id INT PRIMARY KEY, x_id INT, FOREIGN KEY (x_id) REFERENCES x(id))",
            ),
        ]);

        let conn = Connectivity::build(&snap);
        let mut positions = PositionMap::new();
        place_connected(&conn, &mut positions);

        // First cluster consumes one table height from its start
        assert_eq!(positions["a"].y, SPACING);
        assert_eq!(positions["x"].y, SPACING + TABLE_HEIGHT + SPACING);
    }

    #[test]
    fn test_unconnected_grid_wraps() {
        let snap = snapshot(&[
            ("a", "CREATE TABLE a (id INT PRIMARY KEY)"),
            ("b", "CREATE TABLE b (id INT PRIMARY KEY)"),
            ("c", "CREATE TABLE c (id INT PRIMARY KEY)"),
            ("d", "CREATE TABLE d (id INT PRIMARY KEY)"),
        ]);

        let conn = Connectivity::build(&snap);
        let mut positions = PositionMap::new();
        // Room for three columns: 50 + 3*(250+50) = 950 < 1000 - 50 fails on 4th
        place_unconnected(&conn, 0.0, 1000.0, &mut positions);

        assert_eq!(positions["a"].x, SPACING);
        assert_eq!(positions["b"].x, SPACING + TABLE_WIDTH + SPACING);
        assert_eq!(positions["a"].y, positions["b"].y);
        // Fourth table would overflow, wraps to a new row
        assert_eq!(positions["d"].x, SPACING);
        assert_eq!(positions["d"].y, positions["a"].y + TABLE_HEIGHT + CHILD_SPACING);
    }
}
