//! Orthogonal elbow paths for relation lines.
//!
//! The renderer draws each applicable relation as a four-point polyline:
//! source center, out to the vertical midline, across, into the target
//! center. The label midpoint carries the `sourceField → targetField` text.

use serde::Serialize;

use crate::layout::{TABLE_HEIGHT, TABLE_HIT_WIDTH};
use crate::model::{Position, PositionMap, Relation};

/// Polyline for one relation plus the point its field label hangs from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationPath {
    pub points: [(f64, f64); 4],
    pub label_at: (f64, f64),
}

/// Build the elbow path for a relation, or None when either endpoint has no
/// position in the map (dangling or not yet laid out: not rendered).
pub fn relation_path(relation: &Relation, positions: &PositionMap) -> Option<RelationPath> {
    let source = center(positions.get(&relation.source)?);
    let target = center(positions.get(&relation.target)?);
    let mid_x = (source.0 + target.0) / 2.0;

    Some(RelationPath {
        points: [source, (mid_x, source.1), (mid_x, target.1), target],
        label_at: (mid_x, (source.1 + target.1) / 2.0),
    })
}

fn center(pos: &Position) -> (f64, f64) {
    (pos.x + TABLE_HIT_WIDTH / 2.0, pos.y + TABLE_HEIGHT / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relation(source: &str, target: &str) -> Relation {
        Relation {
            source: source.to_string(),
            target: target.to_string(),
            source_field: "user_id".to_string(),
            target_field: "id".to_string(),
            is_fk: true,
        }
    }

    #[test]
    fn test_elbow_between_known_positions() {
        let mut positions = PositionMap::new();
        positions.insert("orders".to_string(), Position { x: 550.0, y: 50.0 });
        positions.insert("users".to_string(), Position { x: 50.0, y: 50.0 });

        let path = relation_path(&relation("orders", "users"), &positions).unwrap();

        // Centers sit at +(100, 50) inside each box
        assert_eq!(path.points[0], (650.0, 100.0));
        assert_eq!(path.points[3], (150.0, 100.0));
        // Elbow runs along the vertical midline
        assert_eq!(path.points[1], (400.0, 100.0));
        assert_eq!(path.points[2], (400.0, 100.0));
        assert_eq!(path.label_at, (400.0, 100.0));
    }

    #[test]
    fn test_vertical_offset_produces_two_corners() {
        let mut positions = PositionMap::new();
        positions.insert("a".to_string(), Position { x: 0.0, y: 0.0 });
        positions.insert("b".to_string(), Position { x: 500.0, y: 200.0 });

        let path = relation_path(&relation("a", "b"), &positions).unwrap();

        assert_eq!(path.points[0], (100.0, 50.0));
        assert_eq!(path.points[1], (350.0, 50.0));
        assert_eq!(path.points[2], (350.0, 250.0));
        assert_eq!(path.points[3], (600.0, 250.0));
    }

    #[test]
    fn test_missing_endpoint_yields_no_path() {
        let mut positions = PositionMap::new();
        positions.insert("orders".to_string(), Position { x: 0.0, y: 0.0 });

        assert!(relation_path(&relation("orders", "ghosts"), &positions).is_none());
    }
}
