//! Initial diagram placement for a schema snapshot.
//!
//! Runs once per snapshot: connected tables radiate rightward from the
//! most-connected seeds, isolated tables fill a grid underneath. Drags
//! afterwards touch individual entries only, never this computation.

mod analysis;
mod placement;

pub use analysis::Connectivity;

use log::debug;

use crate::graph::Snapshot;
use crate::model::PositionMap;

/// Rendered table box geometry, shared with the embedding renderer.
pub const TABLE_WIDTH: f64 = 250.0;
pub const TABLE_HEIGHT: f64 = 100.0;
/// Narrower box used for marquee hit-tests and relation line anchors.
pub const TABLE_HIT_WIDTH: f64 = 200.0;
/// Base gap between levels' rows and independent clusters.
pub const SPACING: f64 = 50.0;
/// Horizontal step per foreign-key level.
pub const LEVEL_INDENT: f64 = 500.0;
/// Tighter vertical advance between a parent's stacked children.
pub const CHILD_SPACING: f64 = SPACING * 0.6;

/// Layout configuration and computation.
pub struct LayoutEngine {
    /// Width available for the unconnected-table grid.
    pub container_width: f64,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self {
            container_width: 1000.0,
        }
    }
}

impl LayoutEngine {
    /// Compute a complete position map: exactly one entry per table in the
    /// snapshot. An empty snapshot yields an empty map.
    pub fn layout(&self, snapshot: &Snapshot) -> PositionMap {
        let conn = Connectivity::build(snapshot);
        let mut positions = PositionMap::new();

        let cluster_bottom = placement::place_connected(&conn, &mut positions);
        placement::place_unconnected(&conn, cluster_bottom, self.container_width, &mut positions);

        debug!(
            "laid out {} connected and {} isolated tables",
            conn.connected.len(),
            conn.unconnected.len()
        );

        positions
    }
}
