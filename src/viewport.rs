//! Pointer-driven viewport: pan, zoom, table drag, marquee selection.
//!
//! Screen coordinates arrive relative to the canvas container; model
//! coordinates are what the position map stores. The two are related by
//! `model = (screen - pan) / scale`.

use std::collections::HashSet;

use crate::layout::{TABLE_HEIGHT, TABLE_HIT_WIDTH};
use crate::model::{Position, PositionMap};

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 2.0;
/// The stepped "+" button stops short of the wheel ceiling.
pub const BUTTON_MAX_SCALE: f64 = 1.0;
/// Fresh snapshots come up zoomed out.
pub const INITIAL_SCALE: f64 = 0.6;
const ZOOM_STEP: f64 = 0.1;

/// The active pointer gesture. Exactly one is in effect at a time; pointer-up
/// from any of them returns to `Idle`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Pointer position at grab minus the pan at grab, screen space.
    PanningCanvas { grab_x: f64, grab_y: f64 },
    /// Offset from the pointer to the table's top-left corner, model space.
    DraggingTable {
        table: String,
        offset_x: f64,
        offset_y: f64,
    },
    /// Rubber-band rectangle corners, model space.
    MarqueeSelecting {
        start_x: f64,
        start_y: f64,
        current_x: f64,
        current_y: f64,
    },
}

#[derive(Debug, Clone)]
pub struct Viewport {
    scale: f64,
    pan_x: f64,
    pan_y: f64,
    gesture: Gesture,
    selection: HashSet<String>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: INITIAL_SCALE,
            pan_x: 0.0,
            pan_y: 0.0,
            gesture: Gesture::Idle,
            selection: HashSet::new(),
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all state at once, as when a new snapshot replaces the diagram:
    /// no stale drag target or selection may survive the swap.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn pan(&self) -> (f64, f64) {
        (self.pan_x, self.pan_y)
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn selection(&self) -> &HashSet<String> {
        &self.selection
    }

    pub fn is_selected(&self, table: &str) -> bool {
        self.selection.contains(table)
    }

    /// The marquee rectangle as (left, top, right, bottom) in model space,
    /// while one is being tracked.
    pub fn marquee_rect(&self) -> Option<(f64, f64, f64, f64)> {
        match self.gesture {
            Gesture::MarqueeSelecting {
                start_x,
                start_y,
                current_x,
                current_y,
            } => Some((
                start_x.min(current_x),
                start_y.min(current_y),
                start_x.max(current_x),
                start_y.max(current_y),
            )),
            _ => None,
        }
    }

    pub fn screen_to_model(&self, screen_x: f64, screen_y: f64) -> (f64, f64) {
        (
            (screen_x - self.pan_x) / self.scale,
            (screen_y - self.pan_y) / self.scale,
        )
    }

    /// Pointer-down on a rendered table starts a drag. An unknown table name
    /// (snapshot swapped under the gesture) is a no-op.
    pub fn table_pointer_down(
        &mut self,
        table: &str,
        screen_x: f64,
        screen_y: f64,
        positions: &PositionMap,
    ) {
        let Some(pos) = positions.get(table) else {
            self.gesture = Gesture::Idle;
            return;
        };
        let (model_x, model_y) = self.screen_to_model(screen_x, screen_y);
        self.gesture = Gesture::DraggingTable {
            table: table.to_string(),
            offset_x: model_x - pos.x,
            offset_y: model_y - pos.y,
        };
    }

    /// Pointer-down on empty canvas. `marquee` picks rubber-band selection
    /// over panning; a non-`additive` press clears the selection either way.
    pub fn canvas_pointer_down(&mut self, screen_x: f64, screen_y: f64, additive: bool, marquee: bool) {
        if !additive {
            self.selection.clear();
        }
        if marquee {
            let (model_x, model_y) = self.screen_to_model(screen_x, screen_y);
            self.gesture = Gesture::MarqueeSelecting {
                start_x: model_x,
                start_y: model_y,
                current_x: model_x,
                current_y: model_y,
            };
        } else {
            self.gesture = Gesture::PanningCanvas {
                grab_x: screen_x - self.pan_x,
                grab_y: screen_y - self.pan_y,
            };
        }
    }

    /// Advance the active gesture. Dragging writes one entry of `positions`;
    /// marquee recomputes the selection; panning moves the canvas. Repeated
    /// calls with the same pointer position are idempotent.
    pub fn pointer_move(
        &mut self,
        screen_x: f64,
        screen_y: f64,
        additive: bool,
        positions: &mut PositionMap,
    ) {
        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::PanningCanvas { grab_x, grab_y } => {
                self.pan_x = screen_x - *grab_x;
                self.pan_y = screen_y - *grab_y;
            }
            Gesture::DraggingTable {
                table,
                offset_x,
                offset_y,
            } => {
                if !positions.contains_key(table.as_str()) {
                    // Table vanished mid-drag
                    self.gesture = Gesture::Idle;
                    return;
                }
                let model_x = (screen_x - self.pan_x) / self.scale;
                let model_y = (screen_y - self.pan_y) / self.scale;
                let pos = Position {
                    x: model_x - *offset_x,
                    y: model_y - *offset_y,
                };
                positions.insert(table.clone(), pos);
            }
            Gesture::MarqueeSelecting {
                start_x,
                start_y,
                current_x,
                current_y,
            } => {
                let model_x = (screen_x - self.pan_x) / self.scale;
                let model_y = (screen_y - self.pan_y) / self.scale;
                *current_x = model_x;
                *current_y = model_y;

                let left = start_x.min(model_x);
                let right = start_x.max(model_x);
                let top = start_y.min(model_y);
                let bottom = start_y.max(model_y);
                let hits = positions.iter().filter_map(|(name, pos)| {
                    let intersects = pos.x < right
                        && pos.x + TABLE_HIT_WIDTH > left
                        && pos.y < bottom
                        && pos.y + TABLE_HEIGHT > top;
                    intersects.then(|| name.clone())
                });

                if additive {
                    self.selection.extend(hits);
                } else {
                    self.selection = hits.collect();
                }
            }
        }
    }

    /// End the active gesture and return to idle.
    pub fn pointer_up(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// Wheel zoom: multiplicative steps clamped to [0.1, 2.0]. A positive
    /// delta (scrolling down) zooms out.
    pub fn wheel(&mut self, delta_y: f64) {
        let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
        self.scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
    }

    /// Stepped zoom-in button; capped at 1.0 rather than the wheel ceiling.
    pub fn zoom_in(&mut self) {
        self.scale = (self.scale + ZOOM_STEP).min(BUTTON_MAX_SCALE);
    }

    /// Stepped zoom-out button.
    pub fn zoom_out(&mut self) {
        self.scale = (self.scale - ZOOM_STEP).max(MIN_SCALE);
    }
}
