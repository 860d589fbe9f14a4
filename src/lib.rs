pub mod graph;
pub mod layout;
pub mod model;
pub mod path;
pub mod sql;
pub mod viewport;

use wasm_bindgen::prelude::*;

use graph::{DdlStatement, Snapshot};
use layout::LayoutEngine;
use model::PositionMap;
use path::relation_path;
use viewport::Viewport;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Parse all `SHOW CREATE TABLE` results of a database into a snapshot.
/// Input: array of `{ tableName, createSQL }`.
#[wasm_bindgen(js_name = "learnSchema")]
pub fn learn_schema(statements: JsValue) -> Result<JsValue, JsValue> {
    let statements: Vec<DdlStatement> =
        serde_wasm_bindgen::from_value(statements).map_err(to_js_error)?;
    let snapshot = Snapshot::learn(&statements);
    serde_wasm_bindgen::to_value(&snapshot).map_err(to_js_error)
}

/// Compute the initial position map for a snapshot.
#[wasm_bindgen(js_name = "layoutSchema")]
pub fn layout_schema(snapshot: JsValue, container_width: f64) -> Result<JsValue, JsValue> {
    let snapshot: Snapshot = serde_wasm_bindgen::from_value(snapshot).map_err(to_js_error)?;
    let engine = LayoutEngine { container_width };
    serde_wasm_bindgen::to_value(&engine.layout(&snapshot)).map_err(to_js_error)
}

/// One schema diagram: the current snapshot, its position map, and the live
/// viewport. The embedding UI forwards raw pointer and wheel events here and
/// reads back positions, paths, selection, and the pan/zoom transform.
#[wasm_bindgen]
pub struct SchemaCanvas {
    snapshot: Snapshot,
    positions: PositionMap,
    viewport: Viewport,
    container_width: f64,
}

#[wasm_bindgen]
impl SchemaCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new(container_width: f64) -> Self {
        Self {
            snapshot: Snapshot::default(),
            positions: PositionMap::new(),
            viewport: Viewport::new(),
            container_width,
        }
    }

    /// Replace the diagram with a freshly learned schema: parse, lay out,
    /// and reset the viewport in one step so no state from the previous
    /// snapshot survives.
    #[wasm_bindgen(js_name = "setSnapshot")]
    pub fn set_snapshot(&mut self, statements: JsValue) -> Result<(), JsValue> {
        let statements: Vec<DdlStatement> =
            serde_wasm_bindgen::from_value(statements).map_err(to_js_error)?;
        self.snapshot = Snapshot::learn(&statements);
        self.positions = LayoutEngine {
            container_width: self.container_width,
        }
        .layout(&self.snapshot);
        self.viewport.reset();
        Ok(())
    }

    #[wasm_bindgen(js_name = "tableCount")]
    pub fn table_count(&self) -> usize {
        self.snapshot.tables.len()
    }

    pub fn tables(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.snapshot.tables).map_err(to_js_error)
    }

    /// Relations drawable in the current snapshot (dangling edges excluded).
    pub fn relations(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.snapshot.applicable_relations()).map_err(to_js_error)
    }

    pub fn positions(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.positions).map_err(to_js_error)
    }

    /// Elbow polylines for every drawable relation, in relation order.
    #[wasm_bindgen(js_name = "relationPaths")]
    pub fn relation_paths(&self) -> Result<JsValue, JsValue> {
        let paths: Vec<_> = self
            .snapshot
            .applicable_relations()
            .into_iter()
            .filter_map(|r| relation_path(r, &self.positions))
            .collect();
        serde_wasm_bindgen::to_value(&paths).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = "tablePointerDown")]
    pub fn table_pointer_down(&mut self, table: &str, screen_x: f64, screen_y: f64) {
        self.viewport
            .table_pointer_down(table, screen_x, screen_y, &self.positions);
    }

    #[wasm_bindgen(js_name = "canvasPointerDown")]
    pub fn canvas_pointer_down(
        &mut self,
        screen_x: f64,
        screen_y: f64,
        additive: bool,
        marquee: bool,
    ) {
        self.viewport
            .canvas_pointer_down(screen_x, screen_y, additive, marquee);
    }

    #[wasm_bindgen(js_name = "pointerMove")]
    pub fn pointer_move(&mut self, screen_x: f64, screen_y: f64, additive: bool) {
        self.viewport
            .pointer_move(screen_x, screen_y, additive, &mut self.positions);
    }

    #[wasm_bindgen(js_name = "pointerUp")]
    pub fn pointer_up(&mut self) {
        self.viewport.pointer_up();
    }

    pub fn wheel(&mut self, delta_y: f64) {
        self.viewport.wheel(delta_y);
    }

    #[wasm_bindgen(js_name = "zoomIn")]
    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    #[wasm_bindgen(js_name = "zoomOut")]
    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn scale(&self) -> f64 {
        self.viewport.scale()
    }

    #[wasm_bindgen(js_name = "panX")]
    pub fn pan_x(&self) -> f64 {
        self.viewport.pan().0
    }

    #[wasm_bindgen(js_name = "panY")]
    pub fn pan_y(&self) -> f64 {
        self.viewport.pan().1
    }

    /// Currently selected table names.
    #[wasm_bindgen(js_name = "selectedTables")]
    pub fn selected_tables(&self) -> js_sys::Array {
        self.viewport
            .selection()
            .iter()
            .map(|name| JsValue::from_str(name))
            .collect()
    }

    /// The marquee rectangle as `[left, top, right, bottom]` while one is
    /// being tracked, for the renderer to draw.
    #[wasm_bindgen(js_name = "marqueeRect")]
    pub fn marquee_rect(&self) -> Option<js_sys::Array> {
        self.viewport.marquee_rect().map(|(l, t, r, b)| {
            [l, t, r, b].iter().copied().map(JsValue::from).collect()
        })
    }
}
