// crates/pagecraft-layout/src/config.rs
use glam::DVec2;
use pagecraft_core::StaggerGrid;
use serde::{Deserialize, Serialize};

/// Tunables for snapping, resizing, auto-sizing and placement.
///
/// Every field has a default, so a host config only needs to name the values
/// it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Maximum distance (exclusive) at which an edge or center locks on.
    pub snap_threshold: f64,
    pub grid_size: f64,
    /// Length used for `auto` sizes when snapping needs a number.
    pub auto_size_fallback: f64,
    /// Fixed vertical guide lines of the conceptual canvas (left, center, right).
    pub canvas_vertical_lines: Vec<f64>,
    /// Fixed horizontal guide lines (top, mid-height).
    pub canvas_horizontal_lines: Vec<f64>,
    /// Smallest width/height a resize may produce.
    pub min_resize: f64,
    pub container_padding: f64,
    pub container_min_size: DVec2,
    pub root_stagger: StaggerGrid,
    pub child_stagger: StaggerGrid,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            snap_threshold: 8.0,
            grid_size: 10.0,
            auto_size_fallback: 100.0,
            canvas_vertical_lines: vec![0.0, 600.0, 1200.0],
            canvas_horizontal_lines: vec![0.0, 400.0],
            min_resize: 50.0,
            container_padding: 16.0,
            container_min_size: DVec2::new(200.0, 100.0),
            root_stagger: StaggerGrid::ROOT,
            child_stagger: StaggerGrid::CHILD,
        }
    }
}
