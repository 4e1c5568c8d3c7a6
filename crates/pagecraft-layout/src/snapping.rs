// crates/pagecraft-layout/src/snapping.rs
use glam::DVec2;
use pagecraft_core::{round_half_up, Component, ComponentId};
use serde::Serialize;

use crate::{Bounds, LayoutConfig};

/// Candidate guide lines for one drag, in the dragged node's parent space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapTargets {
    /// x coordinates
    pub vertical: Vec<f64>,
    /// y coordinates
    pub horizontal: Vec<f64>,
}

/// Outcome of snapping one value against a line set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    pub snapped: bool,
    pub value: f64,
    pub target: Option<f64>,
}

/// Guide lines currently locked on, for whatever chrome draws them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ActiveGuides {
    pub vertical: Option<f64>,
    pub horizontal: Option<f64>,
}

impl ActiveGuides {
    pub fn is_empty(&self) -> bool {
        self.vertical.is_none() && self.horizontal.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapOutcome {
    pub position: DVec2,
    pub guides: ActiveGuides,
}

/// Canvas lines first, then left/center/right and top/center/bottom of every
/// sibling except `exclude`.
pub fn collect_snap_targets(
    siblings: &[Component],
    exclude: &ComponentId,
    config: &LayoutConfig,
) -> SnapTargets {
    let mut targets = SnapTargets {
        vertical: config.canvas_vertical_lines.clone(),
        horizontal: config.canvas_horizontal_lines.clone(),
    };

    for sibling in siblings.iter().filter(|sibling| &sibling.id != exclude) {
        let bounds = Bounds::of_component(sibling, config.auto_size_fallback);
        let center = bounds.center();
        targets
            .vertical
            .extend([bounds.min.x, center.x, bounds.max.x]);
        targets
            .horizontal
            .extend([bounds.min.y, center.y, bounds.max.y]);
    }

    targets
}

/// Closest target strictly within `threshold` of `value`. Equal distances go
/// to the earlier target.
pub fn snap(value: f64, targets: &[f64], threshold: f64) -> SnapResult {
    let mut min_distance = threshold;
    let mut found = None;

    for &target in targets {
        let distance = (value - target).abs();
        if distance < min_distance {
            min_distance = distance;
            found = Some(target);
        }
    }

    match found {
        Some(target) => SnapResult {
            snapped: true,
            value: target,
            target: Some(target),
        },
        None => SnapResult {
            snapped: false,
            value,
            target: None,
        },
    }
}

/// Nearest multiple of `grid_size`, halves rounding up.
pub fn snap_to_grid(value: f64, grid_size: f64) -> f64 {
    if grid_size <= 0.0 {
        return value;
    }
    round_half_up(value / grid_size) * grid_size
}

/// Resolves one axis: leading edge, then center, then trailing edge, then the
/// grid. Returns the new leading coordinate and the guide that won, if any.
pub fn resolve_axis(start: f64, extent: f64, lines: &[f64], config: &LayoutConfig) -> (f64, Option<f64>) {
    let threshold = config.snap_threshold;

    let leading = snap(start, lines, threshold);
    if let Some(target) = leading.target {
        return (target, Some(target));
    }

    let center = snap(start + extent / 2.0, lines, threshold);
    if let Some(target) = center.target {
        return (target - extent / 2.0, Some(target));
    }

    let trailing = snap(start + extent, lines, threshold);
    if let Some(target) = trailing.target {
        return (target - extent, Some(target));
    }

    (snap_to_grid(start, config.grid_size), None)
}

/// Snaps a candidate top-left position of a box of `size`. The axes are
/// resolved independently.
pub fn resolve_position(
    candidate: DVec2,
    size: DVec2,
    targets: &SnapTargets,
    config: &LayoutConfig,
) -> SnapOutcome {
    let (x, vertical) = resolve_axis(candidate.x, size.x, &targets.vertical, config);
    let (y, horizontal) = resolve_axis(candidate.y, size.y, &targets.horizontal, config);

    SnapOutcome {
        position: DVec2::new(x, y),
        guides: ActiveGuides { vertical, horizontal },
    }
}
