// crates/pagecraft-runtime/src/drag.rs
use glam::DVec2;
use pagecraft_core::{ComponentId, ComponentTree};
use pagecraft_layout::{collect_snap_targets, resolve_position, ActiveGuides, LayoutConfig, SnapOutcome};

/// Latest pointer sample of a drag, waiting for the next frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub position: DVec2,
    pub bypass_snapping: bool,
}

/// One in-progress move gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    pub id: ComponentId,
    pub origin_pointer: DVec2,
    pub origin_position: DVec2,
    pending: Option<PointerSample>,
}

impl DragGesture {
    pub fn new(id: ComponentId, origin_pointer: DVec2, origin_position: DVec2) -> Self {
        Self {
            id,
            origin_pointer,
            origin_position,
            pending: None,
        }
    }

    /// Stores `sample`, replacing anything not yet applied.
    pub fn queue_move(&mut self, sample: PointerSample) {
        self.pending = Some(sample);
    }

    pub fn take_pending(&mut self) -> Option<PointerSample> {
        self.pending.take()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Where the node goes for `sample`, plus the guides that locked on.
    ///
    /// Snapping looks at the node's own siblings. The result never has a
    /// negative coordinate.
    pub fn resolve(&self, tree: &ComponentTree, sample: PointerSample, config: &LayoutConfig) -> SnapOutcome {
        let delta = sample.position - self.origin_pointer;
        let candidate = (self.origin_position + delta).max(DVec2::ZERO);

        if sample.bypass_snapping {
            return SnapOutcome {
                position: candidate,
                guides: ActiveGuides::default(),
            };
        }

        let Some(component) = tree.find(&self.id) else {
            return SnapOutcome {
                position: candidate,
                guides: ActiveGuides::default(),
            };
        };

        let siblings = tree.siblings_of(&self.id).unwrap_or_default();
        let targets = collect_snap_targets(siblings, &self.id, config);
        let size = component.size_or(config.auto_size_fallback);

        let mut outcome = resolve_position(candidate, size, &targets, config);
        outcome.position = outcome.position.max(DVec2::ZERO);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_core::{Component, ComponentType};

    fn tree() -> ComponentTree {
        ComponentTree::from_roots(vec![
            Component::new("a", ComponentType::Image).with_position(100.0, 100.0).with_size("200px", "100px"),
            Component::new("b", ComponentType::Image).with_position(400.0, 300.0).with_size("50px", "50px"),
        ])
        .unwrap()
    }

    fn sample(x: f64, y: f64, bypass_snapping: bool) -> PointerSample {
        PointerSample {
            position: DVec2::new(x, y),
            bypass_snapping,
        }
    }

    #[test]
    fn test_only_latest_sample_is_kept() {
        let mut drag = DragGesture::new("b".into(), DVec2::ZERO, DVec2::new(400.0, 300.0));
        drag.queue_move(sample(1.0, 1.0, false));
        drag.queue_move(sample(2.0, 2.0, false));

        assert_eq!(drag.take_pending(), Some(sample(2.0, 2.0, false)));
        assert!(!drag.has_pending());
    }

    #[test]
    fn test_snaps_to_sibling_edge() {
        let tree = tree();
        let drag = DragGesture::new("b".into(), DVec2::ZERO, DVec2::new(400.0, 300.0));
        let config = LayoutConfig::default();

        let outcome = drag.resolve(&tree, sample(-97.0, -97.0, false), &config);
        assert_eq!(outcome.position, DVec2::new(300.0, 200.0));
        assert_eq!(outcome.guides.vertical, Some(300.0));
    }

    #[test]
    fn test_bypass_and_clamp() {
        let tree = tree();
        let drag = DragGesture::new("b".into(), DVec2::ZERO, DVec2::new(400.0, 300.0));
        let config = LayoutConfig::default();

        let raw = drag.resolve(&tree, sample(-97.0, -97.0, true), &config);
        assert_eq!(raw.position, DVec2::new(303.0, 203.0));
        assert!(raw.guides.is_empty());

        let clamped = drag.resolve(&tree, sample(-900.0, -900.0, true), &config);
        assert_eq!(clamped.position, DVec2::ZERO);
    }
}
