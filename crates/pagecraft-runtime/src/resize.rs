// crates/pagecraft-runtime/src/resize.rs
use glam::DVec2;
use pagecraft_core::{Component, ComponentId, ComponentPatch, ComponentType, ResizeHandle};
use pagecraft_layout::{resize_geometry, LayoutConfig, ResizeOrigin};

/// One in-progress resize gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeGesture {
    pub id: ComponentId,
    pub handle: ResizeHandle,
    pub component_type: ComponentType,
    pub origin_pointer: DVec2,
    pub origin: ResizeOrigin,
}

impl ResizeGesture {
    /// Captures the starting geometry of `component`. A measured on-screen size
    /// wins over the stored one, which matters for `auto` dimensions.
    pub fn begin(
        component: &Component,
        handle: ResizeHandle,
        pointer: DVec2,
        measured_size: Option<DVec2>,
        config: &LayoutConfig,
    ) -> Self {
        let size = measured_size.unwrap_or_else(|| component.size_or(config.auto_size_fallback));
        Self {
            id: component.id.clone(),
            handle,
            component_type: component.component_type,
            origin_pointer: pointer,
            origin: ResizeOrigin {
                size,
                position: component.position().to_vec2(),
            },
        }
    }

    /// Update for the pointer at `pointer`, always relative to the gesture start.
    pub fn step(&self, pointer: DVec2, config: &LayoutConfig) -> ComponentPatch {
        let delta = pointer - self.origin_pointer;
        resize_geometry(self.handle, &self.origin, delta, config).to_patch(self.component_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_core::{Corner, Dimension, EdgeAxis, Position};

    #[test]
    fn test_steps_are_relative_to_start() {
        let image = Component::new("i", ComponentType::Image).with_position(50.0, 50.0).with_size("100px", "100px");
        let config = LayoutConfig::default();
        let gesture = ResizeGesture::begin(
            &image,
            ResizeHandle::Corner(Corner::NorthWest),
            DVec2::new(500.0, 500.0),
            None,
            &config,
        );

        gesture.step(DVec2::new(495.0, 495.0), &config);
        let patch = gesture.step(DVec2::new(490.0, 490.0), &config);

        assert_eq!(patch.width, Some(Dimension::raw("110px")));
        assert_eq!(patch.height, Some(Dimension::raw("110px")));
        assert_eq!(patch.position, Some(Position::new(40.0, 40.0)));
    }

    #[test]
    fn test_measured_size_wins_for_auto() {
        let text = Component::new("t", ComponentType::Text);
        let config = LayoutConfig::default();
        let gesture = ResizeGesture::begin(
            &text,
            ResizeHandle::Edge(EdgeAxis::Width),
            DVec2::ZERO,
            Some(DVec2::new(320.0, 48.0)),
            &config,
        );

        let patch = gesture.step(DVec2::new(30.0, 0.0), &config);
        assert_eq!(patch.width, Some(Dimension::raw("350px")));
        assert_eq!(patch.height, None);
    }
}
