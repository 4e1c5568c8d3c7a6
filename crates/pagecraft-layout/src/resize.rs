// crates/pagecraft-layout/src/resize.rs
use glam::DVec2;
use pagecraft_core::{
    round_half_up, ComponentPatch, ComponentType, Corner, Dimension, EdgeAxis, Position, ResizeHandle,
};

use crate::{ConstraintBox, LayoutConfig};

/// Size and position captured when a resize gesture starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeOrigin {
    pub size: DVec2,
    pub position: DVec2,
}

/// What a resize step writes. `None` fields are left untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeGeometry {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub position: Option<DVec2>,
}

impl ResizeGeometry {
    /// Rounded update for a component of `component_type`. Text blocks never
    /// get a height: it always follows their content.
    pub fn to_patch(&self, component_type: ComponentType) -> ComponentPatch {
        let mut patch = ComponentPatch::new();
        if let Some(width) = self.width {
            patch = patch.width(Dimension::pixels(width));
        }
        if let Some(height) = self.height {
            if component_type != ComponentType::Text {
                patch = patch.height(Dimension::pixels(height));
            }
        }
        if let Some(position) = self.position {
            patch = patch.position(Position::new(round_half_up(position.x), round_half_up(position.y)));
        }
        patch
    }
}

/// Geometry for a pointer `delta` measured from the gesture start.
///
/// Corner handles keep the opposite corner fixed by moving the position along
/// with the dragged edges. Sizes are floored at `min_resize`, but the position
/// still moves by the full delta when the floor kicks in.
pub fn resize_geometry(
    handle: ResizeHandle,
    origin: &ResizeOrigin,
    delta: DVec2,
    config: &LayoutConfig,
) -> ResizeGeometry {
    let floor = ConstraintBox::with_min_size(config.min_resize, config.min_resize);
    let DVec2 { x: width, y: height } = origin.size;

    match handle {
        ResizeHandle::Corner(corner) => {
            let requested = corner_size(corner, origin.size, delta);
            let size = floor.constrain(requested);
            let shift = DVec2::new(
                if corner.moves_left() { delta.x } else { 0.0 },
                if corner.moves_top() { delta.y } else { 0.0 },
            );
            ResizeGeometry {
                width: Some(size.x),
                height: Some(size.y),
                position: Some(origin.position + shift),
            }
        }
        ResizeHandle::Edge(EdgeAxis::Width) => ResizeGeometry {
            width: Some(floor.constrain_width(width + delta.x)),
            height: None,
            position: None,
        },
        ResizeHandle::Edge(EdgeAxis::Height) => ResizeGeometry {
            width: None,
            height: Some(floor.constrain_height(height + delta.y)),
            position: None,
        },
        ResizeHandle::Edge(EdgeAxis::Both) => {
            let size = floor.constrain(origin.size + delta);
            ResizeGeometry {
                width: Some(size.x),
                height: Some(size.y),
                position: None,
            }
        }
        ResizeHandle::AspectLocked => {
            let new_width = floor.constrain_width(width + delta.x);
            let new_height = if width > 0.0 && height > 0.0 {
                new_width / (width / height)
            } else {
                height
            };
            ResizeGeometry {
                width: Some(new_width),
                height: Some(new_height),
                position: None,
            }
        }
    }
}

fn corner_size(corner: Corner, size: DVec2, delta: DVec2) -> DVec2 {
    match corner {
        Corner::SouthEast => DVec2::new(size.x + delta.x, size.y + delta.y),
        Corner::SouthWest => DVec2::new(size.x - delta.x, size.y + delta.y),
        Corner::NorthEast => DVec2::new(size.x + delta.x, size.y - delta.y),
        Corner::NorthWest => DVec2::new(size.x - delta.x, size.y - delta.y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin(x: f64, y: f64, width: f64, height: f64) -> ResizeOrigin {
        ResizeOrigin {
            size: DVec2::new(width, height),
            position: DVec2::new(x, y),
        }
    }

    fn opposite_corner(corner: Corner, position: DVec2, size: DVec2) -> DVec2 {
        DVec2::new(
            if corner.moves_left() { position.x + size.x } else { position.x },
            if corner.moves_top() { position.y + size.y } else { position.y },
        )
    }

    #[test]
    fn test_north_west_grows_up_and_left() {
        let geometry = resize_geometry(
            ResizeHandle::Corner(Corner::NorthWest),
            &origin(50.0, 50.0, 100.0, 100.0),
            DVec2::new(-10.0, -10.0),
            &LayoutConfig::default(),
        );

        assert_eq!(geometry.width, Some(110.0));
        assert_eq!(geometry.height, Some(110.0));
        assert_eq!(geometry.position, Some(DVec2::new(40.0, 40.0)));
    }

    #[test]
    fn test_opposite_corner_stays_fixed() {
        let config = LayoutConfig::default();
        let start = origin(200.0, 120.0, 180.0, 140.0);
        let deltas = [
            DVec2::new(-30.0, 25.0),
            DVec2::new(12.5, -7.0),
            DVec2::new(40.0, 40.0),
            DVec2::new(-60.0, -45.0),
        ];

        for corner in Corner::ALL {
            for delta in deltas {
                let geometry = resize_geometry(ResizeHandle::Corner(corner), &start, delta, &config);
                let size = DVec2::new(geometry.width.unwrap(), geometry.height.unwrap());
                let position = geometry.position.unwrap();

                assert_eq!(
                    opposite_corner(corner, position, size),
                    opposite_corner(corner, start.position, start.size),
                    "{} by {delta:?}",
                    corner.short_name()
                );
            }
        }
    }

    #[test]
    fn test_floor_keeps_requested_compensation() {
        let geometry = resize_geometry(
            ResizeHandle::Corner(Corner::NorthWest),
            &origin(0.0, 0.0, 100.0, 100.0),
            DVec2::new(80.0, 80.0),
            &LayoutConfig::default(),
        );

        assert_eq!(geometry.width, Some(50.0));
        assert_eq!(geometry.position, Some(DVec2::new(80.0, 80.0)));
    }

    #[test]
    fn test_edge_handles_touch_one_dimension() {
        let config = LayoutConfig::default();
        let start = origin(10.0, 10.0, 300.0, 120.0);

        let width = resize_geometry(ResizeHandle::Edge(EdgeAxis::Width), &start, DVec2::new(-280.0, 90.0), &config);
        assert_eq!(width, ResizeGeometry { width: Some(50.0), height: None, position: None });

        let height = resize_geometry(ResizeHandle::Edge(EdgeAxis::Height), &start, DVec2::new(5.0, 30.0), &config);
        assert_eq!(height.height, Some(150.0));
        assert_eq!(height.width, None);
    }

    #[test]
    fn test_aspect_locked_keeps_ratio() {
        let geometry = resize_geometry(
            ResizeHandle::AspectLocked,
            &origin(0.0, 0.0, 400.0, 200.0),
            DVec2::new(100.0, -500.0),
            &LayoutConfig::default(),
        );

        assert_eq!(geometry.width, Some(500.0));
        assert_eq!(geometry.height, Some(250.0));
    }

    #[test]
    fn test_text_patch_has_no_height() {
        let geometry = ResizeGeometry {
            width: Some(240.4),
            height: Some(80.0),
            position: Some(DVec2::new(9.5, 10.2)),
        };

        let text = geometry.to_patch(ComponentType::Text);
        assert_eq!(text.width.as_ref().map(Dimension::as_str), Some("240px"));
        assert!(text.height.is_none());
        assert_eq!(text.position, Some(Position::new(10.0, 10.0)));

        let image = geometry.to_patch(ComponentType::Image);
        assert_eq!(image.height.as_ref().map(Dimension::as_str), Some("80px"));
    }
}
