// crates/pagecraft-layout/src/lib.rs

//! Editor geometry: snap targets and resolution, resize math, container
//! auto-sizing. Everything here is a pure function of the tree and a
//! [`LayoutConfig`], except [`recalc_container`] which writes its result back.

use glam::DVec2;
use pagecraft_core::Component;

pub mod autosize;
pub mod config;
pub mod constraints;
pub mod resize;
pub mod snapping;

pub use autosize::*;
pub use config::*;
pub use constraints::*;
pub use resize::*;
pub use snapping::*;

/// Axis-aligned box of a component in its parent's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    pub fn new(origin: DVec2, size: DVec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// Box from the stored position and pixel size; non-pixel lengths count
    /// as `fallback`.
    pub fn of_component(component: &Component, fallback: f64) -> Self {
        Self::new(component.position().to_vec2(), component.size_or(fallback))
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn contains(&self, other: &Bounds) -> bool {
        self.min.cmple(other.min).all() && self.max.cmpge(other.max).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_core::ComponentType;

    #[test]
    fn test_bounds_of_auto_component() {
        let component = Component::new("a", ComponentType::Heading)
            .with_position(10.0, 20.0)
            .with_size("auto", "40px");
        let bounds = Bounds::of_component(&component, 100.0);

        assert_eq!(bounds.min, DVec2::new(10.0, 20.0));
        assert_eq!(bounds.size(), DVec2::new(100.0, 40.0));
        assert_eq!(bounds.center(), DVec2::new(60.0, 40.0));
    }

    #[test]
    fn test_union_and_contains() {
        let a = Bounds::new(DVec2::ZERO, DVec2::new(10.0, 10.0));
        let b = Bounds::new(DVec2::new(5.0, 5.0), DVec2::new(10.0, 2.0));
        let both = a.union(&b);

        assert_eq!(both.max, DVec2::new(15.0, 10.0));
        assert!(both.contains(&a));
        assert!(both.contains(&b));
        assert!(!a.contains(&b));
    }
}
