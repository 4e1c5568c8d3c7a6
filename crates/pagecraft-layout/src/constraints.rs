// crates/pagecraft-layout/src/constraints.rs
use glam::DVec2;

/// Min/max bounds applied to a computed width and height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintBox {
    pub min_width: f64,
    pub max_width: f64,
    pub min_height: f64,
    pub max_height: f64,
}

impl Default for ConstraintBox {
    fn default() -> Self {
        Self {
            min_width: 0.0,
            max_width: f64::INFINITY,
            min_height: 0.0,
            max_height: f64::INFINITY,
        }
    }
}

impl ConstraintBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Floors both dimensions, no upper bound.
    pub fn with_min_size(width: f64, height: f64) -> Self {
        Self {
            min_width: width,
            min_height: height,
            ..Self::default()
        }
    }

    pub fn constrain_width(&self, width: f64) -> f64 {
        width.max(self.min_width).min(self.max_width)
    }

    pub fn constrain_height(&self, height: f64) -> f64 {
        height.max(self.min_height).min(self.max_height)
    }

    pub fn constrain(&self, size: DVec2) -> DVec2 {
        DVec2::new(self.constrain_width(size.x), self.constrain_height(size.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_size_floors_only() {
        let constraints = ConstraintBox::with_min_size(50.0, 50.0);
        assert_eq!(constraints.constrain(DVec2::new(20.0, 400.0)), DVec2::new(50.0, 400.0));
    }

    #[test]
    fn test_max_bounds_cap() {
        let constraints = ConstraintBox {
            max_width: 100.0,
            ..ConstraintBox::new()
        };
        assert_eq!(constraints.constrain_width(150.0), 100.0);
        assert_eq!(constraints.constrain_height(10.0), 10.0);
    }
}
