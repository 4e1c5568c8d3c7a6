// crates/pagecraft-core/src/placement.rs
use serde::{Deserialize, Serialize};

use crate::Position;

/// Staggered grid new components are dropped onto, so consecutive additions
/// don't pile up on the same spot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaggerGrid {
    /// Offset of the first cell on both axes.
    pub origin: f64,
    pub column_step: f64,
    pub row_step: f64,
    pub per_row: usize,
}

impl StaggerGrid {
    /// Placement for top-level components on the canvas.
    pub const ROOT: StaggerGrid = StaggerGrid {
        origin: 80.0,
        column_step: 300.0,
        row_step: 220.0,
        per_row: 3,
    };

    /// Placement for components appended inside a container.
    pub const CHILD: StaggerGrid = StaggerGrid {
        origin: 16.0,
        column_step: 220.0,
        row_step: 160.0,
        per_row: 3,
    };

    /// Cell for the `index`-th element of a sibling list.
    pub fn position_for(&self, index: usize) -> Position {
        let per_row = self.per_row.max(1);
        let column = (index % per_row) as f64;
        let row = (index / per_row) as f64;
        Position::new(
            self.origin + column * self.column_step,
            self.origin + row * self.row_step,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_stagger() {
        assert_eq!(StaggerGrid::ROOT.position_for(0), Position::new(80.0, 80.0));
        assert_eq!(StaggerGrid::ROOT.position_for(2), Position::new(680.0, 80.0));
        assert_eq!(StaggerGrid::ROOT.position_for(4), Position::new(380.0, 300.0));
    }

    #[test]
    fn test_child_stagger() {
        assert_eq!(StaggerGrid::CHILD.position_for(0), Position::new(16.0, 16.0));
        assert_eq!(StaggerGrid::CHILD.position_for(3), Position::new(16.0, 176.0));
    }
}
