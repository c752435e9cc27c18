//! Play-field geometry
//!
//! Everything is derived from the field size, so a resize is just
//! `Arena::new` with the new dimensions.

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    /// Bodies rest with their bottom edge on this line
    pub floor_y: f32,
    /// No-entry collection zone
    pub drop_box: Rect,
    /// Claw top of travel
    pub claw_min_y: f32,
    /// Claw bottom of travel
    pub claw_max_y: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            floor_y: height - FLOOR_INSET,
            drop_box: Rect::new(
                width - DROP_BOX_RIGHT_OFFSET,
                height - DROP_BOX_BOTTOM_OFFSET,
                DROP_BOX_WIDTH,
                DROP_BOX_HEIGHT,
            ),
            claw_min_y: CLAW_MIN_Y,
            claw_max_y: height - CLAW_DEPTH_INSET,
        }
    }

    /// Range the claw target may be set to
    pub fn claw_x_range(&self) -> (f32, f32) {
        (CLAW_EDGE_MARGIN, self.width - CLAW_EDGE_MARGIN)
    }

    /// Clamp a claw target into the allowed range
    pub fn clamp_claw_x(&self, x: f32) -> f32 {
        let (lo, hi) = self.claw_x_range();
        crate::clamp_span(x, lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_geometry() {
        let arena = Arena::new(1280.0, 720.0);
        assert_eq!(arena.floor_y, 640.0);
        assert_eq!(arena.claw_min_y, 150.0);
        assert_eq!(arena.claw_max_y, 600.0);
        assert_eq!(arena.drop_box, Rect::new(1080.0, 420.0, 120.0, 200.0));
    }

    #[test]
    fn test_clamp_claw_x() {
        let arena = Arena::new(800.0, 600.0);
        assert_eq!(arena.clamp_claw_x(0.0), 30.0);
        assert_eq!(arena.clamp_claw_x(400.0), 400.0);
        assert_eq!(arena.clamp_claw_x(10_000.0), 770.0);
    }
}
