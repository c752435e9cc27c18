//! Dino Claw - a 2D claw machine arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, physics, claw state machine, tick)
//! - `game`: `GameController`, the single owner of all game state
//! - `renderer`: Render/score sink interfaces and the canvas front-end
//! - `platform`: Host input mapping (keys, clicks) to game commands
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use game::GameController;
pub use tuning::{Difficulty, Tuning};

/// Fixed layout constants (pixels). Balance knobs live in [`Tuning`].
pub mod consts {
    /// Height of the floor strip at the bottom of the field
    pub const FLOOR_INSET: f32 = 80.0;

    /// Drop-off box: offset of its left edge from the right side of the field
    pub const DROP_BOX_RIGHT_OFFSET: f32 = 200.0;
    /// Drop-off box: offset of its top edge from the bottom of the field
    pub const DROP_BOX_BOTTOM_OFFSET: f32 = 300.0;
    pub const DROP_BOX_WIDTH: f32 = 120.0;
    pub const DROP_BOX_HEIGHT: f32 = 200.0;

    /// Claw resting height (top of travel)
    pub const CLAW_MIN_Y: f32 = 150.0;
    /// Distance between the bottom of the field and the deepest claw position
    pub const CLAW_DEPTH_INSET: f32 = 120.0;
    /// Claw target is kept this far from either side wall
    pub const CLAW_EDGE_MARGIN: f32 = 30.0;
    /// Claw body box, relative to the claw center
    pub const CLAW_HALF_WIDTH: f32 = 40.0;
    pub const CLAW_ABOVE: f32 = 30.0;
    pub const CLAW_BELOW: f32 = 50.0;
    /// A carried dino hangs this far below the claw center
    pub const HANG_OFFSET: f32 = 40.0;

    /// Dino sprite size (square)
    pub const BODY_SIZE: f32 = 48.0;

    /// Initial dino grid
    pub const GRID_ROWS: u32 = 5;
    pub const GRID_SPACING: f32 = 60.0;
    pub const GRID_LEFT: f32 = 150.0;
    /// Horizontal space not used by the grid (left margin + drop-off area)
    pub const GRID_SIDE_RESERVE: f32 = 400.0;
    /// The bottom grid row starts this far above the bottom of the field
    pub const GRID_BOTTOM_INSET: f32 = 200.0;
    pub const GRID_JITTER: f32 = 20.0;

    /// Arrow key nudge distance
    pub const NUDGE_STEP: f32 = 20.0;

    /// Points per collected dino
    pub const POINTS_PER_COLLECT: u64 = 10;
}

/// Clamp `value` into `[lo, hi]`, tolerating `hi < lo` (degenerate fields).
///
/// Resolves to `lo` when the span is inverted instead of panicking like
/// `f32::clamp` does.
#[inline]
pub fn clamp_span(value: f32, lo: f32, hi: f32) -> f32 {
    value.min(hi).max(lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_span() {
        assert_eq!(clamp_span(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp_span(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp_span(11.0, 0.0, 10.0), 10.0);
        // Inverted span resolves to the lower bound
        assert_eq!(clamp_span(3.0, 0.0, -5.0), 0.0);
    }
}
