//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Injected seeded RNG only
//! - Stable iteration order (dino insertion order)
//! - No rendering or platform dependencies

pub mod arena;
pub mod body;
pub mod claw;
pub mod collision;
pub mod physics;
pub mod state;
pub mod tick;

pub use arena::Arena;
pub use body::{Body, DinoColor, spawn_grid};
pub use claw::{Claw, ClawEvent, ClawPhase, CollectVia};
pub use collision::{Contact, Rect, center_contact, push_direction};
pub use physics::PhysicsWorld;
pub use state::{CollectedRecord, GameState};
pub use tick::{TickInput, autopilot_input, tick};
