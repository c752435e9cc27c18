//! Game state and bookkeeping
//!
//! Everything the controller owns between ticks lives here, serializable for
//! debug snapshots.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::body::{Body, DinoColor, spawn_grid};
use super::claw::{Claw, ClawEvent, CollectVia};
use crate::consts::POINTS_PER_COLLECT;

/// Display record for a dino sitting in the drop-off box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedRecord {
    pub color: DinoColor,
}

/// Complete game state (deterministic given seed and inputs)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub arena: Arena,
    /// All dinos in insertion order; collected ones stay as tombstones
    pub bodies: Vec<Body>,
    pub claw: Claw,
    /// +10 per collected dino
    pub score: u64,
    /// Completed drop cycles
    pub attempts: u32,
    /// Append-only, one entry per collection
    pub collected: Vec<CollectedRecord>,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh game with a seeded dino grid
    pub fn new<R: Rng + ?Sized>(seed: u64, arena: Arena, spawn_speed: f32, rng: &mut R) -> Self {
        let bodies = spawn_grid(&arena, spawn_speed, rng);
        let claw = Claw::new(&arena);
        Self {
            seed,
            arena,
            bodies,
            claw,
            score: 0,
            attempts: 0,
            collected: Vec::new(),
            time_ticks: 0,
        }
    }

    /// Replace the arena and re-seed the dino grid.
    ///
    /// Tombstones and the claw's grip are discarded with the old bodies;
    /// score, attempts and the collected records are kept.
    pub fn resize<R: Rng + ?Sized>(&mut self, arena: Arena, spawn_speed: f32, rng: &mut R) {
        log::info!(
            "Resize {}x{} -> {}x{}",
            self.arena.width,
            self.arena.height,
            arena.width,
            arena.height
        );
        self.bodies = spawn_grid(&arena, spawn_speed, rng);
        self.claw.fit_to(&arena);
        self.arena = arena;
    }

    /// Fold a claw event into score, attempts and records
    pub fn apply_event(&mut self, event: &ClawEvent) {
        match *event {
            ClawEvent::Collected { body, color, via } => {
                self.score += POINTS_PER_COLLECT;
                self.collected.push(CollectedRecord { color });
                let how = match via {
                    CollectVia::AutoCollect => "claw reached the top",
                    CollectVia::Release => "dropped in the box",
                };
                log::info!(
                    "Collected dino #{} ({}), score {}",
                    self.bodies.get(body).map_or(0, |b| b.id),
                    how,
                    self.score
                );
            }
            ClawEvent::CycleCompleted { grabbed } => {
                self.attempts += 1;
                log::info!(
                    "Attempt {} finished ({})",
                    self.attempts,
                    if grabbed { "grabbed" } else { "empty" }
                );
            }
            ClawEvent::Slipped { body } | ClawEvent::ReleasedIntoPlay { body } => {
                log::debug!(
                    "Dino #{} back in play",
                    self.bodies.get(body).map_or(0, |b| b.id)
                );
            }
            ClawEvent::DropStarted | ClawEvent::GrabAttempted { .. } => {}
        }
    }

    /// Dinos still in the pit (not collected), insertion order
    pub fn remaining(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|b| !b.collected)
    }

    /// Number of dinos flagged grabbed; never more than one
    pub fn grabbed_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.grabbed).count()
    }
}
