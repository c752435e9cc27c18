//! The claw: a three-phase state machine plus an orthogonal carrying flag
//!
//! ```text
//!   Idle ──drop──▶ Descending ──max depth (grab roll)──▶ Returning ──min height──▶ Idle
//! ```
//!
//! Carrying is `held.is_some()`: set by a successful grab, cleared by a slip,
//! a release, or auto-collection at the top. Commands issued in the wrong
//! phase are ignored.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::body::{Body, DinoColor};
use super::collision::{Rect, push_direction};
use crate::consts::*;
use crate::tuning::ClawTuning;

/// Vertical phase of the claw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClawPhase {
    /// Parked at the top, following the player's target
    #[default]
    Idle,
    /// Moving down toward max depth
    Descending,
    /// Moving back up, possibly carrying a dino
    Returning,
}

impl ClawPhase {
    /// Legal transitions of the state machine
    pub fn can_transition_to(self, next: ClawPhase) -> bool {
        matches!(
            (self, next),
            (ClawPhase::Idle, ClawPhase::Descending)
                | (ClawPhase::Descending, ClawPhase::Returning)
                | (ClawPhase::Returning, ClawPhase::Idle)
        )
    }
}

/// How a dino ended up in the drop-off box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectVia {
    /// Still held when the claw reached the top
    AutoCollect,
    /// Player released it while the claw was over the box
    Release,
}

/// Observable outcomes of the claw state machine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ClawEvent {
    DropStarted,
    /// Grab roll at max depth. `body` is the candidate in range, if any.
    GrabAttempted { body: Option<usize>, hit: bool },
    /// Carried dino fell out on the way up
    Slipped { body: usize },
    /// Player released the dino outside the box
    ReleasedIntoPlay { body: usize },
    Collected {
        body: usize,
        color: DinoColor,
        via: CollectVia,
    },
    /// Claw is back at the top; `grabbed` tells whether this cycle ever held a dino
    CycleCompleted { grabbed: bool },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claw {
    /// Horizontal center
    pub x: f32,
    /// Vertical center
    pub y: f32,
    /// Where the player wants the claw (Idle only)
    pub target_x: f32,
    phase: ClawPhase,
    /// Index of the carried dino
    held: Option<usize>,
    /// Jaws shut (visual only)
    jaws_closed: bool,
    /// A grab succeeded at some point during the current cycle
    grabbed_this_cycle: bool,
}

impl Claw {
    /// Parked at the top center of the field
    pub fn new(arena: &Arena) -> Self {
        let x = arena.width / 2.0;
        Self {
            x,
            y: arena.claw_min_y,
            target_x: x,
            phase: ClawPhase::Idle,
            held: None,
            jaws_closed: false,
            grabbed_this_cycle: false,
        }
    }

    pub fn phase(&self) -> ClawPhase {
        self.phase
    }

    /// Index of the carried dino, if any
    pub fn held(&self) -> Option<usize> {
        self.held
    }

    pub fn is_carrying(&self) -> bool {
        self.held.is_some()
    }

    pub fn jaws_closed(&self) -> bool {
        self.jaws_closed
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// The claw housing and arms, used to shove loose dinos
    pub fn body_box(&self) -> Rect {
        Rect::new(
            self.x - CLAW_HALF_WIDTH,
            self.y - CLAW_ABOVE,
            CLAW_HALF_WIDTH * 2.0,
            CLAW_ABOVE + CLAW_BELOW,
        )
    }

    fn transition(&mut self, next: ClawPhase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "illegal claw transition {:?} -> {:?}",
            self.phase,
            next
        );
        log::trace!("Claw {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }

    /// Set the target directly (Idle only)
    pub fn move_to(&mut self, x: f32, arena: &Arena) {
        if self.phase == ClawPhase::Idle {
            self.target_x = arena.clamp_claw_x(x);
        }
    }

    /// Shift the target (Idle only)
    pub fn nudge(&mut self, dx: f32, arena: &Arena) {
        if self.phase == ClawPhase::Idle {
            self.target_x = arena.clamp_claw_x(self.target_x + dx);
        }
    }

    /// Start a descent (Idle only)
    pub fn drop_claw(&mut self) -> Option<ClawEvent> {
        if self.phase != ClawPhase::Idle {
            return None;
        }
        self.grabbed_this_cycle = false;
        self.transition(ClawPhase::Descending);
        Some(ClawEvent::DropStarted)
    }

    /// Let go of the carried dino. Over the box it is collected, anywhere
    /// else it drops back into play. The phase is left alone.
    pub fn release<R: Rng + ?Sized>(
        &mut self,
        bodies: &mut [Body],
        arena: &Arena,
        tuning: &ClawTuning,
        rng: &mut R,
    ) -> Option<ClawEvent> {
        let index = self.held.take()?;
        let body = bodies.get_mut(index)?;

        if arena.drop_box.spans_x(self.x) {
            return collect(body, index, CollectVia::Release);
        }

        body.grabbed = false;
        body.vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * tuning.release_spread,
            -tuning.release_lift,
        );
        Some(ClawEvent::ReleasedIntoPlay { body: index })
    }

    /// Advance the claw by one tick, appending outcomes to `events`
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        bodies: &mut [Body],
        arena: &Arena,
        tuning: &ClawTuning,
        rng: &mut R,
        events: &mut Vec<ClawEvent>,
    ) {
        match self.phase {
            ClawPhase::Idle => self.ease_toward_target(tuning.ease),
            ClawPhase::Descending | ClawPhase::Returning => self.shove(bodies, tuning.push),
        }

        match self.phase {
            ClawPhase::Idle => {}
            ClawPhase::Descending => {
                self.y += tuning.drop_speed;
                if self.y >= arena.claw_max_y {
                    self.y = arena.claw_max_y;
                    self.jaws_closed = true;
                    events.push(self.attempt_grab(bodies, tuning, rng));
                    self.transition(ClawPhase::Returning);
                }
            }
            ClawPhase::Returning => {
                self.y -= tuning.drop_speed;
                if let Some(event) = self.carry(bodies, arena, tuning, rng) {
                    events.push(event);
                }

                if self.y <= arena.claw_min_y {
                    self.y = arena.claw_min_y;
                    self.jaws_closed = false;
                    self.transition(ClawPhase::Idle);

                    if let Some(index) = self.held.take() {
                        if let Some(event) = bodies
                            .get_mut(index)
                            .and_then(|body| collect(body, index, CollectVia::AutoCollect))
                        {
                            events.push(event);
                        }
                    }
                    events.push(ClawEvent::CycleCompleted {
                        grabbed: self.grabbed_this_cycle,
                    });
                }
            }
        }
    }

    /// Damped approach: covers a fixed fraction of the gap each tick, so it
    /// never overshoots
    fn ease_toward_target(&mut self, ease: f32) {
        let dx = self.target_x - self.x;
        if dx.abs() < SNAP_DISTANCE {
            self.x = self.target_x;
        } else {
            self.x += dx * ease;
        }
    }

    /// Push loose dinos touching the claw housing away from its center
    fn shove(&self, bodies: &mut [Body], push: f32) {
        let housing = self.body_box();
        let center = self.center();
        for body in bodies.iter_mut().filter(|b| b.is_free()) {
            if !body.bounds().overlaps(&housing) {
                continue;
            }
            if let Some(dir) = push_direction(center, body.center()) {
                body.vel += dir * push;
            }
        }
    }

    /// Single grab roll against the first free dino in range (insertion order)
    fn attempt_grab<R: Rng + ?Sized>(
        &mut self,
        bodies: &mut [Body],
        tuning: &ClawTuning,
        rng: &mut R,
    ) -> ClawEvent {
        let center = self.center();
        let candidate = bodies
            .iter()
            .position(|b| b.is_free() && b.center().distance(center) < tuning.grab_radius);

        let Some(index) = candidate else {
            log::debug!("Grab at x={:.0}: nothing in range", self.x);
            return ClawEvent::GrabAttempted {
                body: None,
                hit: false,
            };
        };

        let hit = rng.random::<f32>() < tuning.grab_chance;
        if hit {
            let body = &mut bodies[index];
            body.grabbed = true;
            body.vel = Vec2::ZERO;
            self.held = Some(index);
            self.grabbed_this_cycle = true;
        }
        log::debug!(
            "Grab at x={:.0} on dino #{}: {}",
            self.x,
            bodies[index].id,
            if hit { "caught" } else { "missed" }
        );
        ClawEvent::GrabAttempted {
            body: Some(index),
            hit,
        }
    }

    /// Carry the held dino one tick: maybe it slips, otherwise it hangs
    /// under the claw
    fn carry<R: Rng + ?Sized>(
        &mut self,
        bodies: &mut [Body],
        arena: &Arena,
        tuning: &ClawTuning,
        rng: &mut R,
    ) -> Option<ClawEvent> {
        let index = self.held?;
        let Some(body) = bodies.get_mut(index) else {
            self.held = None;
            return None;
        };

        if rng.random::<f32>() < tuning.slip_chance {
            body.grabbed = false;
            body.vel = Vec2::new(
                (rng.random::<f32>() - 0.5) * tuning.release_spread,
                rng.random::<f32>() * tuning.slip_fall,
            );
            self.held = None;
            log::debug!("Dino #{} slipped at y={:.0}", body.id, self.y);
            return Some(ClawEvent::Slipped { body: index });
        }

        hang(body, self.center(), arena);
        None
    }

    /// Drop any grip and pull the claw back inside a (resized) field
    pub fn fit_to(&mut self, arena: &Arena) {
        self.held = None;
        self.x = arena.clamp_claw_x(self.x);
        self.target_x = arena.clamp_claw_x(self.target_x);
        self.y = crate::clamp_span(self.y, arena.claw_min_y, arena.claw_max_y);
    }
}

/// Distance under which the idle claw snaps onto its target
const SNAP_DISTANCE: f32 = 1e-3;

/// Slave a carried dino beneath the claw, never below the floor
fn hang(body: &mut Body, claw: Vec2, arena: &Arena) {
    body.pos = Vec2::new(
        claw.x - body.size.x / 2.0,
        (claw.y + HANG_OFFSET).min(arena.floor_y - body.size.y),
    );
    body.vel = Vec2::ZERO;
}

fn collect(body: &mut Body, index: usize, via: CollectVia) -> Option<ClawEvent> {
    body.mark_collected().then_some(ClawEvent::Collected {
        body: index,
        color: body.color,
        via,
    })
}
