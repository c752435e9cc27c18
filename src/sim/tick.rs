//! Fixed-step simulation tick
//!
//! One call per display frame. Queued commands are applied first, then the
//! dinos move, then the claw.

use rand::Rng;

use super::claw::{ClawEvent, ClawPhase};
use super::physics::PhysicsWorld;
use super::state::GameState;
use crate::tuning::ClawTuning;

/// Commands collected between two ticks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Absolute claw target (last one wins)
    pub target_x: Option<f32>,
    /// Relative target shift, applied after `target_x`
    pub nudge: f32,
    /// Start a descent
    pub drop: bool,
    /// Let go of the carried dino
    pub release: bool,
}

impl TickInput {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Advance the game state by one tick and return what the claw did
pub fn tick<R: Rng + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    physics: &PhysicsWorld,
    tuning: &ClawTuning,
    rng: &mut R,
) -> Vec<ClawEvent> {
    let mut events = Vec::new();

    // Commands; the claw ignores the ones that don't fit its phase
    if let Some(x) = input.target_x {
        state.claw.move_to(x, &state.arena);
    }
    if input.nudge != 0.0 {
        state.claw.nudge(input.nudge, &state.arena);
    }
    if input.drop {
        events.extend(state.claw.drop_claw());
    }
    if input.release {
        events.extend(
            state
                .claw
                .release(&mut state.bodies, &state.arena, tuning, rng),
        );
    }

    physics.advance(&mut state.bodies, &state.arena);
    state
        .claw
        .update(&mut state.bodies, &state.arena, tuning, rng, &mut events);

    for event in &events {
        state.apply_event(event);
    }
    state.time_ticks += 1;

    debug_assert!(state.grabbed_count() <= 1, "claw holds more than one dino");
    events
}

/// Demo player: line up over the dino lying lowest in the pit, then drop.
/// Releases over the drop-off box when it happens to be carrying there.
pub fn autopilot_input(state: &GameState) -> TickInput {
    let claw = &state.claw;
    let mut input = TickInput::default();

    match claw.phase() {
        ClawPhase::Idle => {
            let (lo, hi) = state.arena.claw_x_range();
            let target = state
                .bodies
                .iter()
                .filter(|b| b.is_free())
                .map(|b| b.center())
                .filter(|c| c.x >= lo && c.x <= hi && !state.arena.drop_box.spans_x(c.x))
                .max_by(|a, b| {
                    a.y.partial_cmp(&b.y)
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then_with(|| {
                            // Prefer the nearer one among equally low dinos
                            let da = (a.x - claw.x).abs();
                            let db = (b.x - claw.x).abs();
                            db.partial_cmp(&da).unwrap_or(std::cmp::Ordering::Equal)
                        })
                });

            if let Some(target) = target {
                if (claw.x - target.x).abs() < AUTOPILOT_LINEUP {
                    input.drop = true;
                } else if (claw.target_x - target.x).abs() >= AUTOPILOT_LINEUP {
                    input.target_x = Some(target.x);
                }
            }
        }
        ClawPhase::Returning => {
            if claw.is_carrying() && state.arena.drop_box.spans_x(claw.x) {
                input.release = true;
            }
        }
        ClawPhase::Descending => {}
    }

    input
}

/// Horizontal error the autopilot accepts before dropping
const AUTOPILOT_LINEUP: f32 = 2.0;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::arena::Arena;
    use crate::sim::body::{Body, DinoColor};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct Harness {
        state: GameState,
        physics: PhysicsWorld,
        tuning: Tuning,
        rng: Pcg32,
    }

    impl Harness {
        fn new(seed: u64) -> Self {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let state = GameState::new(seed, Arena::new(1000.0, 800.0), tuning.spawn_speed, &mut rng);
            Self {
                state,
                physics: PhysicsWorld::new(tuning.physics.clone()),
                tuning,
                rng,
            }
        }

        fn step(&mut self, input: &TickInput) -> Vec<ClawEvent> {
            tick(
                &mut self.state,
                input,
                &self.physics,
                &self.tuning.claw,
                &mut self.rng,
            )
        }
    }

    #[test]
    fn test_tick_idle_without_input() {
        let mut h = Harness::new(12345);
        let events = h.step(&TickInput::default());
        assert!(events.is_empty());
        assert_eq!(h.state.time_ticks, 1);
        assert_eq!(h.state.claw.phase(), ClawPhase::Idle);
    }

    #[test]
    fn test_drop_runs_full_cycle() {
        let mut h = Harness::new(12345);
        let events = h.step(&TickInput {
            drop: true,
            ..Default::default()
        });
        assert_eq!(events.first(), Some(&ClawEvent::DropStarted));
        assert_eq!(h.state.claw.phase(), ClawPhase::Descending);

        let mut completed = 0;
        for _ in 0..1000 {
            for event in h.step(&TickInput::default()) {
                if matches!(event, ClawEvent::CycleCompleted { .. }) {
                    completed += 1;
                }
            }
            assert!(h.state.grabbed_count() <= 1);
        }
        assert_eq!(completed, 1);
        assert_eq!(h.state.attempts, 1);
        assert_eq!(h.state.claw.phase(), ClawPhase::Idle);
        assert_eq!(h.state.score, 10 * h.state.collected.len() as u64);
    }

    #[test]
    fn test_move_ignored_while_descending() {
        let mut h = Harness::new(1);
        h.step(&TickInput {
            drop: true,
            ..Default::default()
        });
        let target = h.state.claw.target_x;
        h.step(&TickInput {
            target_x: Some(100.0),
            nudge: 20.0,
            ..Default::default()
        });
        assert_eq!(h.state.claw.target_x, target);
    }

    #[test]
    fn test_determinism() {
        let mut a = Harness::new(99999);
        let mut b = Harness::new(99999);

        for i in 0..2000 {
            let input_a = autopilot_input(&a.state);
            let input_b = autopilot_input(&b.state);
            assert_eq!(input_a, input_b, "diverged at tick {i}");
            a.step(&input_a);
            b.step(&input_b);
        }

        assert_eq!(a.state.score, b.state.score);
        assert_eq!(a.state.attempts, b.state.attempts);
        for (x, y) in a.state.bodies.iter().zip(&b.state.bodies) {
            assert_eq!(x.pos, y.pos);
        }
    }

    #[test]
    fn test_autopilot_plays() {
        let mut h = Harness::new(7);
        let mut last_attempts = 0;
        for _ in 0..20_000 {
            let input = autopilot_input(&h.state);
            h.step(&input);

            // Invariants hold every tick
            assert!(h.state.grabbed_count() <= 1);
            assert_eq!(h.state.score, 10 * h.state.collected.len() as u64);
            assert!(h.state.attempts >= last_attempts);
            last_attempts = h.state.attempts;
            for body in h.state.bodies.iter().filter(|b| b.is_free()) {
                assert!(body.bottom() <= h.state.arena.floor_y + 1e-3);
                assert!(body.pos.x >= 0.0);
                assert!(body.pos.x <= h.state.arena.width - body.size.x + 1e-3);
            }
        }
        assert!(h.state.attempts >= 10, "only {} attempts", h.state.attempts);
        assert!(h.state.score > 0);
    }

    #[test]
    fn test_collected_never_reverts() {
        let mut h = Harness::new(31337);
        let mut seen = vec![false; h.state.bodies.len()];
        for _ in 0..20_000 {
            let input = autopilot_input(&h.state);
            h.step(&input);
            for (flag, body) in seen.iter_mut().zip(&h.state.bodies) {
                assert!(!*flag || body.collected, "dino #{} un-collected", body.id);
                *flag = body.collected;
            }
        }
    }

    #[test]
    fn test_release_outside_box_via_input() {
        let mut h = Harness::new(3);
        let arena = h.state.arena.clone();
        let spot = Vec2::new(400.0, arena.claw_max_y);
        h.state.bodies = vec![Body::new(0, spot - Vec2::splat(24.0), DinoColor(1))];
        h.state.claw.x = 400.0;
        h.state.claw.target_x = 400.0;
        h.tuning.claw.grab_chance = 1.0;
        h.tuning.claw.slip_chance = 0.0;

        h.step(&TickInput {
            drop: true,
            ..Default::default()
        });
        while !h.state.claw.is_carrying() {
            h.step(&TickInput::default());
            assert_ne!(h.state.claw.phase(), ClawPhase::Idle, "grab never happened");
        }

        let score = h.state.score;
        h.step(&TickInput {
            release: true,
            ..Default::default()
        });
        assert!(!h.state.claw.is_carrying());
        assert!(!h.state.bodies[0].grabbed);
        assert!(!h.state.bodies[0].collected);
        assert_eq!(h.state.score, score);
    }

    #[test]
    fn test_input_is_empty() {
        assert!(TickInput::default().is_empty());
        assert!(
            !TickInput {
                release: true,
                ..Default::default()
            }
            .is_empty()
        );
    }
}
