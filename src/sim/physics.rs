//! Per-tick dino physics
//!
//! Bodies are processed in stable insertion order. Each body is integrated
//! and then resolved against every other free body, so a pair is visited
//! twice per tick (once from each side) and earlier bodies see later ones
//! before those have moved. That order is part of the observable behavior.
//! The pair scan is O(n²); grid buckets would scale it without changing the
//! resolution order.

use glam::Vec2;

use super::arena::Arena;
use super::body::Body;
use super::collision::{center_contact, push_direction};
use crate::tuning::PhysicsTuning;

/// Separation axis for two bodies with coincident centers
const COINCIDENT_FALLBACK: Vec2 = Vec2::X;

#[derive(Debug, Clone, Default)]
pub struct PhysicsWorld {
    params: PhysicsTuning,
}

impl PhysicsWorld {
    pub fn new(params: PhysicsTuning) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &PhysicsTuning {
        &self.params
    }

    /// Advance every free body by one tick. Grabbed and collected bodies are
    /// left untouched; nothing is ever removed.
    pub fn advance(&self, bodies: &mut [Body], arena: &Arena) {
        for i in 0..bodies.len() {
            if !bodies[i].is_free() {
                continue;
            }
            self.integrate(&mut bodies[i], arena);

            for j in 0..bodies.len() {
                if j == i || !bodies[j].is_free() {
                    continue;
                }
                let (a, b) = pair_mut(bodies, i, j);
                self.resolve_pair(a, b);
            }
        }

        // Pair separation can shove an already-processed body back out
        for body in bodies.iter_mut().filter(|b| b.is_free()) {
            confine(body, arena);
        }
    }

    /// Gravity, integration, then floor, wall and drop-box response
    pub fn integrate(&self, body: &mut Body, arena: &Arena) {
        let p = &self.params;

        body.vel.y += p.gravity;
        body.pos += body.vel;

        // Floor
        if body.bottom() >= arena.floor_y {
            body.pos.y = arena.floor_y - body.size.y;
            body.vel.y *= -p.bounce;
            body.vel.x *= p.friction;
            body.on_ground = true;

            if body.vel.y.abs() < p.rest_threshold {
                body.vel.y = 0.0;
            }
        }

        // Walls
        if body.pos.x <= 0.0 {
            body.pos.x = 0.0;
            body.vel.x *= -p.bounce;
        }
        if body.pos.x + body.size.x >= arena.width {
            body.pos.x = arena.width - body.size.x;
            body.vel.x *= -p.bounce;
        }

        // Drop-off box is a no-entry zone
        if body.bounds().overlaps(&arena.drop_box) {
            if let Some(dir) = push_direction(arena.drop_box.center(), body.center()) {
                body.vel += dir * p.box_push;
                body.pos += dir * p.box_nudge;
            }
        }
    }

    /// Separate two overlapping bodies and exchange part of their normal
    /// velocity. Not momentum-exact.
    pub fn resolve_pair(&self, a: &mut Body, b: &mut Body) {
        let p = &self.params;
        let Some(contact) = center_contact(
            a.center(),
            b.center(),
            p.contact_distance,
            COINCIDENT_FALLBACK,
        ) else {
            return;
        };

        let n = contact.normal;
        let half = n * contact.penetration * 0.5;
        a.pos += half;
        b.pos -= half;

        let impulse = (a.vel - b.vel).dot(n) * p.impulse_scale;
        a.vel -= n * impulse;
        b.vel += n * impulse;
    }
}

/// Position-only clamp back inside the walls and above the floor
fn confine(body: &mut Body, arena: &Arena) {
    body.pos.x = crate::clamp_span(body.pos.x, 0.0, arena.width - body.size.x);
    if body.bottom() > arena.floor_y {
        body.pos.y = arena.floor_y - body.size.y;
    }
}

/// Two distinct mutable elements of a slice
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(i, j);
    if i < j {
        let (left, right) = items.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::DinoColor;
    use proptest::prelude::*;

    fn world() -> PhysicsWorld {
        PhysicsWorld::default()
    }

    fn body_at(id: u32, x: f32, y: f32) -> Body {
        Body::new(id, Vec2::new(x, y), DinoColor(0))
    }

    fn assert_in_bounds(body: &Body, arena: &Arena) {
        assert!(body.pos.is_finite(), "non-finite position {:?}", body.pos);
        assert!(body.vel.is_finite(), "non-finite velocity {:?}", body.vel);
        assert!(body.bottom() <= arena.floor_y + 1e-3, "below floor: {:?}", body.pos);
        assert!(body.pos.x >= 0.0, "left of wall: {:?}", body.pos);
        assert!(
            body.pos.x <= arena.width - body.size.x + 1e-3,
            "right of wall: {:?}",
            body.pos
        );
    }

    #[test]
    fn test_gravity_then_integration() {
        let arena = Arena::new(1000.0, 800.0);
        let mut body = body_at(0, 100.0, 100.0);
        body.vel = Vec2::new(1.0, 0.0);

        world().integrate(&mut body, &arena);
        assert!((body.vel.y - 0.3).abs() < 1e-6);
        assert!((body.pos.y - 100.3).abs() < 1e-4);
        assert!((body.pos.x - 101.0).abs() < 1e-4);
        assert!(!body.on_ground);
    }

    #[test]
    fn test_floor_bounce_and_rest() {
        let arena = Arena::new(1000.0, 800.0);
        let mut body = body_at(0, 100.0, arena.floor_y - 48.0 - 1.0);
        body.vel = Vec2::new(2.0, 10.0);

        world().integrate(&mut body, &arena);
        assert_eq!(body.bottom(), arena.floor_y);
        // (10 + 0.3) * -0.3
        assert!((body.vel.y + 3.09).abs() < 1e-4);
        assert!((body.vel.x - 1.96).abs() < 1e-4);
        assert!(body.on_ground);

        // Slow landing comes to rest
        let mut body = body_at(1, 100.0, arena.floor_y - 48.0);
        body.vel = Vec2::new(0.0, 1.0);
        world().integrate(&mut body, &arena);
        assert_eq!(body.vel.y, 0.0);
        assert_eq!(body.bottom(), arena.floor_y);
    }

    #[test]
    fn test_wall_clamp_reflects() {
        let arena = Arena::new(1000.0, 800.0);
        let mut body = body_at(0, 2.0, 100.0);
        body.vel = Vec2::new(-10.0, 0.0);
        world().integrate(&mut body, &arena);
        assert_eq!(body.pos.x, 0.0);
        assert!((body.vel.x - 3.0).abs() < 1e-5);

        let mut body = body_at(1, 950.0, 100.0);
        body.vel = Vec2::new(10.0, 0.0);
        world().integrate(&mut body, &arena);
        assert_eq!(body.pos.x, 952.0);
        assert!((body.vel.x + 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_drop_box_pushes_out() {
        let arena = Arena::new(1000.0, 800.0);
        // Straddle the left edge of the box (box x = 800..920, y = 500..700)
        let mut body = body_at(0, 770.0, 560.0);
        let before = body.center();
        world().integrate(&mut body, &arena);

        // Pushed left, away from the box center
        assert!(body.vel.x < -4.0);
        assert!(body.center().x < before.x);
    }

    #[test]
    fn test_pair_separation_and_impulse() {
        let mut a = body_at(0, 100.0, 100.0);
        let mut b = body_at(1, 140.0, 100.0);
        a.vel = Vec2::new(2.0, 0.0);
        b.vel = Vec2::new(-2.0, 0.0);

        world().resolve_pair(&mut a, &mut b);

        // 8px overlap split evenly
        assert!((a.pos.x - 96.0).abs() < 1e-4);
        assert!((b.pos.x - 144.0).abs() < 1e-4);
        // n = (-1, 0); v_rel·n = -4; impulse = -2
        assert!((a.vel.x - 0.0).abs() < 1e-5);
        assert!((b.vel.x - 0.0).abs() < 1e-5);
    }

    #[test]
    fn test_coincident_pair_uses_fallback_axis() {
        let mut a = body_at(0, 300.0, 300.0);
        let mut b = body_at(1, 300.0, 300.0);

        world().resolve_pair(&mut a, &mut b);

        assert!(a.pos.is_finite() && b.pos.is_finite());
        assert!(a.vel.is_finite() && b.vel.is_finite());
        assert!((a.pos.x - 324.0).abs() < 1e-4);
        assert!((b.pos.x - 276.0).abs() < 1e-4);
        assert_eq!(a.pos.y, b.pos.y);
    }

    #[test]
    fn test_identical_positions_separate_without_nan() {
        let arena = Arena::new(1000.0, 800.0);
        let mut bodies = vec![body_at(0, 300.0, 300.0), body_at(1, 300.0, 300.0)];

        world().advance(&mut bodies, &arena);

        for body in &bodies {
            assert_in_bounds(body, &arena);
        }
        assert!(bodies[0].pos.distance(bodies[1].pos) > 1.0);
    }

    #[test]
    fn test_grabbed_and_collected_are_skipped() {
        let arena = Arena::new(1000.0, 800.0);
        let mut bodies = vec![body_at(0, 300.0, 300.0), body_at(1, 300.0, 300.0), body_at(2, 310.0, 300.0)];
        bodies[0].grabbed = true;
        bodies[1].collected = true;
        let (held, gone) = (bodies[0].pos, bodies[1].pos);

        world().advance(&mut bodies, &arena);

        assert_eq!(bodies[0].pos, held);
        assert_eq!(bodies[1].pos, gone);
        assert!(bodies[2].pos.y > 300.0);
    }

    #[test]
    fn test_pile_settles_on_floor() {
        let arena = Arena::new(1000.0, 800.0);
        let mut bodies: Vec<Body> = (0..20)
            .map(|i| body_at(i, 150.0 + (i % 10) as f32 * 50.0, 500.0 - (i / 10) as f32 * 60.0))
            .collect();

        for _ in 0..600 {
            world().advance(&mut bodies, &arena);
            for body in &bodies {
                assert_in_bounds(body, &arena);
            }
        }
        assert!(bodies.iter().all(|b| b.on_ground || b.bottom() < arena.floor_y));
    }

    #[test]
    fn test_pair_mut() {
        let mut items = [1, 2, 3];
        let (a, b) = pair_mut(&mut items, 2, 0);
        assert_eq!((*a, *b), (3, 1));
        let (a, b) = pair_mut(&mut items, 0, 1);
        assert_eq!((*a, *b), (1, 2));
    }

    proptest! {
        #[test]
        fn prop_advance_keeps_bodies_in_bounds(
            seeds in prop::collection::vec(
                (0.0f32..952.0, 0.0f32..672.0, -20.0f32..20.0, -20.0f32..20.0),
                1..24,
            ),
            steps in 1usize..40,
        ) {
            let arena = Arena::new(1000.0, 800.0);
            let mut bodies: Vec<Body> = seeds
                .iter()
                .enumerate()
                .map(|(i, &(x, y, vx, vy))| {
                    let mut b = body_at(i as u32, x, y);
                    b.vel = Vec2::new(vx, vy);
                    b
                })
                .collect();

            let world = world();
            for _ in 0..steps {
                world.advance(&mut bodies, &arena);
                for body in &bodies {
                    prop_assert!(body.pos.is_finite() && body.vel.is_finite());
                    prop_assert!(body.bottom() <= arena.floor_y + 1e-3);
                    prop_assert!(body.pos.x >= 0.0);
                    prop_assert!(body.pos.x <= arena.width - body.size.x + 1e-3);
                }
            }
        }
    }
}
