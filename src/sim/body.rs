//! Dino bodies: the collectible creatures in the pit

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::collision::Rect;
use crate::consts::*;

/// Cosmetic palette index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DinoColor(pub u8);

impl DinoColor {
    pub const PALETTE: [&'static str; 10] = [
        "#90EE90", "#FFB6C1", "#87CEEB", "#DDA0DD", "#F0E68C", "#98FB98", "#FFDAB9", "#B0E0E6",
        "#EE82EE", "#F5DEB3",
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.random_range(0..Self::PALETTE.len()) as u8)
    }

    /// CSS hex color for this palette entry
    pub fn hex(self) -> &'static str {
        Self::PALETTE[self.0 as usize % Self::PALETTE.len()]
    }
}

/// A dino in the pit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Insertion id; bodies are never reordered or removed
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub color: DinoColor,
    /// Touched the floor at some point (advisory)
    pub on_ground: bool,
    /// Held by the claw; the claw owns the position
    pub grabbed: bool,
    /// Terminal: out of play for good
    pub collected: bool,
}

impl Body {
    pub fn new(id: u32, pos: Vec2, color: DinoColor) -> Self {
        Self {
            id,
            pos,
            size: Vec2::splat(BODY_SIZE),
            vel: Vec2::ZERO,
            color,
            on_ground: false,
            grabbed: false,
            collected: false,
        }
    }

    /// New dino with a random color and a small random sideways drift
    pub fn spawn<R: Rng + ?Sized>(id: u32, pos: Vec2, spawn_speed: f32, rng: &mut R) -> Self {
        let mut body = Self::new(id, pos, DinoColor::random(rng));
        body.vel.x = (rng.random::<f32>() - 0.5) * spawn_speed;
        body
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect {
            min: self.pos,
            size: self.size,
        }
    }

    /// Free bodies take part in physics and can be grabbed
    #[inline]
    pub fn is_free(&self) -> bool {
        !self.grabbed && !self.collected
    }

    /// Mark the body collected. Returns false if it already was.
    pub fn mark_collected(&mut self) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        self.grabbed = false;
        self.vel = Vec2::ZERO;
        true
    }
}

/// Lay out a fresh grid of dinos (5 rows, columns fill the free width)
pub fn spawn_grid<R: Rng + ?Sized>(arena: &Arena, spawn_speed: f32, rng: &mut R) -> Vec<Body> {
    let cols = ((arena.width - GRID_SIDE_RESERVE) / GRID_SPACING).floor().max(0.0) as u32;
    let start_y = arena.height - GRID_BOTTOM_INSET;

    let mut bodies = Vec::with_capacity((GRID_ROWS * cols) as usize);
    for row in 0..GRID_ROWS {
        for col in 0..cols {
            let x = GRID_LEFT + col as f32 * GRID_SPACING + rng.random::<f32>() * GRID_JITTER;
            let y = start_y - row as f32 * GRID_SPACING + rng.random::<f32>() * GRID_JITTER;
            let id = bodies.len() as u32;
            bodies.push(Body::spawn(id, Vec2::new(x, y), spawn_speed, rng));
        }
    }

    log::info!(
        "Seeded {} dinos ({} rows x {} cols) in {}x{} field",
        bodies.len(),
        GRID_ROWS,
        cols,
        arena.width,
        arena.height
    );
    bodies
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_grid_layout() {
        let arena = Arena::new(1000.0, 800.0);
        let mut rng = Pcg32::seed_from_u64(7);
        let bodies = spawn_grid(&arena, 2.0, &mut rng);

        // (1000 - 400) / 60 = 10 columns, 5 rows
        assert_eq!(bodies.len(), 50);
        for (i, body) in bodies.iter().enumerate() {
            assert_eq!(body.id as usize, i);
            assert!(body.is_free());
            assert!(body.vel.x.abs() <= 1.0);
            assert_eq!(body.vel.y, 0.0);
            assert!(body.pos.x >= GRID_LEFT && body.pos.x <= GRID_LEFT + 9.0 * GRID_SPACING + GRID_JITTER);
        }
    }

    #[test]
    fn test_spawn_grid_narrow_field_is_empty() {
        let arena = Arena::new(300.0, 600.0);
        let mut rng = Pcg32::seed_from_u64(7);
        assert!(spawn_grid(&arena, 2.0, &mut rng).is_empty());
    }

    #[test]
    fn test_spawn_grid_is_deterministic() {
        let arena = Arena::new(1200.0, 900.0);
        let a = spawn_grid(&arena, 2.0, &mut Pcg32::seed_from_u64(42));
        let b = spawn_grid(&arena, 2.0, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.vel, y.vel);
            assert_eq!(x.color, y.color);
        }
    }

    #[test]
    fn test_mark_collected_once() {
        let mut body = Body::new(0, Vec2::ZERO, DinoColor(3));
        body.grabbed = true;
        body.vel = Vec2::new(1.0, 2.0);

        assert!(body.mark_collected());
        assert!(body.collected);
        assert!(!body.grabbed);
        assert_eq!(body.vel, Vec2::ZERO);

        assert!(!body.mark_collected());
        assert!(body.collected);
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(DinoColor(0).hex(), "#90EE90");
        assert_eq!(DinoColor(12).hex(), DinoColor(2).hex());
    }
}
