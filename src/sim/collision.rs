//! Collision geometry for the dino pit
//!
//! Everything here is axis-aligned boxes and center-to-center contacts. Every
//! normalization is guarded: a zero-length separation never produces NaN.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Separations shorter than this are treated as coincident centers
pub const MIN_SEPARATION: f32 = 1e-6;

/// Axis-aligned rectangle (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Build from center and half extents
    pub fn from_center(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            size: half * 2.0,
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap test: touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }

    /// Whether `x` lies within the horizontal span (edges inclusive)
    #[inline]
    pub fn spans_x(&self, x: f32) -> bool {
        x >= self.min.x && x <= self.max().x
    }
}

/// Result of a center-to-center contact check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from the second center toward the first
    pub normal: Vec2,
    /// How far the centers are inside the contact distance
    pub penetration: f32,
}

/// Unit direction from `from` to `to`, or `None` when the points coincide
#[inline]
pub fn push_direction(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    let distance = delta.length();
    if distance > MIN_SEPARATION && distance.is_finite() {
        Some(delta / distance)
    } else {
        None
    }
}

/// Check whether two centers are closer than `contact_distance`
///
/// Coincident centers have no line of centers; they resolve along
/// `fallback` (expected to be a unit vector) with full penetration so the
/// pair still separates.
pub fn center_contact(a: Vec2, b: Vec2, contact_distance: f32, fallback: Vec2) -> Option<Contact> {
    let distance = a.distance(b);
    if !(distance < contact_distance) {
        return None;
    }

    match push_direction(b, a) {
        Some(normal) => Some(Contact {
            normal,
            penetration: contact_distance - distance,
        }),
        None => Some(Contact {
            normal: fallback,
            penetration: contact_distance,
        }),
    }
}
