//! Rendering collaborators
//!
//! The simulation never draws. After each tick the controller hands a
//! [`Frame`] to a [`RenderSink`] and the counters to a [`ScoreSink`].

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod log_sink;

pub use log_sink::LogSink;

use crate::sim::{Arena, Body, Claw, CollectedRecord};

/// Read-only view of everything a renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub tick: u64,
    pub arena: &'a Arena,
    /// All dinos including tombstones; use [`Frame::visible_bodies`] to draw
    pub bodies: &'a [Body],
    pub claw: &'a Claw,
    pub collected: &'a [CollectedRecord],
}

impl<'a> Frame<'a> {
    /// Dinos still in the pit, insertion order
    pub fn visible_bodies(self) -> impl Iterator<Item = &'a Body> {
        self.bodies.iter().filter(|b| !b.collected)
    }

    /// The dino hanging from the claw, if any
    pub fn held_body(self) -> Option<&'a Body> {
        self.claw.held().and_then(|i| self.bodies.get(i))
    }
}

/// Produces a visual frame
pub trait RenderSink {
    fn render(&mut self, frame: &Frame<'_>);
}

/// Displays score and attempts
pub trait ScoreSink {
    fn update_scores(&mut self, score: u64, attempts: u32);
}

/// Discards everything (tests, benchmarks)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn render(&mut self, _frame: &Frame<'_>) {}
}

impl ScoreSink for NullSink {
    fn update_scores(&mut self, _score: u64, _attempts: u32) {}
}
