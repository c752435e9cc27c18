//! Headless front-end: frames and scores go to the log

use super::{Frame, RenderSink, ScoreSink};

/// Logs a frame summary every `every` ticks and every score change
#[derive(Debug, Clone)]
pub struct LogSink {
    every: u64,
    last_scores: Option<(u64, u32)>,
}

impl LogSink {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            last_scores: None,
        }
    }

    /// Last score/attempts pair received
    pub fn last_scores(&self) -> Option<(u64, u32)> {
        self.last_scores
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(120)
    }
}

impl RenderSink for LogSink {
    fn render(&mut self, frame: &Frame<'_>) {
        if frame.tick % self.every != 0 {
            return;
        }
        log::debug!(
            "tick {}: claw {:?} at ({:.0}, {:.0}){}, {} dinos in pit, {} in box",
            frame.tick,
            frame.claw.phase(),
            frame.claw.x,
            frame.claw.y,
            frame
                .held_body()
                .map(|b| format!(" holding #{}", b.id))
                .unwrap_or_default(),
            frame.visible_bodies().count(),
            frame.collected.len()
        );
    }
}

impl ScoreSink for LogSink {
    fn update_scores(&mut self, score: u64, attempts: u32) {
        if self.last_scores == Some((score, attempts)) {
            return;
        }
        self.last_scores = Some((score, attempts));
        log::info!("Score {score} | Attempts {attempts}");
    }
}
