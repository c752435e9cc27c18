//! Input bindings

use serde::{Deserialize, Serialize};

use crate::consts::NUDGE_STEP;

/// A discrete player command
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Set the claw target to an absolute x
    MoveTo(f32),
    /// Shift the claw target
    Nudge(f32),
    /// Start a descent
    Drop,
    /// Let go of the carried dino
    Release,
}

/// Map a `KeyboardEvent.code` to a command
pub fn command_for_key(code: &str) -> Option<Command> {
    match code {
        "Space" => Some(Command::Drop),
        "KeyR" => Some(Command::Release),
        "ArrowLeft" => Some(Command::Nudge(-NUDGE_STEP)),
        "ArrowRight" => Some(Command::Nudge(NUDGE_STEP)),
        _ => None,
    }
}

/// A click or tap moves the claw over the pointer
pub fn command_for_click(x: f32) -> Command {
    Command::MoveTo(x)
}
