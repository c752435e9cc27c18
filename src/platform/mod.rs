//! Platform abstraction layer
//!
//! Maps host input (keyboard codes, pointer clicks) to game commands so the
//! browser and native front-ends share one binding table.

pub mod input;

pub use input::{Command, command_for_click, command_for_key};
