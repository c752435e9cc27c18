//! Game balance and physics tuning
//!
//! Defaults reproduce the classic arcade feel. A tuning file is plain JSON;
//! missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "default" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Probability that a grab attempt on a dino in range succeeds
    pub fn grab_chance(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.85,
            Difficulty::Normal => 0.7,
            Difficulty::Hard => 0.5,
        }
    }

    /// Per-tick probability of the carried dino slipping out on the way up
    pub fn slip_chance(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.003,
            Difficulty::Normal => 0.006,
            Difficulty::Hard => 0.012,
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ConfigError::UnknownDifficulty(s.to_string()))
    }
}

/// Per-tick physics parameters for the dino pit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Downward acceleration (px/tick²)
    pub gravity: f32,
    /// Horizontal damping applied on floor contact
    pub friction: f32,
    /// Restitution for floor and wall bounces (0..=1)
    pub bounce: f32,
    /// Vertical speed below which a floor bounce comes to rest
    pub rest_threshold: f32,
    /// Velocity kick pushing dinos out of the drop-off box
    pub box_push: f32,
    /// Position nudge pushing dinos out of the drop-off box
    pub box_nudge: f32,
    /// Center distance under which two dinos collide
    pub contact_distance: f32,
    /// Fraction of the relative normal velocity exchanged on contact
    pub impulse_scale: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: 0.3,
            friction: 0.98,
            bounce: 0.3,
            rest_threshold: 0.5,
            box_push: 5.0,
            box_nudge: 3.0,
            contact_distance: crate::consts::BODY_SIZE,
            impulse_scale: 0.5,
        }
    }
}

/// Claw movement and grab odds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClawTuning {
    /// Vertical claw speed while descending/returning (px/tick)
    pub drop_speed: f32,
    /// Fraction of the remaining distance to the target covered per idle tick
    pub ease: f32,
    /// Dinos whose center is this close to the claw center can be grabbed
    pub grab_radius: f32,
    pub grab_chance: f32,
    pub slip_chance: f32,
    /// Velocity kick given to loose dinos touching the moving claw
    pub push: f32,
    /// Horizontal spread of a dino dropped back into play
    pub release_spread: f32,
    /// Upward speed of a dino released outside the box
    pub release_lift: f32,
    /// Maximum downward speed of a dino that slips out
    pub slip_fall: f32,
}

impl Default for ClawTuning {
    fn default() -> Self {
        Self {
            drop_speed: 3.0,
            ease: 0.1,
            grab_radius: 60.0,
            grab_chance: Difficulty::Normal.grab_chance(),
            slip_chance: Difficulty::Normal.slip_chance(),
            push: 3.0,
            release_spread: 4.0,
            release_lift: 2.0,
            slip_fall: 2.0,
        }
    }
}

/// Complete balance configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub difficulty: Difficulty,
    pub physics: PhysicsTuning,
    pub claw: ClawTuning,
    /// Peak horizontal speed of freshly spawned dinos
    pub spawn_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            physics: PhysicsTuning::default(),
            claw: ClawTuning::default(),
            spawn_speed: 2.0,
        }
    }
}

impl Tuning {
    /// Create tuning from a difficulty preset (applies preset odds)
    pub fn from_preset(preset: Difficulty) -> Self {
        let mut tuning = Self::default();
        tuning.apply_preset(preset);
        tuning
    }

    /// Apply a difficulty preset (overwrites grab and slip odds)
    pub fn apply_preset(&mut self, preset: Difficulty) {
        self.difficulty = preset;
        self.claw.grab_chance = preset.grab_chance();
        self.claw.slip_chance = preset.slip_chance();
    }

    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!(
            "Loaded tuning from {} ({})",
            path.display(),
            tuning.difficulty.as_str()
        );
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.physics;
        let c = &self.claw;

        unit_interval("physics.bounce", p.bounce)?;
        unit_interval("physics.friction", p.friction)?;
        unit_interval("physics.impulse_scale", p.impulse_scale)?;
        unit_interval("claw.ease", c.ease)?;
        unit_interval("claw.grab_chance", c.grab_chance)?;
        unit_interval("claw.slip_chance", c.slip_chance)?;

        non_negative("physics.gravity", p.gravity)?;
        non_negative("physics.rest_threshold", p.rest_threshold)?;
        non_negative("physics.box_push", p.box_push)?;
        non_negative("physics.box_nudge", p.box_nudge)?;
        non_negative("claw.grab_radius", c.grab_radius)?;
        non_negative("claw.push", c.push)?;
        non_negative("claw.release_spread", c.release_spread)?;
        non_negative("claw.release_lift", c.release_lift)?;
        non_negative("claw.slip_fall", c.slip_fall)?;
        non_negative("spawn_speed", self.spawn_speed)?;

        positive("physics.contact_distance", p.contact_distance)?;
        positive("claw.drop_speed", c.drop_speed)?;
        if c.ease == 0.0 {
            return Err(ConfigError::invalid("claw.ease", "must be > 0"));
        }

        Ok(())
    }
}

fn unit_interval(field: &str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        log::warn!("Rejected tuning value {field}={value}");
        Err(ConfigError::invalid(field, format!("{value} is outside [0, 1]")))
    }
}

fn non_negative(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        log::warn!("Rejected tuning value {field}={value}");
        Err(ConfigError::invalid(field, format!("{value} must be >= 0")))
    }
}

fn positive(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        log::warn!("Rejected tuning value {field}={value}");
        Err(ConfigError::invalid(field, format!("{value} must be > 0")))
    }
}
