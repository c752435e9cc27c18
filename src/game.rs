//! Game controller: sole owner of the simulation
//!
//! Hosts feed commands in at any time; they are queued and applied at the
//! start of the next [`GameController::tick`]. Everything runs on one
//! thread; multi-threaded hosts must route every call through one owner.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::platform::Command;
use crate::renderer::{Frame, RenderSink, ScoreSink};
use crate::sim::{
    Arena, Body, Claw, ClawEvent, CollectedRecord, GameState, PhysicsWorld, TickInput, tick,
};
use crate::tuning::Tuning;

pub struct GameController {
    state: GameState,
    physics: PhysicsWorld,
    tuning: Tuning,
    rng: Pcg32,
    /// Commands waiting for the next tick
    pending: TickInput,
    /// What the claw did during the last tick
    last_events: Vec<ClawEvent>,
}

impl GameController {
    /// New game in a `width` x `height` field
    pub fn new(width: f32, height: f32, seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = GameState::new(seed, Arena::new(width, height), tuning.spawn_speed, &mut rng);
        log::info!(
            "New game: seed {seed}, {}x{}, {} difficulty",
            width,
            height,
            tuning.difficulty.as_str()
        );
        Self {
            state,
            physics: PhysicsWorld::new(tuning.physics.clone()),
            tuning,
            rng,
            pending: TickInput::default(),
            last_events: Vec::new(),
        }
    }

    /// New game with default tuning
    pub fn with_seed(width: f32, height: f32, seed: u64) -> Self {
        Self::new(width, height, seed, Tuning::default())
    }

    // === Input ===

    /// Point the claw at an absolute x (Idle only, applied next tick)
    pub fn move_to(&mut self, x: f32) {
        self.pending.target_x = Some(x);
        self.pending.nudge = 0.0;
    }

    /// Shift the claw target (Idle only, applied next tick)
    pub fn nudge(&mut self, dx: f32) {
        self.pending.nudge += dx;
    }

    /// Start a descent (Idle only, applied next tick)
    pub fn drop_claw(&mut self) {
        self.pending.drop = true;
    }

    /// Let go of the carried dino (applied next tick)
    pub fn release(&mut self) {
        self.pending.release = true;
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::MoveTo(x) => self.move_to(x),
            Command::Nudge(dx) => self.nudge(dx),
            Command::Drop => self.drop_claw(),
            Command::Release => self.release(),
        }
    }

    /// Merge a whole input record into the queue
    pub fn queue_input(&mut self, input: &TickInput) {
        if let Some(x) = input.target_x {
            self.move_to(x);
        }
        if input.nudge != 0.0 {
            self.nudge(input.nudge);
        }
        self.pending.drop |= input.drop;
        self.pending.release |= input.release;
    }

    // === Simulation ===

    /// Apply queued commands and advance one frame
    pub fn tick(&mut self) -> &[ClawEvent] {
        let input = std::mem::take(&mut self.pending);
        self.last_events = tick(
            &mut self.state,
            &input,
            &self.physics,
            &self.tuning.claw,
            &mut self.rng,
        );
        &self.last_events
    }

    /// Tick, then hand the frame and counters to the collaborators
    pub fn tick_with<R, S>(&mut self, renderer: &mut R, scores: &mut S) -> &[ClawEvent]
    where
        R: RenderSink + ?Sized,
        S: ScoreSink + ?Sized,
    {
        self.tick();
        renderer.render(&self.frame());
        scores.update_scores(self.state.score, self.state.attempts);
        &self.last_events
    }

    /// New field size: rebuild the arena and re-seed the dinos
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state
            .resize(Arena::new(width, height), self.tuning.spawn_speed, &mut self.rng);
    }

    // === Queries ===

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            tick: self.state.time_ticks,
            arena: &self.state.arena,
            bodies: &self.state.bodies,
            claw: &self.state.claw,
            collected: &self.state.collected,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn arena(&self) -> &Arena {
        &self.state.arena
    }

    pub fn bodies(&self) -> &[Body] {
        &self.state.bodies
    }

    pub fn claw(&self) -> &Claw {
        &self.state.claw
    }

    pub fn collected(&self) -> &[CollectedRecord] {
        &self.state.collected
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn attempts(&self) -> u32 {
        self.state.attempts
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.state.seed
    }

    pub fn last_events(&self) -> &[ClawEvent] {
        &self.last_events
    }

    /// Commands queued for the next tick
    pub fn pending(&self) -> &TickInput {
        &self.pending
    }

    /// Current state as JSON (debugging aid, not a save format)
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.state)
    }
}
