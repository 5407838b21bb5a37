//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world and the session counters,
//! processes session commands, runs all systems for each frame delta, and
//! produces `SceneSnapshot`s. It never schedules itself; the host calls
//! `tick` once per rendered frame.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use panda_core::commands::SessionCommand;
use panda_core::components::{Collider, Player};
use panda_core::config::{ConfigError, FieldDimensions, Tuning};
use panda_core::enums::{GamePhase, SpecialAttackState};
use panda_core::events::{AudioEvent, SessionEvent};
use panda_core::input::InputSnapshot;
use panda_core::state::SceneSnapshot;
use panda_core::types::{Position, SimTime};

use crate::session::SessionState;
use crate::systems;
use crate::systems::snapshot::SnapshotContext;
use crate::systems::spawner::SpawnTimer;
use crate::systems::special_attack::SpecialAttack;
use crate::world_setup;

/// Configuration for a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and inputs = same simulation.
    pub seed: u64,
    pub field: FieldDimensions,
    pub tuning: Tuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            field: FieldDimensions::default(),
            tuning: Tuning::default(),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.field.validate()?;
        self.tuning.validate()
    }
}

/// The simulation engine. Owns the ECS world and all session state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    field: FieldDimensions,
    tuning: Tuning,
    rng: ChaCha8Rng,
    command_queue: VecDeque<SessionCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<SessionEvent>,
    audio_events: Vec<AudioEvent>,
    session: SessionState,
    spawner: SpawnTimer,
    special: SpecialAttack,
}

impl SimulationEngine {
    /// Create an engine in the `Menu` phase with an empty world.
    ///
    /// An invalid field falls back to the default dimensions.
    pub fn new(config: SimConfig) -> Self {
        let field = match config.field.validate() {
            Ok(()) => config.field,
            Err(err) => {
                log::warn!("{err}; using the default field");
                FieldDimensions::default()
            }
        };
        let session = SessionState::new(&config.tuning);
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            field,
            tuning: config.tuning,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            audio_events: Vec::new(),
            session,
            spawner: SpawnTimer::default(),
            special: SpecialAttack::default(),
        }
    }

    /// Queue a session command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SessionCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SessionCommand>) {
        self.command_queue.extend(commands);
    }

    /// Reinitialise all session state, spawn the player and start playing.
    pub fn start_session(&mut self) {
        self.reinitialise();
        world_setup::spawn_player(&mut self.world, &self.field, &self.tuning);
        self.phase = GamePhase::Playing;
        log::info!(
            "session started on a {}x{} field",
            self.field.width,
            self.field.height
        );
        self.events.push(SessionEvent::SessionStarted);
    }

    /// Reinitialise all session state, clear the world and return to the menu.
    pub fn reset_session(&mut self) {
        self.reinitialise();
        self.phase = GamePhase::Menu;
        log::info!("session reset");
        self.events.push(SessionEvent::SessionReset);
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
        }
    }

    /// Change the play field and pull the player back inside it.
    /// Non-positive or non-finite dimensions are ignored.
    pub fn resize_field(&mut self, width: f64, height: f64) {
        let field = FieldDimensions::new(width, height);
        if let Err(err) = field.validate() {
            log::warn!("ignoring resize: {err}");
            return;
        }
        self.field = field;
        let players = self
            .world
            .query_mut::<(&mut Position, &Collider, &Player)>();
        for (_entity, (pos, collider, _player)) in players {
            systems::player::clamp_to_field(pos, &collider.size, &field);
        }
        log::debug!("field resized to {width}x{height}");
    }

    /// Advance the simulation by `elapsed_ms` of host time and return the
    /// resulting snapshot.
    ///
    /// Queued commands are always applied. Outside `Playing`, or when the
    /// delta is zero, negative or non-finite, nothing else changes. Deltas
    /// above `Tuning::max_frame_delta_ms` are clamped.
    pub fn tick(&mut self, elapsed_ms: f64, input: &InputSnapshot) -> SceneSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Playing && elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            let dt_ms = elapsed_ms.min(self.tuning.max_frame_delta_ms);
            self.run_systems(dt_ms, input);
            self.time.advance(dt_ms);
        }

        self.snapshot()
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn special_state(&self) -> SpecialAttackState {
        self.special.state
    }

    pub fn field(&self) -> FieldDimensions {
        self.field
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Place a hostile at an exact position (for tests).
    #[cfg(test)]
    pub fn spawn_test_hostile(&mut self, x: f64, y: f64) -> hecs::Entity {
        world_setup::spawn_hostile_at(&mut self.world, Position::new(x, y), &self.tuning)
    }

    /// Mutable session access (for tests needing a specific score or health).
    #[cfg(test)]
    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    /// Mark the special attack as charged (for tests).
    #[cfg(test)]
    pub fn charge_special(&mut self) {
        self.special.elapsed_ms = self.tuning.special_attack_cooldown_ms;
        self.special.state = SpecialAttackState::Ready;
    }

    fn reinitialise(&mut self) {
        self.world.clear();
        self.time = SimTime::default();
        self.session = SessionState::new(&self.tuning);
        self.spawner.reset();
        self.special.reset();
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::StartSession => self.start_session(),
            SessionCommand::ResetSession => self.reset_session(),
            SessionCommand::Pause => self.pause(),
            SessionCommand::Resume => self.resume(),
            SessionCommand::ResizeField { width, height } => self.resize_field(width, height),
        }
    }

    /// Run all systems in order for one frame of `dt_ms`.
    fn run_systems(&mut self, dt_ms: f64, input: &InputSnapshot) {
        // 1. Special-attack charge
        self.special.advance(
            dt_ms,
            self.tuning.special_attack_cooldown_ms,
            &mut self.events,
        );

        // 2. Player input: movement, held attack, burn
        systems::player::run(&mut self.world, input, dt_ms, &self.field, &self.tuning);
        if input.special {
            systems::special_attack::trigger(
                &mut self.world,
                &mut self.rng,
                &mut self.special,
                &mut self.session,
                &mut self.events,
                &mut self.audio_events,
            );
        }

        // 3. Kinematics and particle drift
        systems::movement::run(&mut self.world, dt_ms, &self.field, &self.tuning);
        systems::particles::run(&mut self.world, dt_ms, &mut self.despawn_buffer);

        // 4. Spawner
        systems::spawner::run(
            &mut self.world,
            &mut self.rng,
            &mut self.spawner,
            self.session.spawn_interval_ms,
            dt_ms,
            &self.field,
            &self.tuning,
            &mut self.events,
        );

        // 5. Collisions
        let defeated = systems::collision::run(
            &mut self.world,
            &mut self.rng,
            &mut self.session,
            &mut self.events,
            &mut self.audio_events,
        );

        // 6. Prune deactivated hostiles and projectiles
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        // 7. Wave progression
        systems::wave::run(&mut self.session, &self.tuning, &mut self.events);

        // 8. Terminal state
        if defeated {
            self.phase = GamePhase::Ended;
        }
    }

    fn snapshot(&mut self) -> SceneSnapshot {
        let events = std::mem::take(&mut self.events);
        let audio_events = std::mem::take(&mut self.audio_events);
        let ctx = SnapshotContext {
            time: self.time,
            phase: self.phase,
            field: self.field,
            session: &self.session,
            special: &self.special,
            special_cooldown_ms: self.tuning.special_attack_cooldown_ms,
        };
        systems::snapshot::build_snapshot(&self.world, &ctx, events, audio_events)
    }
}
