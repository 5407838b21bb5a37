//! Session counters: score, health and wave difficulty.
//!
//! Stored on `SimulationEngine`, NOT as ECS entities. Mutated only by systems
//! the engine runs; reinitialised on every session start or reset.

use panda_core::config::Tuning;
use panda_core::events::SessionEvent;

/// Running session state owned by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub score: u64,
    pub health: i32,
    pub wave: u32,
    pub enemies_killed_this_wave: u32,
    pub enemies_required_this_wave: u32,
    pub spawn_interval_ms: f64,
}

impl SessionState {
    /// Fresh session values for the given tuning.
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            health: tuning.initial_health,
            wave: 1,
            enemies_killed_this_wave: 0,
            enemies_required_this_wave: tuning.initial_required_kills,
            spawn_interval_ms: tuning.initial_spawn_interval_ms,
        }
    }

    /// Credit `count` destroyed hostiles: one point each, and each counts
    /// toward the current wave.
    pub fn record_kills(&mut self, count: u32, events: &mut Vec<SessionEvent>) {
        if count == 0 {
            return;
        }
        self.score += u64::from(count);
        self.enemies_killed_this_wave += count;
        events.push(SessionEvent::ScoreChanged {
            delta: count,
            score: self.score,
        });
    }

    /// Apply one point of contact damage. Returns true when this hit leaves
    /// the player at or below zero health.
    pub fn take_damage(&mut self, events: &mut Vec<SessionEvent>) -> bool {
        self.health -= 1;
        events.push(SessionEvent::HealthChanged {
            delta: -1,
            health: self.health,
        });
        self.health <= 0
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }
}
