//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Overall session phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session running; the world is empty.
    #[default]
    Menu,
    /// Session in progress, systems run every tick.
    Playing,
    /// Session suspended by the host.
    Paused,
    /// Health reached zero. Frozen until reset.
    Ended,
}

/// Visual category of a particle. Drives drift physics and rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Fire debris. Falls under gravity.
    #[default]
    Ember,
    /// Rises slowly and spreads out.
    Smoke,
    /// Emitted on the player when hit. Moves like an ember.
    Damage,
}

/// Readiness of the area-clearing burn attack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialAttackState {
    #[default]
    Charging,
    Ready,
}
