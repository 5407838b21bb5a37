//! Events emitted by the simulation for the HUD and audio layers.

use serde::{Deserialize, Serialize};

/// Session-level changes, in the order they happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    SessionStarted,
    SessionReset,
    /// Score changed by `delta`; `score` is the new total.
    ScoreChanged { delta: u32, score: u64 },
    /// Health changed by `delta`; `health` is the new value.
    HealthChanged { delta: i32, health: i32 },
    /// Health reached zero. The session is frozen until reset.
    SessionEnded { score: u64, wave: u32 },
    WaveAdvanced {
        wave: u32,
        spawn_interval_ms: f64,
        required_kills: u32,
    },
    /// The special attack finished charging.
    SpecialReady,
    SpecialTriggered { destroyed: u32 },
    HostileSpawned { x: f64, y: f64 },
}

/// Feedback cues for the sound system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// A projectile destroyed a hostile.
    Hit,
    /// The special attack fired.
    Success,
    /// A hostile reached the player.
    Damage,
}
