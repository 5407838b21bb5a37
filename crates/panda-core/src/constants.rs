//! Simulation constants and tuning defaults.

use crate::enums::ParticleKind;

/// Nominal host frame rate the particle damping factors were tuned at.
pub const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;

/// Largest frame delta the engine will simulate in one tick (ms).
pub const MAX_FRAME_DELTA_MS: f64 = 250.0;

// --- Field ---

pub const DEFAULT_FIELD_WIDTH: f64 = 1280.0;
pub const DEFAULT_FIELD_HEIGHT: f64 = 720.0;

// --- Player ---

pub const PLAYER_WIDTH: f64 = 40.0;
pub const PLAYER_HEIGHT: f64 = 40.0;

/// Movement speed per held direction (units/s).
pub const PLAYER_SPEED: f64 = 180.0;

/// Minimum held-attack time between shots (ms).
pub const PLAYER_ATTACK_COOLDOWN_MS: f64 = 200.0;

pub const INITIAL_HEALTH: i32 = 3;

// --- Projectile ---

pub const PROJECTILE_WIDTH: f64 = 8.0;
pub const PROJECTILE_HEIGHT: f64 = 4.0;
pub const PROJECTILE_SPEED: f64 = 400.0;

/// Distance past the field edge a projectile may travel before it is dropped.
pub const PROJECTILE_EXIT_MARGIN: f64 = 50.0;

// --- Hostile ---

pub const HOSTILE_WIDTH: f64 = 35.0;
pub const HOSTILE_HEIGHT: f64 = 35.0;
pub const HOSTILE_SPEED: f64 = 80.0;

/// Hostiles whose x falls below this are deactivated.
pub const HOSTILE_EXIT_X: f64 = -100.0;

// --- Waves ---

pub const INITIAL_SPAWN_INTERVAL_MS: f64 = 2000.0;
pub const MIN_SPAWN_INTERVAL_MS: f64 = 500.0;
pub const SPAWN_INTERVAL_FACTOR: f64 = 0.9;
pub const INITIAL_REQUIRED_KILLS: u32 = 10;
pub const REQUIRED_KILLS_PER_WAVE: u32 = 2;

// --- Special attack ---

pub const SPECIAL_ATTACK_COOLDOWN_MS: f64 = 30_000.0;

// --- Particles ---

/// Ember/damage gravity (units/s²).
pub const EMBER_GRAVITY: f64 = 150.0;
pub const EMBER_DAMPING: f64 = 0.98;

/// Smoke buoyancy (units/s², applied upward).
pub const SMOKE_LIFT: f64 = 20.0;
pub const SMOKE_DAMPING: f64 = 0.95;

/// A batch of particles emitted from one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstProfile {
    pub kind: ParticleKind,
    pub count: u32,
    /// Horizontal velocity range (units/s).
    pub vx: (f64, f64),
    /// Vertical velocity range (units/s). Negative is up.
    pub vy: (f64, f64),
    pub life_ms: f64,
}

pub const HIT_EMBERS: BurstProfile = BurstProfile {
    kind: ParticleKind::Ember,
    count: 15,
    vx: (-75.0, 75.0),
    vy: (-125.0, 25.0),
    life_ms: 800.0,
};

pub const HIT_SMOKE: BurstProfile = BurstProfile {
    kind: ParticleKind::Smoke,
    count: 8,
    vx: (-40.0, 40.0),
    vy: (-150.0, -50.0),
    life_ms: 1200.0,
};

pub const BURN_EMBERS: BurstProfile = BurstProfile {
    kind: ParticleKind::Ember,
    count: 30,
    vx: (-150.0, 150.0),
    vy: (-250.0, 50.0),
    life_ms: 1500.0,
};

pub const BURN_SMOKE: BurstProfile = BurstProfile {
    kind: ParticleKind::Smoke,
    count: 15,
    vx: (-75.0, 75.0),
    vy: (-250.0, -100.0),
    life_ms: 2000.0,
};

pub const DAMAGE_SPARKS: BurstProfile = BurstProfile {
    kind: ParticleKind::Damage,
    count: 15,
    vx: (-75.0, 75.0),
    vy: (-75.0, 75.0),
    life_ms: 800.0,
};
