//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::ParticleKind;
use crate::types::Size;

/// Bounding box extent for entities that take part in collision checks.
/// Particles never carry one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collider {
    pub size: Size,
}

/// Liveness flag. Inactive entities are skipped by collision and rendering
/// and are despawned by the cleanup system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Active(pub bool);

/// The player avatar. Exactly one per session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Player {
    /// Time accumulated toward the next shot while attack is held (ms).
    pub attack_cooldown_elapsed_ms: f64,
}

/// An enemy advancing from the right edge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hostile;

/// A player-fired projectile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile;

/// Ephemeral visual effect entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub kind: ParticleKind,
    /// Remaining lifetime (ms).
    pub life_ms: f64,
    /// Lifetime at emission (ms).
    pub max_life_ms: f64,
}
