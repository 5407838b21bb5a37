//! Scene snapshot: the complete renderable state handed to the host each tick.

use serde::{Deserialize, Serialize};

use crate::config::FieldDimensions;
use crate::enums::*;
use crate::events::{AudioEvent, SessionEvent};
use crate::types::{Position, SimTime, Size};

/// Complete scene state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub field: FieldView,
    /// `None` outside a session.
    pub player: Option<EntityView>,
    pub hostiles: Vec<EntityView>,
    pub projectiles: Vec<EntityView>,
    pub particles: Vec<ParticleView>,
    pub session: SessionView,
    pub events: Vec<SessionEvent>,
    pub audio_events: Vec<AudioEvent>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FieldView {
    pub width: f64,
    pub height: f64,
}

impl From<FieldDimensions> for FieldView {
    fn from(field: FieldDimensions) -> Self {
        Self {
            width: field.width,
            height: field.height,
        }
    }
}

/// A collidable entity for drawing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub position: Position,
    pub size: Size,
}

/// A particle for drawing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub position: Position,
    /// Remaining lifetime over maximum lifetime, in [0, 1]. Used as alpha.
    pub life_ratio: f64,
    pub kind: ParticleKind,
}

/// Session counters for the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionView {
    pub score: u64,
    pub health: i32,
    pub wave: u32,
    pub special_state: SpecialAttackState,
    pub special_ready: bool,
    /// Seconds until the special attack is ready (0 when ready).
    pub special_cooldown_remaining_secs: f64,
    pub enemies_killed_this_wave: u32,
    pub enemies_required_this_wave: u32,
    pub spawn_interval_ms: f64,
}
