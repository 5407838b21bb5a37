//! Snapshot system: queries the ECS world and builds a complete SceneSnapshot.
//!
//! This system is read-only and never modifies the world. Entity lists are
//! ordered by entity id so identical worlds serialize identically.

use hecs::World;

use panda_core::components::*;
use panda_core::config::FieldDimensions;
use panda_core::enums::GamePhase;
use panda_core::events::{AudioEvent, SessionEvent};
use panda_core::state::*;
use panda_core::types::{Position, SimTime};

use crate::session::SessionState;
use crate::systems::particles;
use crate::systems::special_attack::SpecialAttack;

/// Everything outside the world that a snapshot reports.
pub struct SnapshotContext<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub field: FieldDimensions,
    pub session: &'a SessionState,
    pub special: &'a SpecialAttack,
    pub special_cooldown_ms: f64,
}

/// Build a complete SceneSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    ctx: &SnapshotContext<'_>,
    events: Vec<SessionEvent>,
    audio_events: Vec<AudioEvent>,
) -> SceneSnapshot {
    SceneSnapshot {
        time: ctx.time,
        phase: ctx.phase,
        field: ctx.field.into(),
        player: build_player(world),
        hostiles: build_active::<Hostile>(world),
        projectiles: build_active::<Projectile>(world),
        particles: build_particles(world),
        session: build_session(ctx),
        events,
        audio_events,
    }
}

fn build_player(world: &World) -> Option<EntityView> {
    world
        .query::<(&Position, &Collider, &Player)>()
        .iter()
        .next()
        .map(|(_, (pos, collider, _))| EntityView {
            position: *pos,
            size: collider.size,
        })
}

/// Active entities carrying marker `T`.
fn build_active<T: hecs::Component>(world: &World) -> Vec<EntityView> {
    let mut views: Vec<(u32, EntityView)> = world
        .query::<(&Position, &Collider, &Active, &T)>()
        .iter()
        .filter(|(_, (_, _, active, _))| active.0)
        .map(|(entity, (pos, collider, _, _))| {
            (
                entity.id(),
                EntityView {
                    position: *pos,
                    size: collider.size,
                },
            )
        })
        .collect();
    views.sort_by_key(|(id, _)| *id);
    views.into_iter().map(|(_, view)| view).collect()
}

fn build_particles(world: &World) -> Vec<ParticleView> {
    let mut views: Vec<(u32, ParticleView)> = world
        .query::<(&Position, &Particle)>()
        .iter()
        .filter(|(_, (_, particle))| particle.life_ms > 0.0)
        .map(|(entity, (pos, particle))| {
            (
                entity.id(),
                ParticleView {
                    position: *pos,
                    life_ratio: particles::life_ratio(particle),
                    kind: particle.kind,
                },
            )
        })
        .collect();
    views.sort_by_key(|(id, _)| *id);
    views.into_iter().map(|(_, view)| view).collect()
}

fn build_session(ctx: &SnapshotContext<'_>) -> SessionView {
    let session = ctx.session;
    SessionView {
        score: session.score,
        health: session.health,
        wave: session.wave,
        special_state: ctx.special.state,
        special_ready: ctx.special.is_ready(),
        special_cooldown_remaining_secs: ctx.special.remaining_secs(ctx.special_cooldown_ms),
        enemies_killed_this_wave: session.enemies_killed_this_wave,
        enemies_required_this_wave: session.enemies_required_this_wave,
        spawn_interval_ms: session.spawn_interval_ms,
    }
}
