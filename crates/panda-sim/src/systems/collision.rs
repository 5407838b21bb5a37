//! Collision resolution between projectiles, hostiles and the player.
//!
//! Boxes are collected up front and walked in entity order so results do not
//! depend on archetype layout. An entity deactivated earlier in a pass can
//! not collide again in the same pass.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use panda_core::components::{Active, Collider, Hostile, Player, Projectile};
use panda_core::constants::{DAMAGE_SPARKS, HIT_EMBERS, HIT_SMOKE};
use panda_core::events::{AudioEvent, SessionEvent};
use panda_core::types::{Aabb, Position};

use crate::session::SessionState;
use crate::systems::particles;

/// Active boxes of every entity carrying marker `T`, sorted by entity id.
fn active_boxes<T: hecs::Component>(world: &World) -> Vec<(Entity, Aabb)> {
    let mut boxes: Vec<(Entity, Aabb)> = world
        .query::<(&Position, &Collider, &Active, &T)>()
        .iter()
        .filter(|(_, (_, _, active, _))| active.0)
        .map(|(entity, (pos, collider, _, _))| (entity, Aabb::from_parts(pos, &collider.size)))
        .collect();
    boxes.sort_by_key(|(entity, _)| entity.id());
    boxes
}

fn deactivate(world: &mut World, entity: Entity) {
    if let Ok(mut active) = world.get::<&mut Active>(entity) {
        active.0 = false;
    }
}

/// Each projectile destroys at most one hostile; each hostile absorbs at
/// most one projectile. Returns the number of hostiles destroyed.
pub fn resolve_projectile_hits(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    session: &mut SessionState,
    events: &mut Vec<SessionEvent>,
    audio_events: &mut Vec<AudioEvent>,
) -> u32 {
    let projectiles = active_boxes::<Projectile>(world);
    let mut hostiles: Vec<(Entity, Aabb, bool)> = active_boxes::<Hostile>(world)
        .into_iter()
        .map(|(entity, aabb)| (entity, aabb, true))
        .collect();
    let mut hits = Vec::new();

    for (projectile, shot) in &projectiles {
        let target = hostiles
            .iter_mut()
            .find(|(_, hostile, alive)| *alive && shot.overlaps(hostile));
        if let Some((hostile, aabb, alive)) = target {
            *alive = false;
            hits.push((*projectile, *hostile, aabb.center()));
        }
    }

    for &(projectile, hostile, center) in &hits {
        deactivate(world, projectile);
        deactivate(world, hostile);
        particles::emit(world, rng, center, &HIT_EMBERS);
        particles::emit(world, rng, center, &HIT_SMOKE);
        session.record_kills(1, events);
        audio_events.push(AudioEvent::Hit);
    }

    hits.len() as u32
}

/// Every active hostile touching the player is consumed and deals one point
/// of damage. Returns true when the player ends the pass defeated.
pub fn resolve_player_contacts(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    session: &mut SessionState,
    events: &mut Vec<SessionEvent>,
    audio_events: &mut Vec<AudioEvent>,
) -> bool {
    let player_box = world
        .query::<(&Position, &Collider, &Player)>()
        .iter()
        .next()
        .map(|(_, (pos, collider, _))| Aabb::from_parts(pos, &collider.size));
    let Some(player_box) = player_box else {
        return false;
    };

    let was_defeated = session.is_defeated();
    for (hostile, aabb) in active_boxes::<Hostile>(world) {
        if !player_box.overlaps(&aabb) {
            continue;
        }
        deactivate(world, hostile);
        session.take_damage(events);
        particles::emit(world, rng, player_box.center(), &DAMAGE_SPARKS);
        audio_events.push(AudioEvent::Damage);
    }

    let defeated = session.is_defeated();
    if defeated && !was_defeated {
        log::info!(
            "session ended: score {} at wave {}",
            session.score,
            session.wave
        );
        events.push(SessionEvent::SessionEnded {
            score: session.score,
            wave: session.wave,
        });
    }
    defeated
}

/// Run both collision passes, projectiles first. Returns true when the
/// player is defeated.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    session: &mut SessionState,
    events: &mut Vec<SessionEvent>,
    audio_events: &mut Vec<AudioEvent>,
) -> bool {
    resolve_projectile_hits(world, rng, session, events, audio_events);
    resolve_player_contacts(world, rng, session, events, audio_events)
}
