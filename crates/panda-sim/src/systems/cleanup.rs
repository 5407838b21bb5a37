//! Cleanup system: removes deactivated hostiles and projectiles.

use hecs::{Entity, World};

use panda_core::components::{Active, Hostile, Projectile};

/// Despawn every hostile and projectile whose `Active` flag is cleared.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (active, _hostile)) in world.query_mut::<(&Active, &Hostile)>() {
        if !active.0 {
            despawn_buffer.push(entity);
        }
    }

    for (entity, (active, _projectile)) in world.query_mut::<(&Active, &Projectile)>() {
        if !active.0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
