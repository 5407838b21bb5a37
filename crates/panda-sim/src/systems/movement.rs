//! Kinematic integration for hostiles and projectiles.
//!
//! Updates Position from Velocity: position += velocity * dt. Entities that
//! leave their allowed region are deactivated here and despawned by cleanup.

use hecs::World;

use panda_core::components::{Active, Collider, Hostile, Projectile};
use panda_core::config::{FieldDimensions, Tuning};
use panda_core::types::{Position, Velocity};

/// Advance every active hostile and projectile by `dt_ms`.
pub fn run(world: &mut World, dt_ms: f64, field: &FieldDimensions, tuning: &Tuning) {
    let dt_secs = dt_ms / 1000.0;

    for (_entity, (pos, vel, active, _hostile)) in
        world.query_mut::<(&mut Position, &Velocity, &mut Active, &Hostile)>()
    {
        if !active.0 {
            continue;
        }
        pos.integrate(vel, dt_secs);
        if pos.x < tuning.hostile_exit_x {
            active.0 = false;
        }
    }

    for (_entity, (pos, vel, collider, active, _projectile)) in world
        .query_mut::<(&mut Position, &Velocity, &Collider, &mut Active, &Projectile)>()
    {
        if !active.0 {
            continue;
        }
        pos.integrate(vel, dt_secs);
        if outside_field(pos, collider, field, tuning.projectile_exit_margin) {
            active.0 = false;
        }
    }
}

/// True once the box has fully left the field extended by `margin` on every side.
fn outside_field(pos: &Position, collider: &Collider, field: &FieldDimensions, margin: f64) -> bool {
    pos.x > field.width + margin
        || pos.x + collider.size.w < -margin
        || pos.y > field.height + margin
        || pos.y + collider.size.h < -margin
}
