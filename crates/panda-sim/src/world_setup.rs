//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the player, hostile and projectile entities with the
//! appropriate component bundles. Particles are emitted by
//! `systems::particles`.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use panda_core::components::*;
use panda_core::config::{FieldDimensions, Tuning};
use panda_core::types::{Position, Size, Velocity};

/// Spawn the player avatar at a quarter of the field width, vertically centred.
pub fn spawn_player(world: &mut World, field: &FieldDimensions, tuning: &Tuning) -> Entity {
    let position = Position::new(field.width / 4.0, field.height / 2.0);
    world.spawn((
        Player::default(),
        position,
        Collider {
            size: Size::new(tuning.player_width, tuning.player_height),
        },
    ))
}

/// Spawn a hostile on the right edge at a random height within the field.
pub fn spawn_hostile(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    field: &FieldDimensions,
    tuning: &Tuning,
) -> Entity {
    let max_y = (field.height - tuning.hostile_height).max(0.0);
    let y = if max_y > 0.0 {
        rng.gen_range(0.0..max_y)
    } else {
        0.0
    };
    spawn_hostile_at(world, Position::new(field.width, y), tuning)
}

/// Spawn a hostile at an exact position, moving left at the tuned speed.
pub fn spawn_hostile_at(world: &mut World, position: Position, tuning: &Tuning) -> Entity {
    world.spawn((
        Hostile,
        position,
        Velocity::new(-tuning.hostile_speed, 0.0),
        Collider {
            size: Size::new(tuning.hostile_width, tuning.hostile_height),
        },
        Active(true),
    ))
}

/// Spawn a projectile at `origin` travelling along `(dx, dy)` at the tuned speed.
///
/// A zero-length direction has no heading; nothing is spawned and `None`
/// is returned.
pub fn spawn_projectile(
    world: &mut World,
    origin: Position,
    dx: f64,
    dy: f64,
    tuning: &Tuning,
) -> Option<Entity> {
    let velocity = Velocity::from_direction(dx, dy, tuning.projectile_speed)?;
    Some(world.spawn((
        Projectile,
        origin,
        velocity,
        Collider {
            size: Size::new(tuning.projectile_width, tuning.projectile_height),
        },
        Active(true),
    )))
}
