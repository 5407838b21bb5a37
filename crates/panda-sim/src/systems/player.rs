//! Player avatar: clamped movement and the held-attack cooldown.

use hecs::World;

use panda_core::components::{Collider, Player};
use panda_core::config::{FieldDimensions, Tuning};
use panda_core::input::InputSnapshot;
use panda_core::types::{Position, Size};

use crate::world_setup;

/// A projectile the avatar is about to fire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub origin: Position,
    pub direction: (f64, f64),
}

/// Move by `distance` along each non-zero axis of `direction`, then clamp the
/// avatar's box inside the field.
pub fn move_avatar(
    pos: &mut Position,
    size: &Size,
    direction: (f64, f64),
    distance: f64,
    field: &FieldDimensions,
) {
    pos.x += direction.0 * distance;
    pos.y += direction.1 * distance;
    clamp_to_field(pos, size, field);
}

/// Keep the box `[pos, pos + size]` inside `[0, width] × [0, height]`.
/// A field smaller than the box pins it to the origin.
pub fn clamp_to_field(pos: &mut Position, size: &Size, field: &FieldDimensions) {
    pos.x = pos.x.min(field.width - size.w).max(0.0);
    pos.y = pos.y.min(field.height - size.h).max(0.0);
}

/// Accumulate held-attack time. Once the cooldown is reached the counter
/// resets and one rightward shot leaves the avatar's right-centre edge.
pub fn try_attack(
    player: &mut Player,
    pos: &Position,
    size: &Size,
    elapsed_ms: f64,
    tuning: &Tuning,
) -> Option<Shot> {
    player.attack_cooldown_elapsed_ms += elapsed_ms;
    if player.attack_cooldown_elapsed_ms < tuning.player_attack_cooldown_ms {
        return None;
    }
    player.attack_cooldown_elapsed_ms = 0.0;
    Some(Shot {
        origin: Position::new(
            pos.x + size.w,
            pos.y + size.h / 2.0 - tuning.projectile_height / 2.0,
        ),
        direction: (1.0, 0.0),
    })
}

/// Apply held movement and attack input to the avatar. Returns the number of
/// projectiles spawned.
pub fn run(
    world: &mut World,
    input: &InputSnapshot,
    dt_ms: f64,
    field: &FieldDimensions,
    tuning: &Tuning,
) -> usize {
    let distance = tuning.player_speed * dt_ms / 1000.0;
    let direction = input.direction();
    let mut shots = Vec::new();

    for (_entity, (player, pos, collider)) in
        world.query_mut::<(&mut Player, &mut Position, &Collider)>()
    {
        if direction != (0.0, 0.0) {
            move_avatar(pos, &collider.size, direction, distance, field);
        }
        if input.attack {
            if let Some(shot) = try_attack(player, pos, &collider.size, dt_ms, tuning) {
                shots.push(shot);
            }
        }
    }

    shots
        .into_iter()
        .filter_map(|shot| {
            world_setup::spawn_projectile(
                world,
                shot.origin,
                shot.direction.0,
                shot.direction.1,
                tuning,
            )
        })
        .count()
}
