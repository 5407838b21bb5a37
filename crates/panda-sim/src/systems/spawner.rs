//! Hostile spawning on a wave-scaled interval.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use panda_core::config::{FieldDimensions, Tuning};
use panda_core::events::SessionEvent;
use panda_core::types::Position;

use crate::world_setup;

/// Time accumulated toward the next hostile spawn.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpawnTimer {
    pub elapsed_ms: f64,
}

impl SpawnTimer {
    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
    }
}

/// Accumulate `dt_ms` and spawn at most one hostile once the current
/// interval has elapsed. Leftover time past the interval is discarded.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    timer: &mut SpawnTimer,
    interval_ms: f64,
    dt_ms: f64,
    field: &FieldDimensions,
    tuning: &Tuning,
    events: &mut Vec<SessionEvent>,
) {
    timer.elapsed_ms += dt_ms;
    if timer.elapsed_ms < interval_ms {
        return;
    }
    timer.reset();

    let entity = world_setup::spawn_hostile(world, rng, field, tuning);
    if let Ok(pos) = world.get::<&Position>(entity) {
        log::debug!("hostile spawned at ({:.1}, {:.1})", pos.x, pos.y);
        events.push(SessionEvent::HostileSpawned { x: pos.x, y: pos.y });
    }
}
