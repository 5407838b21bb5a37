//! Particle emitter and drift physics.
//!
//! Particles never collide and carry no `Active` flag; they are despawned as
//! soon as their remaining lifetime runs out.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use panda_core::components::Particle;
use panda_core::constants::*;
use panda_core::enums::ParticleKind;
use panda_core::types::{Position, Velocity};

/// Emit one burst centred on `center`. Each particle draws its velocity
/// uniformly from the profile's ranges.
pub fn emit(world: &mut World, rng: &mut ChaCha8Rng, center: Position, profile: &BurstProfile) {
    for _ in 0..profile.count {
        let vx = sample(rng, profile.vx);
        let vy = sample(rng, profile.vy);
        world.spawn((
            Particle {
                kind: profile.kind,
                life_ms: profile.life_ms,
                max_life_ms: profile.life_ms,
            },
            center,
            Velocity::new(vx, vy),
        ));
    }
}

fn sample(rng: &mut ChaCha8Rng, (low, high): (f64, f64)) -> f64 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}

/// Advance every particle by `dt_ms` and despawn the expired ones.
pub fn run(world: &mut World, dt_ms: f64, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    let dt_secs = dt_ms / 1000.0;
    let frames = dt_ms / REFERENCE_FRAME_MS;

    for (entity, (particle, pos, vel)) in
        world.query_mut::<(&mut Particle, &mut Position, &mut Velocity)>()
    {
        pos.integrate(vel, dt_secs);
        particle.life_ms -= dt_ms;

        match particle.kind {
            ParticleKind::Ember | ParticleKind::Damage => {
                vel.y += EMBER_GRAVITY * dt_secs;
                vel.x *= EMBER_DAMPING.powf(frames);
            }
            ParticleKind::Smoke => {
                vel.y -= SMOKE_LIFT * dt_secs;
                vel.x *= SMOKE_DAMPING.powf(frames);
            }
        }

        if particle.life_ms <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Rendering alpha: remaining over maximum lifetime, clamped to [0, 1].
pub fn life_ratio(particle: &Particle) -> f64 {
    if particle.max_life_ms <= 0.0 {
        return 0.0;
    }
    (particle.life_ms / particle.max_life_ms).clamp(0.0, 1.0)
}
