//! The burn: an area attack that clears every hostile on the field.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use panda_core::components::{Active, Collider, Hostile};
use panda_core::constants::{BURN_EMBERS, BURN_SMOKE};
use panda_core::enums::SpecialAttackState;
use panda_core::events::{AudioEvent, SessionEvent};
use panda_core::types::{Aabb, Position};

use crate::session::SessionState;
use crate::systems::particles;

/// Charge state for the burn. Starts charging on every session start.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpecialAttack {
    pub elapsed_ms: f64,
    pub state: SpecialAttackState,
}

impl SpecialAttack {
    /// Accumulate charge. Emits `SpecialReady` on the tick the cooldown completes.
    pub fn advance(&mut self, dt_ms: f64, cooldown_ms: f64, events: &mut Vec<SessionEvent>) {
        if self.state == SpecialAttackState::Ready {
            return;
        }
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms >= cooldown_ms {
            self.state = SpecialAttackState::Ready;
            log::debug!("special attack ready");
            events.push(SessionEvent::SpecialReady);
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state == SpecialAttackState::Ready
    }

    /// Seconds of charge still needed; 0 when ready.
    pub fn remaining_secs(&self, cooldown_ms: f64) -> f64 {
        if self.is_ready() {
            return 0.0;
        }
        ((cooldown_ms - self.elapsed_ms) / 1000.0).max(0.0)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Fire the burn if it is ready. Every active hostile bursts into embers and
/// smoke, is removed, and counts as a kill. Returns the number destroyed, or
/// `None` when the attack was still charging.
pub fn trigger(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    special: &mut SpecialAttack,
    session: &mut SessionState,
    events: &mut Vec<SessionEvent>,
    audio_events: &mut Vec<AudioEvent>,
) -> Option<u32> {
    if !special.is_ready() {
        return None;
    }

    let mut targets: Vec<(Entity, Position)> = world
        .query::<(&Position, &Collider, &Active, &Hostile)>()
        .iter()
        .filter(|(_, (_, _, active, _))| active.0)
        .map(|(entity, (pos, collider, _, _))| {
            (entity, Aabb::from_parts(pos, &collider.size).center())
        })
        .collect();
    targets.sort_by_key(|(entity, _)| entity.id());

    for &(entity, center) in &targets {
        particles::emit(world, rng, center, &BURN_EMBERS);
        particles::emit(world, rng, center, &BURN_SMOKE);
        let _ = world.despawn(entity);
    }

    let destroyed = targets.len() as u32;
    session.record_kills(destroyed, events);
    events.push(SessionEvent::SpecialTriggered { destroyed });
    audio_events.push(AudioEvent::Success);
    special.reset();
    log::info!("burn destroyed {destroyed} hostiles");
    Some(destroyed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world_setup;
    use panda_core::components::Particle;
    use panda_core::config::Tuning;
    use rand::SeedableRng;

    #[test]
    fn test_charges_to_ready_once() {
        let mut special = SpecialAttack::default();
        let mut events = Vec::new();

        special.advance(29_999.0, 30_000.0, &mut events);
        assert!(!special.is_ready());
        assert!((special.remaining_secs(30_000.0) - 0.001).abs() < 1e-9);

        special.advance(1.0, 30_000.0, &mut events);
        special.advance(500.0, 30_000.0, &mut events);
        assert!(special.is_ready());
        assert_eq!(special.remaining_secs(30_000.0), 0.0);
        assert_eq!(events, vec![SessionEvent::SpecialReady]);
    }

    #[test]
    fn test_trigger_while_charging_does_nothing() {
        let tuning = Tuning::default();
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut special = SpecialAttack::default();
        let mut session = SessionState::new(&tuning);
        let mut events = Vec::new();
        let mut audio = Vec::new();
        world_setup::spawn_hostile_at(&mut world, Position::new(500.0, 100.0), &tuning);

        let fired = trigger(&mut world, &mut rng, &mut special, &mut session, &mut events, &mut audio);

        assert_eq!(fired, None);
        assert_eq!(world.query::<&Hostile>().iter().count(), 1);
        assert!(events.is_empty());
        assert!(audio.is_empty());
    }

    #[test]
    fn test_trigger_clears_field() {
        let tuning = Tuning::default();
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut special = SpecialAttack {
            elapsed_ms: 30_000.0,
            state: SpecialAttackState::Ready,
        };
        let mut session = SessionState::new(&tuning);
        let mut events = Vec::new();
        let mut audio = Vec::new();
        for i in 0..4 {
            world_setup::spawn_hostile_at(
                &mut world,
                Position::new(300.0 + 50.0 * i as f64, 100.0),
                &tuning,
            );
        }

        let fired = trigger(&mut world, &mut rng, &mut special, &mut session, &mut events, &mut audio);

        assert_eq!(fired, Some(4));
        assert_eq!(world.query::<&Hostile>().iter().count(), 0);
        assert_eq!(world.query::<&Particle>().iter().count(), 4 * 45);
        assert_eq!(session.score, 4);
        assert_eq!(session.enemies_killed_this_wave, 4);
        assert_eq!(special, SpecialAttack::default());
        assert_eq!(audio, vec![AudioEvent::Success]);
        assert_eq!(
            events.last(),
            Some(&SessionEvent::SpecialTriggered { destroyed: 4 })
        );
    }

    #[test]
    fn test_trigger_on_empty_field_still_consumes_charge() {
        let tuning = Tuning::default();
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut special = SpecialAttack {
            elapsed_ms: 30_000.0,
            state: SpecialAttackState::Ready,
        };
        let mut session = SessionState::new(&tuning);
        let mut events = Vec::new();
        let mut audio = Vec::new();

        let fired = trigger(&mut world, &mut rng, &mut special, &mut session, &mut events, &mut audio);

        assert_eq!(fired, Some(0));
        assert!(!special.is_ready());
        assert_eq!(session.score, 0);
        assert_eq!(events, vec![SessionEvent::SpecialTriggered { destroyed: 0 }]);
    }
}
