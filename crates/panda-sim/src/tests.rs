//! Engine-level tests: tick ordering, session control and cross-system scenarios.

use proptest::prelude::*;

use panda_core::commands::SessionCommand;
use panda_core::config::{FieldDimensions, Tuning};
use panda_core::enums::*;
use panda_core::events::{AudioEvent, SessionEvent};
use panda_core::input::InputSnapshot;
use panda_core::types::Position;

use crate::engine::{SimConfig, SimulationEngine};

const FRAME_MS: f64 = 16.0;

fn idle() -> InputSnapshot {
    InputSnapshot::default()
}

fn attack() -> InputSnapshot {
    InputSnapshot {
        attack: true,
        ..Default::default()
    }
}

/// Engine with a session already started. The player sits at (320, 360).
fn playing_engine(seed: u64) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig {
        seed,
        ..Default::default()
    });
    engine.queue_command(SessionCommand::StartSession);
    engine.tick(0.0, &idle());
    engine
}

/// Playing engine that never spawns hostiles on its own.
fn quiet_engine() -> SimulationEngine {
    let tuning = Tuning {
        initial_spawn_interval_ms: 1.0e9,
        ..Tuning::default()
    };
    let mut engine = SimulationEngine::new(SimConfig {
        seed: 1,
        field: FieldDimensions::default(),
        tuning,
    });
    engine.start_session();
    engine
}

fn has_event(events: &[SessionEvent], pred: impl Fn(&SessionEvent) -> bool) -> bool {
    events.iter().any(pred)
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = playing_engine(12345);
    let mut engine_b = playing_engine(12345);

    for i in 0..600 {
        let input = InputSnapshot {
            attack: true,
            move_up: i % 120 < 60,
            move_down: i % 120 >= 60,
            ..Default::default()
        };
        let snap_a = engine_a.tick(FRAME_MS, &input);
        let snap_b = engine_b.tick(FRAME_MS, &input);

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = playing_engine(111);
    let mut engine_b = playing_engine(222);

    let mut last = None;
    for _ in 0..10 {
        let snap_a = engine_a.tick(250.0, &idle());
        let snap_b = engine_b.tick(250.0, &idle());
        last = Some((snap_a, snap_b));
    }

    let (snap_a, snap_b) = last.unwrap();
    assert_eq!(snap_a.hostiles.len(), 1);
    assert_eq!(snap_b.hostiles.len(), 1);
    assert_ne!(
        snap_a.hostiles[0].position.y, snap_b.hostiles[0].position.y,
        "Different seeds should place hostiles differently"
    );
}

// ---- Session control ----

#[test]
fn test_new_engine_idles_in_menu() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let snap = engine.tick(FRAME_MS, &attack());

    assert_eq!(snap.phase, GamePhase::Menu);
    assert!(snap.player.is_none());
    assert_eq!(snap.time.tick, 0);
    assert_eq!(engine.world().len(), 0);
}

#[test]
fn test_start_with_zero_first_delta() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(SessionCommand::StartSession);
    let snap = engine.tick(0.0, &attack());

    assert_eq!(snap.phase, GamePhase::Playing);
    assert_eq!(snap.time.tick, 0);
    assert_eq!(snap.player.unwrap().position, Position::new(320.0, 360.0));
    assert!(snap.projectiles.is_empty());
    assert_eq!(snap.events, vec![SessionEvent::SessionStarted]);
}

#[test]
fn test_reset_then_start_restores_defaults() {
    let mut engine = playing_engine(5);
    for _ in 0..40 {
        engine.tick(250.0, &attack());
    }
    engine.session_mut().score = 17;
    engine.session_mut().health = 1;
    engine.charge_special();

    engine.queue_command(SessionCommand::ResetSession);
    let snap = engine.tick(FRAME_MS, &idle());
    assert_eq!(snap.phase, GamePhase::Menu);
    assert_eq!(engine.world().len(), 0);
    assert!(has_event(&snap.events, |e| *e == SessionEvent::SessionReset));

    engine.queue_command(SessionCommand::StartSession);
    let snap = engine.tick(0.0, &idle());
    assert_eq!(snap.session.score, 0);
    assert_eq!(snap.session.health, 3);
    assert_eq!(snap.session.wave, 1);
    assert!(!snap.session.special_ready);
    assert!(snap.hostiles.is_empty());
    assert!(snap.projectiles.is_empty());
    assert!(snap.particles.is_empty());
    assert_eq!(engine.world().len(), 1, "only the player remains");
}

#[test]
fn test_pause_and_resume() {
    let mut engine = playing_engine(5);
    engine.tick(100.0, &idle());

    engine.queue_command(SessionCommand::Pause);
    let paused = engine.tick(100.0, &InputSnapshot {
        move_right: true,
        ..Default::default()
    });
    assert_eq!(paused.phase, GamePhase::Paused);
    assert_eq!(paused.time.tick, 1);
    assert_eq!(paused.player.unwrap().position.x, 320.0);

    engine.queue_command(SessionCommand::Resume);
    let resumed = engine.tick(100.0, &InputSnapshot {
        move_right: true,
        ..Default::default()
    });
    assert_eq!(resumed.phase, GamePhase::Playing);
    assert_eq!(resumed.time.tick, 2);
    assert!((resumed.player.unwrap().position.x - 338.0).abs() < 1e-9);
}

#[test]
fn test_resize_reclamps_player() {
    let mut engine = playing_engine(5);
    engine.queue_command(SessionCommand::ResizeField {
        width: 200.0,
        height: 150.0,
    });
    let snap = engine.tick(0.0, &idle());

    assert_eq!(snap.field.width, 200.0);
    assert_eq!(snap.player.unwrap().position, Position::new(160.0, 110.0));
}

#[test]
fn test_invalid_resize_is_ignored() {
    let mut engine = playing_engine(5);
    engine.resize_field(0.0, 600.0);
    engine.resize_field(f64::NAN, 600.0);
    assert_eq!(engine.field(), FieldDimensions::default());
}

// ---- Frame deltas ----

#[test]
fn test_non_positive_delta_is_noop() {
    let mut engine = playing_engine(9);
    for _ in 0..20 {
        engine.tick(150.0, &attack());
    }
    let baseline = serde_json::to_string(&engine.tick(0.0, &idle())).unwrap();

    let everything = InputSnapshot {
        move_left: true,
        move_up: true,
        attack: true,
        special: true,
        ..Default::default()
    };
    for delta in [0.0, -5.0, -1000.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let snap = engine.tick(delta, &everything);
        assert_eq!(
            serde_json::to_string(&snap).unwrap(),
            baseline,
            "delta {delta} changed the scene"
        );
    }
}

#[test]
fn test_large_delta_is_clamped() {
    let mut engine = playing_engine(9);
    let snap = engine.tick(10_000.0, &InputSnapshot {
        move_right: true,
        ..Default::default()
    });

    assert_eq!(snap.time.elapsed_ms, 250.0);
    assert!((snap.player.unwrap().position.x - 365.0).abs() < 1e-9);
}

proptest! {
    #[test]
    fn prop_non_positive_delta_changes_nothing(delta in -1.0e6f64..=0.0) {
        let mut engine = playing_engine(3);
        engine.tick(120.0, &attack());
        let before = serde_json::to_string(&engine.tick(0.0, &idle())).unwrap();

        let snap = engine.tick(delta, &attack());
        prop_assert_eq!(serde_json::to_string(&snap).unwrap(), before);
    }

    #[test]
    fn prop_hostile_x_strictly_decreases(deltas in prop::collection::vec(1.0f64..100.0, 1..20)) {
        let mut engine = quiet_engine();
        let hostile = engine.spawn_test_hostile(1000.0, 50.0);
        let mut last_x = 1000.0;

        for dt in deltas {
            engine.tick(dt, &idle());
            let x = engine.world().get::<&Position>(hostile).unwrap().x;
            prop_assert!(x < last_x);
            prop_assert!((last_x - x - 80.0 * dt / 1000.0).abs() < 1e-9);
            last_x = x;
        }
    }
}

// ---- Spawning ----

#[test]
fn test_hostile_spawns_on_interval() {
    let mut engine = playing_engine(21);
    for _ in 0..7 {
        let snap = engine.tick(250.0, &idle());
        assert!(snap.hostiles.is_empty());
    }

    let snap = engine.tick(250.0, &idle());
    assert_eq!(snap.hostiles.len(), 1);
    assert_eq!(snap.hostiles[0].position.x, 1280.0);
    assert!(has_event(&snap.events, |e| matches!(
        e,
        SessionEvent::HostileSpawned { .. }
    )));
}

// ---- Combat ----

#[test]
fn test_projectile_kill_completes_wave() {
    let mut engine = playing_engine(7);
    engine.session_mut().enemies_killed_this_wave = 9;
    // After 200ms the shot spans [440, 448] x [378, 382]; the hostile
    // has drifted to x = 414.
    engine.spawn_test_hostile(430.0, 365.0);

    let snap = engine.tick(200.0, &attack());

    assert!(snap.hostiles.is_empty());
    assert!(snap.projectiles.is_empty());
    assert_eq!(snap.particles.len(), 23);
    assert_eq!(snap.session.score, 1);
    assert_eq!(snap.session.wave, 2);
    assert_eq!(snap.session.enemies_killed_this_wave, 0);
    assert_eq!(snap.session.enemies_required_this_wave, 12);
    assert!((snap.session.spawn_interval_ms - 1800.0).abs() < 1e-9);
    assert_eq!(snap.audio_events, vec![AudioEvent::Hit]);
    assert!(has_event(&snap.events, |e| matches!(
        e,
        SessionEvent::WaveAdvanced { wave: 2, required_kills: 12, .. }
    )));
}

#[test]
fn test_wave_check_runs_on_next_tick() {
    let mut engine = playing_engine(7);
    engine.session_mut().enemies_killed_this_wave = 10;

    let snap = engine.tick(FRAME_MS, &idle());
    assert_eq!(snap.session.wave, 2);
    assert_eq!(snap.session.enemies_killed_this_wave, 0);
    assert_eq!(snap.session.enemies_required_this_wave, 12);
}

#[test]
fn test_contact_damage_without_score() {
    let mut engine = quiet_engine();
    engine.spawn_test_hostile(330.0, 365.0);

    let snap = engine.tick(FRAME_MS, &idle());

    assert_eq!(snap.session.health, 2);
    assert_eq!(snap.session.score, 0);
    assert!(snap.hostiles.is_empty());
    assert_eq!(snap.particles.len(), 15);
    assert!(snap
        .particles
        .iter()
        .all(|p| p.kind == ParticleKind::Damage));
    assert_eq!(snap.audio_events, vec![AudioEvent::Damage]);
}

#[test]
fn test_simultaneous_contacts_stack_damage() {
    let mut engine = quiet_engine();
    engine.spawn_test_hostile(330.0, 365.0);
    engine.spawn_test_hostile(335.0, 370.0);

    let snap = engine.tick(FRAME_MS, &idle());

    assert_eq!(snap.session.health, 1);
    assert_eq!(snap.audio_events.len(), 2);
    assert_eq!(snap.phase, GamePhase::Playing);
}

#[test]
fn test_game_over_freezes_session() {
    let mut engine = quiet_engine();
    engine.session_mut().health = 1;
    engine.spawn_test_hostile(330.0, 365.0);
    engine.spawn_test_hostile(800.0, 100.0);

    let snap = engine.tick(FRAME_MS, &idle());
    assert_eq!(snap.phase, GamePhase::Ended);
    assert_eq!(snap.session.health, 0);
    assert!(has_event(&snap.events, |e| matches!(
        e,
        SessionEvent::SessionEnded { score: 0, wave: 1 }
    )));

    let frozen_time = snap.time;
    let frozen_entities = engine.world().len();
    for _ in 0..30 {
        let snap = engine.tick(250.0, &attack());
        assert_eq!(snap.phase, GamePhase::Ended);
        assert_eq!(snap.time.tick, frozen_time.tick);
        assert_eq!(snap.hostiles.len(), 1);
        assert!(snap.events.is_empty());
    }
    assert_eq!(engine.world().len(), frozen_entities);
    assert_eq!(engine.session().score, 0);

    engine.queue_command(SessionCommand::Pause);
    engine.tick(FRAME_MS, &idle());
    assert_eq!(engine.phase(), GamePhase::Ended, "cannot pause a finished session");
}

// ---- Special attack ----

#[test]
fn test_special_clears_all_hostiles() {
    let mut engine = quiet_engine();
    engine.charge_special();
    for i in 0..5 {
        engine.spawn_test_hostile(600.0 + 60.0 * i as f64, 50.0);
    }

    let snap = engine.tick(FRAME_MS, &InputSnapshot {
        special: true,
        ..Default::default()
    });

    assert!(snap.hostiles.is_empty());
    assert_eq!(snap.session.score, 5);
    assert_eq!(snap.session.enemies_killed_this_wave, 5);
    assert_eq!(snap.particles.len(), 45 * 5);
    assert!(!snap.session.special_ready);
    assert_eq!(snap.session.special_state, SpecialAttackState::Charging);
    assert_eq!(snap.audio_events, vec![AudioEvent::Success]);
    assert!(has_event(&snap.events, |e| {
        *e == SessionEvent::SpecialTriggered { destroyed: 5 }
    }));
}

#[test]
fn test_special_ignored_while_charging() {
    let mut engine = quiet_engine();
    engine.spawn_test_hostile(600.0, 50.0);

    let snap = engine.tick(FRAME_MS, &InputSnapshot {
        special: true,
        ..Default::default()
    });

    assert_eq!(snap.hostiles.len(), 1);
    assert_eq!(snap.session.score, 0);
    assert!(snap.audio_events.is_empty());
}

#[test]
fn test_special_charges_in_thirty_seconds() {
    let mut engine = quiet_engine();
    for _ in 0..119 {
        let snap = engine.tick(250.0, &idle());
        assert!(!snap.session.special_ready);
    }
    assert_eq!(engine.special_state(), SpecialAttackState::Charging);

    let snap = engine.tick(250.0, &idle());
    assert!(snap.session.special_ready);
    assert_eq!(snap.session.special_cooldown_remaining_secs, 0.0);
    assert_eq!(snap.events, vec![SessionEvent::SpecialReady]);

    let snap = engine.tick(250.0, &idle());
    assert!(snap.events.is_empty(), "ready is signalled once");
}

// ---- Particles ----

#[test]
fn test_particles_self_prune() {
    let mut engine = quiet_engine();
    engine.spawn_test_hostile(330.0, 365.0);
    let snap = engine.tick(FRAME_MS, &idle());
    assert_eq!(snap.particles.len(), 15);

    for _ in 0..3 {
        engine.tick(250.0, &idle());
    }
    let snap = engine.tick(50.0, &idle());
    assert!(snap.particles.is_empty(), "damage particles live 800ms");
}
