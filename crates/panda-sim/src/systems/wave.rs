//! Wave progression: the only difficulty ramp.

use panda_core::config::Tuning;
use panda_core::events::SessionEvent;

use crate::session::SessionState;

/// Advance at most one wave when the kill quota is met. Returns true if the
/// wave advanced.
pub fn run(session: &mut SessionState, tuning: &Tuning, events: &mut Vec<SessionEvent>) -> bool {
    if session.enemies_killed_this_wave < session.enemies_required_this_wave {
        return false;
    }

    session.wave += 1;
    session.enemies_killed_this_wave = 0;
    session.spawn_interval_ms =
        (session.spawn_interval_ms * tuning.spawn_interval_factor).max(tuning.min_spawn_interval_ms);
    session.enemies_required_this_wave += tuning.required_kills_per_wave;

    log::info!(
        "wave {} begins: spawn interval {:.0}ms, {} kills required",
        session.wave,
        session.spawn_interval_ms,
        session.enemies_required_this_wave
    );
    events.push(SessionEvent::WaveAdvanced {
        wave: session.wave,
        spawn_interval_ms: session.spawn_interval_ms,
        required_kills: session.enemies_required_this_wave,
    });
    true
}
