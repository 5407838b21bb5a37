//! Scripted player used by the driver when no human is at the keys.
//!
//! Lines up vertically with the nearest hostile ahead of the player, keeps
//! attack held, and burns once the special is ready and the field is busy.

use panda_core::input::InputSnapshot;
use panda_core::state::{EntityView, SceneSnapshot};

/// Vertical slack before the autopilot bothers to move.
const ALIGN_TOLERANCE: f64 = 4.0;

/// Hostiles on screen before the autopilot spends the special.
const BURN_THRESHOLD: usize = 3;

fn center_y(view: &EntityView) -> f64 {
    view.position.y + view.size.h / 2.0
}

/// Closest hostile that has not yet passed the player's left edge.
fn nearest_target<'a>(player: &EntityView, hostiles: &'a [EntityView]) -> Option<&'a EntityView> {
    hostiles
        .iter()
        .filter(|h| h.position.x + h.size.w >= player.position.x)
        .min_by(|a, b| a.position.x.total_cmp(&b.position.x))
}

/// Input for the next frame, derived from the previous snapshot.
pub fn steer(snapshot: &SceneSnapshot) -> InputSnapshot {
    let Some(player) = snapshot.player.as_ref() else {
        return InputSnapshot::default();
    };

    let mut input = InputSnapshot {
        attack: true,
        special: snapshot.session.special_ready && snapshot.hostiles.len() >= BURN_THRESHOLD,
        ..Default::default()
    };

    if let Some(target) = nearest_target(player, &snapshot.hostiles) {
        let offset = center_y(target) - center_y(player);
        input.move_down = offset > ALIGN_TOLERANCE;
        input.move_up = offset < -ALIGN_TOLERANCE;
    }
    input
}
