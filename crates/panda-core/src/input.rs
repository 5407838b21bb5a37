//! Per-tick input snapshot supplied by the host.
//!
//! Flags are level-triggered: `true` means "currently held". Keyboard and
//! touch sources are merged by the host before the snapshot reaches the engine.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSnapshot {
    pub move_left: bool,
    pub move_right: bool,
    pub move_up: bool,
    pub move_down: bool,
    pub attack: bool,
    pub special: bool,
}

impl InputSnapshot {
    /// Held-direction vector. Each axis is -1, 0 or 1; opposite keys cancel.
    pub fn direction(&self) -> (f64, f64) {
        let axis = |neg: bool, pos: bool| match (neg, pos) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        (
            axis(self.move_left, self.move_right),
            axis(self.move_up, self.move_down),
        )
    }

    /// Merge two sources (e.g. keyboard and touch). A flag held on either is held.
    pub fn merge(&self, other: &InputSnapshot) -> InputSnapshot {
        InputSnapshot {
            move_left: self.move_left || other.move_left,
            move_right: self.move_right || other.move_right,
            move_up: self.move_up || other.move_up,
            move_down: self.move_down || other.move_down,
            attack: self.attack || other.attack,
            special: self.special || other.special,
        }
    }
}
