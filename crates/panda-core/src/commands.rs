//! Session control commands sent from the host to the simulation.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All session-level actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionCommand {
    /// Reinitialise all session state and begin playing.
    StartSession,
    /// Reinitialise all session state and return to the menu.
    ResetSession,
    /// Suspend the running session.
    Pause,
    /// Continue a paused session.
    Resume,
    /// The host surface changed size.
    ResizeField { width: f64, height: f64 },
}
