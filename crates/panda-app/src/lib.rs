//! Frame driver for the Panda Warfare simulation.
//!
//! Hosts the engine on a dedicated thread (or drives it inline with a fixed
//! delta), feeds it input from the autopilot, and publishes snapshots.

pub mod autopilot;
pub mod config;
pub mod game_loop;
pub mod state;
