//! Simulation engine for Panda Warfare.
//!
//! Owns the hecs ECS world, advances it by host-supplied frame deltas,
//! and produces SceneSnapshots for the presentation layer.

pub mod engine;
pub mod session;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use panda_core as core;

#[cfg(test)]
mod tests;
