//! ECS systems that operate on the simulation world each tick.
//!
//! Each system is a free function over the hecs `World`. Engine-owned state
//! such as session counters and timers is passed in explicitly.

pub mod cleanup;
pub mod collision;
pub mod movement;
pub mod particles;
pub mod player;
pub mod snapshot;
pub mod spawner;
pub mod special_attack;
pub mod wave;
