//! Steering-behavior flocking engine.
//!
//! Agents in a bounded 2D arena react to nearby neighbors (separation,
//! alignment, cohesion, collision avoidance), to the arena walls and to an
//! optional attractor point. A [`Flock`] advances all of them one tick at a
//! time; rendering, input and frame pacing belong to the host.
#![cfg_attr(not(feature = "std"), no_std)]

pub mod agent;
pub mod behavior;
pub mod config;
pub mod error;
pub mod flock;
pub mod vector;

pub use agent::{Agent, SteeringForces};
pub use config::{Arena, SimulationConfig, SteeringConfig};
pub use error::{ConfigError, Error, Result};
pub use flock::FixedFlock;
#[cfg(feature = "std")]
pub use flock::Flock;
pub use vector::Vector2D;
