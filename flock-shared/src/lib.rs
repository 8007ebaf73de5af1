#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec::Vec;

use flock_core::{Agent, Vector2D};
use serde::{Deserialize, Serialize};

/// A 2D point or direction in arena coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<Vector2D> for Point {
    fn from(v: Vector2D) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Point> for Vector2D {
    fn from(p: Point) -> Self {
        Vector2D::new(p.x, p.y)
    }
}

/// What a renderer needs to draw one agent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AgentSnapshot {
    pub position: Point,
    pub velocity: Point,
    /// Direction of travel in radians, measured from the +x axis
    pub heading: f32,
}

impl AgentSnapshot {
    pub fn capture(agent: &Agent) -> Self {
        let velocity = agent.velocity();
        Self {
            position: agent.position().into(),
            velocity: velocity.into(),
            heading: libm::atan2f(velocity.y, velocity.x),
        }
    }
}

/// State of the whole flock after one tick
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameSnapshot {
    pub tick: u64,
    /// Attractor used for this tick, if any
    pub attractor: Option<Point>,
    pub agents: Vec<AgentSnapshot>,
}

impl FrameSnapshot {
    pub fn capture(tick: u64, attractor: Option<Vector2D>, agents: &[Agent]) -> Self {
        Self {
            tick,
            attractor: attractor.map(Point::from),
            agents: agents.iter().map(AgentSnapshot::capture).collect(),
        }
    }

    /// Single-line JSON encoding, one frame per line
    #[cfg(feature = "std")]
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Summary of a running flock, reported periodically by hosts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlockStatus {
    pub agent_count: usize,
    pub ticks: u64,
    pub mean_speed: f32,
    pub centroid: Option<Point>,
}

#[cfg(feature = "std")]
impl FlockStatus {
    pub fn of(flock: &flock_core::Flock) -> Self {
        Self {
            agent_count: flock.len(),
            ticks: flock.ticks(),
            mean_speed: flock.mean_speed(),
            centroid: flock.centroid().map(Point::from),
        }
    }
}
