use crate::error::{ConfigError, Result};

/// Size of the bounded arena agents move in. Origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> Result<()> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(self.width) || !valid(self.height) {
            return Err(ConfigError::InvalidArena {
                width: self.width,
                height: self.height,
            }
            .into());
        }
        Ok(())
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Limits and perception radii shared by every agent's steering behaviors.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SteeringConfig {
    pub max_speed: f32,
    pub max_force: f32,
    pub separation_radius: f32,
    pub alignment_radius: f32,
    pub cohesion_radius: f32,
    /// Near-contact radius for collision avoidance; always below `separation_radius`.
    pub avoidance_radius: f32,
    pub wall_margin: f32,
    pub attractor_radius: f32,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            max_speed: 2.0,
            max_force: 0.1,
            separation_radius: 50.0,
            alignment_radius: 50.0,
            cohesion_radius: 50.0,
            avoidance_radius: 20.0,
            wall_margin: 50.0,
            attractor_radius: 150.0,
        }
    }
}

impl SteeringConfig {
    pub fn validate(&self) -> Result<()> {
        let positive = |v: f32| v.is_finite() && v > 0.0;

        if !positive(self.max_speed) {
            return Err(ConfigError::InvalidMaxSpeed(self.max_speed).into());
        }
        if !positive(self.max_force) {
            return Err(ConfigError::InvalidMaxForce(self.max_force).into());
        }

        let radii = [
            ("separation_radius", self.separation_radius),
            ("alignment_radius", self.alignment_radius),
            ("cohesion_radius", self.cohesion_radius),
            ("avoidance_radius", self.avoidance_radius),
            ("attractor_radius", self.attractor_radius),
        ];
        for (name, value) in radii {
            if !positive(value) {
                return Err(ConfigError::InvalidRadius { name, value }.into());
            }
        }

        if self.avoidance_radius >= self.separation_radius {
            return Err(ConfigError::AvoidanceRadiusTooLarge {
                avoidance: self.avoidance_radius,
                separation: self.separation_radius,
            }
            .into());
        }

        if !self.wall_margin.is_finite() || self.wall_margin < 0.0 {
            return Err(ConfigError::InvalidWallMargin(self.wall_margin).into());
        }

        Ok(())
    }
}

/// Everything a flock needs to run: the arena and the steering parameters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    pub arena: Arena,
    pub steering: SteeringConfig,
}

impl SimulationConfig {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            arena: Arena::new(width, height),
            steering: SteeringConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.arena.validate()?;
        self.steering.validate()
    }
}
