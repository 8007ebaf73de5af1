#[cfg(feature = "std")]
use rand::Rng;

use crate::behavior;
#[cfg(feature = "std")]
use crate::config::Arena;
use crate::config::{SimulationConfig, SteeringConfig};
use crate::vector::Vector2D;

pub const DEFAULT_MAX_SPEED: f32 = 2.0;
pub const DEFAULT_MAX_FORCE: f32 = 0.1;

/// A single autonomous agent.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    position: Vector2D,
    velocity: Vector2D,
    acceleration: Vector2D,
    max_speed: f32,
    max_force: f32,
}

/// The six steering contributions computed for one agent in one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SteeringForces {
    pub separation: Vector2D,
    pub alignment: Vector2D,
    pub cohesion: Vector2D,
    pub avoidance: Vector2D,
    pub containment: Vector2D,
    pub attraction: Vector2D,
}

impl SteeringForces {
    /// Unweighted sum of all contributions.
    pub fn total(&self) -> Vector2D {
        self.separation
            + self.alignment
            + self.cohesion
            + self.avoidance
            + self.containment
            + self.attraction
    }
}

impl Agent {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        Self::with_limits(position, velocity, DEFAULT_MAX_SPEED, DEFAULT_MAX_FORCE)
    }

    /// Callers pass limits taken from a validated [`SteeringConfig`].
    pub(crate) fn with_limits(
        position: Vector2D,
        velocity: Vector2D,
        max_speed: f32,
        max_force: f32,
    ) -> Self {
        Self {
            position,
            velocity: velocity.limit(max_speed),
            acceleration: Vector2D::zero(),
            max_speed,
            max_force,
        }
    }

    /// Same position and velocity, with the flock's speed and force limits.
    pub(crate) fn limited_by(&self, steering: &SteeringConfig) -> Self {
        Self::with_limits(
            self.position,
            self.velocity,
            steering.max_speed,
            steering.max_force,
        )
    }

    /// Uniformly random position inside `arena`, velocity in [-1, 1] per axis.
    #[cfg(feature = "std")]
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        arena: &Arena,
        steering: &SteeringConfig,
    ) -> Self {
        let position = Vector2D::new(
            rng.gen_range(0.0..arena.width),
            rng.gen_range(0.0..arena.height),
        );
        let velocity = Vector2D::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0));
        Self::with_limits(position, velocity, steering.max_speed, steering.max_force)
    }

    pub fn position(&self) -> Vector2D {
        self.position
    }

    pub fn velocity(&self) -> Vector2D {
        self.velocity
    }

    /// Sum of the steering forces applied during the last tick.
    pub fn acceleration(&self) -> Vector2D {
        self.acceleration
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn max_force(&self) -> f32 {
        self.max_force
    }

    /// Computes every steering contribution against a read-only neighbor set.
    ///
    /// `neighbors` may contain this agent; it is skipped by the distance test.
    pub fn steering(
        &self,
        neighbors: &[Agent],
        attractor: Option<Vector2D>,
        config: &SimulationConfig,
    ) -> SteeringForces {
        let steering = &config.steering;
        SteeringForces {
            separation: behavior::separation(self, neighbors.iter(), steering.separation_radius),
            alignment: behavior::alignment(self, neighbors.iter(), steering.alignment_radius),
            cohesion: behavior::cohesion(self, neighbors.iter(), steering.cohesion_radius),
            avoidance: behavior::avoid_collision(self, neighbors.iter(), steering.avoidance_radius),
            containment: behavior::contain_within_walls(self, &config.arena, steering.wall_margin),
            attraction: behavior::follow_attractor(self, attractor, steering.attractor_radius),
        }
    }

    /// Integrates one tick: acceleration into velocity, velocity into position.
    pub fn apply(&mut self, forces: &SteeringForces) {
        self.acceleration = forces.total();
        self.velocity = (self.velocity + self.acceleration).limit(self.max_speed);
        self.position += self.velocity;
    }

    /// Computes forces against `neighbors` and integrates them in one step.
    pub fn update(
        &mut self,
        neighbors: &[Agent],
        attractor: Option<Vector2D>,
        config: &SimulationConfig,
    ) -> SteeringForces {
        let forces = self.steering(neighbors, attractor, config);
        self.apply(&forces);
        forces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_agent_creation() {
        let pos = Vector2D::new(10.0, 20.0);
        let vel = Vector2D::new(1.0, 1.0);
        let agent = Agent::new(pos, vel);

        assert_eq!(agent.position(), pos);
        assert_eq!(agent.velocity(), vel);
        assert_eq!(agent.acceleration(), Vector2D::zero());
        assert_eq!(agent.max_speed(), 2.0);
        assert_eq!(agent.max_force(), 0.1);
    }

    #[test]
    fn test_apply_moves_by_velocity() {
        let mut agent = Agent::new(Vector2D::new(0.0, 0.0), Vector2D::new(1.0, 1.0));

        agent.apply(&SteeringForces::default());

        assert_eq!(agent.position(), Vector2D::new(1.0, 1.0));
    }

    #[test]
    fn test_apply_clamps_speed() {
        let mut agent = Agent::new(Vector2D::new(400.0, 300.0), Vector2D::new(1.9, 0.0));
        let forces = SteeringForces {
            containment: Vector2D::new(2.0, 2.0),
            ..SteeringForces::default()
        };

        agent.apply(&forces);

        assert!(agent.velocity().magnitude() <= agent.max_speed() + EPSILON);
        assert_eq!(agent.acceleration(), Vector2D::new(2.0, 2.0));
    }

    #[test]
    fn test_single_agent_seeks_nearby_attractor() {
        let config = SimulationConfig::default();
        let mut agent = Agent::new(Vector2D::new(300.0, 300.0), Vector2D::zero());
        let snapshot = [agent.clone()];

        agent.update(&snapshot, Some(Vector2D::new(400.0, 300.0)), &config);

        assert!(agent.velocity().x > 0.0);
        assert!(agent.velocity().x <= agent.max_force() + EPSILON);
        assert!(agent.velocity().y.abs() < EPSILON);
        assert!(agent.position().x > 300.0);
    }

    #[test]
    fn test_soft_forces_bounded_by_max_force() {
        let config = SimulationConfig::default();
        let agent = Agent::new(Vector2D::new(100.0, 100.0), Vector2D::new(-2.0, 0.0));
        let neighbors = [
            agent.clone(),
            Agent::new(Vector2D::new(105.0, 100.0), Vector2D::new(0.0, 2.0)),
            Agent::new(Vector2D::new(100.0, 130.0), Vector2D::new(1.0, -1.0)),
        ];

        let forces = agent.steering(&neighbors, Some(Vector2D::new(150.0, 150.0)), &config);

        for force in [
            forces.separation,
            forces.alignment,
            forces.cohesion,
            forces.avoidance,
            forces.attraction,
        ] {
            assert!(force.magnitude() <= agent.max_force() + EPSILON);
        }
        assert_eq!(forces.containment, Vector2D::zero());
    }

    #[test]
    fn test_update_is_deterministic() {
        let config = SimulationConfig::default();
        let neighbors = [
            Agent::new(Vector2D::new(60.0, 70.0), Vector2D::new(0.5, 0.2)),
            Agent::new(Vector2D::new(75.0, 80.0), Vector2D::new(-0.3, 0.9)),
            Agent::new(Vector2D::new(90.0, 65.0), Vector2D::new(1.0, -1.0)),
        ];
        let attractor = Some(Vector2D::new(120.0, 90.0));

        let mut first = neighbors[1].clone();
        let mut second = neighbors[1].clone();
        first.update(&neighbors, attractor, &config);
        second.update(&neighbors, attractor, &config);

        assert_eq!(first, second);
    }

    #[test]
    fn test_limited_by_takes_config_limits() {
        let steering = SteeringConfig {
            max_speed: 1.0,
            max_force: 0.5,
            ..SteeringConfig::default()
        };
        let agent = Agent::new(Vector2D::new(10.0, 10.0), Vector2D::new(2.0, 0.0));

        let limited = agent.limited_by(&steering);

        assert_eq!(limited.max_speed(), 1.0);
        assert_eq!(limited.max_force(), 0.5);
        assert_eq!(limited.position(), agent.position());
        assert_eq!(limited.velocity(), Vector2D::new(1.0, 0.0));
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_random_agent_within_arena() {
        use rand::{rngs::StdRng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(7);
        let arena = Arena::new(800.0, 600.0);
        for _ in 0..100 {
            let agent = Agent::random(&mut rng, &arena, &SteeringConfig::default());
            let p = agent.position();
            let v = agent.velocity();
            assert!(p.x >= 0.0 && p.x < 800.0);
            assert!(p.y >= 0.0 && p.y < 600.0);
            assert!(v.x.abs() <= 1.0 && v.y.abs() <= 1.0);
        }
    }
}
