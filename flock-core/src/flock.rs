#[cfg(feature = "std")]
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::agent::{Agent, SteeringForces};
use crate::config::SimulationConfig;
use crate::error::{ConfigError, Result};
use crate::vector::Vector2D;

/// A fixed-capacity flock for embedded (no_std) hosts.
///
/// Ticks the same way as [`Flock`]: all forces are computed against the
/// pre-tick state before any agent moves.
pub struct FixedFlock<const N: usize> {
    agents: heapless::Vec<Agent, N>,
    config: SimulationConfig,
    ticks: u64,
}

impl<const N: usize> FixedFlock<N> {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            agents: heapless::Vec::new(),
            config,
            ticks: 0,
        })
    }

    /// Adds an agent, taking on this flock's speed and force limits.
    pub fn add_agent(&mut self, agent: Agent) -> Result<()> {
        let agent = agent.limited_by(&self.config.steering);
        self.agents.push(agent).map_err(|_| {
            ConfigError::CapacityExceeded {
                capacity: N,
                requested: N + 1,
            }
            .into()
        })
    }

    pub fn tick(&mut self, attractor: Vector2D) {
        self.tick_with(Some(attractor));
    }

    pub fn tick_with(&mut self, attractor: Option<Vector2D>) {
        let mut forces = heapless::Vec::<SteeringForces, N>::new();
        for agent in self.agents.iter() {
            // cannot overflow: one entry per agent, same capacity
            let _ = forces.push(agent.steering(&self.agents, attractor, &self.config));
        }

        for (agent, force) in self.agents.iter_mut().zip(forces.iter()) {
            agent.apply(force);
        }
        self.ticks += 1;
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// A flock of agents sharing one arena and one steering configuration.
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct Flock {
    agents: Vec<Agent>,
    config: SimulationConfig,
    ticks: u64,
}

#[cfg(feature = "std")]
impl Flock {
    /// `count` randomly placed agents in a `width` x `height` arena with default steering.
    pub fn new(count: usize, width: f32, height: f32) -> Result<Self> {
        Self::random(count, SimulationConfig::new(width, height))
    }

    /// `count` randomly placed agents using an arbitrary configuration.
    pub fn random(count: usize, config: SimulationConfig) -> Result<Self> {
        Self::with_rng(count, config, &mut rand::thread_rng())
    }

    /// Reproducible construction: the same seed always yields the same flock.
    pub fn seeded(count: usize, config: SimulationConfig, seed: u64) -> Result<Self> {
        Self::with_rng(count, config, &mut StdRng::seed_from_u64(seed))
    }

    pub fn with_rng<R: Rng + ?Sized>(
        count: usize,
        config: SimulationConfig,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;

        let agents = (0..count)
            .map(|_| Agent::random(rng, &config.arena, &config.steering))
            .collect();

        log::debug!(
            "Created flock of {} agents in {}x{} arena",
            count,
            config.arena.width,
            config.arena.height
        );

        Ok(Self {
            agents,
            config,
            ticks: 0,
        })
    }

    /// Builds a flock from explicitly placed agents. Each agent takes on the
    /// speed and force limits of `config`.
    pub fn from_agents(agents: Vec<Agent>, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let agents = agents
            .iter()
            .map(|agent| agent.limited_by(&config.steering))
            .collect();
        Ok(Self {
            agents,
            config,
            ticks: 0,
        })
    }

    /// Advances every agent by one tick toward `attractor`.
    pub fn tick(&mut self, attractor: Vector2D) {
        self.tick_with(Some(attractor));
    }

    /// Advances every agent by one tick. `None` means there is no attractor this tick.
    pub fn tick_with(&mut self, attractor: Option<Vector2D>) {
        // Calculate forces for all agents before moving any of them
        let forces: Vec<SteeringForces> = self
            .agents
            .iter()
            .map(|agent| agent.steering(&self.agents, attractor, &self.config))
            .collect();

        for (agent, force) in self.agents.iter_mut().zip(forces.iter()) {
            agent.apply(force);
        }
        self.ticks += 1;

        log::trace!(
            "tick {}: attractor {:?}, mean speed {:.3}",
            self.ticks,
            attractor,
            self.mean_speed()
        );
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Number of ticks run since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Mean position of all agents, `None` for an empty flock.
    pub fn centroid(&self) -> Option<Vector2D> {
        let sum: Vector2D = self.agents.iter().map(Agent::position).sum();
        sum.divide(self.agents.len() as f32).ok()
    }

    pub fn mean_speed(&self) -> f32 {
        if self.agents.is_empty() {
            return 0.0;
        }
        let total: f32 = self.agents.iter().map(|a| a.velocity().magnitude()).sum();
        total / self.agents.len() as f32
    }
}
