use anyhow::{Context, Result};
use flock_core::Flock;
use flock_shared::{FlockStatus, FrameSnapshot};

use crate::attractor::{AttractorInput, AttractorSource};
use crate::pacer::Pacer;
use crate::sink::FrameSink;

/// Drives a flock at a fixed cadence: pull the attractor, tick, hand the
/// frame to the sink, wait.
pub struct SimulationLoop<A, S> {
    flock: Flock,
    attractor: A,
    sink: S,
    pacer: Pacer,
    max_ticks: Option<u64>,
    stats_every: Option<u64>,
}

impl<A: AttractorSource, S: FrameSink> SimulationLoop<A, S> {
    pub fn new(flock: Flock, attractor: A, sink: S) -> Self {
        Self {
            flock,
            attractor,
            sink,
            pacer: Pacer::unpaced(),
            max_ticks: None,
            stats_every: None,
        }
    }

    pub fn with_pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    /// Stop after `ticks` ticks. `0` runs until the attractor source ends.
    pub fn with_max_ticks(mut self, ticks: u64) -> Self {
        self.max_ticks = (ticks > 0).then_some(ticks);
        self
    }

    /// Log flock statistics every `ticks` ticks. `0` disables.
    pub fn with_stats_every(mut self, ticks: u64) -> Self {
        self.stats_every = (ticks > 0).then_some(ticks);
        self
    }

    pub fn flock(&self) -> &Flock {
        &self.flock
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Advances the flock by one tick. Returns `false` once the attractor
    /// source is exhausted, in which case nothing was ticked.
    pub fn step(&mut self) -> Result<bool> {
        let tick = self.flock.ticks();
        let attractor = match self.attractor.next_attractor(tick)? {
            AttractorInput::End => return Ok(false),
            input => input.point(),
        };

        self.flock.tick_with(attractor);

        let frame = FrameSnapshot::capture(self.flock.ticks(), attractor, self.flock.agents());
        self.sink.present(&frame)?;

        if let Some(every) = self.stats_every {
            if self.flock.ticks() % every == 0 {
                let status = FlockStatus::of(&self.flock);
                log::debug!(
                    "tick {}: {} agents, mean speed {:.3}, centroid {:?}",
                    status.ticks,
                    status.agent_count,
                    status.mean_speed,
                    status.centroid
                );
            }
        }

        Ok(true)
    }

    /// Runs until the tick limit or the end of the attractor source.
    /// Returns the number of ticks executed.
    pub fn run(&mut self) -> Result<u64> {
        log::info!(
            "Starting simulation loop with {} agents, tick interval {:?}",
            self.flock.len(),
            self.pacer.interval()
        );

        let mut executed = 0;
        while self.max_ticks.map_or(true, |max| executed < max) {
            if !self.step().context("Simulation tick failed")? {
                log::info!("Attractor source exhausted");
                break;
            }
            executed += 1;
            self.pacer.wait();
        }

        self.sink.finish()?;
        log::info!("Simulation finished after {} ticks", executed);
        Ok(executed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attractor::{FixedAttractor, NoAttractor};
    use crate::sink::RecordingSink;
    use flock_core::{SimulationConfig, Vector2D};

    #[test]
    fn test_run_respects_tick_limit() {
        let flock = Flock::seeded(5, SimulationConfig::default(), 1).unwrap();
        let mut sim = SimulationLoop::new(flock, NoAttractor, RecordingSink::default())
            .with_max_ticks(12);

        assert_eq!(sim.run().unwrap(), 12);
        assert_eq!(sim.flock().ticks(), 12);
        assert_eq!(sim.sink().frames.len(), 12);
        assert_eq!(sim.sink().frames[0].tick, 1);
    }

    #[test]
    fn test_frames_carry_attractor() {
        let flock = Flock::seeded(3, SimulationConfig::default(), 1).unwrap();
        let point = Vector2D::new(100.0, 100.0);
        let mut sim =
            SimulationLoop::new(flock, FixedAttractor(point), RecordingSink::default())
                .with_max_ticks(2);

        sim.run().unwrap();

        let frames = sim.into_sink().frames;
        assert!(frames
            .iter()
            .all(|f| f.attractor.map(Vector2D::from) == Some(point)));
        assert_eq!(frames[1].agents.len(), 3);
    }
}
