use std::time::{Duration, Instant};

/// Holds the loop to a fixed tick rate.
///
/// The simulation is defined per tick, so a different rate only changes how
/// fast it appears to run.
pub struct Pacer {
    interval: Option<Duration>,
    deadline: Instant,
}

impl Pacer {
    /// `ticks_per_second == 0` disables pacing.
    pub fn new(ticks_per_second: u32) -> Self {
        let interval = (ticks_per_second > 0)
            .then(|| Duration::from_secs_f64(1.0 / f64::from(ticks_per_second)));
        Self {
            interval,
            deadline: Instant::now(),
        }
    }

    pub fn unpaced() -> Self {
        Self::new(0)
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Sleeps until the next tick is due.
    pub fn wait(&mut self) {
        let Some(interval) = self.interval else {
            return;
        };

        self.deadline += interval;
        let now = Instant::now();
        if self.deadline > now {
            std::thread::sleep(self.deadline - now);
        } else {
            // Fell behind; don't try to catch up with a burst of ticks
            log::trace!("tick overran by {:?}", now - self.deadline);
            self.deadline = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpaced_returns_immediately() {
        let mut pacer = Pacer::unpaced();
        let start = Instant::now();
        for _ in 0..1000 {
            pacer.wait();
        }
        assert!(pacer.interval().is_none());
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_paced_interval() {
        let mut pacer = Pacer::new(100);
        assert_eq!(pacer.interval(), Some(Duration::from_millis(10)));

        let start = Instant::now();
        for _ in 0..5 {
            pacer.wait();
        }
        assert!(start.elapsed() >= Duration::from_millis(40));
    }
}
