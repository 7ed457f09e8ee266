//! Fixed-cadence tick source
//!
//! Stands in for a GUI timer: calls [`Engine::tick`] every `interval` of
//! wall-clock time. The interval has no relation to simulated time; a tick
//! that overruns its slot is followed immediately by the next one, never
//! by two steps at once.

use std::thread;
use std::time::{Duration, Instant};

use log::debug;

use crate::simulation::engine::Engine;
use crate::simulation::error::SimError;

#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    interval: Duration,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Fire `ticks` ticks at the configured cadence.
    ///
    /// `after_tick` sees the engine between ticks (read-only) together with
    /// the tick index and whether that tick stepped. Stops at the first
    /// engine error. Returns the number of steps taken.
    pub fn run<F>(&self, engine: &mut Engine, ticks: u64, mut after_tick: F) -> Result<u64, SimError>
    where
        F: FnMut(u64, bool, &Engine),
    {
        let mut steps = 0;
        let mut next = Instant::now();

        for tick in 0..ticks {
            let stepped = engine.tick()?;
            if stepped {
                steps += 1;
            }
            after_tick(tick, stepped, &*engine);

            next += self.interval;
            let now = Instant::now();
            if next > now {
                thread::sleep(next - now);
            } else {
                // overran, resync instead of bursting to catch up
                debug!("tick {tick} overran by {:?}", now - next);
                next = now;
            }
        }

        Ok(steps)
    }
}
