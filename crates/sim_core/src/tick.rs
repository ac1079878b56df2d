//! Tick timing for the simulation loop.

use std::time::{Duration, Instant};

/// Default simulation rate: 20 ticks per second.
pub const DEFAULT_TICK_RATE: f64 = 20.0;

/// Manages the fixed-step tick schedule.
///
/// Real time is accumulated with [`TickClock::update`]; the loop then drains
/// whole ticks with [`TickClock::should_tick`] so simulation speed stays
/// independent of how fast the host loop spins.
#[derive(Debug)]
pub struct TickClock {
    /// Time of the last update call.
    last_update: Instant,
    /// Ticks executed since start.
    tick_count: u64,
    /// Fixed timestep (default 20 Hz).
    timestep: Duration,
    /// Accumulated time for pending ticks.
    accumulator: Duration,
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickClock {
    /// Create a clock at the default 20 Hz rate.
    pub fn new() -> Self {
        Self {
            last_update: Instant::now(),
            tick_count: 0,
            timestep: Duration::from_secs_f64(1.0 / DEFAULT_TICK_RATE),
            accumulator: Duration::ZERO,
        }
    }

    /// Accumulate wall-clock time at the top of the host loop.
    pub fn update(&mut self) {
        let now = Instant::now();
        self.accumulator += now - self.last_update;
        self.last_update = now;
    }

    /// Check if a tick should run and consume its slice of time.
    pub fn should_tick(&mut self) -> bool {
        if self.accumulator >= self.timestep {
            self.accumulator -= self.timestep;
            self.tick_count += 1;
            true
        } else {
            false
        }
    }

    /// Ticks executed since start.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Set the tick rate in Hz.
    pub fn set_rate(&mut self, hz: f64) {
        self.timestep = Duration::from_secs_f64(1.0 / hz);
    }
}
