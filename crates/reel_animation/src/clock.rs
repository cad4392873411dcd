//! Time sources for frame-driven widgets
//!
//! Widgets never read the wall clock directly; they receive a [`Clock`] at
//! construction. Hosts advance the clock once per frame.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Unscaled frame time source
pub trait Clock {
    /// Seconds elapsed between the previous frame and the current one
    fn delta_time(&self) -> f32;

    /// Seconds elapsed since the clock started
    fn time(&self) -> f64;
}

/// Wall clock advanced explicitly by the host's frame loop
pub struct SystemClock {
    start: Instant,
    last_frame: Cell<Instant>,
    delta: Cell<f32>,
}

impl SystemClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: Cell::new(now),
            delta: Cell::new(0.0),
        }
    }

    /// Mark the start of a new frame
    pub fn tick(&self) {
        let now = Instant::now();
        self.delta
            .set((now - self.last_frame.get()).as_secs_f32());
        self.last_frame.set(now);
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn delta_time(&self) -> f32 {
        self.delta.get()
    }

    fn time(&self) -> f64 {
        (self.last_frame.get() - self.start).as_secs_f64()
    }
}

#[derive(Clone, Copy, Default)]
struct ManualState {
    delta: f32,
    time: f64,
}

/// Deterministic clock for tests and simulations
///
/// Clones share the same time, so a test can keep one handle while the
/// widget owns another.
#[derive(Clone, Default)]
pub struct ManualClock {
    state: Rc<Cell<ManualState>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` seconds; `dt` becomes the current frame delta
    pub fn advance(&self, dt: f32) {
        let mut state = self.state.get();
        state.delta = dt;
        state.time += dt as f64;
        self.state.set(state);
    }
}

impl Clock for ManualClock {
    fn delta_time(&self) -> f32 {
        self.state.get().delta
    }

    fn time(&self) -> f64 {
        self.state.get().time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance(0.5);
        handle.advance(0.25);
        assert_eq!(clock.delta_time(), 0.25);
        assert!((clock.time() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_system_clock_monotonic() {
        let clock = SystemClock::new();
        assert_eq!(clock.delta_time(), 0.0);
        clock.tick();
        assert!(clock.delta_time() >= 0.0);
        assert!(clock.time() >= 0.0);
    }
}
