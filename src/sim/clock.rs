//! Millisecond time sources for the round clock, stun timer and schedulers

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Wall-clock source sampled at the top of each tick
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin
    fn now_ms(&self) -> u64;
}

/// Real time since the clock was created
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Manually advanced clock. Clones share the same time, so a driver can keep
/// one handle while the engine owns another. Backed by `Rc<Cell>`, so it is
/// `!Send` and stays on one thread.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shares_time() {
        let clock = ManualClock::new(100);
        let handle = clock.clone();
        handle.advance(250);
        assert_eq!(clock.now_ms(), 350);
        clock.set(5);
        assert_eq!(handle.now_ms(), 5);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}
