//! "Every K ticks" scheduling
//!
//! Countdown timers instead of `tick % K == 0` so a trigger depends only on
//! how many times the timer was advanced, not on an absolute tick number.

/// Periodic trigger that fires on every `period`-th call to [`Every::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Every {
    period: u32,
    remaining: u32,
}

impl Every {
    /// A zero period is treated as 1 (fires every tick)
    pub fn new(period: u32) -> Self {
        let period = period.max(1);
        Self {
            period,
            remaining: period,
        }
    }

    /// Advance one tick; true on the tick the period elapses
    pub fn tick(&mut self) -> bool {
        self.remaining -= 1;
        if self.remaining == 0 {
            self.remaining = self.period;
            true
        } else {
            false
        }
    }
}
