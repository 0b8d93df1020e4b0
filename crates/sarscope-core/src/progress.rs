//! Simulated upload progress.
//!
//! The conversion service reports nothing until it is done, so the
//! progress bar is driven by a fixed timer that creeps toward a cap.
//! Only a service response moves the bar to 100.

use serde::{Deserialize, Serialize};

/// Timer cadence and increments for the simulated progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSchedule {
    /// Milliseconds between ticks.
    pub interval_ms: u32,
    /// Percentage points added per tick.
    pub step: u8,
    /// Highest value the timer alone can reach. Kept below 100.
    pub cap: u8,
    /// From this value on, the bar is labelled "Processing" instead of
    /// "Uploading".
    pub processing_threshold: u8,
}

impl Default for ProgressSchedule {
    fn default() -> Self {
        Self {
            interval_ms: 300,
            step: 10,
            cap: 90,
            processing_threshold: 90,
        }
    }
}

impl ProgressSchedule {
    /// The value after one tick from `current`.
    ///
    /// Never decreases, never exceeds the cap (itself clamped to 99),
    /// and leaves values already above the cap untouched.
    #[must_use]
    pub fn advance(&self, current: u8) -> u8 {
        let cap = self.effective_cap();
        if current >= cap {
            return current;
        }
        current.saturating_add(self.step).min(cap)
    }

    /// Whether the timer has nothing left to do at `current`.
    ///
    /// A zero step can never move the bar, so it is saturated from the
    /// start.
    #[must_use]
    pub const fn is_saturated(&self, current: u8) -> bool {
        self.step == 0 || current >= self.effective_cap()
    }

    /// Label shown next to the bar for a given in-flight value.
    #[must_use]
    pub const fn phase_label(&self, current: u8) -> &'static str {
        if current >= self.processing_threshold {
            "Processing..."
        } else {
            "Uploading..."
        }
    }

    const fn effective_cap(&self) -> u8 {
        if self.cap > 99 { 99 } else { self.cap }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_step_is_saturated_immediately() {
        let schedule = ProgressSchedule {
            step: 0,
            ..ProgressSchedule::default()
        };
        assert!(schedule.is_saturated(0));
        assert_eq!(schedule.advance(0), 0);
    }

    #[test]
    fn default_schedule_reaches_cap_in_nine_ticks() {
        let schedule = ProgressSchedule::default();
        let mut value = 0;
        let mut ticks = 0;
        while !schedule.is_saturated(value) {
            value = schedule.advance(value);
            ticks += 1;
        }
        assert_eq!(value, 90);
        assert_eq!(ticks, 9);
    }

    #[test]
    fn advance_is_monotonic_and_capped() {
        let schedule = ProgressSchedule {
            step: 7,
            ..ProgressSchedule::default()
        };
        let mut value = 0;
        for _ in 0..50 {
            let next = schedule.advance(value);
            assert!(next >= value);
            assert!(next <= 90);
            value = next;
        }
        assert_eq!(value, 90);
    }

    #[test]
    fn cap_of_one_hundred_is_held_below_completion() {
        let schedule = ProgressSchedule {
            cap: 100,
            ..ProgressSchedule::default()
        };
        let mut value = 0;
        for _ in 0..20 {
            value = schedule.advance(value);
        }
        assert_eq!(value, 99);
    }

    #[test]
    fn values_above_cap_are_left_alone() {
        let schedule = ProgressSchedule::default();
        assert_eq!(schedule.advance(95), 95);
    }

    #[test]
    fn label_switches_at_threshold() {
        let schedule = ProgressSchedule::default();
        assert_eq!(schedule.phase_label(80), "Uploading...");
        assert_eq!(schedule.phase_label(90), "Processing...");
    }
}
