//! Piecewise-constant external inputs (setpoints, inflows).

use smallvec::SmallVec;
use stepwise_core::ConfigError;

/// A piecewise-constant function of simulation time.
///
/// Holds `base` until the first breakpoint; each breakpoint
/// `(start, value)` applies from `start` inclusive until the next one.
/// Breakpoints must be finite and strictly increasing in `start`.
///
/// Breakpoints are compared against the step time `t * dt` in floating
/// point, so a `start` that is not a multiple of `dt` takes effect at the
/// first step whose computed time reaches it, which can be one step after
/// `floor(start / dt)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Schedule {
    base: f64,
    breakpoints: SmallVec<[(f64, f64); 4]>,
}

impl Schedule {
    /// A schedule that is `value` at all times.
    pub fn constant(value: f64) -> Self {
        Self {
            base: value,
            breakpoints: SmallVec::new(),
        }
    }

    /// `before` until time `at`, `after` from `at` onward.
    pub fn step_change(at: f64, before: f64, after: f64) -> Self {
        Self::constant(before).then(at, after)
    }

    /// Append a breakpoint switching to `value` at time `start`.
    ///
    /// Ordering is checked by [`validate()`](Schedule::validate).
    pub fn then(mut self, start: f64, value: f64) -> Self {
        self.breakpoints.push((start, value));
        self
    }

    /// Check that all values are finite and breakpoints strictly increase.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base.is_finite() {
            return Err(ConfigError::InvalidSchedule {
                reason: format!("base value must be finite, got {}", self.base),
            });
        }
        let mut last_start = f64::NEG_INFINITY;
        for &(start, value) in &self.breakpoints {
            if !start.is_finite() || !value.is_finite() {
                return Err(ConfigError::InvalidSchedule {
                    reason: format!("breakpoint ({start}, {value}) must be finite"),
                });
            }
            if start <= last_start {
                return Err(ConfigError::InvalidSchedule {
                    reason: format!("breakpoint at {start} does not follow {last_start}"),
                });
            }
            last_start = start;
        }
        Ok(())
    }

    /// Value in effect at `time`.
    pub fn value_at(&self, time: f64) -> f64 {
        self.breakpoints
            .iter()
            .take_while(|&&(start, _)| start <= time)
            .last()
            .map_or(self.base, |&(_, value)| value)
    }

    /// Number of breakpoints after the base value.
    pub fn breakpoint_count(&self) -> usize {
        self.breakpoints.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_is_flat() {
        let s = Schedule::constant(1.0);
        assert_eq!(s.value_at(-5.0), 1.0);
        assert_eq!(s.value_at(0.0), 1.0);
        assert_eq!(s.value_at(1e9), 1.0);
        assert_eq!(s.breakpoint_count(), 0);
    }

    #[test]
    fn step_change_applies_from_switch_time_inclusive() {
        let s = Schedule::step_change(200.0, 1.5, 3.0);
        assert_eq!(s.value_at(0.0), 1.5);
        assert_eq!(s.value_at(199.5), 1.5);
        assert_eq!(s.value_at(200.0), 3.0);
        assert_eq!(s.value_at(499.5), 3.0);
    }

    #[test]
    fn multiple_breakpoints() {
        let s = Schedule::constant(0.0).then(1.0, 10.0).then(2.0, 20.0);
        assert!(s.validate().is_ok());
        assert_eq!(s.value_at(0.5), 0.0);
        assert_eq!(s.value_at(1.5), 10.0);
        assert_eq!(s.value_at(2.0), 20.0);
    }

    #[test]
    fn unordered_breakpoints_rejected() {
        let s = Schedule::constant(0.0).then(2.0, 1.0).then(1.0, 2.0);
        assert!(matches!(
            s.validate(),
            Err(ConfigError::InvalidSchedule { .. })
        ));
        let dup = Schedule::constant(0.0).then(1.0, 1.0).then(1.0, 2.0);
        assert!(dup.validate().is_err());
    }

    #[test]
    fn non_finite_values_rejected() {
        assert!(Schedule::constant(f64::NAN).validate().is_err());
        assert!(Schedule::step_change(1.0, 0.0, f64::INFINITY)
            .validate()
            .is_err());
    }
}
