//! Error types shared by every Stepwise engine.
//!
//! Two families, matching the two moments a simulation can go wrong:
//! [`ConfigError`] is raised while validating parameters, before any step
//! runs; [`StepError`] is raised by a recurrence mid-run and is fatal to
//! that run. Nothing here is retriable: runs are pure and deterministic.

use std::error::Error;
use std::fmt;

use crate::id::StepIndex;

/// Invalid configuration, detected before a simulation starts.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A physical or numerical parameter must be finite and strictly positive.
    NonPositive {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A count (particles, samples, steps, bins) must be at least 1.
    ZeroCount {
        /// Name of the offending count.
        parameter: &'static str,
    },
    /// The Monte-Carlo sample-count list is empty.
    EmptySampleCounts,
    /// Sample counts must be strictly increasing.
    NonIncreasing {
        /// Position of the offending entry.
        index: usize,
        /// The entry before it.
        previous: usize,
        /// The offending entry.
        next: usize,
    },
    /// A piecewise schedule is malformed.
    InvalidSchedule {
        /// Description of the problem.
        reason: String,
    },
    /// `t_end / dt` yields fewer than one step, or more than fit in memory.
    HorizonTooShort {
        /// Requested horizon.
        t_end: f64,
        /// Requested step size.
        dt: f64,
    },
}

impl ConfigError {
    /// Check that `value` is finite and strictly positive.
    ///
    /// Returns the value unchanged on success so checks can be chained
    /// inside struct literals.
    pub fn check_positive(parameter: &'static str, value: f64) -> Result<f64, ConfigError> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(ConfigError::NonPositive { parameter, value })
        }
    }

    /// Check that `count` is at least 1.
    pub fn check_count(parameter: &'static str, count: usize) -> Result<usize, ConfigError> {
        if count == 0 {
            Err(ConfigError::ZeroCount { parameter })
        } else {
            Ok(count)
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { parameter, value } => {
                write!(f, "{parameter} must be finite and positive, got {value}")
            }
            Self::ZeroCount { parameter } => write!(f, "{parameter} must be at least 1"),
            Self::EmptySampleCounts => write!(f, "sample count list is empty"),
            Self::NonIncreasing {
                index,
                previous,
                next,
            } => write!(
                f,
                "sample counts must be strictly increasing: entry {index} ({next}) follows {previous}"
            ),
            Self::InvalidSchedule { reason } => write!(f, "invalid schedule: {reason}"),
            Self::HorizonTooShort { t_end, dt } => {
                write!(f, "horizon t_end={t_end} with dt={dt} does not yield a usable step count")
            }
        }
    }
}

impl Error for ConfigError {}

/// Fatal error raised by a recurrence while computing a step.
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// A quantity left its mathematical domain, e.g. a negative tank
    /// level under a square root. This is a modelling error and is never
    /// coerced into a valid value.
    NumericDomain {
        /// Name of the quantity that left its domain.
        quantity: &'static str,
        /// The offending value.
        value: f64,
        /// Step at which it was detected.
        step: StepIndex,
    },
    /// The recurrence could not run for another reason.
    Execution {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NumericDomain {
                quantity,
                value,
                step,
            } => write!(f, "{quantity} left its domain at step {step}: {value}"),
            Self::Execution { reason } => write!(f, "execution failed: {reason}"),
        }
    }
}

impl Error for StepError {}
