//! Scheduler configuration.
//!
//! Every tunable the engine exposes, with the defaults the production
//! planners run with. Validation happens once, before any batch is
//! processed; an invalid configuration fails the whole run fast.

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Caller-supplied scheduling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Hour of day the shift starts (e.g., 8 for 08:00).
    pub shift_start_hour: u32,
    /// Length of a single shift in hours.
    pub shift_length_hours: u32,
    /// Finishes within this many minutes of each other count as "close"
    /// for the proximity penalty.
    pub proximity_threshold_min: i64,
    /// Weight of the proximity-penalty term in the objective.
    pub proximity_weight: i64,
    /// Weight of the load-balance (max jobs per printer) term.
    pub load_balance_weight: i64,
    /// Weight of the start-time-sum tie-break term.
    pub tie_break_weight: i64,
    /// Fixed gap in minutes added to every job for scheduling purposes.
    pub job_buffer_min: i64,
    /// Wall-clock budget per batch solve, in seconds.
    pub solve_budget_secs: u64,
    /// Horizon sizing multiplier over the estimated days needed.
    pub horizon_safety_factor: f64,
    /// How many duration-sorted neighbors each job is compared against
    /// when building proximity pairs. A completeness/cost trade-off:
    /// larger values catch more close-finish pairs but grow the model.
    pub proximity_lookahead: usize,
    /// Neighbors whose duration differs by more than this are not
    /// proximity candidates (cuts the sliding window short).
    pub proximity_duration_gap_min: i64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            shift_start_hour: 8,
            shift_length_hours: 12,
            proximity_threshold_min: 30,
            proximity_weight: 5,
            load_balance_weight: 30,
            tie_break_weight: 1,
            job_buffer_min: 0,
            solve_budget_secs: 100,
            horizon_safety_factor: 3.0,
            proximity_lookahead: 20,
            proximity_duration_gap_min: 60,
        }
    }
}

impl SchedulerConfig {
    /// Shift start as minutes from midnight.
    #[inline]
    pub fn shift_start_min(&self) -> i64 {
        i64::from(self.shift_start_hour) * 60
    }

    /// Shift length in minutes.
    #[inline]
    pub fn shift_length_min(&self) -> i64 {
        i64::from(self.shift_length_hours) * 60
    }

    /// Schedulable minutes per shift day (equals the shift length).
    #[inline]
    pub fn minutes_per_day(&self) -> i64 {
        self.shift_length_min()
    }

    /// Checks all parameters, returning the first violation found.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.shift_length_hours == 0 {
            return Err(ScheduleError::config("shift_length_hours must be > 0"));
        }
        if self.shift_start_hour >= 24 {
            return Err(ScheduleError::config("shift_start_hour must be < 24"));
        }
        if self.proximity_threshold_min < 0 {
            return Err(ScheduleError::config(
                "proximity_threshold_min must be >= 0",
            ));
        }
        if self.proximity_weight < 0 || self.load_balance_weight < 0 || self.tie_break_weight < 0 {
            return Err(ScheduleError::config("objective weights must be >= 0"));
        }
        if self.job_buffer_min < 0 {
            return Err(ScheduleError::config("job_buffer_min must be >= 0"));
        }
        if self.solve_budget_secs == 0 {
            return Err(ScheduleError::config("solve_budget_secs must be > 0"));
        }
        if !self.horizon_safety_factor.is_finite() || self.horizon_safety_factor < 1.0 {
            return Err(ScheduleError::config(
                "horizon_safety_factor must be finite and >= 1.0",
            ));
        }
        if self.proximity_lookahead == 0 {
            return Err(ScheduleError::config("proximity_lookahead must be > 0"));
        }
        if self.proximity_duration_gap_min < 0 {
            return Err(ScheduleError::config(
                "proximity_duration_gap_min must be >= 0",
            ));
        }
        Ok(())
    }
}
