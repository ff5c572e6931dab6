//! Error taxonomy for the scheduling engine.
//!
//! Only configuration and structural input errors are fatal to a run.
//! Per-batch solve failures are not errors at this level — the engine
//! diverts those jobs to the unscheduled list and continues.

use itertools::Itertools;
use thiserror::Error;

use crate::validation::PreflightError;

/// A fatal, run-level scheduling error.
#[derive(Debug, Clone, Error)]
pub enum ScheduleError {
    /// Invalid caller-supplied configuration; reported before any batch
    /// is processed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The printer roster is empty; nothing can be scheduled.
    #[error("printer roster is empty")]
    EmptyRoster,

    /// Structural problems in the input (duplicate IDs, non-positive
    /// durations).
    #[error("preflight validation failed: {}", summarize(.0))]
    Preflight(Vec<PreflightError>),

    /// A job with no compatible printer reached model construction.
    /// The engine filters these out beforehand, so this indicates the
    /// model builder was called with unfiltered input.
    #[error("job {job_id} has no compatible printer")]
    Unroutable { job_id: u32 },
}

impl ScheduleError {
    /// Shorthand for a configuration error with a static message.
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

fn summarize(errors: &[PreflightError]) -> String {
    errors.iter().map(|e| e.message.as_str()).join("; ")
}
