//! Structural preflight checks.
//!
//! Runs before partitioning and solving. Detects:
//! - Duplicate job IDs
//! - Non-positive job durations
//! - Duplicate printer IDs
//! - An empty roster
//!
//! All findings are collected and reported together rather than failing
//! on the first one.

use std::collections::HashSet;

use crate::models::{Job, Roster};

/// Preflight result: `Ok(())` or every problem found.
pub type PreflightResult = Result<(), Vec<PreflightError>>;

/// A structural problem in the scheduling input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreflightError {
    /// Error category.
    pub kind: PreflightErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of preflight errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreflightErrorKind {
    /// Two jobs share the same ID.
    DuplicateJobId,
    /// Two printers share the same ID.
    DuplicatePrinterId,
    /// A job's nominal duration is zero or negative.
    NonPositiveDuration,
    /// The printer roster has no printers.
    EmptyRoster,
}

impl PreflightError {
    pub(crate) fn new(kind: PreflightErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the job list: unique IDs, strictly positive durations.
pub fn validate_jobs(jobs: &[Job]) -> PreflightResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for job in jobs {
        if !seen.insert(job.id) {
            errors.push(PreflightError::new(
                PreflightErrorKind::DuplicateJobId,
                format!("duplicate job ID {}", job.id),
            ));
        }
        if job.duration_min <= 0 {
            errors.push(PreflightError::new(
                PreflightErrorKind::NonPositiveDuration,
                format!(
                    "job {} ('{}') has non-positive duration {}",
                    job.id, job.title, job.duration_min
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates the roster: non-empty, unique printer IDs.
pub fn validate_roster(roster: &Roster) -> PreflightResult {
    let mut errors = Vec::new();

    if roster.is_empty() {
        errors.push(PreflightError::new(
            PreflightErrorKind::EmptyRoster,
            "printer roster is empty",
        ));
    }

    let mut seen = HashSet::new();
    for printer in roster.iter() {
        if !seen.insert(printer.id) {
            errors.push(PreflightError::new(
                PreflightErrorKind::DuplicatePrinterId,
                format!("duplicate printer ID {}", printer.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
