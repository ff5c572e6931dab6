//! Schedule output model.
//!
//! The merged result of a run: a list of scheduled jobs with concrete
//! printer and time assignments, plus the jobs that could not be placed.
//! Assignments are produced once per solved batch, shifted by the batch
//! offset, and never mutated afterward.

use serde::{Deserialize, Serialize};

use super::Job;

/// A concrete job-printer-time assignment.
///
/// `end_min` includes the global inter-job buffer (machine occupancy);
/// [`ScheduledJob::true_end_min`] gives the buffer-free finish time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledJob {
    /// Assigned job ID.
    pub job_id: u32,
    /// Job title (denormalized for export convenience).
    pub title: String,
    /// Assigned printer ID.
    pub printer_id: u32,
    /// Rack of the assigned printer.
    pub rack: String,
    /// Start minute relative to the run epoch.
    pub start_min: i64,
    /// Occupancy end minute (start + nominal duration + buffer).
    pub end_min: i64,
    /// Nominal (unbuffered) duration in minutes.
    pub duration_min: i64,
    /// 1-based batch number this job was solved in.
    pub batch: usize,
    /// Job material requirement.
    pub material: String,
    /// Job technology requirement.
    pub technology: String,
    /// Job machine-model requirement.
    pub machine_model: String,
}

impl ScheduledJob {
    /// Finish time excluding buffer: `start + nominal duration`.
    #[inline]
    pub fn true_end_min(&self) -> i64 {
        self.start_min + self.duration_min
    }
}

/// Why a job ended up unscheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnscheduledReason {
    /// No printer in the roster matches the job's requirements.
    Unroutable,
    /// The job's batch timed out or was proven infeasible.
    BatchInfeasible,
}

/// A job that could not be placed, with the original job record intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnscheduledJob {
    /// The original job, unmodified.
    pub job: Job,
    /// Why scheduling failed for it.
    pub reason: UnscheduledReason,
}

/// The merged output of a scheduling run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// All scheduled jobs across all solved batches, offset-merged.
    pub scheduled: Vec<ScheduledJob>,
    /// Jobs that could not be placed, with reasons.
    pub unscheduled: Vec<UnscheduledJob>,
    /// Total number of batches the partitioner produced.
    pub batch_count: usize,
}

impl ScheduleResult {
    /// Latest buffer-free finish time across all scheduled jobs.
    pub fn makespan_min(&self) -> i64 {
        self.scheduled
            .iter()
            .map(|s| s.true_end_min())
            .max()
            .unwrap_or(0)
    }

    /// All assignments on a given printer.
    pub fn jobs_on_printer(&self, printer_id: u32) -> Vec<&ScheduledJob> {
        self.scheduled
            .iter()
            .filter(|s| s.printer_id == printer_id)
            .collect()
    }

    /// Whether every input job was placed.
    pub fn is_complete(&self) -> bool {
        self.unscheduled.is_empty()
    }
}
