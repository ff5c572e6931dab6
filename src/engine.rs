//! Multi-batch scheduling orchestrator.
//!
//! [`ScheduleEngine`] drives a full run: preflight validation, diversion
//! of unroutable jobs, greedy batch partitioning, then one bounded solve
//! per batch. Batches are independent subproblems; their solutions are
//! merged onto a shared timeline by shifting each successful batch past
//! the previous one with a fixed two-shift offset. A failed batch costs
//! its jobs, never the run.

use log::{info, warn};

use crate::config::SchedulerConfig;
use crate::error::ScheduleError;
use crate::horizon;
use crate::model;
use crate::models::{
    Job, Roster, ScheduleResult, ScheduledJob, UnscheduledJob, UnscheduledReason,
};
use crate::partition::{GreedyFillPartitioner, PartitionStrategy};
use crate::solver::{BranchBoundSolver, ConstraintSolver};
use crate::validation;

/// The top-level scheduler.
///
/// Construction validates the configuration and roster once; [`run`]
/// can then be called repeatedly with different job lists.
///
/// [`run`]: ScheduleEngine::run
pub struct ScheduleEngine {
    config: SchedulerConfig,
    roster: Roster,
    partitioner: Box<dyn PartitionStrategy>,
    solver: Box<dyn ConstraintSolver>,
}

impl std::fmt::Debug for ScheduleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduleEngine")
            .field("config", &self.config)
            .field("roster", &self.roster)
            .finish_non_exhaustive()
    }
}

impl ScheduleEngine {
    /// Creates an engine with the default partitioner and solver.
    ///
    /// Fails if the configuration is invalid or the roster fails
    /// preflight validation.
    pub fn new(config: SchedulerConfig, roster: Roster) -> Result<Self, ScheduleError> {
        config.validate()?;
        if roster.is_empty() {
            return Err(ScheduleError::EmptyRoster);
        }
        validation::validate_roster(&roster).map_err(ScheduleError::Preflight)?;
        let solver = BranchBoundSolver::from_config(&config);
        Ok(Self {
            config,
            roster,
            partitioner: Box::new(GreedyFillPartitioner),
            solver: Box::new(solver),
        })
    }

    /// Replaces the batch partitioner.
    pub fn with_partitioner(mut self, partitioner: impl PartitionStrategy + 'static) -> Self {
        self.partitioner = Box::new(partitioner);
        self
    }

    /// Replaces the constraint solver.
    pub fn with_solver(mut self, solver: impl ConstraintSolver + 'static) -> Self {
        self.solver = Box::new(solver);
        self
    }

    /// Schedules the given jobs, returning the merged multi-batch result.
    ///
    /// Unroutable jobs and jobs in failed batches are returned in
    /// `unscheduled` rather than aborting the run. Errors are reserved
    /// for malformed input (preflight failures).
    pub fn run(&self, jobs: Vec<Job>) -> Result<ScheduleResult, ScheduleError> {
        validation::validate_jobs(&jobs).map_err(ScheduleError::Preflight)?;

        let mut unscheduled = Vec::new();
        let routable: Vec<Job> = jobs
            .into_iter()
            .filter_map(|job| {
                if self.roster.compatible_indices(&job).is_empty() {
                    warn!(
                        "job {} ({:?}) has no compatible printer ({} / {} / {})",
                        job.id, job.title, job.material, job.technology, job.machine_model
                    );
                    unscheduled.push(UnscheduledJob {
                        job,
                        reason: UnscheduledReason::Unroutable,
                    });
                    None
                } else {
                    Some(job)
                }
            })
            .collect();

        let capacity = self.config.shift_length_min() * self.roster.len().max(1) as i64;
        let batches = self.partitioner.partition(&routable, capacity);
        let batch_count = batches.len();
        info!(
            "scheduling {} jobs in {batch_count} batches on {} printers",
            routable.len(),
            self.roster.len()
        );

        let mut scheduled = Vec::new();
        let mut offset = 0i64;
        for (index, batch) in batches.into_iter().enumerate() {
            let number = index + 1;
            let horizon = horizon::estimate(&batch, &self.roster, &self.config);
            info!(
                "batch {number}/{batch_count}: {} jobs, {} min total work, horizon {horizon} min",
                batch.len(),
                batch.total_duration_min()
            );

            let model = model::build(&batch, &self.roster, horizon, &self.config)?;
            match self.solver.solve(&model) {
                Ok(solution) => {
                    for (j, job) in model.jobs.iter().enumerate() {
                        let printer_index = solution.printers[j];
                        let printer = self
                            .roster
                            .get(printer_index)
                            .ok_or(ScheduleError::Unroutable { job_id: job.id })?;
                        let start = solution.starts[j] + offset;
                        scheduled.push(ScheduledJob {
                            job_id: job.id,
                            title: job.title.clone(),
                            printer_id: printer.id,
                            rack: printer.rack.clone(),
                            start_min: start,
                            end_min: start + model.vars[j].effective_min,
                            duration_min: job.duration_min,
                            batch: number,
                            material: job.material.clone(),
                            technology: job.technology.clone(),
                            machine_model: job.machine_model.clone(),
                        });
                    }
                    // Advance past this batch before the next one starts.
                    offset += 2 * self.config.shift_length_min();
                }
                Err(err) => {
                    warn!(
                        "batch {number}/{batch_count} with {} jobs failed: {err}",
                        batch.len()
                    );
                    unscheduled.extend(batch.jobs.into_iter().map(|job| UnscheduledJob {
                        job,
                        reason: UnscheduledReason::BatchInfeasible,
                    }));
                }
            }
        }

        info!(
            "run complete: {} scheduled, {} unscheduled",
            scheduled.len(),
            unscheduled.len()
        );
        Ok(ScheduleResult {
            scheduled,
            unscheduled,
            batch_count,
        })
    }

    /// The engine's validated configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// The engine's printer roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }
}
