//! Constraint model construction for one batch.
//!
//! Translates a batch of jobs plus the printer roster into the declarative
//! model the solver consumes: per-job start domains, compatibility-restricted
//! printer domains, the rack implied by each printer choice, per-printer
//! no-overlap groups, and the bounded list of proximity candidate pairs.
//!
//! Compatibility is structural — an incompatible assignment is simply not
//! in a job's printer domain, never a soft penalty. These hard constraints
//! alone determine feasibility; the objective only orders feasible
//! solutions.

use crate::config::SchedulerConfig;
use crate::error::ScheduleError;
use crate::models::{capability_key, Job, Roster};
use crate::objective::ObjectiveWeights;
use crate::partition::Batch;

/// Decision variables for one job.
#[derive(Debug, Clone)]
pub struct JobVar {
    /// Nominal duration (minutes).
    pub duration_min: i64,
    /// Scheduled duration: nominal plus the global buffer.
    pub effective_min: i64,
    /// Lower bound of the start domain (the shift start).
    pub earliest: i64,
    /// Upper bound of the start domain (`horizon - effective_min`).
    /// May fall below `earliest`, in which case the job cannot be placed
    /// and the batch is infeasible.
    pub latest: i64,
    /// Printer domain: roster indices of compatible printers, in roster
    /// order. Never empty once the model is built.
    pub printers: Vec<usize>,
}

/// The constraint model for one batch.
///
/// Index-aligned throughout: `vars[j]` belongs to `jobs[j]`;
/// `printer_ids[p]` and `printer_racks[p]` describe roster printer `p`.
#[derive(Debug, Clone)]
pub struct BatchModel {
    /// The batch's job records, for solution extraction.
    pub jobs: Vec<Job>,
    /// Per-job decision variables.
    pub vars: Vec<JobVar>,
    /// Roster printer IDs, by roster index.
    pub printer_ids: Vec<u32>,
    /// Dense rack ID per printer (first-seen order over the roster).
    pub printer_racks: Vec<usize>,
    /// Number of distinct racks.
    pub rack_count: usize,
    /// Shift start in minutes from the epoch.
    pub shift_start: i64,
    /// Horizon bound: every start/end must lie within
    /// `[shift_start, horizon]`.
    pub horizon: i64,
    /// Objective weights, from caller configuration.
    pub weights: ObjectiveWeights,
    /// Close-finish threshold in minutes.
    pub proximity_threshold: i64,
    /// Candidate (i, j) job-index pairs for the proximity penalty.
    /// Bounded by the sliding window, not an exhaustive pairwise scan.
    pub proximity_pairs: Vec<(usize, usize)>,
}

impl BatchModel {
    /// Number of jobs in the model.
    pub fn job_count(&self) -> usize {
        self.vars.len()
    }

    /// Number of printers in the model.
    pub fn printer_count(&self) -> usize {
        self.printer_ids.len()
    }
}

/// Builds the constraint model for one batch.
///
/// The caller must have filtered unroutable jobs out beforehand; a job
/// with an empty printer domain here is a contract violation and returns
/// [`ScheduleError::Unroutable`].
pub fn build(
    batch: &Batch,
    roster: &Roster,
    horizon: i64,
    config: &SchedulerConfig,
) -> Result<BatchModel, ScheduleError> {
    let shift_start = config.shift_start_min();
    let buffer = config.job_buffer_min;

    // Dense rack IDs in first-seen roster order, deterministic.
    let mut rack_names: Vec<String> = Vec::new();
    let mut printer_ids = Vec::with_capacity(roster.len());
    let mut printer_racks = Vec::with_capacity(roster.len());
    for printer in roster.iter() {
        let rack_id = match rack_names.iter().position(|r| r == &printer.rack) {
            Some(idx) => idx,
            None => {
                rack_names.push(printer.rack.clone());
                rack_names.len() - 1
            }
        };
        printer_ids.push(printer.id);
        printer_racks.push(rack_id);
    }

    let mut vars = Vec::with_capacity(batch.len());
    for job in &batch.jobs {
        let printers = roster.compatible_indices(job);
        if printers.is_empty() {
            return Err(ScheduleError::Unroutable { job_id: job.id });
        }
        let effective = job.effective_duration(buffer);
        vars.push(JobVar {
            duration_min: job.duration_min,
            effective_min: effective,
            earliest: shift_start,
            latest: horizon - effective,
            printers,
        });
    }

    let proximity_pairs = proximity_pairs(
        &batch.jobs,
        config.proximity_lookahead,
        config.proximity_duration_gap_min,
    );

    Ok(BatchModel {
        jobs: batch.jobs.clone(),
        vars,
        printer_ids,
        printer_racks,
        rack_count: rack_names.len(),
        shift_start,
        horizon,
        weights: ObjectiveWeights::from_config(config),
        proximity_threshold: config.proximity_threshold_min,
        proximity_pairs,
    })
}

/// Sliding-window proximity candidates over duration-sorted jobs.
///
/// Each job is compared against at most `lookahead` successors in
/// duration order, and the window is cut short once durations drift more
/// than `duration_gap` apart. Only same-technology pairs are kept.
fn proximity_pairs(jobs: &[Job], lookahead: usize, duration_gap: i64) -> Vec<(usize, usize)> {
    let mut order: Vec<usize> = (0..jobs.len()).collect();
    order.sort_by_key(|&i| (jobs[i].duration_min, i));

    let mut pairs = Vec::new();
    for (pos, &i) in order.iter().enumerate() {
        for &j in order.iter().skip(pos + 1).take(lookahead) {
            if jobs[j].duration_min - jobs[i].duration_min > duration_gap {
                break;
            }
            if capability_key(&jobs[i].technology) != capability_key(&jobs[j].technology) {
                continue;
            }
            pairs.push((i, j));
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Printer;

    fn printer(id: u32, material: &str, technology: &str, model: &str, rack: &str) -> Printer {
        Printer::new(id, format!("P{id}"))
            .with_material(material)
            .with_technology(technology)
            .with_model(model)
            .with_rack(rack)
    }

    fn job(id: u32, technology: &str, duration: i64) -> Job {
        Job::new(id, format!("J{id}"))
            .with_material("PETG")
            .with_technology(technology)
            .with_machine_model("Core One")
            .with_duration(duration)
    }

    fn roster() -> Roster {
        Roster::new(vec![
            printer(1, "PETG", "FDM", "Core One", "2"),
            printer(2, "PETG", "FDM", "Core One", "3"),
            printer(3, "PETG", "LFAM", "Caracol HF", "1"),
        ])
    }

    #[test]
    fn test_printer_domain_restricted_to_compatible() {
        let batch = Batch {
            jobs: vec![job(0, "FDM", 30)],
        };
        let m = build(&batch, &roster(), 5000, &SchedulerConfig::default()).unwrap();

        assert_eq!(m.vars[0].printers, vec![0, 1]);
    }

    #[test]
    fn test_unroutable_job_rejected() {
        let batch = Batch {
            jobs: vec![Job::new(9, "J9")
                .with_material("ABS")
                .with_technology("FDM")
                .with_machine_model("Core One")
                .with_duration(30)],
        };
        let err = build(&batch, &roster(), 5000, &SchedulerConfig::default()).unwrap_err();
        assert!(matches!(err, ScheduleError::Unroutable { job_id: 9 }));
    }

    #[test]
    fn test_start_domain_bounds() {
        let config = SchedulerConfig {
            job_buffer_min: 10,
            ..Default::default()
        };
        let batch = Batch {
            jobs: vec![job(0, "FDM", 30)],
        };
        let m = build(&batch, &roster(), 5000, &config).unwrap();

        let var = &m.vars[0];
        assert_eq!(var.earliest, 480);
        assert_eq!(var.effective_min, 40);
        assert_eq!(var.latest, 5000 - 40);
    }

    #[test]
    fn test_rack_ids_dense_and_consistent() {
        let batch = Batch {
            jobs: vec![job(0, "FDM", 30)],
        };
        let m = build(&batch, &roster(), 5000, &SchedulerConfig::default()).unwrap();

        assert_eq!(m.rack_count, 3);
        assert_eq!(m.printer_racks.len(), 3);
        // All rack IDs in range and distinct for distinct rack names.
        assert_eq!(m.printer_racks, vec![0, 1, 2]);
    }

    #[test]
    fn test_proximity_pairs_same_technology_only() {
        let jobs = vec![job(0, "FDM", 30), job(1, "LFAM", 30), job(2, "FDM", 35)];
        let pairs = proximity_pairs(&jobs, 20, 60);
        assert_eq!(pairs, vec![(0, 2)]);
    }

    #[test]
    fn test_proximity_pairs_duration_gap_cutoff() {
        let jobs = vec![job(0, "FDM", 30), job(1, "FDM", 200)];
        let pairs = proximity_pairs(&jobs, 20, 60);
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_proximity_pairs_lookahead_bound() {
        // Six equal-duration jobs, lookahead 2: each job pairs with at
        // most 2 successors instead of all 5.
        let jobs: Vec<Job> = (0..6).map(|i| job(i, "FDM", 30)).collect();
        let pairs = proximity_pairs(&jobs, 2, 60);
        assert_eq!(pairs.len(), 4 * 2 + 1); // positions 0..=3 get 2, position 4 gets 1
    }

    #[test]
    fn test_empty_batch_builds_empty_model() {
        let m = build(&Batch::default(), &roster(), 5000, &SchedulerConfig::default()).unwrap();
        assert_eq!(m.job_count(), 0);
        assert!(m.proximity_pairs.is_empty());
    }
}
