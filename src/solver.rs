//! Search/solve driver.
//!
//! [`ConstraintSolver`] is the pluggable seam: any engine that honors the
//! model's hard constraints (compatibility domains, no-overlap, horizon
//! containment) and minimizes its linear objective within a wall-clock
//! budget is substitutable. The provided [`BranchBoundSolver`] is a
//! depth-first branch-and-bound over duration-sorted jobs.
//!
//! A batch is wholly accepted or wholly rejected — no partial assignment
//! is ever returned.

use std::time::{Duration, Instant};

use log::debug;
use thiserror::Error;

use crate::config::SchedulerConfig;
use crate::model::BatchModel;
use crate::objective::{self, ObjectiveValue};

/// A concrete, conflict-free assignment for every job in a batch.
///
/// Index-aligned with the model: `starts[j]` and `printers[j]` belong to
/// model job `j`.
#[derive(Debug, Clone)]
pub struct BatchSolution {
    /// Chosen start minute per job.
    pub starts: Vec<i64>,
    /// Chosen printer (roster index) per job.
    pub printers: Vec<usize>,
    /// The evaluated objective, including the realized proximity-penalty
    /// term for diagnostics.
    pub objective: ObjectiveValue,
    /// Whether the search space was exhausted within the budget.
    pub proved_optimal: bool,
    /// Number of search nodes expanded.
    pub nodes_expanded: u64,
}

/// Why a batch produced no solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The search space was exhausted without a feasible assignment
    /// (typically the horizon is too small).
    #[error("no feasible assignment exists within the horizon")]
    Infeasible,
    /// The time budget ran out before any feasible assignment was found.
    #[error("time budget exhausted before a feasible assignment was found")]
    BudgetExhausted,
}

/// A bounded-time solver for batch constraint models.
pub trait ConstraintSolver {
    /// Solves the model, returning a complete assignment or a definitive
    /// failure. Implementations must respect their wall-clock budget.
    fn solve(&self, model: &BatchModel) -> Result<BatchSolution, SolveError>;
}

/// Depth-first branch-and-bound over (job, printer) placements.
///
/// Jobs are branched in non-increasing effective-duration order; each
/// candidate placement packs the job at its printer's current frontier,
/// so per-printer intervals are disjoint by construction. Left-packing
/// is feasibility-complete here — any feasible schedule can be
/// left-shifted without violating the horizon — so infeasibility
/// reported by an exhausted search is definitive.
///
/// Pruning uses an admissible lower bound (partial makespan plus the
/// monotone tie-break and load terms) against the incumbent, plus
/// skipping of symmetric same-frontier placements. The first descent is
/// greedy earliest-available, so an incumbent exists almost immediately
/// and budget exhaustion usually still yields a feasible solution.
#[derive(Debug, Clone)]
pub struct BranchBoundSolver {
    budget: Duration,
}

impl BranchBoundSolver {
    /// Creates a solver with the given wall-clock budget per solve.
    pub fn new(budget: Duration) -> Self {
        Self { budget }
    }

    /// Creates a solver with the budget from a scheduler configuration.
    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self::new(Duration::from_secs(config.solve_budget_secs))
    }
}

impl ConstraintSolver for BranchBoundSolver {
    fn solve(&self, model: &BatchModel) -> Result<BatchSolution, SolveError> {
        let n = model.job_count();
        if n == 0 {
            return Ok(BatchSolution {
                starts: Vec::new(),
                printers: Vec::new(),
                objective: ObjectiveValue::default(),
                proved_optimal: true,
                nodes_expanded: 0,
            });
        }

        // Branch on longer jobs first: they restrict the space the most.
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by_key(|&j| (std::cmp::Reverse(model.vars[j].effective_min), j));

        let mut search = Search {
            model,
            order,
            deadline: Instant::now() + self.budget,
            timed_out: false,
            expanded: 0,
            best: None,
            frontier: vec![model.shift_start; model.printer_count()],
            loads: vec![0; model.printer_count()],
            starts: vec![0; n],
            printers: vec![0; n],
            makespan: 0,
            start_sum: 0,
        };
        search.dfs(0);

        let Search {
            timed_out,
            expanded,
            best,
            ..
        } = search;

        match best {
            Some(incumbent) => {
                debug!(
                    "solved batch of {n} jobs: objective {}, proximity penalty {}, \
                     {expanded} nodes, optimal: {}",
                    incumbent.objective.total,
                    incumbent.objective.proximity_penalty,
                    !timed_out
                );
                Ok(BatchSolution {
                    starts: incumbent.starts,
                    printers: incumbent.printers,
                    objective: incumbent.objective,
                    proved_optimal: !timed_out,
                    nodes_expanded: expanded,
                })
            }
            None if timed_out => Err(SolveError::BudgetExhausted),
            None => Err(SolveError::Infeasible),
        }
    }
}

struct Incumbent {
    starts: Vec<i64>,
    printers: Vec<usize>,
    objective: ObjectiveValue,
}

struct Search<'a> {
    model: &'a BatchModel,
    order: Vec<usize>,
    deadline: Instant,
    timed_out: bool,
    expanded: u64,
    best: Option<Incumbent>,
    /// Next free minute per printer (packed schedules only).
    frontier: Vec<i64>,
    loads: Vec<i64>,
    starts: Vec<i64>,
    printers: Vec<usize>,
    makespan: i64,
    start_sum: i64,
}

impl Search<'_> {
    fn dfs(&mut self, depth: usize) {
        if self.timed_out {
            return;
        }
        if Instant::now() >= self.deadline {
            self.timed_out = true;
            return;
        }
        self.expanded += 1;

        if depth == self.order.len() {
            let value = objective::evaluate(self.model, &self.starts, &self.printers);
            let improved = self
                .best
                .as_ref()
                .is_none_or(|b| value.total < b.objective.total);
            if improved {
                self.best = Some(Incumbent {
                    starts: self.starts.clone(),
                    printers: self.printers.clone(),
                    objective: value,
                });
            }
            return;
        }

        let job = self.order[depth];
        let var = &self.model.vars[job];

        // Earliest-available placement per compatible printer; horizon
        // containment is the `latest` bound.
        let mut candidates: Vec<(i64, usize)> = var
            .printers
            .iter()
            .filter_map(|&p| {
                let start = self.frontier[p];
                (start <= var.latest).then_some((start, p))
            })
            .collect();
        candidates.sort_unstable();

        let weights = self.model.weights;
        let mut tried: Vec<(i64, usize, i64)> = Vec::new();

        for (start, p) in candidates {
            // Printers sharing frontier, rack, and load are symmetric;
            // branching into more than one of them explores identical
            // subtrees.
            let key = (start, self.model.printer_racks[p], self.loads[p]);
            if tried.contains(&key) {
                continue;
            }
            tried.push(key);

            let new_makespan = self.makespan.max(start + var.duration_min);
            let new_start_sum = self.start_sum + start;
            let load_after = (self.loads[p] + 1).max(self.loads.iter().copied().max().unwrap_or(0));

            // Admissible bound: every term below only grows along this
            // path, and the proximity term is non-negative.
            let bound = new_makespan
                + weights.tie_break * new_start_sum
                + weights.load_balance * load_after;
            if let Some(best) = &self.best {
                if bound >= best.objective.total {
                    continue;
                }
            }

            self.starts[job] = start;
            self.printers[job] = p;
            let prev_frontier = self.frontier[p];
            let prev_makespan = self.makespan;
            let prev_start_sum = self.start_sum;
            self.frontier[p] = start + var.effective_min;
            self.loads[p] += 1;
            self.makespan = new_makespan;
            self.start_sum = new_start_sum;

            self.dfs(depth + 1);

            self.frontier[p] = prev_frontier;
            self.loads[p] -= 1;
            self.makespan = prev_makespan;
            self.start_sum = prev_start_sum;

            if self.timed_out {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model;
    use crate::models::{Job, Printer, Roster};
    use crate::partition::Batch;

    fn printer(id: u32, rack: &str) -> Printer {
        Printer::new(id, format!("P{id}"))
            .with_material("PETG")
            .with_technology("FDM")
            .with_model("Core One")
            .with_rack(rack)
    }

    fn job(id: u32, duration: i64) -> Job {
        Job::new(id, format!("J{id}"))
            .with_material("PETG")
            .with_technology("FDM")
            .with_machine_model("Core One")
            .with_duration(duration)
    }

    fn solve_batch(
        jobs: Vec<Job>,
        printers: Vec<Printer>,
        horizon: i64,
        config: &SchedulerConfig,
    ) -> Result<(BatchModel, BatchSolution), SolveError> {
        let roster = Roster::new(printers);
        let batch = Batch { jobs };
        let m = model::build(&batch, &roster, horizon, config).unwrap();
        let solution = BranchBoundSolver::from_config(config).solve(&m)?;
        Ok((m, solution))
    }

    fn assert_no_overlap(m: &BatchModel, s: &BatchSolution) {
        for p in 0..m.printer_count() {
            let mut intervals: Vec<(i64, i64)> = (0..m.job_count())
                .filter(|&j| s.printers[j] == p)
                .map(|j| (s.starts[j], s.starts[j] + m.vars[j].effective_min))
                .collect();
            intervals.sort_unstable();
            for w in intervals.windows(2) {
                assert!(w[0].1 <= w[1].0, "overlap on printer {p}: {w:?}");
            }
        }
    }

    #[test]
    fn test_single_printer_serializes_jobs() {
        let config = SchedulerConfig::default();
        let (m, s) = solve_batch(
            vec![job(0, 30), job(1, 30), job(2, 30)],
            vec![printer(1, "1")],
            5000,
            &config,
        )
        .unwrap();

        assert_no_overlap(&m, &s);
        let mut starts = s.starts.clone();
        starts.sort_unstable();
        assert_eq!(starts, vec![480, 510, 540]);
        assert!(s.proved_optimal);
    }

    #[test]
    fn test_parallel_printers_split_load() {
        let config = SchedulerConfig::default();
        let (m, s) = solve_batch(
            vec![job(0, 60), job(1, 60)],
            vec![printer(1, "1"), printer(2, "1")],
            5000,
            &config,
        )
        .unwrap();

        assert_no_overlap(&m, &s);
        // Makespan-optimal: both start at shift start on distinct printers.
        assert_eq!(s.objective.makespan, 540);
        assert_ne!(s.printers[0], s.printers[1]);
    }

    #[test]
    fn test_infeasible_when_horizon_too_small() {
        let config = SchedulerConfig::default();
        // Three 30-min jobs on one printer need 90 min from shift start
        // at 480, but the horizon only allows one.
        let err = solve_batch(
            vec![job(0, 30), job(1, 30), job(2, 30)],
            vec![printer(1, "1")],
            520,
            &config,
        )
        .unwrap_err();
        assert_eq!(err, SolveError::Infeasible);
    }

    #[test]
    fn test_horizon_containment() {
        let config = SchedulerConfig {
            job_buffer_min: 10,
            ..Default::default()
        };
        let (m, s) = solve_batch(
            vec![job(0, 100), job(1, 100)],
            vec![printer(1, "1")],
            5000,
            &config,
        )
        .unwrap();

        for j in 0..m.job_count() {
            assert!(s.starts[j] >= m.shift_start);
            assert!(s.starts[j] + m.vars[j].effective_min <= m.horizon);
        }
    }

    #[test]
    fn test_buffer_occupies_machine_but_not_makespan() {
        let config = SchedulerConfig {
            job_buffer_min: 15,
            ..Default::default()
        };
        let (m, s) = solve_batch(
            vec![job(0, 30), job(1, 30)],
            vec![printer(1, "1")],
            5000,
            &config,
        )
        .unwrap();

        assert_no_overlap(&m, &s);
        // Second job starts 45 min after the first (30 + 15 buffer), but
        // makespan counts only nominal durations.
        let mut starts = s.starts.clone();
        starts.sort_unstable();
        assert_eq!(starts, vec![480, 525]);
        assert_eq!(s.objective.makespan, 555);
    }

    #[test]
    fn test_empty_model_solves_trivially() {
        let config = SchedulerConfig::default();
        let roster = Roster::new(vec![printer(1, "1")]);
        let m = model::build(&Batch::default(), &roster, 1000, &config).unwrap();
        let s = BranchBoundSolver::from_config(&config).solve(&m).unwrap();
        assert!(s.starts.is_empty());
        assert!(s.proved_optimal);
    }

    #[test]
    fn test_proximity_penalty_reported() {
        // Two equal jobs, two printers on different racks, high tie-break
        // pressure to start both at 480 → ends coincide, penalty visible
        // unless the solver pays to avoid it. With proximity_weight 0 the
        // cheapest schedule is both-parallel and the realized term is
        // reported untouched.
        let config = SchedulerConfig {
            proximity_weight: 0,
            proximity_threshold_min: 15,
            ..Default::default()
        };
        let (_, s) = solve_batch(
            vec![job(0, 30), job(1, 30)],
            vec![printer(1, "1"), printer(2, "2")],
            5000,
            &config,
        )
        .unwrap();

        assert_eq!(s.objective.proximity_penalty, 1);
    }

    #[test]
    fn test_solution_is_all_or_nothing() {
        let config = SchedulerConfig::default();
        // One job fits, one cannot (oversized for the horizon): the whole
        // batch must be rejected, not partially scheduled.
        let err = solve_batch(
            vec![job(0, 30), job(1, 10_000)],
            vec![printer(1, "1")],
            2000,
            &config,
        )
        .unwrap_err();
        assert_eq!(err, SolveError::Infeasible);
    }
}
