//! Objective composition and evaluation.
//!
//! Four weighted terms, summed and minimized:
//!
//! | Term | Definition |
//! |------|-----------|
//! | True makespan | max over jobs of start + nominal duration (buffer excluded) |
//! | Proximity penalty | close finishes of same-technology jobs on different racks |
//! | Load balance | max number of jobs on any single printer |
//! | Tie-break | sum of all start times, lightly weighted |
//!
//! The weights come from caller configuration, never from constants
//! here, so planners can retune trade-offs without touching the model.

use serde::{Deserialize, Serialize};

use crate::config::SchedulerConfig;
use crate::model::BatchModel;

/// Weights of the composite objective terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveWeights {
    /// Weight of the proximity-penalty term.
    pub proximity: i64,
    /// Weight of the load-balance term.
    pub load_balance: i64,
    /// Weight of the start-sum tie-break term.
    pub tie_break: i64,
}

impl ObjectiveWeights {
    /// Extracts the weights from a scheduler configuration.
    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self {
            proximity: config.proximity_weight,
            load_balance: config.load_balance_weight,
            tie_break: config.tie_break_weight,
        }
    }
}

/// A fully evaluated objective, with each term broken out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveValue {
    /// The weighted sum the solver minimizes.
    pub total: i64,
    /// True makespan in minutes (buffer excluded).
    pub makespan: i64,
    /// Number of penalized close-finish pairs.
    pub proximity_penalty: i64,
    /// Max jobs assigned to any single printer.
    pub max_load: i64,
    /// Sum of all start times.
    pub start_sum: i64,
}

/// Evaluates the composite objective for a concrete assignment.
///
/// `starts[j]` and `printers[j]` give, for job index `j` of the model,
/// the chosen start minute and printer index. Both slices must cover
/// every job in the model.
pub fn evaluate(model: &BatchModel, starts: &[i64], printers: &[usize]) -> ObjectiveValue {
    debug_assert_eq!(starts.len(), model.vars.len());
    debug_assert_eq!(printers.len(), model.vars.len());

    let makespan = model
        .vars
        .iter()
        .enumerate()
        .map(|(j, var)| starts[j] + var.duration_min)
        .max()
        .unwrap_or(0);

    let mut proximity_penalty = 0i64;
    for &(i, j) in &model.proximity_pairs {
        let end_i = starts[i] + model.vars[i].duration_min;
        let end_j = starts[j] + model.vars[j].duration_min;
        let close = (end_i - end_j).abs() <= model.proximity_threshold;
        let racks_differ = model.printer_racks[printers[i]] != model.printer_racks[printers[j]];
        if close && racks_differ {
            proximity_penalty += 1;
        }
    }

    let mut loads = vec![0i64; model.printer_ids.len()];
    for &p in printers {
        loads[p] += 1;
    }
    let max_load = loads.into_iter().max().unwrap_or(0);

    let start_sum: i64 = starts.iter().sum();

    let w = model.weights;
    let total = makespan
        + w.proximity * proximity_penalty
        + w.load_balance * max_load
        + w.tie_break * start_sum;

    ObjectiveValue {
        total,
        makespan,
        proximity_penalty,
        max_load,
        start_sum,
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

    fn two_rack_model(durations: &[i64], threshold: i64) -> BatchModel {
        let roster = Roster::new(vec![printer(1, "1"), printer(2, "2")]);
        let config = SchedulerConfig {
            proximity_threshold_min: threshold,
            job_buffer_min: 0,
            ..Default::default()
        };
        let batch = Batch {
            jobs: durations
                .iter()
                .enumerate()
                .map(|(i, &d)| job(i as u32, d))
                .collect(),
        };
        model::build(&batch, &roster, 10_000, &config).unwrap()
    }

    #[test]
    fn test_makespan_uses_nominal_duration() {
        let roster = Roster::new(vec![printer(1, "1")]);
        let config = SchedulerConfig {
            job_buffer_min: 15,
            ..Default::default()
        };
        let batch = Batch {
            jobs: vec![job(0, 30)],
        };
        let m = model::build(&batch, &roster, 10_000, &config).unwrap();

        let value = evaluate(&m, &[480], &[0]);
        // 480 + 30, not 480 + 45.
        assert_eq!(value.makespan, 510);
    }

    #[test]
    fn test_proximity_pair_close_on_different_racks_penalized() {
        let m = two_rack_model(&[30, 30], 15);
        // Ends 10 min apart, different racks.
        let value = evaluate(&m, &[0, 10], &[0, 1]);
        assert_eq!(value.proximity_penalty, 1);
    }

    #[test]
    fn test_proximity_pair_far_apart_not_penalized() {
        let m = two_rack_model(&[30, 30], 15);
        // Ends 20 min apart: beyond threshold.
        let value = evaluate(&m, &[0, 20], &[0, 1]);
        assert_eq!(value.proximity_penalty, 0);
    }

    #[test]
    fn test_proximity_pair_same_rack_not_penalized() {
        let m = two_rack_model(&[30, 30], 15);
        // Close finishes but same printer → same rack.
        let value = evaluate(&m, &[0, 10], &[0, 0]);
        assert_eq!(value.proximity_penalty, 0);
    }

    #[test]
    fn test_load_balance_counts_max() {
        let m = two_rack_model(&[30, 30, 30], 0);
        let value = evaluate(&m, &[0, 100, 200], &[0, 0, 1]);
        assert_eq!(value.max_load, 2);
    }

    #[test]
    fn test_total_is_weighted_sum() {
        let m = two_rack_model(&[30, 30], 15);
        let value = evaluate(&m, &[0, 10], &[0, 1]);
        let w = m.weights;
        assert_eq!(
            value.total,
            value.makespan
                + w.proximity * value.proximity_penalty
                + w.load_balance * value.max_load
                + w.tie_break * value.start_sum
        );
    }
}
