//! Horizon estimation.
//!
//! Computes an upper bound on schedulable time for one batch from the
//! workload of its busiest (material, technology) pairing versus the
//! roster capacity for that pairing. The bound is deliberately generous
//! (safety factor plus a constant pad) — a tight horizon saves nothing
//! and risks spurious infeasibility.

use std::collections::HashMap;

use log::{debug, warn};

use crate::config::SchedulerConfig;
use crate::models::{capability_key, Roster};
use crate::partition::Batch;

/// Minimum days assumed for a non-empty batch whose estimated work is
/// zero, so the horizon is never degenerate.
const MIN_DAYS_NONEMPTY: f64 = 0.1;

/// Constant pad (in days) added on top of the safety-scaled estimate.
const HORIZON_PAD_DAYS: i64 = 2;

/// Estimates the scheduling horizon for one batch, in minutes.
///
/// For every (material, technology) pairing present in the batch, the
/// total work is divided by the daily capacity of the printers that
/// support it; the busiest pairing's days-needed figure, scaled by the
/// safety factor and padded, sizes the horizon. A pairing with no
/// supporting printers is logged and skipped — those jobs surface as
/// infeasible at solve time, not here.
pub fn estimate(batch: &Batch, roster: &Roster, config: &SchedulerConfig) -> i64 {
    let minutes_per_day = config.minutes_per_day();

    let mut work_per_pairing: HashMap<(String, String), i64> = HashMap::new();
    for job in &batch.jobs {
        let key = (
            capability_key(&job.material),
            capability_key(&job.technology),
        );
        *work_per_pairing.entry(key).or_insert(0) += job.duration_min;
    }

    let mut max_days_needed = 0.0f64;
    for ((material, technology), work) in &work_per_pairing {
        let printer_count = roster.pairing_count(material, technology);
        if printer_count == 0 {
            warn!(
                "batch contains jobs with material='{material}' technology='{technology}' \
                 but no compatible printers; those jobs are likely infeasible"
            );
            continue;
        }
        let days = *work as f64 / (minutes_per_day as f64 * printer_count as f64);
        max_days_needed = max_days_needed.max(days);
    }

    if max_days_needed == 0.0 && !batch.is_empty() {
        max_days_needed = MIN_DAYS_NONEMPTY;
    }

    let padded_days = (max_days_needed * config.horizon_safety_factor) as i64 + HORIZON_PAD_DAYS;
    let horizon = minutes_per_day * padded_days;

    debug!(
        "horizon estimate: {} jobs, busiest pairing needs {max_days_needed:.2} days, \
         horizon {horizon} min",
        batch.len()
    );

    horizon
}
