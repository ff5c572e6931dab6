//! Schedule quality metrics (KPIs).
//!
//! Computes performance indicators from a completed run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan (C_max) | Latest buffer-free completion time |
//! | Placement Rate | Fraction of input jobs scheduled |
//! | Max Load | Largest job count on any printer |
//! | Avg Utilization | Mean printer busy fraction of the makespan |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use std::collections::HashMap;

use itertools::Itertools;

use crate::models::ScheduleResult;

/// Performance indicators for a scheduling run.
///
/// All time values are in minutes. Utilization counts buffer minutes as
/// busy time, since the printer is occupied either way.
#[derive(Debug, Clone)]
pub struct ScheduleKpi {
    /// Makespan: latest buffer-free completion time (min).
    pub makespan_min: i64,
    /// Fraction of input jobs placed (0.0..1.0).
    pub placement_rate: f64,
    /// Job count per printer, keyed by printer ID.
    pub jobs_by_printer: HashMap<u32, usize>,
    /// Largest job count on any single printer.
    pub max_load: usize,
    /// Average printer utilization over the makespan (0.0..1.0),
    /// across printers that received at least one job.
    pub avg_utilization: f64,
    /// Number of batches produced.
    pub batch_count: usize,
}

impl ScheduleKpi {
    /// Computes KPIs from a run result.
    pub fn calculate(result: &ScheduleResult) -> Self {
        let makespan = result.makespan_min();

        let jobs_by_printer: HashMap<u32, usize> =
            result.scheduled.iter().map(|s| s.printer_id).counts();
        let max_load = jobs_by_printer.values().copied().max().unwrap_or(0);

        let total = result.scheduled.len() + result.unscheduled.len();
        let placement_rate = if total == 0 {
            1.0
        } else {
            result.scheduled.len() as f64 / total as f64
        };

        let mut busy_by_printer: HashMap<u32, i64> = HashMap::new();
        for s in &result.scheduled {
            *busy_by_printer.entry(s.printer_id).or_insert(0) += s.end_min - s.start_min;
        }
        let avg_utilization = if busy_by_printer.is_empty() || makespan == 0 {
            0.0
        } else {
            let sum: f64 = busy_by_printer
                .values()
                .map(|&busy| busy as f64 / makespan as f64)
                .sum();
            sum / busy_by_printer.len() as f64
        };

        Self {
            makespan_min: makespan,
            placement_rate,
            jobs_by_printer,
            max_load,
            avg_utilization,
            batch_count: result.batch_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Job, ScheduledJob, UnscheduledJob, UnscheduledReason};

    fn assignment(job_id: u32, printer_id: u32, start: i64, duration: i64) -> ScheduledJob {
        ScheduledJob {
            job_id,
            title: format!("J{job_id}"),
            printer_id,
            rack: "1".into(),
            start_min: start,
            end_min: start + duration,
            duration_min: duration,
            batch: 1,
            material: "PETG".into(),
            technology: "FDM".into(),
            machine_model: "Core One".into(),
        }
    }

    #[test]
    fn test_kpi_basic() {
        let result = ScheduleResult {
            scheduled: vec![
                assignment(1, 1, 0, 1000),
                assignment(2, 1, 1000, 1000),
                assignment(3, 2, 0, 1000),
            ],
            unscheduled: Vec::new(),
            batch_count: 1,
        };

        let kpi = ScheduleKpi::calculate(&result);
        assert_eq!(kpi.makespan_min, 2000);
        assert_eq!(kpi.jobs_by_printer[&1], 2);
        assert_eq!(kpi.jobs_by_printer[&2], 1);
        assert_eq!(kpi.max_load, 2);
        assert!((kpi.placement_rate - 1.0).abs() < 1e-10);
        // Printer 1: 2000/2000 = 1.0, printer 2: 1000/2000 = 0.5
        assert!((kpi.avg_utilization - 0.75).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_placement_rate() {
        let job = Job::new(9, "Orphan")
            .with_material("ABS")
            .with_technology("FDM")
            .with_machine_model("Core One")
            .with_duration(45);
        let result = ScheduleResult {
            scheduled: vec![assignment(1, 1, 0, 1000)],
            unscheduled: vec![UnscheduledJob {
                job,
                reason: UnscheduledReason::Unroutable,
            }],
            batch_count: 1,
        };

        let kpi = ScheduleKpi::calculate(&result);
        assert!((kpi.placement_rate - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = ScheduleKpi::calculate(&ScheduleResult::default());
        assert_eq!(kpi.makespan_min, 0);
        assert_eq!(kpi.max_load, 0);
        assert!((kpi.placement_rate - 1.0).abs() < 1e-10);
        assert!((kpi.avg_utilization - 0.0).abs() < 1e-10);
    }
}
