//! Batch partitioning.
//!
//! Splits an unbounded job list into solver-sized batches so each batch
//! fits one constraint model. The provided strategy is a simple greedy
//! bin fill — determinism and reproducibility over pack efficiency — and
//! lives behind a trait so an optimizing packer can be substituted
//! without touching the rest of the pipeline.

use serde::{Deserialize, Serialize};

use crate::models::Job;

/// A capacity-bounded subset of jobs solved together as one model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Batch {
    /// Jobs in this batch, in partition order.
    pub jobs: Vec<Job>,
}

impl Batch {
    /// Sum of nominal durations in this batch.
    pub fn total_duration_min(&self) -> i64 {
        self.jobs.iter().map(|j| j.duration_min).sum()
    }

    /// Number of jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the batch has no jobs.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// A strategy for partitioning jobs into batches.
pub trait PartitionStrategy {
    /// Splits `jobs` into an ordered sequence of batches whose total
    /// durations stay within `capacity_min`, except that a single job
    /// larger than the capacity forms a batch of its own. No job is
    /// dropped or duplicated.
    fn partition(&self, jobs: &[Job], capacity_min: i64) -> Vec<Batch>;
}

/// Greedy first-fit partitioner over title-sorted jobs.
///
/// Jobs are stable-sorted by title, then accumulated into the current
/// batch while the running total stays within capacity; an overflowing
/// job closes the batch and starts the next one. Re-running on the same
/// input always yields the same boundaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyFillPartitioner;

impl PartitionStrategy for GreedyFillPartitioner {
    fn partition(&self, jobs: &[Job], capacity_min: i64) -> Vec<Batch> {
        let mut ordered: Vec<Job> = jobs.to_vec();
        ordered.sort_by(|a, b| a.title.cmp(&b.title));

        let mut batches = Vec::new();
        let mut current: Vec<Job> = Vec::new();
        let mut total = 0i64;

        for job in ordered {
            if !current.is_empty() && total + job.duration_min > capacity_min {
                batches.push(Batch {
                    jobs: std::mem::take(&mut current),
                });
                total = 0;
            }
            total += job.duration_min;
            current.push(job);
        }
        if !current.is_empty() {
            batches.push(Batch { jobs: current });
        }

        batches
    }
}
