//! Print job model.
//!
//! A job is one plate of print work with fixed capability requirements
//! (material, technology, machine model) and a nominal duration. Jobs are
//! created by the ingestion layer and consumed read-only by the engine.

use serde::{Deserialize, Serialize};

/// A unit of print work to be scheduled.
///
/// # Time Representation
/// All durations and times are in integer minutes relative to the run
/// epoch (t=0). The consumer defines what t=0 means (e.g., midnight of
/// the schedule start date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub id: u32,
    /// Human-readable title (also the partitioner's sort key).
    pub title: String,
    /// Required material (e.g., "PETG").
    pub material: String,
    /// Required printing technology (e.g., "FDM", "LFAM").
    pub technology: String,
    /// Required machine model (e.g., "Core One").
    pub machine_model: String,
    /// Nominal print duration in minutes. Must be strictly positive.
    pub duration_min: i64,
}

impl Job {
    /// Creates a new job with the given ID and title.
    pub fn new(id: u32, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            material: String::new(),
            technology: String::new(),
            machine_model: String::new(),
            duration_min: 0,
        }
    }

    /// Sets the required material.
    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = material.into();
        self
    }

    /// Sets the required technology.
    pub fn with_technology(mut self, technology: impl Into<String>) -> Self {
        self.technology = technology.into();
        self
    }

    /// Sets the required machine model.
    pub fn with_machine_model(mut self, machine_model: impl Into<String>) -> Self {
        self.machine_model = machine_model.into();
        self
    }

    /// Sets the nominal duration in minutes.
    pub fn with_duration(mut self, duration_min: i64) -> Self {
        self.duration_min = duration_min;
        self
    }

    /// Duration as scheduled: nominal duration plus the global inter-job
    /// buffer. Always ≥ the nominal duration for non-negative buffers.
    #[inline]
    pub fn effective_duration(&self, buffer_min: i64) -> i64 {
        self.duration_min + buffer_min
    }
}
