//! Printer (resource) model and roster.
//!
//! A printer is a physical machine with fixed capabilities and a rack
//! location. The roster is the static set of printers for a planning
//! session; it is loaded once per run and read-only thereafter.

use serde::{Deserialize, Serialize};

use super::Job;

/// A physical printer with fixed capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Printer {
    /// Unique printer identifier.
    pub id: u32,
    /// Human-readable name (e.g., "Core 004").
    pub name: String,
    /// Material this printer is loaded with.
    pub material: String,
    /// Printing technology (e.g., "FDM", "LFAM").
    pub technology: String,
    /// Machine model (e.g., "Core One", "XL").
    pub model: String,
    /// Rack/location identifier, the grouping key for proximity penalties.
    pub rack: String,
}

impl Printer {
    /// Creates a new printer with the given ID and name.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            material: String::new(),
            technology: String::new(),
            model: String::new(),
            rack: String::new(),
        }
    }

    /// Sets the loaded material.
    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = material.into();
        self
    }

    /// Sets the printing technology.
    pub fn with_technology(mut self, technology: impl Into<String>) -> Self {
        self.technology = technology.into();
        self
    }

    /// Sets the machine model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the rack identifier.
    pub fn with_rack(mut self, rack: impl Into<String>) -> Self {
        self.rack = rack.into();
        self
    }

    /// Whether this printer can run the given job.
    ///
    /// A job is compatible iff material, technology, and machine model all
    /// match exactly after trim and case normalization.
    pub fn accepts(&self, job: &Job) -> bool {
        capability_eq(&self.material, &job.material)
            && capability_eq(&self.technology, &job.technology)
            && capability_eq(&self.model, &job.machine_model)
    }
}

/// Normalized capability comparison: trimmed, ASCII case-insensitive.
#[inline]
pub(crate) fn capability_eq(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Normalized capability key for grouping (trimmed, lowercased).
#[inline]
pub(crate) fn capability_key(s: &str) -> String {
    s.trim().to_ascii_lowercase()
}

/// The static printer roster for a planning session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    printers: Vec<Printer>,
}

impl Roster {
    /// Creates a roster from a printer list.
    pub fn new(printers: Vec<Printer>) -> Self {
        Self { printers }
    }

    /// Number of printers.
    pub fn len(&self) -> usize {
        self.printers.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.printers.is_empty()
    }

    /// Iterates over printers in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &Printer> {
        self.printers.iter()
    }

    /// Printer at the given roster index.
    pub fn get(&self, index: usize) -> Option<&Printer> {
        self.printers.get(index)
    }

    /// Roster indices of all printers compatible with the job,
    /// in roster order.
    pub fn compatible_indices(&self, job: &Job) -> Vec<usize> {
        self.printers
            .iter()
            .enumerate()
            .filter(|(_, p)| p.accepts(job))
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of printers whose (material, technology) pairing matches
    /// the given normalized keys.
    pub fn pairing_count(&self, material_key: &str, technology_key: &str) -> usize {
        self.printers
            .iter()
            .filter(|p| {
                capability_key(&p.material) == material_key
                    && capability_key(&p.technology) == technology_key
            })
            .count()
    }
}
