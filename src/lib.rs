//! Constraint-based batch scheduler for 3D print farms.
//!
//! Schedules print jobs onto a heterogeneous printer fleet under exact
//! compatibility (material, technology, machine model), no-overlap per
//! printer, and shift-anchored start times. Large job sets are split
//! into capacity-bounded batches, each solved as an independent
//! constraint model under a wall-clock budget, then merged onto one
//! timeline with fixed inter-batch offsets.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Job`, `Printer`, `Roster`,
//!   `ScheduleResult`
//! - **`engine`**: The multi-batch orchestrator, [`ScheduleEngine`]
//! - **`partition`**: Greedy capacity-bounded batch partitioning
//! - **`horizon`**: Per-batch planning-horizon estimation
//! - **`model`**: Batch constraint model construction
//! - **`objective`**: Weighted objective evaluation
//! - **`solver`**: The [`ConstraintSolver`] seam and the bundled
//!   branch-and-bound implementation
//! - **`validation`**: Input integrity checks (duplicate IDs,
//!   non-positive durations)
//! - **`kpi`**: Schedule quality metrics
//!
//! # Example
//!
//! ```
//! use print_schedule::config::SchedulerConfig;
//! use print_schedule::engine::ScheduleEngine;
//! use print_schedule::models::{Job, Printer, Roster};
//!
//! let roster = Roster::new(vec![Printer::new(1, "Core 001")
//!     .with_material("PETG")
//!     .with_technology("FDM")
//!     .with_model("Core One")
//!     .with_rack("1")]);
//! let engine = ScheduleEngine::new(SchedulerConfig::default(), roster)?;
//!
//! let jobs = vec![Job::new(1, "Bracket")
//!     .with_material("PETG")
//!     .with_technology("FDM")
//!     .with_machine_model("Core One")
//!     .with_duration(90)];
//! let result = engine.run(jobs)?;
//! assert!(result.is_complete());
//! # Ok::<(), print_schedule::error::ScheduleError>(())
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Brucker (2007), "Scheduling Algorithms"

pub mod config;
pub mod engine;
pub mod error;
pub mod horizon;
pub mod kpi;
pub mod model;
pub mod models;
pub mod objective;
pub mod partition;
pub mod solver;
pub mod validation;

pub use config::SchedulerConfig;
pub use engine::ScheduleEngine;
pub use error::ScheduleError;
pub use models::{Job, Printer, Roster, ScheduleResult};
pub use solver::ConstraintSolver;
