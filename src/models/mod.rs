//! Scheduling domain models.
//!
//! Core value types for the batched print scheduler: the job records the
//! engine consumes, the static printer roster, and the merged schedule
//! output with its unscheduled remainder.
//!
//! All types are plain data with serde support; nothing here mutates
//! after construction. Times are integer minutes from the run epoch.

mod job;
mod printer;
mod schedule;

pub use job::Job;
pub use printer::{Printer, Roster};
pub use schedule::{ScheduleResult, ScheduledJob, UnscheduledJob, UnscheduledReason};

pub(crate) use printer::capability_key;
