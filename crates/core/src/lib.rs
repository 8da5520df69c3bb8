//! GradPlan core data models.
//!
//! This crate defines the curriculum graph and the student's progress
//! snapshot that the rest of the workspace derives everything from.

#![warn(missing_docs)]

// Curriculum graph
mod subject;
mod curriculum;
pub mod catalog;

// Student state
mod snapshot;
mod status;
mod semester;

// Re-exports
pub use subject::{Subject, Prerequisite};
pub use curriculum::{
    Curriculum, CurriculumError, CourseInfo, Period, SubjectPosition,
    CurriculumDocument, PeriodDocument, SubjectDocument,
};
pub use snapshot::{Snapshot, SnapshotRecord, Correction};
pub use status::SubjectStatus;
pub use semester::{Semester, Half, ParseSemesterError};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
