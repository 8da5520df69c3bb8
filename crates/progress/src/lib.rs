//! Progress Tracking
//!
//! Subject status derivation, period finalization, aggregate progress,
//! graduation estimates, recommendations and blocker analysis.

#![warn(missing_docs)]

pub mod engine;
pub mod estimator;
pub mod recommend;
pub mod blocker;
pub mod tracker;

pub use engine::{
    derive_status, ProgressEngine, EngineConfig, InvalidCommand, Transition, Finalized,
    Aggregate, PeriodView, SubjectView,
};
pub use estimator::{GraduationEstimator, GraduationEstimate, SUBJECTS_PER_SEMESTER};
pub use recommend::{RecommendationSelector, Recommendations};
pub use blocker::{
    BlockerDetector, BlockerAnalysis, BlockerStats, LockedSubject, CurriculumIssue, validate,
};
pub use tracker::{ProgressTracker, LoadSource, TrackerError};
