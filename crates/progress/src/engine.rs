//! The progress engine - owns the snapshot and derives everything from it.

use gradplan_core::{Correction, Curriculum, Period, Semester, Snapshot, Subject, SubjectStatus};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::blocker::BlockerDetector;
use crate::estimator::{GraduationEstimate, GraduationEstimator, SUBJECTS_PER_SEMESTER};
use crate::recommend::{RecommendationSelector, Recommendations};

/// Configuration for the progress engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Pace assumed by the graduation estimate
    pub subjects_per_semester: u32,
    /// Max priority recommendations
    pub priority_limit: usize,
    /// Max other recommendations
    pub other_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            subjects_per_semester: SUBJECTS_PER_SEMESTER,
            priority_limit: 4,
            other_limit: 2,
        }
    }
}

/// A command the engine refused. The snapshot is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidCommand {
    /// No subject with that name
    #[error("unknown subject: {0}")]
    UnknownSubject(String),

    /// Subject has unmet prerequisites
    #[error("subject '{subject}' is locked, missing: {}", .missing.join(", "))]
    SubjectLocked {
        /// Subject name
        subject: String,
        /// Unmet prerequisites as written in the curriculum
        missing: Vec<String>,
    },

    /// No period at that index
    #[error("unknown period index {0}")]
    UnknownPeriod(usize),

    /// Period was finalized before
    #[error("period {0} is already finalized")]
    PeriodAlreadyFinalized(usize),

    /// Period contains locked subjects
    #[error("period {period} has locked subjects: {}", .locked.join(", "))]
    PeriodHasLockedSubjects {
        /// Period index
        period: usize,
        /// Locked subject names
        locked: Vec<String>,
    },
}

impl InvalidCommand {
    /// Stable reason code.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::UnknownSubject(_) => "unknown_subject",
            Self::SubjectLocked { .. } => "subject_locked",
            Self::UnknownPeriod(_) => "unknown_period",
            Self::PeriodAlreadyFinalized(_) => "period_already_finalized",
            Self::PeriodHasLockedSubjects { .. } => "period_has_locked_subjects",
        }
    }
}

/// Result of advancing a subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Subject name
    pub subject: String,
    /// Status before
    pub from: SubjectStatus,
    /// Status derived after
    pub to: SubjectStatus,
}

/// Result of finalizing a period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finalized {
    /// Period index
    pub period: usize,
    /// Period label
    pub label: String,
    /// Subjects that became completed, in period order
    pub transitioned: Vec<String>,
}

impl Finalized {
    /// Number of subjects that became completed.
    ///
    /// Subjects that were already completed before finalizing are not
    /// counted, so this can be lower than the period's non-locked subjects.
    pub fn count(&self) -> usize {
        self.transitioned.len()
    }
}

/// Aggregate progress over the whole curriculum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Aggregate {
    /// Subjects in the curriculum
    pub total: usize,
    /// Completed subjects
    pub completed: usize,
    /// In-progress subjects
    pub in_progress: usize,
    /// Planned subjects
    pub planned: usize,
    /// Completed share, rounded half up (0-100)
    pub percentage: u32,
}

impl Aggregate {
    /// Build from raw counts.
    pub fn from_counts(total: usize, completed: usize, in_progress: usize, planned: usize) -> Self {
        let percentage = if total == 0 {
            0
        } else {
            // round(completed / total * 100) without floating point
            ((200 * completed + total) / (2 * total)) as u32
        };

        Self {
            total,
            completed,
            in_progress,
            planned,
            percentage,
        }
    }
}

/// A subject with its derived status.
#[derive(Debug, Clone, Copy)]
pub struct SubjectView<'a> {
    /// The subject
    pub subject: &'a Subject,
    /// Derived status
    pub status: SubjectStatus,
}

/// A period with derived per-subject statuses.
#[derive(Debug, Clone)]
pub struct PeriodView<'a> {
    /// Period index
    pub index: usize,
    /// Period label
    pub label: &'a str,
    /// Subjects in period order
    pub subjects: Vec<SubjectView<'a>>,
    /// Completed subjects in the period
    pub completed: usize,
    /// Subjects in the period
    pub total: usize,
    /// Whether the period was finalized
    pub finalized: bool,
    /// Whether finalizing would be accepted now
    pub can_finalize: bool,
}

/// Derive a subject's status from the snapshot.
///
/// Explicit sets win in the order completed, in progress, planned; otherwise
/// the subject is locked unless every prerequisite is satisfied.
pub fn derive_status(subject: &Subject, snapshot: &Snapshot) -> SubjectStatus {
    let name = subject.name.as_str();
    if snapshot.completed.contains(name) {
        SubjectStatus::Completed
    } else if snapshot.in_progress.contains(name) {
        SubjectStatus::InProgress
    } else if snapshot.planned.contains(name) {
        SubjectStatus::Planned
    } else if subject.prerequisites_met(snapshot) {
        SubjectStatus::Available
    } else {
        SubjectStatus::Locked
    }
}

fn check_finalize<'c>(
    curriculum: &'c Curriculum,
    snapshot: &Snapshot,
    index: usize,
) -> Result<&'c Period, InvalidCommand> {
    let period = curriculum
        .period(index)
        .ok_or(InvalidCommand::UnknownPeriod(index))?;

    if snapshot.finalized_periods.contains(&index) {
        return Err(InvalidCommand::PeriodAlreadyFinalized(index));
    }

    let locked: Vec<String> = period
        .subjects
        .iter()
        .filter(|s| derive_status(s, snapshot) == SubjectStatus::Locked)
        .map(|s| s.name.clone())
        .collect();

    if !locked.is_empty() {
        return Err(InvalidCommand::PeriodHasLockedSubjects { period: index, locked });
    }

    Ok(period)
}

/// Owns one student's snapshot over a static curriculum.
///
/// Commands take `&mut self` and either apply fully or return
/// [`InvalidCommand`] without touching the snapshot.
#[derive(Debug, Clone)]
pub struct ProgressEngine {
    curriculum: Curriculum,
    snapshot: Snapshot,
    config: EngineConfig,
}

impl ProgressEngine {
    /// Create an engine with an empty snapshot.
    pub fn new(curriculum: Curriculum) -> Self {
        Self {
            curriculum,
            snapshot: Snapshot::new(),
            config: EngineConfig::default(),
        }
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// The curriculum.
    pub fn curriculum(&self) -> &Curriculum {
        &self.curriculum
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// The configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // === Queries ===

    /// Status of a subject by name.
    pub fn status(&self, name: &str) -> Option<SubjectStatus> {
        self.curriculum
            .subject(name)
            .map(|s| derive_status(s, &self.snapshot))
    }

    /// Aggregate progress.
    pub fn aggregate(&self) -> Aggregate {
        Aggregate::from_counts(
            self.curriculum.subject_count(),
            self.snapshot.completed.len(),
            self.snapshot.in_progress.len(),
            self.snapshot.planned.len(),
        )
    }

    /// Whether a period can be finalized now.
    pub fn can_finalize(&self, index: usize) -> Result<(), InvalidCommand> {
        check_finalize(&self.curriculum, &self.snapshot, index).map(|_| ())
    }

    /// One period with derived statuses.
    pub fn period_view(&self, index: usize) -> Option<PeriodView<'_>> {
        let period = self.curriculum.period(index)?;
        let subjects: Vec<_> = period
            .subjects
            .iter()
            .map(|subject| SubjectView {
                subject,
                status: derive_status(subject, &self.snapshot),
            })
            .collect();

        let completed = subjects
            .iter()
            .filter(|v| v.status == SubjectStatus::Completed)
            .count();

        Some(PeriodView {
            index,
            label: &period.label,
            completed,
            total: subjects.len(),
            subjects,
            finalized: self.snapshot.finalized_periods.contains(&index),
            can_finalize: self.can_finalize(index).is_ok(),
        })
    }

    /// All periods with derived statuses.
    pub fn period_views(&self) -> Vec<PeriodView<'_>> {
        (0..self.curriculum.periods().len())
            .filter_map(|i| self.period_view(i))
            .collect()
    }

    /// Graduation estimate from the given current semester.
    pub fn estimate(&self, current: Semester) -> GraduationEstimate {
        GraduationEstimator::new(self.config.subjects_per_semester)
            .estimate(&self.aggregate(), current)
    }

    /// What to take next.
    pub fn recommendations(&self) -> Recommendations<'_> {
        RecommendationSelector::new(self.config.priority_limit, self.config.other_limit)
            .select(&self.curriculum, &self.snapshot)
    }

    /// Blocker detector over this engine's curriculum.
    pub fn blockers(&self) -> BlockerDetector<'_> {
        BlockerDetector::new(&self.curriculum)
    }

    // === Commands ===

    /// Advance a subject one step: available, planned, in progress,
    /// completed, and back.
    pub fn toggle(&mut self, name: &str) -> Result<Transition, InvalidCommand> {
        let subject = self
            .curriculum
            .subject(name)
            .ok_or_else(|| InvalidCommand::UnknownSubject(name.to_string()))?;

        let from = derive_status(subject, &self.snapshot);
        let key = subject.name.clone();

        let Some(next) = from.next() else {
            let missing = subject
                .unmet_prerequisites(&self.snapshot)
                .into_iter()
                .map(|p| p.label().to_string())
                .collect();
            debug!("Rejected toggle of locked subject '{}'", key);
            return Err(InvalidCommand::SubjectLocked { subject: key, missing });
        };

        self.snapshot.completed.remove(&key);
        self.snapshot.in_progress.remove(&key);
        self.snapshot.planned.remove(&key);
        match next {
            SubjectStatus::Completed => self.snapshot.completed.insert(key.clone()),
            SubjectStatus::InProgress => self.snapshot.in_progress.insert(key.clone()),
            SubjectStatus::Planned => self.snapshot.planned.insert(key.clone()),
            SubjectStatus::Available | SubjectStatus::Locked => false,
        };

        let to = derive_status(subject, &self.snapshot);
        info!("Subject '{}': {} -> {}", key, from, to);

        Ok(Transition { subject: key, from, to })
    }

    /// Complete every subject of a period and mark it finalized.
    ///
    /// Rejected if the period is unknown, already finalized, or holds a
    /// locked subject.
    pub fn finalize_period(&mut self, index: usize) -> Result<Finalized, InvalidCommand> {
        let period = check_finalize(&self.curriculum, &self.snapshot, index)?;

        let mut transitioned = Vec::new();
        for subject in &period.subjects {
            self.snapshot.in_progress.remove(&subject.name);
            self.snapshot.planned.remove(&subject.name);
            if self.snapshot.completed.insert(subject.name.clone()) {
                transitioned.push(subject.name.clone());
            }
        }
        self.snapshot.finalized_periods.insert(index);

        info!(
            "Finalized period '{}': {} subjects marked completed",
            period.label,
            transitioned.len()
        );

        Ok(Finalized {
            period: index,
            label: period.label.clone(),
            transitioned,
        })
    }

    /// Clear all progress.
    pub fn reset(&mut self) {
        self.snapshot.clear();
        info!("Progress cleared");
    }

    /// Put back a snapshot taken from this engine, without normalizing.
    pub(crate) fn restore(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
    }

    /// Install an externally loaded snapshot, normalized against the
    /// curriculum. Returns the corrections applied.
    pub fn replace(&mut self, mut snapshot: Snapshot) -> Vec<Correction> {
        let corrections = snapshot.normalize(&self.curriculum);
        for correction in &corrections {
            warn!("Loaded snapshot: {}", correction);
        }
        self.snapshot = snapshot;
        corrections
    }
}
