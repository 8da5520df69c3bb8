//! Graduation estimation.

use gradplan_core::{Half, Semester};
use serde::Serialize;

use crate::engine::Aggregate;

/// Subjects a student is assumed to take per semester.
pub const SUBJECTS_PER_SEMESTER: u32 = 6;

/// Forecast of the graduation semester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraduationEstimate {
    /// Subjects neither completed, in progress nor planned
    pub remaining_subjects: usize,
    /// Semesters until graduation
    pub remaining_semesters: u32,
    /// Expected graduation semester
    pub graduation_semester: Semester,
    /// Semester the estimate starts from
    pub current_semester: Semester,
}

/// Fixed-pace graduation estimator.
///
/// Uses only the pace constant; no history.
#[derive(Debug, Clone, Copy)]
pub struct GraduationEstimator {
    subjects_per_semester: u32,
}

impl GraduationEstimator {
    /// Create an estimator. A pace of zero is treated as one.
    pub fn new(subjects_per_semester: u32) -> Self {
        Self {
            subjects_per_semester: subjects_per_semester.max(1),
        }
    }

    /// Estimate graduation from aggregate progress.
    pub fn estimate(&self, aggregate: &Aggregate, current: Semester) -> GraduationEstimate {
        let remaining = aggregate
            .total
            .saturating_sub(aggregate.completed)
            .saturating_sub(aggregate.in_progress)
            .saturating_sub(aggregate.planned);

        // Planned subjects fit in the second half of this year; from the
        // second half they push graduation one semester out.
        let from_planned = match (aggregate.planned, current.half) {
            (0, _) => 0,
            (_, Half::First) => 0,
            (_, Half::Second) => 1,
        };

        let per = self.subjects_per_semester as usize;
        let remaining_semesters = remaining.div_ceil(per) as u32 + from_planned;

        GraduationEstimate {
            remaining_subjects: remaining,
            remaining_semesters,
            graduation_semester: current.advance(remaining_semesters),
            current_semester: current,
        }
    }
}

impl Default for GraduationEstimator {
    fn default() -> Self {
        Self::new(SUBJECTS_PER_SEMESTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimate(total: usize, completed: usize, in_progress: usize, planned: usize, current: Semester) -> GraduationEstimate {
        let aggregate = Aggregate::from_counts(total, completed, in_progress, planned);
        GraduationEstimator::default().estimate(&aggregate, current)
    }

    #[test]
    fn test_one_semester_left() {
        let result = estimate(50, 44, 0, 0, Semester::new(2025, Half::First));
        assert_eq!(result.remaining_subjects, 6);
        assert_eq!(result.remaining_semesters, 1);
        assert_eq!(result.graduation_semester, Semester::new(2025, Half::Second));
        assert_eq!(result.current_semester, Semester::new(2025, Half::First));
    }

    #[test]
    fn test_partial_semester_rounds_up() {
        let result = estimate(50, 37, 0, 0, Semester::new(2025, Half::First));
        assert_eq!(result.remaining_subjects, 13);
        assert_eq!(result.remaining_semesters, 3);
        assert_eq!(result.graduation_semester, Semester::new(2026, Half::Second));
    }

    #[test]
    fn test_planned_in_first_half_adds_nothing() {
        let result = estimate(50, 40, 0, 4, Semester::new(2025, Half::First));
        assert_eq!(result.remaining_subjects, 6);
        assert_eq!(result.remaining_semesters, 1);
    }

    #[test]
    fn test_planned_in_second_half_adds_semester() {
        let result = estimate(50, 40, 0, 4, Semester::new(2025, Half::Second));
        assert_eq!(result.remaining_semesters, 2);
        assert_eq!(result.graduation_semester, Semester::new(2026, Half::Second));
    }

    #[test]
    fn test_finished() {
        let result = estimate(49, 49, 0, 0, Semester::new(2025, Half::Second));
        assert_eq!(result.remaining_subjects, 0);
        assert_eq!(result.remaining_semesters, 0);
        assert_eq!(result.graduation_semester, Semester::new(2025, Half::Second));
    }

    #[test]
    fn test_zero_pace_is_clamped() {
        let aggregate = Aggregate::from_counts(4, 0, 0, 0);
        let result = GraduationEstimator::new(0).estimate(&aggregate, Semester::new(2025, Half::First));
        assert_eq!(result.remaining_semesters, 4);
    }
}
