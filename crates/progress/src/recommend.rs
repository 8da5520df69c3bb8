//! Next-semester recommendations.

use gradplan_core::{Curriculum, Snapshot, Subject, SubjectStatus};

use crate::engine::derive_status;

/// Recommended subjects, in curriculum order.
#[derive(Debug, Clone, Default)]
pub struct Recommendations<'a> {
    /// Available subjects that other subjects depend on
    pub priority: Vec<&'a Subject>,
    /// Remaining available subjects
    pub other: Vec<&'a Subject>,
}

impl Recommendations<'_> {
    /// Whether there is nothing to recommend.
    pub fn is_empty(&self) -> bool {
        self.priority.is_empty() && self.other.is_empty()
    }
}

/// Picks available subjects, favoring those that unlock others.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationSelector {
    priority_limit: usize,
    other_limit: usize,
}

impl RecommendationSelector {
    /// Create a selector with list limits.
    pub fn new(priority_limit: usize, other_limit: usize) -> Self {
        Self {
            priority_limit,
            other_limit,
        }
    }

    /// Select recommendations for a snapshot.
    pub fn select<'a>(&self, curriculum: &'a Curriculum, snapshot: &Snapshot) -> Recommendations<'a> {
        let (priority, other): (Vec<&Subject>, Vec<&Subject>) = curriculum
            .subjects()
            .filter(|s| derive_status(s, snapshot) == SubjectStatus::Available)
            .partition(|s| curriculum.unlocks_any(&s.name));

        Recommendations {
            priority: priority.into_iter().take(self.priority_limit).collect(),
            other: other.into_iter().take(self.other_limit).collect(),
        }
    }
}

impl Default for RecommendationSelector {
    fn default() -> Self {
        Self::new(4, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradplan_core::{catalog, CourseInfo, Period, Prerequisite};

    fn names(subjects: &[&Subject]) -> Vec<String> {
        subjects.iter().map(|s| s.name.clone()).collect()
    }

    #[test]
    fn test_unlocking_subject_is_priority() {
        let curriculum = Curriculum::new(
            CourseInfo::default(),
            vec![Period::new("1", vec![
                Subject::new("A"),
                Subject::new("B").with_prerequisite(Prerequisite::SubjectRef("A".to_string())),
            ])],
        )
        .unwrap();

        let recs = RecommendationSelector::default().select(&curriculum, &Snapshot::new());
        assert_eq!(names(&recs.priority), vec!["A"]);
        assert!(recs.other.is_empty());
    }

    #[test]
    fn test_builtin_fresh_start() {
        let curriculum = catalog::builtin().unwrap();
        let recs = RecommendationSelector::default().select(&curriculum, &Snapshot::new());

        assert_eq!(
            names(&recs.priority),
            vec![
                "Construção de Algoritmos",
                "Arquitetura de Computadores",
                "Fundamentos da Matemática",
                "Matemática Discreta",
            ]
        );
        assert_eq!(
            names(&recs.other),
            vec!["Fund. de Administração", "Gestão de Proc. de Negócios"]
        );
    }

    #[test]
    fn test_excludes_tracked_subjects() {
        let curriculum = catalog::builtin().unwrap();
        let mut snapshot = Snapshot::new();
        snapshot.planned.insert("Construção de Algoritmos".to_string());
        snapshot.completed.insert("Fund. de Administração".to_string());

        let recs = RecommendationSelector::new(10, 10).select(&curriculum, &snapshot);
        let all: Vec<_> = recs.priority.iter().chain(recs.other.iter()).map(|s| s.name.as_str()).collect();

        assert!(!all.contains(&"Construção de Algoritmos"));
        assert!(!all.contains(&"Fund. de Administração"));
        assert!(!all.contains(&"Programação Estruturada"));
    }

    #[test]
    fn test_nothing_available() {
        let curriculum = Curriculum::new(
            CourseInfo::default(),
            vec![Period::new("1", vec![Subject::new("A")])],
        )
        .unwrap();
        let mut snapshot = Snapshot::new();
        snapshot.completed.insert("A".to_string());

        assert!(RecommendationSelector::default().select(&curriculum, &snapshot).is_empty());
    }
}
