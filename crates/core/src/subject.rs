//! Subject model - a single course unit and its prerequisites.

use serde::{Deserialize, Serialize};
use crate::snapshot::Snapshot;

/// A subject offered in one period of the curriculum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Subject name, unique across the curriculum
    pub name: String,

    /// Prerequisites in declaration order
    pub prerequisites: Vec<Prerequisite>,
}

impl Subject {
    /// Create a subject without prerequisites.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prerequisites: Vec::new(),
        }
    }

    /// Add a prerequisite.
    pub fn with_prerequisite(mut self, prerequisite: Prerequisite) -> Self {
        self.prerequisites.push(prerequisite);
        self
    }

    /// Whether every prerequisite is satisfied by the snapshot.
    pub fn prerequisites_met(&self, snapshot: &Snapshot) -> bool {
        self.prerequisites.iter().all(|p| p.is_satisfied(snapshot))
    }

    /// Prerequisites the snapshot does not satisfy yet.
    pub fn unmet_prerequisites<'a>(&'a self, snapshot: &Snapshot) -> Vec<&'a Prerequisite> {
        self.prerequisites
            .iter()
            .filter(|p| !p.is_satisfied(snapshot))
            .collect()
    }

    /// Whether this subject lists `name` as a subject prerequisite.
    pub fn requires(&self, name: &str) -> bool {
        self.prerequisites
            .iter()
            .any(|p| p.subject_name() == Some(name))
    }
}

/// A requirement that must hold before a subject can be taken.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Prerequisite {
    /// Another subject of the curriculum must be completed
    SubjectRef(String),

    /// Free-text entry requirement with no matching subject.
    ///
    /// Never satisfied by a snapshot; informational only.
    ExternalCondition(String),
}

impl Prerequisite {
    /// Whether the snapshot satisfies this prerequisite.
    pub fn is_satisfied(&self, snapshot: &Snapshot) -> bool {
        match self {
            Self::SubjectRef(name) => snapshot.completed.contains(name),
            Self::ExternalCondition(_) => false,
        }
    }

    /// Referenced subject name, if this is a subject reference.
    pub fn subject_name(&self) -> Option<&str> {
        match self {
            Self::SubjectRef(name) => Some(name),
            Self::ExternalCondition(_) => None,
        }
    }

    /// Text as written in the curriculum.
    pub fn label(&self) -> &str {
        match self {
            Self::SubjectRef(name) => name,
            Self::ExternalCondition(description) => description,
        }
    }

    /// Whether this is an external condition.
    pub fn is_external(&self) -> bool {
        matches!(self, Self::ExternalCondition(_))
    }
}

impl std::fmt::Display for Prerequisite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_ref_satisfied_only_when_completed() {
        let prereq = Prerequisite::SubjectRef("Calculus".to_string());
        let mut snapshot = Snapshot::default();
        assert!(!prereq.is_satisfied(&snapshot));

        snapshot.in_progress.insert("Calculus".to_string());
        assert!(!prereq.is_satisfied(&snapshot));

        snapshot.in_progress.clear();
        snapshot.completed.insert("Calculus".to_string());
        assert!(prereq.is_satisfied(&snapshot));
    }

    #[test]
    fn test_external_condition_never_satisfied() {
        let prereq = Prerequisite::ExternalCondition("70% of program completed".to_string());
        let mut snapshot = Snapshot::default();
        snapshot.completed.insert("70% of program completed".to_string());

        assert!(!prereq.is_satisfied(&snapshot));
        assert!(prereq.is_external());
        assert_eq!(prereq.subject_name(), None);
    }

    #[test]
    fn test_unmet_prerequisites_keeps_order() {
        let subject = Subject::new("Databases 2")
            .with_prerequisite(Prerequisite::SubjectRef("Databases 1".to_string()))
            .with_prerequisite(Prerequisite::SubjectRef("Data Modeling".to_string()));

        let mut snapshot = Snapshot::default();
        snapshot.completed.insert("Data Modeling".to_string());

        let unmet = subject.unmet_prerequisites(&snapshot);
        assert_eq!(unmet.len(), 1);
        assert_eq!(unmet[0].label(), "Databases 1");
        assert!(!subject.prerequisites_met(&snapshot));
        assert!(subject.requires("Data Modeling"));
        assert!(!subject.requires("Ethics"));
    }
}
