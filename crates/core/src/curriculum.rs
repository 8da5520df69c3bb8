//! Curriculum model - periods, subjects and the prerequisite graph.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use crate::subject::{Prerequisite, Subject};

/// Errors building a curriculum.
#[derive(Debug, thiserror::Error)]
pub enum CurriculumError {
    /// Two subjects share a name
    #[error("duplicate subject name: {0}")]
    DuplicateSubject(String),

    /// I/O error reading a curriculum document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed curriculum document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Display-only information about the degree program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseInfo {
    /// Program name
    pub name: String,

    /// Institution offering the program
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,

    /// Campus
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campus: Option<String>,

    /// Level (undergraduate, graduate...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Degree awarded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,

    /// In person, remote...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modality: Option<String>,

    /// Term the curriculum took effect
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub established: Option<String>,

    /// Class shift
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<String>,

    /// Period length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periodicity: Option<String>,
}

/// One period (term) of the curriculum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Display label
    pub label: String,

    /// Subjects in display order
    pub subjects: Vec<Subject>,
}

impl Period {
    /// Create a period.
    pub fn new(label: impl Into<String>, subjects: Vec<Subject>) -> Self {
        Self {
            label: label.into(),
            subjects,
        }
    }
}

/// Where a subject sits in the curriculum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubjectPosition {
    /// Period index
    pub period: usize,

    /// Index within the period
    pub slot: usize,
}

/// The static curriculum graph.
///
/// Subject names are unique. Prerequisites that name no subject are stored as
/// [`Prerequisite::ExternalCondition`].
#[derive(Debug, Clone)]
pub struct Curriculum {
    course: CourseInfo,
    periods: Vec<Period>,
    index: HashMap<String, SubjectPosition>,
}

impl Curriculum {
    /// Build a curriculum, checking name uniqueness and classifying
    /// prerequisites.
    pub fn new(course: CourseInfo, mut periods: Vec<Period>) -> Result<Self, CurriculumError> {
        let mut index = HashMap::new();
        for (p, period) in periods.iter().enumerate() {
            for (s, subject) in period.subjects.iter().enumerate() {
                let position = SubjectPosition { period: p, slot: s };
                if index.insert(subject.name.clone(), position).is_some() {
                    return Err(CurriculumError::DuplicateSubject(subject.name.clone()));
                }
            }
        }

        for subject in periods.iter_mut().flat_map(|p| p.subjects.iter_mut()) {
            for prereq in subject.prerequisites.iter_mut() {
                let dangling = match prereq {
                    Prerequisite::SubjectRef(name) if !index.contains_key(name.as_str()) => {
                        Some(std::mem::take(name))
                    }
                    _ => None,
                };
                if let Some(description) = dangling {
                    *prereq = Prerequisite::ExternalCondition(description);
                }
            }
        }

        Ok(Self { course, periods, index })
    }

    /// Build from a curriculum document.
    pub fn from_document(doc: CurriculumDocument) -> Result<Self, CurriculumError> {
        let periods = doc
            .periods
            .into_iter()
            .map(|period| {
                let subjects = period
                    .subjects
                    .into_iter()
                    .map(|s| Subject {
                        name: s.name,
                        prerequisites: s
                            .prerequisites
                            .into_iter()
                            .map(Prerequisite::SubjectRef)
                            .collect(),
                    })
                    .collect();
                Period::new(period.label, subjects)
            })
            .collect();

        Self::new(doc.course, periods)
    }

    /// Parse a JSON curriculum document.
    pub fn from_json(json: &str) -> Result<Self, CurriculumError> {
        let doc: CurriculumDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    /// Read a JSON curriculum document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CurriculumError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Program information.
    pub fn course(&self) -> &CourseInfo {
        &self.course
    }

    /// Periods in order.
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Period by index.
    pub fn period(&self, index: usize) -> Option<&Period> {
        self.periods.get(index)
    }

    /// All subjects in curriculum order (period, then position).
    pub fn subjects(&self) -> impl Iterator<Item = &Subject> {
        self.periods.iter().flat_map(|p| p.subjects.iter())
    }

    /// Number of subjects across all periods.
    pub fn subject_count(&self) -> usize {
        self.index.len()
    }

    /// Whether a subject with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Position of a subject.
    pub fn position(&self, name: &str) -> Option<SubjectPosition> {
        self.index.get(name).copied()
    }

    /// Subject by name.
    pub fn subject(&self, name: &str) -> Option<&Subject> {
        let pos = self.position(name)?;
        self.periods.get(pos.period)?.subjects.get(pos.slot)
    }

    /// Subjects listing `name` as a prerequisite, in curriculum order.
    pub fn dependents(&self, name: &str) -> Vec<&Subject> {
        self.subjects().filter(|s| s.requires(name)).collect()
    }

    /// Whether completing `name` counts toward unlocking any other subject.
    pub fn unlocks_any(&self, name: &str) -> bool {
        self.subjects().any(|s| s.name != name && s.requires(name))
    }
}

/// On-disk curriculum shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurriculumDocument {
    /// Program information
    pub course: CourseInfo,

    /// Periods in order
    pub periods: Vec<PeriodDocument>,
}

/// On-disk period shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodDocument {
    /// Display label
    pub label: String,

    /// Subjects in order
    pub subjects: Vec<SubjectDocument>,
}

/// On-disk subject shape; prerequisites are plain strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectDocument {
    /// Subject name
    pub name: String,

    /// Prerequisite names or free-text conditions
    #[serde(default)]
    pub prerequisites: Vec<String>,
}
