//! Blocker detection and curriculum validation.
//!
//! This module explains why subjects are locked:
//! - Missing prerequisites per subject
//! - Reverse lookup of dependent subjects
//! - The single subject that would unlock the most
//! - Structural checks on the prerequisite graph (cycles, forward references)

use std::collections::{HashMap, HashSet};

use gradplan_core::{Curriculum, Prerequisite, Snapshot, Subject, SubjectStatus};

use crate::engine::derive_status;

/// A locked subject and what holds it back.
#[derive(Debug, Clone)]
pub struct LockedSubject<'a> {
    /// The locked subject
    pub subject: &'a Subject,
    /// Unmet prerequisites in declaration order
    pub missing: Vec<&'a Prerequisite>,
}

impl LockedSubject<'_> {
    /// Whether only external conditions hold this subject back.
    pub fn external_only(&self) -> bool {
        self.missing.iter().all(|p| p.is_external())
    }
}

/// Blocker statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockerStats {
    /// Locked subjects
    pub locked: usize,
    /// Locked subjects blocked only by external conditions
    pub external_only: usize,
    /// Subject whose completion unlocks the most locked subjects, and how many
    pub key_subject: Option<(String, usize)>,
}

/// Result of blocker analysis.
#[derive(Debug, Clone, Default)]
pub struct BlockerAnalysis<'a> {
    /// Locked subjects in curriculum order
    pub locked: Vec<LockedSubject<'a>>,
    /// Statistics
    pub stats: BlockerStats,
}

/// Explains locked subjects for a curriculum.
#[derive(Debug, Clone, Copy)]
pub struct BlockerDetector<'a> {
    curriculum: &'a Curriculum,
}

impl<'a> BlockerDetector<'a> {
    /// Create a detector.
    pub fn new(curriculum: &'a Curriculum) -> Self {
        Self { curriculum }
    }

    /// Unmet prerequisites of a subject, or `None` if it does not exist.
    pub fn missing_prerequisites(&self, name: &str, snapshot: &Snapshot) -> Option<Vec<&'a Prerequisite>> {
        let subject = self.curriculum.subject(name)?;
        Some(subject.unmet_prerequisites(snapshot))
    }

    /// Subjects that list `name` as a prerequisite.
    pub fn dependents(&self, name: &str) -> Vec<&'a Subject> {
        self.curriculum.dependents(name)
    }

    /// Analyze every locked subject.
    pub fn analyze(&self, snapshot: &Snapshot) -> BlockerAnalysis<'a> {
        let locked: Vec<LockedSubject<'a>> = self
            .curriculum
            .subjects()
            .filter(|s| derive_status(s, snapshot) == SubjectStatus::Locked)
            .map(|subject| LockedSubject {
                subject,
                missing: subject.unmet_prerequisites(snapshot),
            })
            .collect();

        let stats = self.calculate_stats(&locked);
        BlockerAnalysis { locked, stats }
    }

    fn calculate_stats(&self, locked: &[LockedSubject<'a>]) -> BlockerStats {
        // Subjects that are the sole missing prerequisite of a locked subject.
        let mut unlock_counts: HashMap<&str, usize> = HashMap::new();
        for item in locked {
            if let [only] = item.missing.as_slice() {
                if let Some(name) = only.subject_name() {
                    *unlock_counts.entry(name).or_insert(0) += 1;
                }
            }
        }

        // Highest count wins; ties go to the earliest subject in the curriculum.
        let key_subject = self
            .curriculum
            .subjects()
            .filter_map(|s| unlock_counts.get(s.name.as_str()).map(|&n| (s.name.clone(), n)))
            .fold(None, |best: Option<(String, usize)>, candidate| match best {
                Some(b) if b.1 >= candidate.1 => Some(b),
                _ => Some(candidate),
            });

        BlockerStats {
            locked: locked.len(),
            external_only: locked.iter().filter(|l| l.external_only()).count(),
            key_subject,
        }
    }
}

/// A structural finding about the prerequisite graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurriculumIssue {
    /// Prerequisite that names no subject; the subject can never unlock
    ExternalCondition {
        /// Subject carrying the condition
        subject: String,
        /// Condition text
        condition: String,
    },
    /// Subject lists itself
    SelfReference(String),
    /// Subjects that require each other in a loop
    Cycle(Vec<String>),
    /// Prerequisite offered in a later period than the subject
    ForwardReference {
        /// Dependent subject
        subject: String,
        /// Prerequisite placed later
        prerequisite: String,
    },
}

impl std::fmt::Display for CurriculumIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExternalCondition { subject, condition } => {
                write!(f, "'{}' requires external condition '{}'", subject, condition)
            }
            Self::SelfReference(subject) => write!(f, "'{}' lists itself as a prerequisite", subject),
            Self::Cycle(chain) => write!(f, "prerequisite cycle: {}", chain.join(" -> ")),
            Self::ForwardReference { subject, prerequisite } => {
                write!(f, "'{}' requires '{}' from a later period", subject, prerequisite)
            }
        }
    }
}

/// Check the prerequisite graph. Findings are reported, never fatal.
pub fn validate(curriculum: &Curriculum) -> Vec<CurriculumIssue> {
    let mut issues = Vec::new();

    for subject in curriculum.subjects() {
        let position = curriculum.position(&subject.name);
        for prereq in &subject.prerequisites {
            match prereq {
                Prerequisite::ExternalCondition(condition) => {
                    issues.push(CurriculumIssue::ExternalCondition {
                        subject: subject.name.clone(),
                        condition: condition.clone(),
                    });
                }
                Prerequisite::SubjectRef(name) if name == &subject.name => {
                    issues.push(CurriculumIssue::SelfReference(subject.name.clone()));
                }
                Prerequisite::SubjectRef(name) => {
                    let later = match (position, curriculum.position(name)) {
                        (Some(own), Some(other)) => other.period > own.period,
                        _ => false,
                    };
                    if later {
                        issues.push(CurriculumIssue::ForwardReference {
                            subject: subject.name.clone(),
                            prerequisite: name.clone(),
                        });
                    }
                }
            }
        }
    }

    issues.extend(detect_cycles(curriculum).into_iter().map(CurriculumIssue::Cycle));
    issues
}

/// Find prerequisite cycles using DFS. Self references are left out.
fn detect_cycles(curriculum: &Curriculum) -> Vec<Vec<String>> {
    let mut cycles = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut recursion_stack: HashSet<&str> = HashSet::new();

    for subject in curriculum.subjects() {
        if !visited.contains(subject.name.as_str()) {
            if let Some(cycle) = find_cycle(
                &subject.name,
                curriculum,
                &mut visited,
                &mut recursion_stack,
                &mut Vec::new(),
            ) {
                cycles.push(cycle);
            }
        }
    }

    cycles
}

fn find_cycle<'a>(
    node: &'a str,
    curriculum: &'a Curriculum,
    visited: &mut HashSet<&'a str>,
    recursion_stack: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    visited.insert(node);
    recursion_stack.insert(node);
    path.push(node);

    if let Some(subject) = curriculum.subject(node) {
        for dep in subject.prerequisites.iter().filter_map(|p| p.subject_name()) {
            if dep == node {
                continue;
            }
            if !visited.contains(dep) {
                if let Some(cycle) = find_cycle(dep, curriculum, visited, recursion_stack, path) {
                    return Some(cycle);
                }
            } else if recursion_stack.contains(dep) {
                let start = path.iter().position(|n| *n == dep).unwrap_or(0);
                let mut cycle: Vec<String> = path[start..].iter().map(|n| n.to_string()).collect();
                cycle.push(dep.to_string());
                return Some(cycle);
            }
        }
    }

    path.pop();
    recursion_stack.remove(node);
    None
}
