//! Snapshot model - the student's own progress state.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};
use crate::curriculum::Curriculum;
use crate::Time;

/// The student's progress: three disjoint subject sets and the finalized periods.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Passed subjects
    pub completed: BTreeSet<String>,

    /// Subjects currently being taken
    pub in_progress: BTreeSet<String>,

    /// Subjects planned for this year
    pub planned: BTreeSet<String>,

    /// Indices of periods committed with a bulk completion
    pub finalized_periods: BTreeSet<usize>,
}

/// A fix applied while normalizing an external snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Correction {
    /// Subject name not present in the curriculum
    UnknownSubject(String),

    /// Subject present in more than one set; kept in the higher-precedence one
    DuplicateMembership(String),

    /// Period index outside the curriculum
    UnknownPeriod(usize),
}

impl std::fmt::Display for Correction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Correction::UnknownSubject(name) => write!(f, "dropped unknown subject '{}'", name),
            Correction::DuplicateMembership(name) => {
                write!(f, "subject '{}' was in several sets, kept highest", name)
            }
            Correction::UnknownPeriod(index) => write!(f, "dropped unknown period index {}", index),
        }
    }
}

impl Snapshot {
    /// Empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
            && self.in_progress.is_empty()
            && self.planned.is_empty()
            && self.finalized_periods.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether the three subject sets share no member.
    pub fn is_disjoint(&self) -> bool {
        self.completed.is_disjoint(&self.in_progress)
            && self.completed.is_disjoint(&self.planned)
            && self.in_progress.is_disjoint(&self.planned)
    }

    /// Whether `name` is in any of the three subject sets.
    pub fn is_tracked(&self, name: &str) -> bool {
        self.completed.contains(name) || self.in_progress.contains(name) || self.planned.contains(name)
    }

    /// Bring an externally loaded snapshot in line with the curriculum.
    ///
    /// Unknown subjects and periods are dropped. A subject in several sets is
    /// kept in the first of completed, in-progress, planned.
    pub fn normalize(&mut self, curriculum: &Curriculum) -> Vec<Correction> {
        let mut corrections = Vec::new();

        for set in [&mut self.completed, &mut self.in_progress, &mut self.planned] {
            set.retain(|name| {
                let known = curriculum.contains(name);
                if !known {
                    corrections.push(Correction::UnknownSubject(name.clone()));
                }
                known
            });
        }

        let completed = &self.completed;
        self.in_progress.retain(|name| {
            let keep = !completed.contains(name);
            if !keep {
                corrections.push(Correction::DuplicateMembership(name.clone()));
            }
            keep
        });

        let in_progress = &self.in_progress;
        self.planned.retain(|name| {
            let keep = !completed.contains(name) && !in_progress.contains(name);
            if !keep {
                corrections.push(Correction::DuplicateMembership(name.clone()));
            }
            keep
        });

        let period_count = curriculum.periods().len();
        self.finalized_periods.retain(|&index| {
            let keep = index < period_count;
            if !keep {
                corrections.push(Correction::UnknownPeriod(index));
            }
            keep
        });

        corrections
    }
}

/// Persisted and shared form of a snapshot.
///
/// Field names are fixed for compatibility: `current` holds the in-progress
/// subjects. Missing or `null` collections read as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRecord {
    /// Completed subject names
    #[serde(default, deserialize_with = "null_as_empty")]
    pub completed: Vec<String>,

    /// In-progress subject names
    #[serde(default, deserialize_with = "null_as_empty")]
    pub current: Vec<String>,

    /// Planned subject names
    #[serde(default, deserialize_with = "null_as_empty")]
    pub planned: Vec<String>,

    /// Finalized period indices
    #[serde(default, deserialize_with = "null_as_empty")]
    pub finalized_periods: Vec<usize>,

    /// When the record was written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Time>,
}

impl SnapshotRecord {
    /// Record a snapshot stamped with the current time.
    pub fn stamped(snapshot: &Snapshot) -> Self {
        Self {
            timestamp: Some(chrono::Utc::now()),
            ..Self::from(snapshot)
        }
    }
}

impl From<&Snapshot> for SnapshotRecord {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            completed: snapshot.completed.iter().cloned().collect(),
            current: snapshot.in_progress.iter().cloned().collect(),
            planned: snapshot.planned.iter().cloned().collect(),
            finalized_periods: snapshot.finalized_periods.iter().copied().collect(),
            timestamp: None,
        }
    }
}

impl From<SnapshotRecord> for Snapshot {
    fn from(record: SnapshotRecord) -> Self {
        Self {
            completed: record.completed.into_iter().collect(),
            in_progress: record.current.into_iter().collect(),
            planned: record.planned.into_iter().collect(),
            finalized_periods: record.finalized_periods.into_iter().collect(),
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Period, Subject};

    fn names(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_record_uses_compatible_field_names() {
        let mut snapshot = Snapshot::new();
        snapshot.in_progress.insert("Ethics".to_string());
        snapshot.finalized_periods.insert(0);

        let json = serde_json::to_value(SnapshotRecord::from(&snapshot)).unwrap();
        assert_eq!(json["current"][0], "Ethics");
        assert_eq!(json["finalizedPeriods"][0], 0);
        assert!(json.get("timestamp").is_none());
    }

    #[test]
    fn test_record_tolerates_missing_and_null_fields() {
        let record: SnapshotRecord =
            serde_json::from_str(r#"{"completed": ["A"], "planned": null, "extra": 1}"#).unwrap();
        let snapshot = Snapshot::from(record);

        assert_eq!(snapshot.completed, names(&["A"]));
        assert!(snapshot.in_progress.is_empty());
        assert!(snapshot.planned.is_empty());
        assert!(snapshot.finalized_periods.is_empty());
    }

    #[test]
    fn test_record_accepts_browser_timestamp() {
        let record: SnapshotRecord =
            serde_json::from_str(r#"{"timestamp": "2025-03-01T12:30:00.000Z"}"#).unwrap();
        assert!(record.timestamp.is_some());
    }

    #[test]
    fn test_normalize_resolves_overlaps_and_unknowns() {
        let curriculum = Curriculum::new(
            Default::default(),
            vec![Period::new("1", vec![Subject::new("A"), Subject::new("B"), Subject::new("C")])],
        )
        .unwrap();

        let mut snapshot = Snapshot::new();
        snapshot.completed = names(&["A", "Ghost"]);
        snapshot.in_progress = names(&["A", "B"]);
        snapshot.planned = names(&["B", "C"]);
        snapshot.finalized_periods = [0, 5].into_iter().collect();

        let corrections = snapshot.normalize(&curriculum);

        assert_eq!(snapshot.completed, names(&["A"]));
        assert_eq!(snapshot.in_progress, names(&["B"]));
        assert_eq!(snapshot.planned, names(&["C"]));
        assert_eq!(snapshot.finalized_periods, [0].into_iter().collect());
        assert!(snapshot.is_disjoint());
        assert_eq!(corrections.len(), 4);
        assert!(corrections.contains(&Correction::UnknownSubject("Ghost".to_string())));
        assert!(corrections.contains(&Correction::UnknownPeriod(5)));
    }
}
