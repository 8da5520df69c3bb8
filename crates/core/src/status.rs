//! Derived subject status.

use serde::{Deserialize, Serialize};

/// Status of a subject, derived from a snapshot and the curriculum.
///
/// Never stored; recomputed on every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectStatus {
    /// Passed
    Completed,
    /// Currently being taken
    InProgress,
    /// Planned for this year
    Planned,
    /// All prerequisites met, not yet chosen
    Available,
    /// At least one prerequisite unmet
    Locked,
}

impl SubjectStatus {
    /// Status a subject moves to when advanced from this one.
    ///
    /// `Completed` cycles back to `Available`, since a subject's own
    /// prerequisites are unaffected by clearing it. `Locked` has no successor.
    pub fn next(self) -> Option<SubjectStatus> {
        match self {
            Self::Available => Some(Self::Planned),
            Self::Planned => Some(Self::InProgress),
            Self::InProgress => Some(Self::Completed),
            Self::Completed => Some(Self::Available),
            Self::Locked => None,
        }
    }

    /// Short lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::InProgress => "in_progress",
            Self::Planned => "planned",
            Self::Available => "available",
            Self::Locked => "locked",
        }
    }
}

impl std::fmt::Display for SubjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_cycles_back_to_available() {
        let mut status = SubjectStatus::Available;
        let mut seen = Vec::new();
        for _ in 0..4 {
            status = status.next().unwrap();
            seen.push(status);
        }
        assert_eq!(
            seen,
            vec![
                SubjectStatus::Planned,
                SubjectStatus::InProgress,
                SubjectStatus::Completed,
                SubjectStatus::Available,
            ]
        );
        assert_eq!(SubjectStatus::Locked.next(), None);
    }
}
