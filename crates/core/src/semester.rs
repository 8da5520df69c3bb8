//! Academic semester token (`YYYY.H`).

use chrono::Datelike;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Half of an academic year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Half {
    /// January to June
    First,
    /// July to December
    Second,
}

impl Half {
    /// Numeric form, 1 or 2.
    pub fn number(self) -> u8 {
        match self {
            Half::First => 1,
            Half::Second => 2,
        }
    }

    /// Half containing a calendar month (1-12).
    pub fn of_month(month: u32) -> Self {
        if month <= 6 {
            Half::First
        } else {
            Half::Second
        }
    }
}

/// A semester: a year and one of its halves.
///
/// Serializes as its `YYYY.H` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Semester {
    /// Calendar year
    pub year: i32,

    /// Half of the year
    pub half: Half,
}

impl Semester {
    /// Create a semester.
    pub fn new(year: i32, half: Half) -> Self {
        Self { year, half }
    }

    /// Semester containing a date.
    pub fn containing<D: Datelike>(date: &D) -> Self {
        Self::new(date.year(), Half::of_month(date.month()))
    }

    /// Semester containing today, in local time.
    pub fn current() -> Self {
        Self::containing(&chrono::Local::now().date_naive())
    }

    /// The following semester. The second half rolls over into the next year.
    pub fn next(self) -> Self {
        match self.half {
            Half::First => Self::new(self.year, Half::Second),
            Half::Second => Self::new(self.year + 1, Half::First),
        }
    }

    /// Advance by `count` semesters.
    pub fn advance(self, count: u32) -> Self {
        (0..count).fold(self, |s, _| s.next())
    }
}

impl std::fmt::Display for Semester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.year, self.half.number())
    }
}

/// Error parsing a `YYYY.H` semester string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid semester '{0}', expected YYYY.1 or YYYY.2")]
pub struct ParseSemesterError(pub String);

impl std::str::FromStr for Semester {
    type Err = ParseSemesterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSemesterError(s.to_string());
        let (year, half) = s.trim().split_once('.').ok_or_else(err)?;
        let year: i32 = year.parse().map_err(|_| err())?;
        let half = match half {
            "1" => Half::First,
            "2" => Half::Second,
            _ => return Err(err()),
        };
        Ok(Self::new(year, half))
    }
}

impl Serialize for Semester {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Semester {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_half_boundaries() {
        assert_eq!(Half::of_month(1), Half::First);
        assert_eq!(Half::of_month(6), Half::First);
        assert_eq!(Half::of_month(7), Half::Second);
        assert_eq!(Half::of_month(12), Half::Second);
    }

    #[test]
    fn test_containing_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(Semester::containing(&date), Semester::new(2025, Half::First));

        let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        assert_eq!(Semester::containing(&date), Semester::new(2025, Half::Second));
    }

    #[test]
    fn test_advance_rolls_over_year() {
        let start = Semester::new(2025, Half::Second);
        assert_eq!(start.next(), Semester::new(2026, Half::First));
        assert_eq!(start.advance(0), start);
        assert_eq!(start.advance(3), Semester::new(2027, Half::First));
        assert_eq!(start.advance(4), Semester::new(2027, Half::Second));
    }

    #[test]
    fn test_parse_and_display() {
        let semester: Semester = "2025.2".parse().unwrap();
        assert_eq!(semester, Semester::new(2025, Half::Second));
        assert_eq!(semester.to_string(), "2025.2");

        assert!("2025.3".parse::<Semester>().is_err());
        assert!("2025".parse::<Semester>().is_err());
        assert!("abcd.1".parse::<Semester>().is_err());
    }

    #[test]
    fn test_serializes_as_token() {
        let semester = Semester::new(2025, Half::First);
        assert_eq!(serde_json::to_string(&semester).unwrap(), "\"2025.1\"");

        let parsed: Semester = serde_json::from_str("\"2026.2\"").unwrap();
        assert_eq!(parsed, Semester::new(2026, Half::Second));
        assert!(serde_json::from_str::<Semester>("\"2026.7\"").is_err());
    }
}
