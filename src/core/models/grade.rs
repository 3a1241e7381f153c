//! Grade bands and prerequisite status
//!
//! The recommendation UI reports grades as one of a fixed set of labels
//! (`"65-69%"`, `"Below 40%"`, ...). Labels are parsed once into a
//! [`GradeBand`] at the boundary; nothing downstream re-reads display text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error produced when a grade label or status name cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradeParseError {
    /// The label does not look like `"N-M%"`, `"Below N%"` or `"in-progress"`
    #[error("unrecognized grade band '{0}'")]
    Unrecognized(String),
    /// The bounds parsed but do not form a valid percentage range
    #[error("invalid grade range {min}-{max}")]
    InvalidRange {
        /// Lower bound as written
        min: u16,
        /// Upper bound as written
        max: u16,
    },
    /// Unknown prerequisite status name
    #[error("unknown prerequisite status '{0}' (expected finished, currently-taking or no-prereq)")]
    UnknownStatus(String),
}

/// An inclusive percentage range reported by a student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GradeBand {
    /// Lowest grade in the band
    pub min: u8,
    /// Highest grade in the band
    pub max: u8,
}

impl GradeBand {
    /// The eight bands offered by the recommendation form, best first
    pub const STANDARD: [Self; 8] = [
        Self::new(90, 100),
        Self::new(80, 89),
        Self::new(70, 79),
        Self::new(65, 69),
        Self::new(60, 64),
        Self::new(50, 59),
        Self::new(40, 49),
        Self::new(0, 39),
    ];

    /// Create a band from inclusive bounds
    #[must_use]
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// True when the band has no lower bound (rendered as `"Below N%"`)
    #[must_use]
    pub const fn is_open_below(&self) -> bool {
        self.min == 0 && self.max < 100
    }

    /// Whether a grade falls inside this band
    #[must_use]
    pub const fn contains(&self, grade: u8) -> bool {
        grade >= self.min && grade <= self.max
    }
}

impl fmt::Display for GradeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_open_below() {
            write!(f, "Below {}%", u16::from(self.max) + 1)
        } else {
            write!(f, "{}-{}%", self.min, self.max)
        }
    }
}

fn parse_percent(raw: &str, label: &str) -> Result<u16, GradeParseError> {
    raw.trim()
        .trim_end_matches('%')
        .trim()
        .parse::<u16>()
        .map_err(|_| GradeParseError::Unrecognized(label.to_string()))
}

impl FromStr for GradeBand {
    type Err = GradeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        let lower = label.to_ascii_lowercase();

        let (min, max) = if let Some(rest) = lower.strip_prefix("below") {
            let bound = parse_percent(rest, label)?;
            if bound == 0 || bound > 100 {
                return Err(GradeParseError::InvalidRange { min: 0, max: bound });
            }
            (0, bound - 1)
        } else if let Some((lo, hi)) = lower.split_once('-') {
            (parse_percent(lo, label)?, parse_percent(hi, label)?)
        } else {
            return Err(GradeParseError::Unrecognized(label.to_string()));
        };

        if min > max || max > 100 {
            return Err(GradeParseError::InvalidRange { min, max });
        }

        // Both bounds are <= 100 at this point
        Ok(Self::new(
            u8::try_from(min).unwrap_or(u8::MAX),
            u8::try_from(max).unwrap_or(u8::MAX),
        ))
    }
}

/// What the student reported about their prerequisite grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradeReport {
    /// Still taking the course; no final grade yet
    InProgress,
    /// Finished with a grade in this band
    Band(GradeBand),
}

impl GradeReport {
    /// The band, if a final grade was reported
    #[must_use]
    pub const fn band(&self) -> Option<GradeBand> {
        match self {
            Self::InProgress => None,
            Self::Band(band) => Some(*band),
        }
    }
}

impl fmt::Display for GradeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => write!(f, "in-progress"),
            Self::Band(band) => band.fmt(f),
        }
    }
}

impl FromStr for GradeReport {
    type Err = GradeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("in-progress") || trimmed.eq_ignore_ascii_case("in progress") {
            Ok(Self::InProgress)
        } else {
            trimmed.parse().map(Self::Band)
        }
    }
}

/// Where the student stands with a prerequisite course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrereqStatus {
    /// Completed with a final grade
    Finished,
    /// Enrolled this term
    CurrentlyTaking,
    /// Has not taken the prerequisite
    NoPrereq,
}

impl PrereqStatus {
    /// Wire/CLI name of the status
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Finished => "finished",
            Self::CurrentlyTaking => "currently-taking",
            Self::NoPrereq => "no-prereq",
        }
    }
}

impl fmt::Display for PrereqStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrereqStatus {
    type Err = GradeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "finished" | "completed" => Ok(Self::Finished),
            "currently-taking" | "taking" | "in-progress" => Ok(Self::CurrentlyTaking),
            "no-prereq" | "none" => Ok(Self::NoPrereq),
            other => Err(GradeParseError::UnknownStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_closed_band() {
        let band: GradeBand = "65-69%".parse().unwrap();
        assert_eq!(band, GradeBand::new(65, 69));
        assert_eq!(band.to_string(), "65-69%");
    }

    #[test]
    fn test_parse_open_band() {
        let band: GradeBand = "Below 40%".parse().unwrap();
        assert_eq!(band.min, 0);
        assert_eq!(band.max, 39);
        assert!(band.is_open_below());
        assert_eq!(band.to_string(), "Below 40%");
    }

    #[test]
    fn test_standard_labels_parse_back() {
        for band in GradeBand::STANDARD {
            let parsed: GradeBand = band.to_string().parse().unwrap();
            assert_eq!(parsed, band);
        }
        assert_eq!(GradeBand::STANDARD[0].to_string(), "90-100%");
    }

    #[test]
    fn test_standard_bands_cover_scale() {
        for grade in 0..=100u8 {
            let hits = GradeBand::STANDARD
                .iter()
                .filter(|b| b.contains(grade))
                .count();
            assert_eq!(hits, 1, "grade {grade} should fall in exactly one band");
        }
    }

    #[test]
    fn test_rejects_garbage() {
        assert!("ninety".parse::<GradeBand>().is_err());
        assert!("70-60%".parse::<GradeBand>().is_err());
        assert!("90-120%".parse::<GradeBand>().is_err());
        assert!("Below 0%".parse::<GradeBand>().is_err());
        assert_eq!(
            "Below 101%".parse::<GradeBand>(),
            Err(GradeParseError::InvalidRange { min: 0, max: 101 })
        );
        let top: GradeBand = "Below 100%".parse().unwrap();
        assert_eq!(top.to_string(), "Below 100%");
    }

    #[test]
    fn test_grade_report() {
        assert_eq!(
            "in-progress".parse::<GradeReport>().unwrap(),
            GradeReport::InProgress
        );
        let report: GradeReport = "70-79%".parse().unwrap();
        assert_eq!(report.band(), Some(GradeBand::new(70, 79)));
        assert_eq!(GradeReport::InProgress.band(), None);
    }

    #[test]
    fn test_status_names() {
        assert_eq!(
            "currently-taking".parse::<PrereqStatus>().unwrap(),
            PrereqStatus::CurrentlyTaking
        );
        assert_eq!("no-prereq".parse::<PrereqStatus>().unwrap(), PrereqStatus::NoPrereq);
        assert_eq!(PrereqStatus::Finished.to_string(), "finished");
        assert!("maybe".parse::<PrereqStatus>().is_err());
    }
}
