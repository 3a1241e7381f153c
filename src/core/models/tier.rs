//! Recommendation tiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical outcome of the recommendation resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    /// Prerequisite met with a comfortable grade
    Ready,
    /// Allowed, but the student should expect to work hard
    Caution,
    /// Retake the prerequisite before moving on
    Repeat,
    /// Switch to a different course sequence
    PathwayChange,
    /// Consider an alternative course at the same level
    ConsiderAlt,
    /// Take a prerequisite the student has not yet covered
    TakePrereq,
    /// The student has not taken the prerequisite at all
    MissingPrereq,
    /// No table entry for this pairing; advising should review
    Review,
    /// Not enough information to decide
    Unknown,
}

impl Tier {
    /// Every tier, in display order
    pub const ALL: [Self; 9] = [
        Self::Ready,
        Self::Caution,
        Self::Repeat,
        Self::PathwayChange,
        Self::ConsiderAlt,
        Self::TakePrereq,
        Self::MissingPrereq,
        Self::Review,
        Self::Unknown,
    ];

    /// Stable kebab-case name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Caution => "caution",
            Self::Repeat => "repeat",
            Self::PathwayChange => "pathway-change",
            Self::ConsiderAlt => "consider-alt",
            Self::TakePrereq => "take-prereq",
            Self::MissingPrereq => "missing-prereq",
            Self::Review => "review",
            Self::Unknown => "unknown",
        }
    }

    /// Whether a threshold table may select this tier from a grade
    #[must_use]
    pub const fn is_grade_outcome(&self) -> bool {
        matches!(
            self,
            Self::Ready
                | Self::Caution
                | Self::Repeat
                | Self::PathwayChange
                | Self::ConsiderAlt
                | Self::TakePrereq
        )
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display color tag attached to a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Go ahead
    Green,
    /// Proceed carefully
    Yellow,
    /// Action needed first
    Orange,
    /// Do not proceed as planned
    Red,
    /// Informational alternative
    Blue,
    /// Undetermined
    Gray,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Gray => "gray",
        };
        f.write_str(name)
    }
}
