//! Course model

use super::Tier;
use serde::{Deserialize, Serialize};

/// One row of a grade-threshold table
///
/// A grade whose band lower bound is at least `min_grade` selects `tier`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdRule {
    /// Lowest band lower bound that qualifies for this rule
    pub min_grade: u8,

    /// Outcome tier for qualifying grades
    pub tier: Tier,

    /// Course ids suggested instead (e.g., Math 15 or Math 10-3)
    #[serde(default)]
    pub alternatives: Vec<String>,
}

/// A course accepted as prior completion for a goal course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrerequisiteOption {
    /// Id of the prerequisite course
    pub course: String,

    /// Threshold rules, best tier first, `min_grade` strictly decreasing
    #[serde(default)]
    pub thresholds: Vec<ThresholdRule>,

    /// Bespoke wording used when the student is currently taking this course
    #[serde(default)]
    pub currently_taking_note: Option<String>,
}

impl PrerequisiteOption {
    /// Select the rule matching a band lower bound
    ///
    /// # Returns
    /// The first rule whose `min_grade` is at or below `grade`, or `None`
    /// when the table is empty or `grade` is below every rule
    #[must_use]
    pub fn rule_for(&self, grade: u8) -> Option<&ThresholdRule> {
        self.thresholds.iter().find(|rule| grade >= rule.min_grade)
    }

    /// The minimum grade that yields `Tier::Ready`, if the table has one
    #[must_use]
    pub fn ready_threshold(&self) -> Option<u8> {
        self.thresholds
            .iter()
            .find(|rule| rule.tier == Tier::Ready)
            .map(|rule| rule.min_grade)
    }

    /// Check the strictly-decreasing invariant of the threshold table
    #[must_use]
    pub fn thresholds_are_ordered(&self) -> bool {
        self.thresholds
            .windows(2)
            .all(|pair| pair[0].min_grade > pair[1].min_grade)
    }

    /// Check that outcomes never improve as `min_grade` falls
    ///
    /// `Ready` may only lead the table, and no `Ready` or `Caution` rule may
    /// follow a rule with a worse outcome.
    #[must_use]
    pub fn tiers_worsen(&self) -> bool {
        self.thresholds
            .windows(2)
            .all(|pair| severity(pair[0].tier) <= severity(pair[1].tier))
    }
}

const fn severity(tier: Tier) -> u8 {
    match tier {
        Tier::Ready => 0,
        Tier::Caution => 1,
        _ => 2,
    }
}

/// Represents a course in a pathway catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course id, unique within a pathway (e.g., "math30-1")
    pub id: String,

    /// Display name (e.g., "Math 30-1")
    pub name: String,

    /// Short description shown when picking a goal course
    #[serde(default)]
    pub description: String,

    /// Ordered ids of the courses this course depends on
    #[serde(default)]
    pub prerequisites: Vec<String>,

    /// Accepted prerequisite options with their grade tables
    #[serde(default)]
    pub options: Vec<PrerequisiteOption>,
}

impl Course {
    /// Create a course with no prerequisites
    ///
    /// # Arguments
    /// * `id` - Course id
    /// * `name` - Display name
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            prerequisites: Vec::new(),
            options: Vec::new(),
        }
    }

    /// Whether the course can be taken without any prior course
    #[must_use]
    pub fn has_prerequisites(&self) -> bool {
        !self.prerequisites.is_empty()
    }

    /// Add a prerequisite by course id
    pub fn add_prerequisite(&mut self, prereq_id: impl Into<String>) {
        let prereq_id = prereq_id.into();
        if !self.prerequisites.contains(&prereq_id) {
            self.prerequisites.push(prereq_id);
        }
    }

    /// Look up the option for a given prerequisite course
    #[must_use]
    pub fn option_for(&self, prereq_id: &str) -> Option<&PrerequisiteOption> {
        self.options.iter().find(|opt| opt.course == prereq_id)
    }
}
