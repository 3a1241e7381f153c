//! Lesson profiles
//!
//! A profile bundles what the question generator and the knowledge check
//! need to know about one lesson: its id and title, the objectives fed into
//! the prompt, the static fallback question and the end-of-lesson check.

use super::question::GeneratedQuestion;
use super::scoring::KnowledgeCheck;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Built-in profile for Course 4, lesson 04
const CONDUCT_LESSON: &str = include_str!("../../../assets/lessons/04_conduct_expectations_responsibilities.toml");

/// Errors loading a lesson profile
#[derive(Debug, Error)]
pub enum LessonError {
    /// Malformed TOML or schema mismatch
    #[error("failed to parse lesson profile: {0}")]
    Parse(#[from] toml::de::Error),
    /// The knowledge check belongs to a different lesson
    #[error("knowledge check lesson '{check}' does not match profile '{lesson}'")]
    MismatchedCheck {
        /// Profile lesson id
        lesson: String,
        /// Check lesson id
        check: String,
    },
    /// No built-in lesson with this id
    #[error("unknown lesson '{0}'")]
    Unknown(String),
}

/// Static description of one lesson
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonProfile {
    /// Lesson id (e.g., `04_conduct_expectations_responsibilities`)
    pub id: String,
    /// Course the lesson belongs to
    pub course: String,
    /// Lesson title
    pub title: String,
    /// Topic used when a question request names none
    pub default_topic: String,
    /// Learning objectives, first one used as the default objective
    #[serde(default)]
    pub objectives: Vec<String>,
    /// Served whenever AI generation fails
    pub fallback: GeneratedQuestion,
    /// End-of-lesson knowledge check
    pub knowledge_check: KnowledgeCheck,
}

impl LessonProfile {
    /// Parse a profile from TOML
    ///
    /// # Errors
    /// Returns [`LessonError`] for malformed input or when the embedded
    /// check names another lesson.
    pub fn from_toml(toml_str: &str) -> Result<Self, LessonError> {
        let profile: Self = toml::from_str(toml_str)?;
        if profile.knowledge_check.lesson_id != profile.id {
            return Err(LessonError::MismatchedCheck {
                lesson: profile.id,
                check: profile.knowledge_check.lesson_id,
            });
        }
        Ok(profile)
    }

    /// Ids of the lessons compiled into the binary
    #[must_use]
    pub const fn builtin_ids() -> &'static [&'static str] {
        &["04_conduct_expectations_responsibilities"]
    }

    /// Load a built-in lesson by id
    ///
    /// # Errors
    /// Returns [`LessonError::Unknown`] for ids not in
    /// [`builtin_ids`](Self::builtin_ids).
    pub fn builtin(id: &str) -> Result<Self, LessonError> {
        match id {
            "04_conduct_expectations_responsibilities" => Self::from_toml(CONDUCT_LESSON),
            other => Err(LessonError::Unknown(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lessons_parse() {
        for id in LessonProfile::builtin_ids() {
            let lesson = LessonProfile::builtin(id).unwrap();
            assert_eq!(&lesson.id, id);
            assert!(!lesson.objectives.is_empty());
            assert!(!lesson.knowledge_check.questions.is_empty());
            for q in &lesson.knowledge_check.questions {
                assert_eq!(q.options.len(), 4, "question {} needs 4 options", q.id);
            }
        }
    }

    #[test]
    fn test_unknown_lesson() {
        assert!(matches!(
            LessonProfile::builtin("99_nothing"),
            Err(LessonError::Unknown(_))
        ));
    }

    #[test]
    fn test_mismatched_check_rejected() {
        let text = CONDUCT_LESSON.replacen(
            "lesson_id = \"04_conduct_expectations_responsibilities\"",
            "lesson_id = \"05_other\"",
            1,
        );
        assert!(matches!(
            LessonProfile::from_toml(&text),
            Err(LessonError::MismatchedCheck { .. })
        ));
    }
}
