//! Knowledge-check scoring and progress tracking
//!
//! Each lesson ends with a short multiple-choice check. Scoring is all or
//! nothing per question; a percentage at or above the check's threshold
//! marks the lesson completed for the progress tracker.

use super::question::AnswerLetter;
use crate::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Pass mark used when a check does not set its own
pub const DEFAULT_PASS_THRESHOLD: f32 = 70.0;

const fn default_pass_threshold() -> f32 {
    DEFAULT_PASS_THRESHOLD
}

/// Errors raised while answering a check
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    /// The question id is not part of this check
    #[error("unknown question '{0}'")]
    UnknownQuestion(String),
    /// Answers are locked once the attempt is submitted
    #[error("attempt already submitted; reset to try again")]
    AlreadySubmitted,
    /// More answers than questions were supplied
    #[error("{given} answers supplied for {total} questions")]
    TooManyAnswers {
        /// Answers supplied
        given: usize,
        /// Questions in the check
        total: usize,
    },
}

/// One knowledge-check question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckQuestion {
    /// Stable id within the check
    pub id: String,
    /// Question stem
    pub prompt: String,
    /// Answer options in A-D order
    pub options: Vec<String>,
    /// Correct option
    pub correct: AnswerLetter,
    /// Shown after submission
    #[serde(default)]
    pub explanation: String,
}

/// Per-question feedback shown after submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionFeedback {
    /// Question id
    pub id: String,
    /// What the student picked, if anything
    pub given: Option<AnswerLetter>,
    /// The correct option
    pub correct: AnswerLetter,
    /// Whether `given` matched `correct`
    pub is_correct: bool,
    /// Explanation text
    pub explanation: String,
}

/// Result of scoring a set of answers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizResult {
    /// Questions answered correctly
    pub correct: usize,
    /// Questions in the check
    pub total: usize,
    /// `correct / total` as a percentage
    pub percentage: f32,
    /// Whether the percentage meets the pass threshold
    pub passed: bool,
    /// Feedback per question, in check order
    pub feedback: Vec<QuestionFeedback>,
}

/// A lesson's knowledge check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeCheck {
    /// Lesson the check belongs to
    pub lesson_id: String,
    /// Display title
    pub title: String,
    /// Percentage needed to complete the lesson
    #[serde(default = "default_pass_threshold")]
    pub pass_threshold: f32,
    /// Questions in presentation order
    pub questions: Vec<CheckQuestion>,
}

impl KnowledgeCheck {
    /// Find a question by id
    #[must_use]
    pub fn question(&self, id: &str) -> Option<&CheckQuestion> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Map answers given in question order onto question ids
    ///
    /// # Errors
    /// Returns [`QuizError::TooManyAnswers`] if there are more answers than
    /// questions. Fewer answers leave the remaining questions unanswered.
    pub fn answers_in_order(&self, letters: &[AnswerLetter]) -> Result<HashMap<String, AnswerLetter>, QuizError> {
        if letters.len() > self.questions.len() {
            return Err(QuizError::TooManyAnswers {
                given: letters.len(),
                total: self.questions.len(),
            });
        }
        Ok(self
            .questions
            .iter()
            .zip(letters)
            .map(|(q, letter)| (q.id.clone(), *letter))
            .collect())
    }

    /// Score answers against the key
    ///
    /// Unanswered questions count as wrong. An empty check scores 0% and
    /// never passes.
    #[must_use]
    pub fn score(&self, answers: &HashMap<String, AnswerLetter>) -> QuizResult {
        let feedback: Vec<QuestionFeedback> = self
            .questions
            .iter()
            .map(|q| {
                let given = answers.get(&q.id).copied();
                QuestionFeedback {
                    id: q.id.clone(),
                    given,
                    correct: q.correct,
                    is_correct: given == Some(q.correct),
                    explanation: q.explanation.clone(),
                }
            })
            .collect();

        let total = feedback.len();
        let correct = feedback.iter().filter(|f| f.is_correct).count();
        #[allow(clippy::cast_precision_loss)]
        let percentage = if total == 0 {
            0.0
        } else {
            correct as f32 * 100.0 / total as f32
        };
        let passed = total > 0 && percentage >= self.pass_threshold;

        debug!(
            "{}: {correct}/{total} ({percentage:.0}%), pass mark {:.0}%",
            self.lesson_id, self.pass_threshold
        );

        QuizResult {
            correct,
            total,
            percentage,
            passed,
            feedback,
        }
    }
}

/// Receives lesson completion updates
pub trait ProgressTracker {
    /// Record a scored attempt for a lesson
    fn record(&mut self, lesson_id: &str, result: &QuizResult);

    /// Whether the lesson has been completed
    fn is_completed(&self, lesson_id: &str) -> bool;
}

/// Progress for one lesson
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LessonProgress {
    /// Submitted attempts
    pub attempts: u32,
    /// Best percentage so far
    pub best_percentage: f32,
    /// Set once any attempt passes; never cleared
    pub completed: bool,
}

/// In-memory tracker for a single session
#[derive(Debug, Clone, Default)]
pub struct MemoryProgress {
    lessons: HashMap<String, LessonProgress>,
}

impl MemoryProgress {
    /// Create an empty tracker
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Progress for a lesson, if any attempt was recorded
    #[must_use]
    pub fn get(&self, lesson_id: &str) -> Option<&LessonProgress> {
        self.lessons.get(lesson_id)
    }
}

impl ProgressTracker for MemoryProgress {
    fn record(&mut self, lesson_id: &str, result: &QuizResult) {
        let entry = self.lessons.entry(lesson_id.to_string()).or_default();
        entry.attempts += 1;
        entry.best_percentage = entry.best_percentage.max(result.percentage);
        if result.passed && !entry.completed {
            entry.completed = true;
            info!("Lesson {lesson_id} completed ({:.0}%)", result.percentage);
        }
    }

    fn is_completed(&self, lesson_id: &str) -> bool {
        self.lessons.get(lesson_id).is_some_and(|p| p.completed)
    }
}

/// One attempt at a knowledge check: answer, submit for feedback, reset
#[derive(Debug, Clone)]
pub struct QuizAttempt<'a> {
    check: &'a KnowledgeCheck,
    answers: HashMap<String, AnswerLetter>,
    result: Option<QuizResult>,
}

impl<'a> QuizAttempt<'a> {
    /// Start a blank attempt
    #[must_use]
    pub fn new(check: &'a KnowledgeCheck) -> Self {
        Self {
            check,
            answers: HashMap::new(),
            result: None,
        }
    }

    /// Select (or change) the answer for a question
    ///
    /// # Errors
    /// Fails for an unknown question id or after submission.
    pub fn answer(&mut self, question_id: &str, letter: AnswerLetter) -> Result<(), QuizError> {
        if self.result.is_some() {
            return Err(QuizError::AlreadySubmitted);
        }
        if self.check.question(question_id).is_none() {
            return Err(QuizError::UnknownQuestion(question_id.to_string()));
        }
        self.answers.insert(question_id.to_string(), letter);
        Ok(())
    }

    /// Number of questions answered so far
    #[must_use]
    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    /// Score the attempt, report it to the tracker and keep the feedback
    ///
    /// Submitting twice returns the stored result without reporting again.
    pub fn submit(&mut self, tracker: &mut dyn ProgressTracker) -> &QuizResult {
        let check = self.check;
        let answers = &self.answers;
        self.result.get_or_insert_with(|| {
            let result = check.score(answers);
            tracker.record(&check.lesson_id, &result);
            result
        })
    }

    /// Feedback from the last submission, if submitted
    #[must_use]
    pub const fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    /// Clear answers and feedback for another try
    pub fn reset(&mut self) {
        self.answers.clear();
        self.result = None;
    }
}
