//! AI-backed question generation with a static fallback
//!
//! [`QuestionGenerator::generate`] never fails: if the model call errors, or
//! its output cannot be parsed and validated, the lesson's fallback question
//! is returned instead. The response's [`GeneratedBy`] tag tells the caller
//! which path produced the question.

use super::lesson::LessonProfile;
use super::question::{GeneratedQuestion, RawQuestion};
use crate::{debug, info, warn};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use thiserror::Error;

/// Default difficulty when the request leaves it out
pub const DEFAULT_DIFFICULTY: &str = "intermediate";

/// Default question type when the request leaves it out
pub const DEFAULT_QUESTION_TYPE: &str = "multiple-choice";

/// Reasons a model-generated question was rejected
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No API key is configured for the model client
    #[error("model client is not configured: {0}")]
    NotConfigured(String),
    /// Transport failure (DNS, connect, timeout)
    #[error("network error: {0}")]
    Network(String),
    /// The API answered with a non-success status
    #[error("API returned status {status}: {message}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },
    /// The API response had no text candidate
    #[error("model returned no content")]
    EmptyResponse,
    /// The model text is not a JSON question object
    #[error("failed to parse model output: {0}")]
    Parse(String),
    /// A required field is missing or blank
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    /// The question does not have exactly four options
    #[error("expected 4 options, got {0}")]
    OptionCount(usize),
    /// The answer key is not A, B, C or D
    #[error("invalid correct answer '{0}'")]
    InvalidAnswer(String),
}

/// A text-generation backend
pub trait QuestionModel: Send + Sync {
    /// Send a prompt and return the model's raw text
    ///
    /// # Errors
    /// Returns a [`GenerationError`] for transport, API or empty-response
    /// failures.
    fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

impl<M: QuestionModel + ?Sized> QuestionModel for Box<M> {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        (**self).generate(prompt)
    }
}

impl<M: QuestionModel + ?Sized> QuestionModel for &M {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        (**self).generate(prompt)
    }
}

/// A model that always fails; every request gets the fallback question
#[derive(Debug, Clone)]
pub struct Unavailable(pub String);

impl QuestionModel for Unavailable {
    fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::NotConfigured(self.0.clone()))
    }
}

/// Caller-supplied knobs; every field is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRequest {
    /// Difficulty label (defaults to `intermediate`)
    #[serde(default)]
    pub difficulty: Option<String>,
    /// Question type (defaults to `multiple-choice`)
    #[serde(default)]
    pub question_type: Option<String>,
    /// Topic (defaults to the lesson's default topic)
    #[serde(default)]
    pub topic: Option<String>,
}

/// Which path produced a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneratedBy {
    /// Produced and validated from model output
    #[serde(rename = "AI")]
    Ai,
    /// The lesson's static fallback question
    Fallback,
}

/// Response returned to callers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    /// Always `true`; failures are absorbed by the fallback
    pub success: bool,
    /// The question
    pub question: GeneratedQuestion,
    /// When the response was produced
    pub timestamp: DateTime<Utc>,
    /// Model or fallback
    pub generated_by: GeneratedBy,
    /// Lesson the question belongs to
    pub lesson_id: String,
}

impl QuestionResponse {
    /// True when the fallback question was served
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.generated_by == GeneratedBy::Fallback
    }
}

/// Resolved request values after defaults are applied
struct Resolved<'a> {
    difficulty: &'a str,
    question_type: &'a str,
    topic: &'a str,
}

/// Generates questions for one lesson through a [`QuestionModel`]
pub struct QuestionGenerator<M> {
    lesson: LessonProfile,
    model: M,
}

impl<M: QuestionModel> QuestionGenerator<M> {
    /// Create a generator for a lesson
    #[must_use]
    pub const fn new(lesson: LessonProfile, model: M) -> Self {
        Self { lesson, model }
    }

    /// The lesson this generator serves
    #[must_use]
    pub const fn lesson(&self) -> &LessonProfile {
        &self.lesson
    }

    /// Produce a question, falling back to the lesson's static question on
    /// any failure
    #[must_use]
    pub fn generate(&self, request: &QuestionRequest) -> QuestionResponse {
        let resolved = self.resolve(request);
        let prompt = self.build_prompt(&resolved);
        debug!(
            "Requesting {} {} question on '{}' for {}",
            resolved.difficulty, resolved.question_type, resolved.topic, self.lesson.id
        );

        let (question, generated_by) = match self.try_generate(&prompt, &resolved) {
            Ok(question) => {
                info!("AI question generated for {}", self.lesson.id);
                (question, GeneratedBy::Ai)
            }
            Err(err) => {
                warn!("AI question generation failed for {}: {err}; using fallback", self.lesson.id);
                (self.lesson.fallback.clone(), GeneratedBy::Fallback)
            }
        };

        QuestionResponse {
            success: true,
            question,
            timestamp: Utc::now(),
            generated_by,
            lesson_id: self.lesson.id.clone(),
        }
    }

    fn resolve<'a>(&'a self, request: &'a QuestionRequest) -> Resolved<'a> {
        Resolved {
            difficulty: request.difficulty.as_deref().unwrap_or(DEFAULT_DIFFICULTY),
            question_type: request.question_type.as_deref().unwrap_or(DEFAULT_QUESTION_TYPE),
            topic: request.topic.as_deref().unwrap_or(&self.lesson.default_topic),
        }
    }

    fn try_generate(&self, prompt: &str, resolved: &Resolved<'_>) -> Result<GeneratedQuestion, GenerationError> {
        let text = self.model.generate(prompt)?;
        parse_question(
            &text,
            resolved.topic,
            resolved.difficulty,
            self.lesson.objectives.first().map_or("", String::as_str),
        )
    }

    fn build_prompt(&self, resolved: &Resolved<'_>) -> String {
        let mut prompt = format!(
            "You are writing assessment questions for the lesson \"{}\" in {}.\n\n",
            self.lesson.title, self.lesson.course
        );
        if !self.lesson.objectives.is_empty() {
            prompt.push_str("Learning objectives:\n");
            for objective in &self.lesson.objectives {
                let _ = writeln!(prompt, "- {objective}");
            }
            prompt.push('\n');
        }
        let _ = writeln!(
            prompt,
            "Write one {} {} question about: {}.",
            resolved.difficulty, resolved.question_type, resolved.topic
        );
        prompt.push_str(
            "Respond with a single JSON object and nothing else, using exactly these fields:\n\
             {\"question\": string, \"options\": [4 strings], \"correctAnswer\": \"A\"|\"B\"|\"C\"|\"D\", \
             \"explanation\": string, \"category\": string, \"difficulty\": string, \"learningObjective\": string}\n",
        );
        prompt
    }
}

/// Remove a Markdown code fence the model may wrap its JSON in
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the opening fence line
    let body = rest.split_once('\n').map_or(rest, |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Parse and validate model output into a question
///
/// # Errors
/// Returns [`GenerationError::Parse`] for non-JSON text and the validation
/// variants for structurally wrong questions.
pub fn parse_question(
    text: &str,
    default_category: &str,
    default_difficulty: &str,
    default_objective: &str,
) -> Result<GeneratedQuestion, GenerationError> {
    let raw: RawQuestion =
        serde_json::from_str(strip_code_fence(text)).map_err(|e| GenerationError::Parse(e.to_string()))?;
    raw.validate(default_category, default_difficulty, default_objective)
}
