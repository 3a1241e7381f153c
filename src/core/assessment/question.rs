//! Multiple-choice question types shared by knowledge checks and the
//! question generator

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::generator::GenerationError;

/// Answer key letter for a four-option question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerLetter {
    /// First option
    A,
    /// Second option
    B,
    /// Third option
    C,
    /// Fourth option
    D,
}

impl AnswerLetter {
    /// All letters in option order
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Zero-based option index
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }

    /// Letter for a zero-based option index
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for AnswerLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        };
        f.write_str(letter)
    }
}

impl FromStr for AnswerLetter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            other => Err(format!("'{other}' is not an answer letter (A-D)")),
        }
    }
}

/// A validated multiple-choice question as returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    /// Question stem
    pub question: String,
    /// Exactly four answer options, in A-D order
    pub options: [String; 4],
    /// Correct option
    pub correct_answer: AnswerLetter,
    /// Why the correct option is correct
    pub explanation: String,
    /// Topic category
    pub category: String,
    /// Difficulty label
    pub difficulty: String,
    /// Learning objective the question assesses
    pub learning_objective: String,
}

/// Loosely-typed question as produced by the model, before validation
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawQuestion {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    correct_answer: Option<String>,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    learning_objective: Option<String>,
}

fn required(value: Option<String>, field: &'static str) -> Result<String, GenerationError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(GenerationError::MissingField(field))
}

impl RawQuestion {
    /// Check required fields, option count and answer letter
    ///
    /// `category` and `difficulty` fall back to the given defaults when the
    /// model leaves them out.
    pub(crate) fn validate(
        self,
        default_category: &str,
        default_difficulty: &str,
        default_objective: &str,
    ) -> Result<GeneratedQuestion, GenerationError> {
        let question = required(self.question, "question")?;
        let options = self.options.ok_or(GenerationError::MissingField("options"))?;
        let options: [String; 4] = options
            .try_into()
            .map_err(|opts: Vec<String>| GenerationError::OptionCount(opts.len()))?;
        if options.iter().any(|o| o.trim().is_empty()) {
            return Err(GenerationError::MissingField("options"));
        }
        let answer = required(self.correct_answer, "correctAnswer")?;
        let correct_answer = answer
            .parse::<AnswerLetter>()
            .map_err(|_| GenerationError::InvalidAnswer(answer.clone()))?;
        let explanation = required(self.explanation, "explanation")?;

        Ok(GeneratedQuestion {
            question,
            options,
            correct_answer,
            explanation,
            category: self
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| default_category.to_string()),
            difficulty: self
                .difficulty
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| default_difficulty.to_string()),
            learning_objective: self
                .learning_objective
                .filter(|o| !o.trim().is_empty())
                .unwrap_or_else(|| default_objective.to_string()),
        })
    }
}
