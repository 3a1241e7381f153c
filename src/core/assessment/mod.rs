//! Lesson assessment: knowledge-check scoring and AI question generation

pub mod gemini;
pub mod generator;
pub mod lesson;
pub mod question;
pub mod scoring;

pub use gemini::GeminiClient;
pub use generator::{
    GeneratedBy, GenerationError, QuestionGenerator, QuestionModel, QuestionRequest, QuestionResponse,
    Unavailable,
};
pub use lesson::{LessonError, LessonProfile};
pub use question::{AnswerLetter, GeneratedQuestion};
pub use scoring::{
    CheckQuestion, KnowledgeCheck, LessonProgress, MemoryProgress, ProgressTracker, QuizAttempt, QuizError, QuizResult,
};
