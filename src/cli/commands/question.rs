//! Practice question generation

use pathway_advisor::assessment::{
    GeminiClient, LessonProfile, QuestionGenerator, QuestionModel, QuestionRequest, Unavailable,
};
use pathway_advisor::config::AiConfig;
use pathway_advisor::warn;

/// Build the model client for the `[ai]` section
///
/// A client that cannot be constructed is replaced by [`Unavailable`], so the
/// command still answers with the fallback question.
fn model_for(ai: &AiConfig) -> Box<dyn QuestionModel> {
    match GeminiClient::from_config(ai) {
        Ok(client) => Box::new(client),
        Err(e) => {
            warn!("AI client unavailable: {e}");
            Box::new(Unavailable(e.to_string()))
        }
    }
}

/// Generate one question and print the response as JSON
///
/// # Errors
/// Returns a message for an unknown lesson id. Generation failures are not
/// errors; they produce the fallback question.
pub fn run(ai: &AiConfig, lesson_id: &str, request: &QuestionRequest) -> Result<(), String> {
    let lesson = LessonProfile::builtin(lesson_id).map_err(|e| e.to_string())?;
    let generator = QuestionGenerator::new(lesson, model_for(ai));
    let response = generator.generate(request);
    if response.is_degraded() {
        eprintln!("✗ AI generation unavailable; showing the lesson's built-in question");
    }
    let text = serde_json::to_string_pretty(&response).map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}
