//! Knowledge-check scoring

use pathway_advisor::assessment::{
    AnswerLetter, LessonProfile, MemoryProgress, ProgressTracker, QuizAttempt, QuizResult,
};
use std::io::{self, Write};

/// Score `answers` (in question order) against a lesson's knowledge check
///
/// `pass_threshold` replaces the lesson's own pass mark when set.
///
/// # Errors
/// Returns a message for an unknown lesson or more answers than questions.
pub fn score(
    lesson_id: &str,
    answers: &[AnswerLetter],
    pass_threshold: Option<f32>,
    tracker: &mut dyn ProgressTracker,
) -> Result<QuizResult, String> {
    let lesson = LessonProfile::builtin(lesson_id).map_err(|e| e.to_string())?;
    let mut check = lesson.knowledge_check;
    if let Some(threshold) = pass_threshold {
        check.pass_threshold = threshold;
    }

    let given = check.answers_in_order(answers).map_err(|e| e.to_string())?;
    let mut attempt = QuizAttempt::new(&check);
    for (question_id, letter) in &given {
        attempt.answer(question_id, *letter).map_err(|e| e.to_string())?;
    }
    Ok(attempt.submit(tracker).clone())
}

/// Write per-question feedback and the overall result
///
/// # Errors
/// Returns any error from writing to `out`.
pub fn write_result(out: &mut impl Write, result: &QuizResult) -> io::Result<()> {
    for (n, item) in result.feedback.iter().enumerate() {
        let mark = if item.is_correct { "✓" } else { "✗" };
        let given = item.given.map_or_else(|| "-".to_string(), |g| g.to_string());
        writeln!(out, "{mark} {}. [{}] you: {given}, answer: {}", n + 1, item.id, item.correct)?;
        if !item.is_correct {
            writeln!(out, "     {}", item.explanation)?;
        }
    }
    writeln!(
        out,
        "\nScore: {}/{} ({:.0}%)  {}",
        result.correct,
        result.total,
        result.percentage,
        if result.passed { "PASSED" } else { "NOT PASSED" }
    )
}

/// Score the check and print feedback and lesson completion
///
/// # Errors
/// See [`score`].
pub fn run(lesson_id: &str, answers: &[AnswerLetter], pass_threshold: Option<f32>) -> Result<(), String> {
    let mut progress = MemoryProgress::new();
    let result = score(lesson_id, answers, pass_threshold, &mut progress)?;
    write_result(&mut io::stdout().lock(), &result).map_err(|e| e.to_string())?;
    if progress.is_completed(lesson_id) {
        println!("✓ Lesson {lesson_id} complete");
    } else {
        println!("✗ Lesson {lesson_id} not yet complete; review the explanations and try again");
    }
    Ok(())
}
