//! One-shot recommendation

use super::write_recommendation;
use pathway_advisor::advisor::{Recommendation, SelectionState, TransitionError};
use pathway_advisor::catalog::CourseGraph;
use pathway_advisor::models::{GradeReport, PrereqStatus};
use pathway_advisor::verbose;
use std::io;

/// The student's answers, as given on the command line
#[derive(Debug, Clone)]
pub struct AdviseArgs<'a> {
    /// Pathway id
    pub pathway: &'a str,
    /// Goal course id
    pub goal: &'a str,
    /// Prerequisite course id, or `none`
    pub prereq: &'a str,
    /// Status in the prerequisite
    pub status: PrereqStatus,
    /// Reported grade band
    pub grade: Option<GradeReport>,
}

/// Walk the selection steps with the given answers and resolve
///
/// # Errors
/// Returns [`TransitionError`] for unknown pathway or goal ids.
pub fn advise(graph: &CourseGraph, args: &AdviseArgs<'_>) -> Result<Recommendation, TransitionError> {
    let mut state = SelectionState::new();
    state.select_pathway(graph, args.pathway)?;
    state.select_goal_course(graph, args.goal)?;
    state.select_prerequisite(args.prereq, args.status, args.grade)?;
    verbose!(
        "Selection: {} / {} / {} ({})",
        state.selected_pathway,
        state.selected_goal_course,
        args.prereq,
        args.status
    );
    state.recommendation(graph)
}

/// Resolve and print a recommendation
///
/// # Errors
/// Returns a message for unknown ids or output failures.
pub fn run(graph: &CourseGraph, args: &AdviseArgs<'_>, json: bool) -> Result<(), String> {
    let rec = advise(graph, args).map_err(|e| e.to_string())?;
    if json {
        let text = serde_json::to_string_pretty(&rec).map_err(|e| e.to_string())?;
        println!("{text}");
        Ok(())
    } else {
        write_recommendation(&mut io::stdout().lock(), &rec).map_err(|e| e.to_string())
    }
}
