//! Interactive step-by-step selection
//!
//! Reads one answer per line. At any prompt `back` returns to the previous
//! step, `reset` starts over and `quit` (or end of input) leaves.

use super::write_recommendation;
use pathway_advisor::advisor::{Recommendation, SelectionState, Step};
use pathway_advisor::catalog::{CourseGraph, NO_PREREQUISITE};
use pathway_advisor::models::{GradeBand, GradeReport, PrereqStatus};
use pathway_advisor::{debug, warn};
use std::io::{self, BufRead, Write};

/// What the user typed at a prompt
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Answer(String),
    Back,
    Reset,
    Quit,
}

fn read_input(input: &mut impl BufRead, out: &mut impl Write, prompt: &str) -> io::Result<Input> {
    write!(out, "{prompt} > ")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(Input::Quit);
    }
    let trimmed = line.trim();
    Ok(match trimmed.to_ascii_lowercase().as_str() {
        "back" | "b" => Input::Back,
        "reset" | "r" => Input::Reset,
        "quit" | "q" | "exit" => Input::Quit,
        _ => Input::Answer(trimmed.to_string()),
    })
}

/// Resolve an answer that is either a 1-based menu number or an id
fn pick<'a>(answer: &str, ids: &[&'a str]) -> Option<&'a str> {
    if let Ok(n) = answer.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| ids.get(i)).copied();
    }
    ids.iter().copied().find(|id| id.eq_ignore_ascii_case(answer))
}

/// Outcome of one prompt within the current step
enum Flow {
    Continue,
    Quit,
}

/// Drive a session until the user quits or input ends
///
/// # Returns
/// The last recommendation shown, if any.
///
/// # Errors
/// Returns I/O errors from reading `input` or writing `out`.
pub fn run_session(
    graph: &CourseGraph,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<Option<Recommendation>> {
    let mut state = SelectionState::new();
    let mut last = None;

    writeln!(out, "Pathway advisor. Type 'back', 'reset' or 'quit' at any prompt.")?;
    loop {
        let flow = match state.step {
            Step::Pathway => pathway_step(graph, &mut state, input, out)?,
            Step::Goal => goal_step(graph, &mut state, input, out)?,
            Step::Prereq => prereq_step(graph, &mut state, input, out)?,
            Step::Recommendation => {
                match state.recommendation(graph) {
                    Ok(rec) => {
                        write_recommendation(out, &rec)?;
                        last = Some(rec);
                    }
                    Err(e) => {
                        warn!("Could not resolve recommendation: {e}");
                        writeln!(out, "✗ {e}")?;
                    }
                }
                recommendation_step(&mut state, input, out)?
            }
        };
        if matches!(flow, Flow::Quit) {
            return Ok(last);
        }
    }
}

/// Apply `back`/`reset` to the state; `None` when the input was an answer
fn navigate(state: &mut SelectionState, input: &Input, out: &mut impl Write) -> io::Result<Option<Flow>> {
    match input {
        Input::Answer(_) => Ok(None),
        Input::Quit => Ok(Some(Flow::Quit)),
        Input::Reset => {
            state.reset();
            Ok(Some(Flow::Continue))
        }
        Input::Back => {
            if let Err(e) = state.back() {
                writeln!(out, "✗ {e}")?;
            }
            Ok(Some(Flow::Continue))
        }
    }
}

fn pathway_step(
    graph: &CourseGraph,
    state: &mut SelectionState,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<Flow> {
    writeln!(out, "\nChoose a pathway:")?;
    let ids: Vec<&str> = graph.pathways().map(|p| p.id.as_str()).collect();
    for (n, pathway) in graph.pathways().enumerate() {
        writeln!(out, "  {}. {}", n + 1, pathway.name)?;
    }
    let answer = read_input(input, out, "pathway")?;
    if let Some(flow) = navigate(state, &answer, out)? {
        return Ok(flow);
    }
    let Input::Answer(text) = answer else {
        return Ok(Flow::Continue);
    };
    match pick(&text, &ids) {
        Some(id) => {
            if let Err(e) = state.select_pathway(graph, id) {
                writeln!(out, "✗ {e}")?;
            }
        }
        None => writeln!(out, "✗ Unknown pathway '{text}'")?,
    }
    Ok(Flow::Continue)
}

fn goal_step(
    graph: &CourseGraph,
    state: &mut SelectionState,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<Flow> {
    let courses = graph
        .courses_in_order(&state.selected_pathway)
        .unwrap_or_default();
    writeln!(out, "\nWhich course do you want to take?")?;
    for (n, course) in courses.iter().enumerate() {
        writeln!(out, "  {}. {}", n + 1, course.name)?;
    }
    let ids: Vec<&str> = courses.iter().map(|c| c.id.as_str()).collect();

    let answer = read_input(input, out, "goal")?;
    if let Some(flow) = navigate(state, &answer, out)? {
        return Ok(flow);
    }
    let Input::Answer(text) = answer else {
        return Ok(Flow::Continue);
    };
    let Some(id) = pick(&text, &ids) else {
        writeln!(out, "✗ Unknown course '{text}'")?;
        return Ok(Flow::Continue);
    };
    if let Err(e) = state.select_goal_course(graph, id) {
        writeln!(out, "✗ {e}")?;
        return Ok(Flow::Continue);
    }

    // A goal with nothing to ask about goes straight to its recommendation
    let no_prereqs = graph
        .get_course(&state.selected_pathway, id)
        .is_ok_and(|c| !c.has_prerequisites());
    if no_prereqs {
        debug!("{id} has no prerequisites; skipping prerequisite step");
        if let Err(e) = state.select_prerequisite(NO_PREREQUISITE, PrereqStatus::NoPrereq, None) {
            writeln!(out, "✗ {e}")?;
        }
    }
    Ok(Flow::Continue)
}

fn prereq_step(
    graph: &CourseGraph,
    state: &mut SelectionState,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<Flow> {
    let pathway = state.selected_pathway.clone();
    let Ok(goal) = graph.get_course(&pathway, &state.selected_goal_course) else {
        state.reset();
        return Ok(Flow::Continue);
    };

    writeln!(out, "\nWhich prerequisite have you taken for {}?", goal.name)?;
    let mut ids: Vec<&str> = goal.prerequisites.iter().map(String::as_str).collect();
    for option in &goal.options {
        if !ids.contains(&option.course.as_str()) {
            ids.push(&option.course);
        }
    }
    ids.push(NO_PREREQUISITE);
    for (n, id) in ids.iter().enumerate() {
        let label = if *id == NO_PREREQUISITE {
            "None of these yet"
        } else {
            graph.display_name(&pathway, id)
        };
        writeln!(out, "  {}. {label}", n + 1)?;
    }

    let answer = read_input(input, out, "prerequisite")?;
    if let Some(flow) = navigate(state, &answer, out)? {
        return Ok(flow);
    }
    let Input::Answer(text) = answer else {
        return Ok(Flow::Continue);
    };
    let Some(prereq) = pick(&text, &ids) else {
        writeln!(out, "✗ Unknown course '{text}'")?;
        return Ok(Flow::Continue);
    };

    if prereq == NO_PREREQUISITE {
        if let Err(e) = state.select_prerequisite(prereq, PrereqStatus::NoPrereq, None) {
            writeln!(out, "✗ {e}")?;
        }
        return Ok(Flow::Continue);
    }

    writeln!(out, "\nHave you finished {}?", graph.display_name(&pathway, prereq))?;
    writeln!(out, "  1. Finished\n  2. Currently taking")?;
    let answer = read_input(input, out, "status")?;
    if let Some(flow) = navigate(state, &answer, out)? {
        return Ok(flow);
    }
    let Input::Answer(text) = answer else {
        return Ok(Flow::Continue);
    };
    let status = match text.as_str() {
        "1" => PrereqStatus::Finished,
        "2" => PrereqStatus::CurrentlyTaking,
        other => match other.parse::<PrereqStatus>() {
            Ok(status) => status,
            Err(e) => {
                writeln!(out, "✗ {e}")?;
                return Ok(Flow::Continue);
            }
        },
    };

    let grade = if status == PrereqStatus::Finished {
        writeln!(out, "\nWhat was your final grade?")?;
        for (n, band) in GradeBand::STANDARD.iter().enumerate() {
            writeln!(out, "  {}. {band}", n + 1)?;
        }
        let answer = read_input(input, out, "grade")?;
        if let Some(flow) = navigate(state, &answer, out)? {
            return Ok(flow);
        }
        let Input::Answer(text) = answer else {
            return Ok(Flow::Continue);
        };
        let band = text
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| GradeBand::STANDARD.get(i).copied())
            .map_or_else(|| text.parse::<GradeBand>(), Ok);
        match band {
            Ok(band) => Some(GradeReport::Band(band)),
            Err(e) => {
                writeln!(out, "✗ {e}")?;
                return Ok(Flow::Continue);
            }
        }
    } else {
        Some(GradeReport::InProgress)
    };

    if let Err(e) = state.select_prerequisite(prereq, status, grade) {
        writeln!(out, "✗ {e}")?;
    }
    Ok(Flow::Continue)
}

fn recommendation_step(state: &mut SelectionState, input: &mut impl BufRead, out: &mut impl Write) -> io::Result<Flow> {
    writeln!(out, "\nType 'reset' to start over or 'quit' to leave.")?;
    loop {
        let answer = read_input(input, out, "next")?;
        match answer {
            Input::Answer(_) => writeln!(out, "✗ Type 'reset' or 'quit'")?,
            Input::Back => {
                if let Err(e) = state.back() {
                    writeln!(out, "✗ {e}")?;
                }
            }
            other => return Ok(navigate(state, &other, out)?.unwrap_or(Flow::Continue)),
        }
    }
}

/// Run the wizard on stdin/stdout
///
/// # Errors
/// Returns a message if the terminal cannot be read or written.
pub fn run(graph: &CourseGraph) -> Result<(), String> {
    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();
    run_session(graph, &mut input, &mut out)
        .map(|_| ())
        .map_err(|e| e.to_string())
}
