//! Integration tests for the selection state machine

use pathway_advisor::advisor::{SelectionState, Step, TransitionError};
use pathway_advisor::catalog::CourseGraph;
use pathway_advisor::models::{GradeReport, PrereqStatus, Tier};

fn at_recommendation(graph: &CourseGraph) -> SelectionState {
    let mut state = SelectionState::new();
    state.select_pathway(graph, "academic").expect("pathway");
    state.select_goal_course(graph, "math20-1").expect("goal");
    state
        .select_prerequisite("math10c", PrereqStatus::Finished, Some("65-69%".parse().expect("band")))
        .expect("prereq");
    state
}

#[test]
fn only_select_pathway_leaves_the_pathway_step() {
    let graph = CourseGraph::builtin();
    let mut state = SelectionState::new();

    assert!(matches!(
        state.select_goal_course(&graph, "math20-1"),
        Err(TransitionError::WrongStep { step: Step::Pathway, .. })
    ));
    assert!(matches!(
        state.select_prerequisite("math10c", PrereqStatus::Finished, None),
        Err(TransitionError::WrongStep { step: Step::Pathway, .. })
    ));
    assert!(matches!(state.back(), Err(TransitionError::NoBackTransition(Step::Pathway))));
    assert!(state.recommendation(&graph).is_err());
    assert_eq!(state, SelectionState::new());

    state.select_pathway(&graph, "applied").expect("pathway");
    assert_eq!(state.step, Step::Goal);
}

#[test]
fn reset_from_every_step_restores_the_initial_state() {
    let graph = CourseGraph::builtin();

    let mut at_goal = SelectionState::new();
    at_goal.select_pathway(&graph, "physics").expect("pathway");

    let mut at_prereq = at_goal.clone();
    at_prereq.select_goal_course(&graph, "physics20").expect("goal");

    for mut state in [SelectionState::new(), at_goal, at_prereq, at_recommendation(&graph)] {
        state.reset();
        assert_eq!(state, SelectionState::new());
        assert_eq!(state.step, Step::Pathway);
        assert!(state.selected_pathway.is_empty());
        assert!(state.selected_goal_course.is_empty());
        assert!(state.prerequisite_status.is_empty());
    }
}

#[test]
fn happy_path_resolves_fresh_each_time() {
    let graph = CourseGraph::builtin();
    let state = at_recommendation(&graph);

    let first = state.recommendation(&graph).expect("recommendation");
    let second = state.recommendation(&graph).expect("recommendation");
    assert_eq!(first.tier, Tier::Ready);
    assert_eq!(first, second);
}

#[test]
fn back_steps_clear_the_pick_being_revisited() {
    let graph = CourseGraph::builtin();
    let mut state = SelectionState::new();
    state.select_pathway(&graph, "academic").expect("pathway");
    state.select_goal_course(&graph, "math31").expect("goal");

    state.back().expect("prereq -> goal");
    assert_eq!(state.step, Step::Goal);
    assert!(state.selected_goal_course.is_empty());
    assert_eq!(state.selected_pathway, "academic");

    state.back().expect("goal -> pathway");
    assert_eq!(state.step, Step::Pathway);
    assert!(state.selected_pathway.is_empty());
}

#[test]
fn recommendation_has_no_back_transition() {
    let graph = CourseGraph::builtin();
    let mut state = at_recommendation(&graph);

    assert!(matches!(
        state.back(),
        Err(TransitionError::NoBackTransition(Step::Recommendation))
    ));
    assert_eq!(state.step, Step::Recommendation);
}

#[test]
fn invalid_picks_leave_state_unchanged() {
    let graph = CourseGraph::builtin();
    let mut state = SelectionState::new();

    assert!(matches!(
        state.select_pathway(&graph, "honours"),
        Err(TransitionError::Catalog(_))
    ));
    assert_eq!(state, SelectionState::new());

    state.select_pathway(&graph, "workplace").expect("pathway");
    let before = state.clone();
    assert!(state.select_goal_course(&graph, "math31").is_err());
    assert_eq!(state, before);
}

#[test]
fn currently_taking_flows_through() {
    let graph = CourseGraph::builtin();
    let mut state = SelectionState::new();
    state.select_pathway(&graph, "physics").expect("pathway");
    state.select_goal_course(&graph, "physics30").expect("goal");
    state
        .select_prerequisite("physics20", PrereqStatus::CurrentlyTaking, Some(GradeReport::InProgress))
        .expect("prereq");

    let rec = state.recommendation(&graph).expect("recommendation");
    assert_eq!(rec.tier, Tier::Caution);
}
