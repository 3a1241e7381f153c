//! Step-by-step selection state
//!
//! Tracks a student's picks through `pathway → goal → prereq →
//! recommendation`. The state is owned by whichever front end drives it and
//! is passed by reference to the resolver; nothing here is global.
//!
//! The recommendation step has no `back`; only [`SelectionState::reset`]
//! leaves it.

use super::resolver::{resolve, Recommendation};
use crate::core::catalog::{CatalogError, CourseGraph};
use crate::core::models::{GradeReport, PrereqStatus};
use crate::debug;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Which question the student is answering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// Choose a pathway
    Pathway,
    /// Choose a goal course
    Goal,
    /// Report prerequisite status and grade
    Prereq,
    /// Show the recommendation
    Recommendation,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pathway => "pathway",
            Self::Goal => "goal",
            Self::Prereq => "prereq",
            Self::Recommendation => "recommendation",
        };
        f.write_str(name)
    }
}

/// Errors from invalid transitions
#[derive(Debug, Error)]
pub enum TransitionError {
    /// The action is not valid at the current step
    #[error("cannot {action} at the {step} step")]
    WrongStep {
        /// Attempted action
        action: &'static str,
        /// Current step
        step: Step,
    },
    /// No back transition from this step
    #[error("no back transition from the {0} step")]
    NoBackTransition(Step),
    /// The picked pathway or course does not exist
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// The student's prerequisite answer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrerequisiteSelection {
    /// Prerequisite course id, or `"none"`
    pub course: Option<String>,
    /// Status in that course
    pub status: Option<PrereqStatus>,
    /// Reported grade
    pub grade: Option<GradeReport>,
}

impl PrerequisiteSelection {
    /// True when nothing has been reported
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.course.is_none() && self.status.is_none() && self.grade.is_none()
    }
}

/// Per-session selection state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    /// Current step
    pub step: Step,
    /// Chosen pathway id, empty until picked
    pub selected_pathway: String,
    /// Chosen goal course id, empty until picked
    pub selected_goal_course: String,
    /// Reported prerequisite details
    pub prerequisite_status: PrerequisiteSelection,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionState {
    /// Fresh state at the pathway step
    #[must_use]
    pub const fn new() -> Self {
        Self {
            step: Step::Pathway,
            selected_pathway: String::new(),
            selected_goal_course: String::new(),
            prerequisite_status: PrerequisiteSelection {
                course: None,
                status: None,
                grade: None,
            },
        }
    }

    fn expect_step(&self, expected: Step, action: &'static str) -> Result<(), TransitionError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(TransitionError::WrongStep {
                action,
                step: self.step,
            })
        }
    }

    /// Pick a pathway and advance to the goal step
    ///
    /// # Errors
    /// Fails outside the pathway step or for an unknown pathway id.
    pub fn select_pathway(&mut self, graph: &CourseGraph, pathway_id: &str) -> Result<(), TransitionError> {
        self.expect_step(Step::Pathway, "select a pathway")?;
        graph.get_pathway(pathway_id)?;
        self.selected_pathway = pathway_id.to_string();
        self.step = Step::Goal;
        debug!("Selection: pathway '{pathway_id}'");
        Ok(())
    }

    /// Pick a goal course and advance to the prerequisite step
    ///
    /// # Errors
    /// Fails outside the goal step or when the course is not in the selected
    /// pathway.
    pub fn select_goal_course(&mut self, graph: &CourseGraph, course_id: &str) -> Result<(), TransitionError> {
        self.expect_step(Step::Goal, "select a goal course")?;
        graph.get_course(&self.selected_pathway, course_id)?;
        self.selected_goal_course = course_id.to_string();
        self.step = Step::Prereq;
        debug!("Selection: goal '{course_id}'");
        Ok(())
    }

    /// Report prerequisite details and advance to the recommendation step
    ///
    /// # Errors
    /// Fails outside the prerequisite step.
    pub fn select_prerequisite(
        &mut self,
        course_id: &str,
        status: PrereqStatus,
        grade: Option<GradeReport>,
    ) -> Result<(), TransitionError> {
        self.expect_step(Step::Prereq, "report a prerequisite")?;
        self.prerequisite_status = PrerequisiteSelection {
            course: Some(course_id.to_string()),
            status: Some(status),
            grade,
        };
        self.step = Step::Recommendation;
        debug!("Selection: prerequisite '{course_id}' ({status})");
        Ok(())
    }

    /// Step back one screen, clearing the pick made on the screen we return to
    ///
    /// # Errors
    /// Fails at the pathway step (nothing before it) and at the
    /// recommendation step (only [`reset`](Self::reset) leaves it).
    pub fn back(&mut self) -> Result<(), TransitionError> {
        match self.step {
            Step::Goal => {
                self.selected_pathway.clear();
                self.step = Step::Pathway;
            }
            Step::Prereq => {
                self.selected_goal_course.clear();
                self.step = Step::Goal;
            }
            step @ (Step::Pathway | Step::Recommendation) => {
                return Err(TransitionError::NoBackTransition(step));
            }
        }
        Ok(())
    }

    /// Return to the pathway step and clear every selection
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Compute the recommendation for the current selections
    ///
    /// Recomputed on every call.
    ///
    /// # Errors
    /// Fails before the recommendation step, or if the catalog no longer
    /// contains the selected pathway or goal.
    pub fn recommendation(&self, graph: &CourseGraph) -> Result<Recommendation, TransitionError> {
        self.expect_step(Step::Recommendation, "show a recommendation")?;
        let prereq = &self.prerequisite_status;
        let rec = resolve(
            graph,
            &self.selected_pathway,
            &self.selected_goal_course,
            prereq.course.as_deref().unwrap_or_default(),
            prereq.status.unwrap_or(PrereqStatus::NoPrereq),
            prereq.grade,
        )?;
        Ok(rec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Tier;

    #[test]
    fn test_initial_state() {
        let state = SelectionState::new();
        assert_eq!(state.step, Step::Pathway);
        assert!(state.selected_pathway.is_empty());
        assert!(state.selected_goal_course.is_empty());
        assert!(state.prerequisite_status.is_empty());
        assert_eq!(state, SelectionState::default());
    }

    #[test]
    fn test_happy_path() {
        let graph = CourseGraph::builtin();
        let mut state = SelectionState::new();
        state.select_pathway(&graph, "academic").unwrap();
        assert_eq!(state.step, Step::Goal);
        state.select_goal_course(&graph, "math31").unwrap();
        assert_eq!(state.step, Step::Prereq);
        state
            .select_prerequisite("math30-1", PrereqStatus::Finished, Some("80-89%".parse().unwrap()))
            .unwrap();
        assert_eq!(state.step, Step::Recommendation);
        assert_eq!(state.recommendation(&graph).unwrap().tier, Tier::Ready);
    }

    #[test]
    fn test_out_of_order_picks_rejected() {
        let graph = CourseGraph::builtin();
        let mut state = SelectionState::new();
        assert!(matches!(
            state.select_goal_course(&graph, "math31"),
            Err(TransitionError::WrongStep { step: Step::Pathway, .. })
        ));
        assert!(state
            .select_prerequisite("none", PrereqStatus::NoPrereq, None)
            .is_err());
        assert!(state.recommendation(&graph).is_err());
        assert_eq!(state, SelectionState::new());
    }

    #[test]
    fn test_back_transitions() {
        let graph = CourseGraph::builtin();
        let mut state = SelectionState::new();
        assert!(matches!(state.back(), Err(TransitionError::NoBackTransition(Step::Pathway))));

        state.select_pathway(&graph, "applied").unwrap();
        state.select_goal_course(&graph, "math30-2").unwrap();
        state.back().unwrap();
        assert_eq!(state.step, Step::Goal);
        assert!(state.selected_goal_course.is_empty());
        assert_eq!(state.selected_pathway, "applied");

        state.back().unwrap();
        assert_eq!(state.step, Step::Pathway);
        assert!(state.selected_pathway.is_empty());
    }

    #[test]
    fn test_no_back_from_recommendation() {
        let graph = CourseGraph::builtin();
        let mut state = SelectionState::new();
        state.select_pathway(&graph, "workplace").unwrap();
        state.select_goal_course(&graph, "math20-3").unwrap();
        state.select_prerequisite("none", PrereqStatus::NoPrereq, None).unwrap();
        assert!(matches!(
            state.back(),
            Err(TransitionError::NoBackTransition(Step::Recommendation))
        ));
        state.reset();
        assert_eq!(state, SelectionState::new());
    }

    #[test]
    fn test_unknown_ids_do_not_advance() {
        let graph = CourseGraph::builtin();
        let mut state = SelectionState::new();
        assert!(matches!(
            state.select_pathway(&graph, "chemistry"),
            Err(TransitionError::Catalog(CatalogError::PathwayNotFound(_)))
        ));
        assert_eq!(state.step, Step::Pathway);

        state.select_pathway(&graph, "workplace").unwrap();
        assert!(state.select_goal_course(&graph, "math31").is_err());
        assert_eq!(state.step, Step::Goal);
    }
}
