//! Recommendation resolver
//!
//! Maps a goal course, a prerequisite course, the student's status in that
//! prerequisite and their reported grade to a [`Recommendation`]. Pure
//! function over the catalog; recommendations are rebuilt on every call.

use super::templates::{bundle, Placeholders};
use crate::core::catalog::{CatalogError, CourseGraph, NO_PREREQUISITE};
use crate::core::models::{Color, Course, GradeReport, PrereqStatus, PrerequisiteOption, Tier};
use crate::debug;
use serde::Serialize;

/// Outcome shown to the student
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    /// Categorical outcome
    pub tier: Tier,
    /// Heading
    pub title: String,
    /// Main message with grade and course names filled in
    pub message: String,
    /// What we recommend
    pub recommendation: String,
    /// Concrete next step
    pub action: String,
    /// Display color tag
    pub color: Color,
}

impl Recommendation {
    fn build(tier: Tier, values: &Placeholders) -> Self {
        let b = bundle(tier);
        Self {
            tier,
            title: b.title.to_string(),
            message: values.fill(b.message),
            recommendation: values.fill(b.recommendation),
            action: values.fill(b.action),
            color: b.color,
        }
    }

    fn with_message(mut self, message: String) -> Self {
        self.message = message;
        self
    }
}

/// Resolve a recommendation for one goal/prerequisite pairing
///
/// Rules, in precedence order:
/// 1. goal course without prerequisites → `Ready`
/// 2. prerequisite `"none"` → `MissingPrereq`
/// 3. currently taking the prerequisite → `Caution`
/// 4. finished with a grade band → tier from the pair's threshold table,
///    or `Review` when the pair has no table
/// 5. anything else → `Unknown`
///
/// # Arguments
/// * `graph` - Course catalog
/// * `pathway` - Pathway id the goal course belongs to
/// * `goal_id` - Goal course id
/// * `prereq_id` - Prerequisite course id, or `"none"`
/// * `status` - Student's status in the prerequisite
/// * `grade` - Reported grade, if any
///
/// # Errors
/// Returns [`CatalogError`] when the pathway or goal course is unknown.
/// Unknown prerequisite pairings are not errors; they resolve to `Review`.
pub fn resolve(
    graph: &CourseGraph,
    pathway: &str,
    goal_id: &str,
    prereq_id: &str,
    status: PrereqStatus,
    grade: Option<GradeReport>,
) -> Result<Recommendation, CatalogError> {
    let goal = graph.get_course(pathway, goal_id)?;

    let mut values = Placeholders {
        grade: grade.map(|g| g.to_string()).unwrap_or_default(),
        goal: goal.name.clone(),
        prereq: graph.display_name(pathway, prereq_id).to_string(),
        ..Placeholders::default()
    };

    if !goal.has_prerequisites() {
        debug!("{goal_id}: no prerequisites, ready");
        return Ok(Recommendation::build(Tier::Ready, &values)
            .with_message(format!("{} has no prerequisites.", goal.name)));
    }

    if prereq_id == NO_PREREQUISITE {
        debug!("{goal_id}: prerequisite not taken");
        values.prereq = required_names(graph, pathway, goal);
        return Ok(Recommendation::build(Tier::MissingPrereq, &values));
    }

    let option = goal.option_for(prereq_id);
    if let Some(opt) = option {
        values.threshold = threshold_label(opt);
    }

    let tier = match (status, grade) {
        (PrereqStatus::CurrentlyTaking, _) => {
            debug!("{goal_id} after {prereq_id}: currently taking");
            let generic = format!(
                "You are currently taking {}. Your final grade will show whether you're ready for {}; aim for at least {}.",
                values.prereq, values.goal, values.threshold
            );
            let message = option
                .and_then(|opt| opt.currently_taking_note.clone())
                .unwrap_or(generic);
            return Ok(Recommendation::build(Tier::Caution, &values).with_message(message));
        }
        (PrereqStatus::Finished, Some(GradeReport::Band(band))) => {
            match option.filter(|opt| !opt.thresholds.is_empty()) {
                Some(opt) => {
                    let rule = opt.rule_for(band.min);
                    if let Some(rule) = rule {
                        values.alternatives = join_names(graph, pathway, &rule.alternatives);
                    }
                    rule.map_or(Tier::Repeat, |r| r.tier)
                }
                None => Tier::Review,
            }
        }
        _ => Tier::Unknown,
    };

    debug!("{goal_id} after {prereq_id} ({status}, {}): {tier}", values.grade);
    Ok(Recommendation::build(tier, &values))
}

fn threshold_label(option: &PrerequisiteOption) -> String {
    option
        .ready_threshold()
        .map_or_else(|| "the recommended minimum".to_string(), |t| format!("{t}%"))
}

fn required_names(graph: &CourseGraph, pathway: &str, goal: &Course) -> String {
    goal.prerequisites
        .iter()
        .map(|id| graph.display_name(pathway, id))
        .collect::<Vec<_>>()
        .join(" and ")
}

fn join_names(graph: &CourseGraph, pathway: &str, ids: &[String]) -> String {
    ids.iter()
        .map(|id| graph.display_name(pathway, id))
        .collect::<Vec<_>>()
        .join(" or ")
}
