//! Integration tests for the recommendation resolver over the built-in catalog

use pathway_advisor::advisor::resolve;
use pathway_advisor::catalog::{CatalogError, CourseGraph, NO_PREREQUISITE};
use pathway_advisor::models::{Color, GradeBand, GradeReport, PrereqStatus, Tier};

fn finished(graph: &CourseGraph, pathway: &str, goal: &str, prereq: &str, band: GradeBand) -> Tier {
    resolve(
        graph,
        pathway,
        goal,
        prereq,
        PrereqStatus::Finished,
        Some(GradeReport::Band(band)),
    )
    .expect("catalog ids are valid")
    .tier
}

#[test]
fn bands_at_or_above_ready_threshold_are_ready() {
    let graph = CourseGraph::builtin();
    let mut checked = 0;
    for pathway in graph.pathways() {
        for course in &pathway.courses {
            for option in &course.options {
                let Some(ready) = option.ready_threshold() else {
                    continue;
                };
                for band in GradeBand::STANDARD.iter().filter(|b| b.min >= ready) {
                    assert_eq!(
                        finished(&graph, &pathway.id, &course.id, &option.course, *band),
                        Tier::Ready,
                        "{}/{} after {} with {band}",
                        pathway.id,
                        course.id,
                        option.course
                    );
                    checked += 1;
                }
            }
        }
    }
    assert!(checked > 0);
}

#[test]
fn bands_below_lowest_threshold_are_never_ready() {
    let graph = CourseGraph::builtin();
    for pathway in graph.pathways() {
        for course in &pathway.courses {
            for option in &course.options {
                let lowest = option
                    .thresholds
                    .iter()
                    .map(|r| r.min_grade)
                    .filter(|&m| m > 0)
                    .min()
                    .unwrap_or(0);
                for band in GradeBand::STANDARD.iter().filter(|b| b.min < lowest) {
                    let tier = finished(&graph, &pathway.id, &course.id, &option.course, *band);
                    assert_ne!(tier, Tier::Ready, "{}/{} with {band}", course.id, option.course);
                    assert_ne!(tier, Tier::Caution, "{}/{} with {band}", course.id, option.course);
                }
            }
        }
    }
}

#[test]
fn none_is_missing_prereq_for_every_course_with_prerequisites() {
    let graph = CourseGraph::builtin();
    let statuses = [PrereqStatus::Finished, PrereqStatus::CurrentlyTaking, PrereqStatus::NoPrereq];
    for pathway in graph.pathways() {
        for course in &pathway.courses {
            for status in statuses {
                let rec = resolve(
                    &graph,
                    &pathway.id,
                    &course.id,
                    NO_PREREQUISITE,
                    status,
                    Some(GradeReport::Band(GradeBand::STANDARD[0])),
                )
                .expect("valid ids");
                let expected = if course.has_prerequisites() {
                    Tier::MissingPrereq
                } else {
                    Tier::Ready
                };
                assert_eq!(rec.tier, expected, "{}/{} ({status})", pathway.id, course.id);
            }
        }
    }
}

#[test]
fn math31_after_math30_1_at_70_is_ready() {
    let graph = CourseGraph::builtin();
    let rec = resolve(
        &graph,
        "academic",
        "math31",
        "math30-1",
        PrereqStatus::Finished,
        Some("70-79%".parse().expect("valid band")),
    )
    .expect("valid ids");

    assert_eq!(rec.tier, Tier::Ready);
    assert_eq!(rec.color, Color::Green);
    assert!(rec.message.contains("65%"), "message: {}", rec.message);
}

#[test]
fn math20_1_after_math10c_below_40_is_pathway_change() {
    let graph = CourseGraph::builtin();
    let rec = resolve(
        &graph,
        "academic",
        "math20-1",
        "math10c",
        PrereqStatus::Finished,
        Some("Below 40%".parse().expect("valid band")),
    )
    .expect("valid ids");

    assert_eq!(rec.tier, Tier::PathwayChange);
    assert!(rec.recommendation.contains("Math 15"), "{}", rec.recommendation);
    assert!(rec.recommendation.contains("Math 10-3"), "{}", rec.recommendation);
}

#[test]
fn currently_taking_uses_course_note_when_present() {
    let graph = CourseGraph::builtin();
    let special = resolve(
        &graph,
        "academic",
        "math31",
        "math30-1",
        PrereqStatus::CurrentlyTaking,
        Some(GradeReport::InProgress),
    )
    .expect("valid ids");
    let generic = resolve(
        &graph,
        "academic",
        "math30-1",
        "math20-1",
        PrereqStatus::CurrentlyTaking,
        Some(GradeReport::InProgress),
    )
    .expect("valid ids");

    assert_eq!(special.tier, Tier::Caution);
    assert_eq!(generic.tier, Tier::Caution);
    assert!(special.message.starts_with("Math 31 builds directly on Math 30-1"));
    assert!(generic.message.starts_with("You are currently taking Math 20-1"));
}

#[test]
fn unmapped_pair_is_review_not_error() {
    let graph = CourseGraph::builtin();
    let rec = resolve(
        &graph,
        "academic",
        "math31",
        "math20-2",
        PrereqStatus::Finished,
        Some("80-89%".parse().expect("valid band")),
    )
    .expect("unmapped pairs still resolve");
    assert_eq!(rec.tier, Tier::Review);
    assert!(rec.action.contains("Contact advising"));
}

#[test]
fn finished_without_band_is_unknown() {
    let graph = CourseGraph::builtin();
    let rec = resolve(
        &graph,
        "academic",
        "math30-1",
        "math20-1",
        PrereqStatus::Finished,
        Some(GradeReport::InProgress),
    )
    .expect("valid ids");
    assert_eq!(rec.tier, Tier::Unknown);
}

#[test]
fn cross_pathway_prerequisite_names_resolve() {
    let graph = CourseGraph::builtin();
    let rec = resolve(
        &graph,
        "physics",
        "physics30",
        "math20-2",
        PrereqStatus::Finished,
        Some("90-100%".parse().expect("valid band")),
    )
    .expect("valid ids");
    assert_eq!(rec.tier, Tier::TakePrereq);
    assert!(rec.recommendation.contains("Math 20-1"), "{}", rec.recommendation);
}

#[test]
fn unknown_ids_are_not_found_errors() {
    let graph = CourseGraph::builtin();
    assert!(matches!(
        resolve(&graph, "honours", "math31", "none", PrereqStatus::NoPrereq, None),
        Err(CatalogError::PathwayNotFound(_))
    ));
    assert!(matches!(
        resolve(&graph, "academic", "calc1", "none", PrereqStatus::NoPrereq, None),
        Err(CatalogError::CourseNotFound { .. })
    ));
}

#[test]
fn catalog_lists_courses_in_progression_order() {
    let graph = CourseGraph::builtin();
    let ids: Vec<&str> = graph
        .courses_in_order("academic")
        .expect("academic exists")
        .into_iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(ids, ["math10c", "math15", "math20-1", "math30-1", "math31"]);
}
