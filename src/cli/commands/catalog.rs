//! Catalog listing

use pathway_advisor::catalog::{CourseGraph, Pathway};
use std::io::{self, Write};

/// Print one pathway, or every pathway when `pathway` is `None`
///
/// # Errors
/// Returns a message for an unknown pathway id or a failed write.
pub fn run(graph: &CourseGraph, pathway: Option<&str>) -> Result<(), String> {
    let selected: Vec<&Pathway> = match pathway {
        Some(id) => vec![graph.get_pathway(id).map_err(|e| e.to_string())?],
        None => graph.pathways().collect(),
    };
    let mut out = io::stdout().lock();
    selected
        .into_iter()
        .try_for_each(|p| write_pathway(&mut out, graph, p))
        .map_err(|e| e.to_string())
}

/// Print one course with everything it requires and everything it unlocks
///
/// # Errors
/// Returns a message for unknown ids or a failed write.
pub fn run_course(graph: &CourseGraph, pathway_id: &str, course_id: &str) -> Result<(), String> {
    let pathway = graph.get_pathway(pathway_id).map_err(|e| e.to_string())?;
    graph
        .get_course(pathway_id, course_id)
        .map_err(|e| e.to_string())?;
    write_course(&mut io::stdout().lock(), graph, pathway, course_id).map_err(|e| e.to_string())
}

/// Write a course's transitive prerequisites and the courses it leads to
///
/// # Errors
/// Returns any error from writing to `out`.
pub fn write_course(out: &mut impl Write, graph: &CourseGraph, pathway: &Pathway, course_id: &str) -> io::Result<()> {
    let dag = pathway.dag();
    let name = |id: &str| graph.display_name(&pathway.id, id).to_string();

    writeln!(out, "\n=== {} ({}) ===", name(course_id), pathway.name)?;
    let chain: Vec<String> = dag.prerequisite_chain(course_id).iter().map(|id| name(id.as_str())).collect();
    if chain.is_empty() {
        writeln!(out, "  Requires: nothing")?;
    } else {
        writeln!(out, "  Requires: {}", chain.join(", "))?;
    }
    let next: Vec<String> = dag
        .unlocked_by(course_id)
        .unwrap_or_default()
        .iter()
        .map(|id| name(id.as_str()))
        .collect();
    if next.is_empty() {
        writeln!(out, "  Leads to: nothing further in this pathway")
    } else {
        writeln!(out, "  Leads to: {}", next.join(", "))
    }
}

/// Write a pathway's courses in progression order with their prerequisites
///
/// # Errors
/// Returns any error from writing to `out`.
pub fn write_pathway(out: &mut impl Write, graph: &CourseGraph, pathway: &Pathway) -> io::Result<()> {
    writeln!(out, "\n=== {} ({}) ===", pathway.name, pathway.id)?;
    for (position, course) in pathway.courses_in_order().iter().enumerate() {
        write!(out, "  {}. {} [{}]", position + 1, course.name, course.id)?;
        if course.has_prerequisites() {
            let names: Vec<&str> = course
                .prerequisites
                .iter()
                .map(|p| graph.display_name(&pathway.id, p))
                .collect();
            write!(out, "  requires {}", names.join(", "))?;
        }
        writeln!(out)?;
        if !course.description.is_empty() {
            writeln!(out, "     {}", course.description)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physics_lists_cross_pathway_prerequisites() {
        let graph = CourseGraph::builtin();
        let physics = graph.get_pathway("physics").unwrap();
        let mut buf = Vec::new();
        write_pathway(&mut buf, &graph, physics).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("[physics20]"));
        assert!(text.contains("requires Science 10, Math 10C"));
    }

    #[test]
    fn test_course_chain_is_transitive() {
        let graph = CourseGraph::builtin();
        let academic = graph.get_pathway("academic").unwrap();
        let mut buf = Vec::new();
        write_course(&mut buf, &graph, academic, "math30-1").unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("\n=== Math 30-1 ("), "{text}");
        assert_eq!(text.lines().nth(1).map(|l| l.starts_with("===")), Some(true));
        assert!(text.contains("Requires: Math 20-1, Math 10C"), "{text}");
        assert!(text.contains("Leads to: Math 31"), "{text}");
    }

    #[test]
    fn test_academic_skips_uncatalogued_order_entries() {
        let graph = CourseGraph::builtin();
        let academic = graph.get_pathway("academic").unwrap();
        let mut buf = Vec::new();
        write_pathway(&mut buf, &graph, academic).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(!text.contains("[math9]"));
        assert!(text.contains("1. Math 10C [math10c]"));
    }
}
