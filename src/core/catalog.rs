//! Course catalog
//!
//! A [`CourseGraph`] holds every pathway and its courses, keyed by
//! `(pathway, course id)`. The built-in catalog is compiled into the binary
//! from `assets/catalog.toml`; other catalogs can be loaded with
//! [`CourseGraph::from_toml`].

use crate::core::models::{Course, PrerequisiteDag};
use crate::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Embedded default catalog
const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.toml");

/// Pseudo course id a student picks when they have not taken any prerequisite
pub const NO_PREREQUISITE: &str = "none";

/// Errors raised by catalog lookups and loading
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No pathway with this id
    #[error("pathway '{0}' not found")]
    PathwayNotFound(String),
    /// The pathway exists but has no course with this id
    #[error("course '{course}' not found in pathway '{pathway}'")]
    CourseNotFound {
        /// Pathway that was searched
        pathway: String,
        /// Course id that was requested
        course: String,
    },
    /// The catalog text is not valid TOML or does not match the schema
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
    /// Structural problems found by [`CourseGraph::validate`]
    #[error("invalid catalog: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// One course sequence (e.g., the -1 academic math track)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pathway {
    /// Pathway id (e.g., "academic")
    pub id: String,

    /// Display name
    pub name: String,

    /// Progression order used when listing courses; may name ids the
    /// catalog does not define
    #[serde(default)]
    pub order: Vec<String>,

    /// Courses offered in this pathway
    #[serde(default)]
    pub courses: Vec<Course>,
}

impl Pathway {
    /// Find a course by id
    #[must_use]
    pub fn course(&self, course_id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == course_id)
    }

    /// Courses in progression order, skipping ids with no catalog entry
    #[must_use]
    pub fn courses_in_order(&self) -> Vec<&Course> {
        self.order.iter().filter_map(|id| self.course(id)).collect()
    }

    /// Build the prerequisite graph for this pathway
    ///
    /// Prerequisites defined in other pathways (e.g., Math 10C for Physics 20)
    /// appear as plain nodes.
    #[must_use]
    pub fn dag(&self) -> PrerequisiteDag {
        let mut dag = PrerequisiteDag::new();
        for course in &self.courses {
            dag.add_course(&course.id);
            for prereq in &course.prerequisites {
                dag.add_prerequisite(&course.id, prereq);
            }
        }
        dag
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    pathways: Vec<Pathway>,
}

/// Every pathway in the catalog, looked up by `(pathway, course id)`
#[derive(Debug, Clone)]
pub struct CourseGraph {
    pathways: Vec<Pathway>,
    index: HashMap<String, usize>,
}

impl CourseGraph {
    /// Build a graph from already-parsed pathways
    ///
    /// Later pathways with a duplicate id shadow earlier ones in lookups.
    #[must_use]
    pub fn new(pathways: Vec<Pathway>) -> Self {
        let index = pathways
            .iter()
            .enumerate()
            .map(|(idx, p)| (p.id.clone(), idx))
            .collect();
        Self { pathways, index }
    }

    /// Load the catalog compiled into the binary
    ///
    /// # Panics
    /// Panics if the embedded catalog is malformed. The catalog is checked by
    /// the test suite, so this only fires on a broken build.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_toml(BUILTIN_CATALOG).expect("embedded catalog must be valid")
    }

    /// Parse and validate a catalog from TOML text
    ///
    /// # Errors
    /// Returns [`CatalogError::Parse`] for malformed TOML and
    /// [`CatalogError::Invalid`] when [`validate`](Self::validate) fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(toml_str)?;
        let graph = Self::new(file.pathways);
        graph.validate()?;
        debug!(
            "Catalog loaded: {} pathways, {} courses",
            graph.pathways.len(),
            graph.pathways.iter().map(|p| p.courses.len()).sum::<usize>()
        );
        Ok(graph)
    }

    /// All pathways in declaration order
    pub fn pathways(&self) -> impl Iterator<Item = &Pathway> {
        self.pathways.iter()
    }

    /// Look up a pathway
    ///
    /// # Errors
    /// Returns [`CatalogError::PathwayNotFound`] for an unknown id.
    pub fn get_pathway(&self, pathway_id: &str) -> Result<&Pathway, CatalogError> {
        self.index
            .get(pathway_id)
            .and_then(|&idx| self.pathways.get(idx))
            .ok_or_else(|| CatalogError::PathwayNotFound(pathway_id.to_string()))
    }

    /// Look up a course within a pathway
    ///
    /// # Errors
    /// Returns [`CatalogError::PathwayNotFound`] or
    /// [`CatalogError::CourseNotFound`].
    pub fn get_course(&self, pathway_id: &str, course_id: &str) -> Result<&Course, CatalogError> {
        self.get_pathway(pathway_id)?
            .course(course_id)
            .ok_or_else(|| CatalogError::CourseNotFound {
                pathway: pathway_id.to_string(),
                course: course_id.to_string(),
            })
    }

    /// Courses of a pathway in progression order
    ///
    /// # Errors
    /// Returns [`CatalogError::PathwayNotFound`] for an unknown pathway.
    pub fn courses_in_order(&self, pathway_id: &str) -> Result<Vec<&Course>, CatalogError> {
        Ok(self.get_pathway(pathway_id)?.courses_in_order())
    }

    /// Display name for a course id, searching the given pathway first and
    /// then every other pathway; falls back to the id itself
    #[must_use]
    pub fn display_name<'a>(&'a self, pathway_id: &str, course_id: &'a str) -> &'a str {
        if let Ok(course) = self.get_course(pathway_id, course_id) {
            return &course.name;
        }
        self.pathways
            .iter()
            .find_map(|p| p.course(course_id))
            .map_or(course_id, |c| c.name.as_str())
    }

    /// Check the catalog's structural invariants
    ///
    /// - every prerequisite, option and alternative course id is defined in
    ///   some pathway
    /// - threshold rules within an option have strictly decreasing
    ///   `min_grade`, and their tiers never improve as `min_grade` falls
    /// - no pathway's prerequisite graph contains a cycle
    ///
    /// # Errors
    /// Returns [`CatalogError::Invalid`] listing every violation found.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let known: HashSet<&str> = self
            .pathways
            .iter()
            .flat_map(|p| p.courses.iter().map(|c| c.id.as_str()))
            .collect();

        let mut problems = Vec::new();

        for pathway in &self.pathways {
            let mut seen = HashSet::new();
            for course in &pathway.courses {
                if !seen.insert(course.id.as_str()) {
                    problems.push(format!(
                        "Pathway '{}': duplicate course '{}'",
                        pathway.id, course.id
                    ));
                }

                for prereq in &course.prerequisites {
                    if !known.contains(prereq.as_str()) {
                        problems.push(format!(
                            "Course '{}': prerequisite '{}' not found",
                            course.id, prereq
                        ));
                    }
                }

                for option in &course.options {
                    if !known.contains(option.course.as_str()) {
                        problems.push(format!(
                            "Course '{}': prerequisite option '{}' not found",
                            course.id, option.course
                        ));
                    }
                    if !option.thresholds_are_ordered() {
                        problems.push(format!(
                            "Course '{}': thresholds for '{}' are not strictly decreasing",
                            course.id, option.course
                        ));
                    }
                    if !option.tiers_worsen() {
                        problems.push(format!(
                            "Course '{}': thresholds for '{}' give a better tier to a lower grade",
                            course.id, option.course
                        ));
                    }
                    for rule in &option.thresholds {
                        if !rule.tier.is_grade_outcome() {
                            problems.push(format!(
                                "Course '{}': tier '{}' cannot be selected by grade",
                                course.id, rule.tier
                            ));
                        }
                        for alt in &rule.alternatives {
                            if !known.contains(alt.as_str()) {
                                problems.push(format!(
                                    "Course '{}': alternative '{}' not found",
                                    course.id, alt
                                ));
                            }
                        }
                    }
                }
            }

            if let Err(stuck) = pathway.dag().topological_order() {
                problems.push(format!(
                    "Pathway '{}': prerequisite cycle among {}",
                    pathway.id,
                    stuck.join(", ")
                ));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::Invalid(problems))
        }
    }
}

impl Default for CourseGraph {
    fn default() -> Self {
        Self::builtin()
    }
}
