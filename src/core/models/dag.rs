//! Prerequisite graph for a pathway

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

/// Directed graph of course prerequisites
///
/// `requires` maps a course to the courses it needs; `unlocks` is the
/// reverse edge set. Course ids are kept in insertion order so traversal
/// output is stable.
#[derive(Debug, Clone, Default)]
pub struct PrerequisiteDag {
    requires: HashMap<String, Vec<String>>,
    unlocks: HashMap<String, Vec<String>>,
    courses: Vec<String>,
}

impl PrerequisiteDag {
    /// Create an empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a course node (no-op if already present)
    pub fn add_course(&mut self, course_id: &str) {
        if !self.requires.contains_key(course_id) {
            self.courses.push(course_id.to_string());
            self.requires.insert(course_id.to_string(), Vec::new());
            self.unlocks.insert(course_id.to_string(), Vec::new());
        }
    }

    /// Record that `course_id` requires `prereq_id`
    pub fn add_prerequisite(&mut self, course_id: &str, prereq_id: &str) {
        self.add_course(course_id);
        self.add_course(prereq_id);

        if let Some(reqs) = self.requires.get_mut(course_id) {
            if !reqs.iter().any(|r| r == prereq_id) {
                reqs.push(prereq_id.to_string());
            }
        }
        if let Some(next) = self.unlocks.get_mut(prereq_id) {
            if !next.iter().any(|c| c == course_id) {
                next.push(course_id.to_string());
            }
        }
    }

    /// Direct prerequisites of a course
    #[must_use]
    pub fn prerequisites_of(&self, course_id: &str) -> Option<&[String]> {
        self.requires.get(course_id).map(Vec::as_slice)
    }

    /// Courses that directly require `course_id`
    #[must_use]
    pub fn unlocked_by(&self, course_id: &str) -> Option<&[String]> {
        self.unlocks.get(course_id).map(Vec::as_slice)
    }

    /// Number of course nodes
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Whether the graph has a node for `course_id`
    #[must_use]
    pub fn contains_course(&self, course_id: &str) -> bool {
        self.requires.contains_key(course_id)
    }

    /// Every course that must come before `course_id`, nearest first
    #[must_use]
    pub fn prerequisite_chain(&self, course_id: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut chain = Vec::new();
        let mut queue: VecDeque<&str> = self
            .prerequisites_of(course_id)
            .map(|reqs| reqs.iter().map(String::as_str).collect())
            .unwrap_or_default();

        while let Some(next) = queue.pop_front() {
            if !seen.insert(next) {
                continue;
            }
            chain.push(next.to_string());
            if let Some(reqs) = self.requires.get(next) {
                queue.extend(reqs.iter().map(String::as_str));
            }
        }

        chain
    }

    /// Kahn's algorithm over the graph
    ///
    /// # Errors
    ///
    /// Returns the ids left unprocessed when the graph contains a cycle.
    pub fn topological_order(&self) -> Result<Vec<String>, Vec<String>> {
        let mut indegree: HashMap<&str, usize> = self
            .courses
            .iter()
            .map(|c| (c.as_str(), self.requires.get(c).map_or(0, Vec::len)))
            .collect();

        let mut ready: VecDeque<&str> = self
            .courses
            .iter()
            .map(String::as_str)
            .filter(|c| indegree.get(c).copied() == Some(0))
            .collect();

        let mut order = Vec::with_capacity(self.courses.len());
        while let Some(course) = ready.pop_front() {
            order.push(course.to_string());
            for next in self.unlocks.get(course).into_iter().flatten() {
                if let Some(count) = indegree.get_mut(next.as_str()) {
                    *count -= 1;
                    if *count == 0 {
                        ready.push_back(next.as_str());
                    }
                }
            }
        }

        if order.len() == self.courses.len() {
            Ok(order)
        } else {
            Err(self
                .courses
                .iter()
                .filter(|c| !order.contains(c))
                .cloned()
                .collect())
        }
    }
}

impl fmt::Display for PrerequisiteDag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Prerequisite graph ({} courses):", self.courses.len())?;
        for course in &self.courses {
            match self.requires.get(course) {
                Some(reqs) if !reqs.is_empty() => writeln!(f, "  {course} → {}", reqs.join(", "))?,
                _ => writeln!(f, "  {course} → (no prerequisites)")?,
            }
        }
        Ok(())
    }
}
