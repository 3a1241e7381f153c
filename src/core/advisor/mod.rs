//! Pathway recommendation engine
//!
//! - [`resolver`]: decision table from (goal, prerequisite, status, grade) to
//!   a [`Recommendation`]
//! - [`selection`]: the per-session step machine that collects those inputs
//! - [`templates`]: fixed wording and colors per tier

pub mod resolver;
pub mod selection;
pub mod templates;

pub use resolver::{resolve, Recommendation};
pub use selection::{PrerequisiteSelection, SelectionState, Step, TransitionError};
