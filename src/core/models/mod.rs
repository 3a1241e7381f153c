//! Data models for `pathway_advisor`

pub mod course;
pub mod dag;
pub mod grade;
pub mod tier;

pub use course::{Course, PrerequisiteOption, ThresholdRule};
pub use dag::PrerequisiteDag;
pub use grade::{GradeBand, GradeParseError, GradeReport, PrereqStatus};
pub use tier::{Color, Tier};
